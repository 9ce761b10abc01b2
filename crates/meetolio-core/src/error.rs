//! Core error types

use thiserror::Error;

pub const DUPLICATE_EMAIL: &str = "Email address is already registered";
pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";
pub const ACCOUNT_NOT_FOUND: &str = "User account not found";
pub const PASSWORD_MISMATCH: &str = "Password does not match";
pub const PORTFOLIO_NOT_FOUND: &str = "Portfolio not found";
pub const PORTFOLIO_EXISTS: &str = "Portfolio already exists";

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] meetolio_db::DbError),

    #[error("Auth error: {0}")]
    Auth(#[from] meetolio_auth::AuthError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Map a store-level duplicate onto the business-level one with `message`
    pub(crate) fn duplicate_or(err: meetolio_db::DbError, message: &str) -> Self {
        match err {
            meetolio_db::DbError::Duplicate(_) => CoreError::Duplicate(message.to_string()),
            other => CoreError::Database(other),
        }
    }
}
