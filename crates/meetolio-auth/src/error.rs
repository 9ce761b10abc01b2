//! Authentication error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Fixed message returned when a protected route is hit without a valid identity
pub const UNAUTHORIZED_MESSAGE: &str = "User authentication failed";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User authentication failed")]
    Unauthorized,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthorized | AuthError::InvalidToken | AuthError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            AuthError::Forbidden => "Insufficient permissions",
            AuthError::PasswordHash(_) => "Internal server error",
            _ => UNAUTHORIZED_MESSAGE,
        };

        let body = axum::Json(json!({
            "status": status.as_u16(),
            "message": message
        }));

        (status, body).into_response()
    }
}
