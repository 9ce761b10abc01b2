//! Meetolio Core Business Logic
//!
//! This crate provides the services behind the HTTP API: registration and
//! login, account self-service, and portfolio publishing.

pub mod account;
pub mod auth;
pub mod error;
pub mod portfolio;

pub use account::AccountService;
pub use auth::AuthService;
pub use error::CoreError;
pub use portfolio::PortfolioService;
