//! Meetolio REST API
//!
//! This crate provides the Axum-based HTTP API for Meetolio: signup and
//! login, account self-service, and public portfolios.

pub mod error;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::{AppState, MetricsHandle};
