//! Meetolio Authentication and Authorization
//!
//! This crate provides stateless JWT authentication, password hashing,
//! and the request-level identity and authorization checks for Meetolio.
//!
//! Identity resolution ([`auth_middleware`]) never rejects a request; the
//! authorization gate ([`require_authenticated`]) and the ownership guard
//! ([`ensure_owner`]) are where requests get turned away.

pub mod error;
pub mod identity;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use error::AuthError;
pub use identity::{ensure_owner, Identity};
pub use jwt::{Claims, JwtManager};
pub use middleware::{auth_middleware, require_authenticated};
pub use password::{hash_password, verify_password, DUMMY_HASH};
