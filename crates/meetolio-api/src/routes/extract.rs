//! Request extractors

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use meetolio_auth::Identity;

use crate::error::ApiError;

/// JSON body whose rejection uses the API error shape
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose rejection uses the API error shape
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Extractor for the authenticated user (required)
///
/// Reads the [`Identity`] attached by the authentication middleware.
pub struct RequireAuth(pub i64);

impl RequireAuth {
    pub fn identity(&self) -> Identity {
        Identity::Authenticated(self.0)
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Authenticated(user_id)) => Ok(RequireAuth(*user_id)),
            _ => Err(ApiError::Unauthorized),
        }
    }
}
