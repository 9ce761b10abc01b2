//! API error types

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use meetolio_auth::AuthError;
use meetolio_core::CoreError;
use meetolio_db::DbError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

fn auth_parts(e: &AuthError) -> (StatusCode, String) {
    match e {
        AuthError::Forbidden => (StatusCode::FORBIDDEN, e.to_string()),
        AuthError::PasswordHash(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string()),
        _ => (
            StatusCode::UNAUTHORIZED,
            meetolio_auth::error::UNAUTHORIZED_MESSAGE.to_string(),
        ),
    }
}

fn db_parts(e: &DbError) -> (StatusCode, String) {
    match e {
        DbError::Duplicate(msg) => (StatusCode::CONFLICT, msg.clone()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string()),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                meetolio_auth::error::UNAUTHORIZED_MESSAGE.to_string(),
            ),
            ApiError::Core(e) => match e {
                CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
                CoreError::Duplicate(msg) => (StatusCode::CONFLICT, msg.clone()),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
                CoreError::Auth(e) => auth_parts(e),
                CoreError::Database(e) => db_parts(e),
            },
            ApiError::Auth(e) => auth_parts(e),
        };

        // Details of server-side failures stay in the log
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = axum::Json(json!({
            "status": status.as_u16(),
            "message": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_business_failures_map_to_status_codes() {
        let cases = [
            (CoreError::NotFound("gone".into()), 404),
            (CoreError::Duplicate("taken".into()), 409),
            (CoreError::Unauthorized("bad".into()), 401),
            (CoreError::Forbidden("nope".into()), 403),
            (CoreError::Auth(AuthError::Forbidden), 403),
            (CoreError::Auth(AuthError::Unauthorized), 401),
        ];

        for (err, expected) in cases {
            let (status, body) = render(ApiError::from(err)).await;
            assert_eq!(status.as_u16(), expected);
            assert_eq!(body["status"], expected);
            assert!(body["message"].is_string());
        }
    }

    #[tokio::test]
    async fn test_internal_details_are_not_leaked() {
        let err = ApiError::Core(CoreError::Database(DbError::Migration(
            "table users is locked".into(),
        )));
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], INTERNAL_MESSAGE);

        let err = ApiError::Core(CoreError::Auth(AuthError::PasswordHash("rng failure".into())));
        let (_, body) = render(err).await;
        assert_eq!(body["message"], INTERNAL_MESSAGE);
    }
}
