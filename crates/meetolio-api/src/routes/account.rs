//! Account self-service routes (authenticated)

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

use super::extract::{ApiJson, RequireAuth};
use super::types::{AccountResponse, EmailUpdateRequest, PasswordUpdateRequest};

/// GET /account/me
async fn get_my_account(
    RequireAuth(user_id): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, ApiError> {
    let user = state.accounts.get_account(user_id).await?;
    Ok(Json(user.into()))
}

/// PUT /account/me/email
async fn update_my_email(
    RequireAuth(user_id): RequireAuth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<EmailUpdateRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    debug!("Email change requested by user {}", user_id);

    let user = state
        .accounts
        .update_email(user_id, &request.email, &request.password)
        .await?;
    Ok(Json(user.into()))
}

/// PUT /account/me/password
async fn update_my_password(
    RequireAuth(user_id): RequireAuth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PasswordUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    debug!("Password change requested by user {}", user_id);

    state
        .accounts
        .update_password(user_id, &request.current_password, &request.new_password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /account/me
async fn delete_my_account(
    RequireAuth(user_id): RequireAuth,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.accounts.delete_account(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create account routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/account/me", get(get_my_account).delete(delete_my_account))
        .route("/account/me/email", put(update_my_email))
        .route("/account/me/password", put(update_my_password))
}
