//! Signup and login routes

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

use super::extract::ApiJson;
use super::types::{LoginRequest, SignupRequest, TokenResponse};

/// POST /signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let user_id = state.auth.register(&request.email, &request.password).await?;
    let access_token = state.jwt.issue(user_id)?;

    metrics::counter!("meetolio_signups_total").increment(1);
    info!("Issued signup token for user {}", user_id);

    Ok((StatusCode::CREATED, Json(TokenResponse { access_token })))
}

/// POST /login
async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user_id = match state.auth.login(&request.email, &request.password).await {
        Ok(id) => id,
        Err(e) => {
            metrics::counter!("meetolio_logins_total", "outcome" => "failure").increment(1);
            return Err(e.into());
        }
    };
    let access_token = state.jwt.issue(user_id)?;

    metrics::counter!("meetolio_logins_total", "outcome" => "success").increment(1);

    Ok(Json(TokenResponse { access_token }))
}

/// Create auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}
