//! Portfolio routes

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use meetolio_auth::ensure_owner;

use crate::error::ApiError;
use crate::state::AppState;

use super::extract::{ApiJson, ApiPath, RequireAuth};
use super::types::{PortfolioCreateRequest, PortfolioFields, PortfolioResponse};

/// GET /portfolio/{user_id}
async fn get_portfolio(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    let portfolio = state.portfolios.get_portfolio(user_id).await?;
    Ok(Json(portfolio.into()))
}

/// POST /portfolio
async fn create_portfolio(
    auth: RequireAuth,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PortfolioCreateRequest>,
) -> Result<(StatusCode, Json<PortfolioResponse>), ApiError> {
    let portfolio = state
        .portfolios
        .create_portfolio(&auth.identity(), request.user_id, request.fields.into())
        .await?;
    Ok((StatusCode::CREATED, Json(portfolio.into())))
}

/// PUT /portfolio/{user_id}
async fn update_portfolio(
    auth: RequireAuth,
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    body: Result<ApiJson<PortfolioFields>, ApiError>,
) -> Result<Json<PortfolioResponse>, ApiError> {
    // A non-owner gets 403 whatever the body holds
    ensure_owner(&auth.identity(), user_id)?;
    let ApiJson(request) = body?;

    let portfolio = state
        .portfolios
        .update_portfolio(&auth.identity(), user_id, request.into())
        .await?;
    Ok(Json(portfolio.into()))
}

/// Routes open to anonymous visitors
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/portfolio/{user_id}", get(get_portfolio))
}

/// Routes that need an authenticated identity
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", post(create_portfolio))
        .route("/portfolio/{user_id}", put(update_portfolio))
}
