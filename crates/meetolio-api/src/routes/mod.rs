//! API routes
//!
//! Every request passes through [`auth_middleware`] first, which attaches
//! the caller's identity. Routes in the protected group are then gated by
//! [`require_authenticated`]; everything else is public.

mod account;
mod auth;
mod extract;
mod health;
mod portfolio;
pub mod types;

use axum::{
    Router,
    extract::State,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
};
use meetolio_auth::{auth_middleware, require_authenticated};
use std::sync::Arc;

use crate::state::{AppState, MetricsHandle};

pub use extract::RequireAuth;

/// GET /metrics - Prometheus metrics endpoint
async fn get_metrics(State(handle): State<Arc<MetricsHandle>>) -> String {
    handle.render()
}

/// Create the main router
pub fn create_router(state: AppState, metrics_handle: Option<Arc<MetricsHandle>>) -> Router {
    // The gate also wraps each protected path's 405 fallback, so an
    // anonymous caller sees 401 for any method on those paths
    let protected = Router::new()
        .merge(account::routes())
        .merge(portfolio::protected_routes())
        .route_layer(from_fn(require_authenticated));

    let mut router = Router::new()
        // Health check
        .merge(health::routes())
        // Public: signup, login, portfolio reads
        .merge(auth::routes())
        .merge(portfolio::public_routes())
        // Identity required
        .merge(protected)
        .layer(from_fn_with_state(state.jwt.clone(), auth_middleware))
        .with_state(state);

    // Add metrics endpoint if handle is provided
    if let Some(handle) = metrics_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(get_metrics))
                .with_state(handle),
        );
    }

    router
}
