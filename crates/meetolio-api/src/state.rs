//! Application state

use meetolio_auth::JwtManager;
use meetolio_core::{AccountService, AuthService, PortfolioService};
use meetolio_db::Database;
use std::sync::Arc;

/// Prometheus handle used to render `/metrics`
pub type MetricsHandle = metrics_exporter_prometheus::PrometheusHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub auth: Arc<AuthService>,
    pub accounts: Arc<AccountService>,
    pub portfolios: Arc<PortfolioService>,
}

impl AppState {
    pub fn new(db: Database, jwt: Arc<JwtManager>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(db.clone())),
            accounts: Arc::new(AccountService::new(db.clone())),
            portfolios: Arc::new(PortfolioService::new(db.clone())),
            db,
            jwt,
        }
    }
}
