//! Meetolio - portfolio publishing backend

use anyhow::{Context, Result};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod config;

use config::Config;
use meetolio_api::{AppState, create_router};
use meetolio_auth::JwtManager;
use meetolio_db::Database;

/// Meetolio - portfolio publishing backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    config: String,

    /// Bind address
    #[arg(long, env = "MEETOLIO_BIND")]
    bind: Option<String>,

    /// Port
    #[arg(short, long, env = "MEETOLIO_PORT")]
    port: Option<u16>,

    /// Secret used to sign access tokens
    #[arg(long, env = "MEETOLIO_JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(&args.config)?;
    if let Some(secret) = args.jwt_secret {
        config.auth.jwt_secret = secret;
    }

    // Initialize logging
    init_logging(&config.logging.level, &config.logging.format);

    info!("Starting Meetolio v{}", env!("CARGO_PKG_VERSION"));

    if config.auth.uses_default_secret() {
        warn!("Using the built-in JWT secret; set auth.jwt_secret or MEETOLIO_JWT_SECRET");
    }

    // Create data directory
    if let Some(parent) = Path::new(&config.database.path).parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    // Initialize database
    let db = Database::new(&config.database.url()).await?;
    info!("Registered users: {}", db.count_users().await?);

    // Install metrics recorder
    let metrics_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    // Initialize JWT manager
    let jwt = Arc::new(JwtManager::new(&config.auth.jwt_secret));

    // Create router
    let state = AppState::new(db, jwt);
    let app = create_router(state, Some(Arc::new(metrics_handle)))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Determine bind address
    let bind_addr = args.bind.unwrap_or(config.server.bind_address);
    let port = args.port.unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind_addr, port).parse()?;

    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Initialize logging
fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if format == "json" {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
