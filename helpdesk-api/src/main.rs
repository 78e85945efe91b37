//! # Helpdesk API Server
//!
//! Serves the helpdesk HTTP API. The database schema is expected to have been
//! bootstrapped by `helpdesk-provision` before the server starts.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p helpdesk-api
//! ```

use helpdesk_api::app::{build_router, AppState};
use helpdesk_api::config::Config;
use helpdesk_shared::db::pool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helpdesk_api=info,helpdesk_shared=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Helpdesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    tracing::info!(environment = %config.environment, tls = %config.database.tls, "Configuration loaded");

    // Lazy so the server starts (degraded) while the database is down
    let db = pool::create_lazy_pool(&config.database)?;
    let address = config.bind_address();

    let app = build_router(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool::close_pool(db).await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
