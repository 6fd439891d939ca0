use bank_account_service::api::{create_router, AppState};
use bank_account_service::config::Settings;
use bank_account_service::observability::{init_logging, init_metrics, HealthChecker, LogConfig};
use bank_account_service::repositories;
use bank_account_service::seed::seed_demo_data;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    init_logging(&LogConfig::from(&settings.application));
    info!("Configuration loaded");

    let metrics_handle = match init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Metrics recorder unavailable: {}", e);
            None
        }
    };

    info!("Opening account store at {}...", settings.database.url);
    let pool = repositories::connect(&settings.database).await?;
    info!("Account store ready");

    let mut state = AppState::new(pool.clone())
        .with_health_checker(Arc::new(HealthChecker::new(pool)));
    if let Some(handle) = metrics_handle {
        state = state.with_metrics(handle);
    }

    if settings.seed.enabled {
        seed_demo_data(&state.accounts, &state.customers).await?;
    }

    let app = create_router(state);
    let address = settings.application.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
