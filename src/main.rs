//! SchoolDesk
//!
//! Main application entry point

use tracing::{info, warn};

use SchoolDesk::{
    config::Settings,
    database::{connection::{create_pool, run_migrations}, DatabaseService},
    http::{create_router, AppState},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", SchoolDesk::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;

    if settings.database.run_migrations {
        run_migrations(&pool).await?;
    } else {
        warn!("Skipping database migrations");
    }

    let state = AppState::new(DatabaseService::new(pool.clone()));
    let app = create_router(state, &settings.server.api_prefix);

    let addr = settings.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("SchoolDesk has been shut down.");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
