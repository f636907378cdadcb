use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use contact_api::{AppState, config::AppConfig, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = AppConfig::from_env()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting contact API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    // Start the web server
    let app = create_router(AppState::postgres(pool));

    let listener = tokio::net::TcpListener::bind(&app_config.server_addr).await?;
    info!("Contact API service listening on {}", app_config.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
