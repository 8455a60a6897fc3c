use anyhow::Result;
use gym_coach::api::routes::create_routes;
use gym_coach::config::{run_migrations, AppConfig, DatabaseConfig, DatabaseSeeder, GymConfig};
use gym_coach::services::{AttendanceService, BackgroundJobService};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let app_config = AppConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let gym_config = GymConfig::from_env()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if app_config.is_development() {
        info!("Running in development mode");
    }

    let pool = db_config.create_pool().await?;
    run_migrations(&pool).await?;
    info!("Database migrations applied");

    if app_config.seed_demo_data {
        DatabaseSeeder::new(pool.clone(), gym_config.clone())
            .seed_all()
            .await?;
    }

    let mut jobs =
        BackgroundJobService::new(AttendanceService::new(pool.clone(), gym_config.clone())).await?;
    jobs.start(&gym_config.auto_close_cron).await?;

    // Create the application routes
    let app = create_routes(pool, gym_config);

    // Start the server
    let address = app_config.server_address();
    let listener = TcpListener::bind(&address).await?;
    info!("Gym coach server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    jobs.stop().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
