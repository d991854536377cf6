//! Charter Forge HTTP service.

use std::sync::Arc;

use thiserror::Error;

use charter_forge::adapters::{InMemoryDocumentRepository, PostgresDocumentRepository};
use charter_forge::config::{AppConfig, ConfigError, DatabaseConfig, ValidationError};
use charter_forge::ports::{DocumentRepository, StorageError};
use charter_forge::server;
use charter_forge::telemetry::{self, TelemetryError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Output directory cleanup failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    telemetry::init_tracing(&config.server)?;

    server::clean_output_dir(&config.document).await?;
    let repository = build_repository(&config.database).await?;
    let state = server::app_state(&config.document, repository);
    let app = server::router(state, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        addr = %addr,
        environment = ?config.server.environment,
        output_path = %config.document.output_path.display(),
        compiler = %config.document.compiler_program,
        "Charter Forge listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn build_repository(
    database: &DatabaseConfig,
) -> Result<Arc<dyn DocumentRepository>, StartupError> {
    if !database.is_configured() {
        tracing::warn!("No database URL configured; documents are kept in memory only");
        return Ok(Arc::new(InMemoryDocumentRepository::new()));
    }

    let pool = database.pool_options().connect(&database.url).await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresDocumentRepository::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
