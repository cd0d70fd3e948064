//! Nightly maintenance binary for the Warren tracker.
//!
//! Invoked once a day by an external scheduler (cron or equivalent). The
//! scheduling itself lives outside this repo; this binary is only the
//! effect: reset every completed daily and expire the streak of every
//! habit that missed a day.
//!
//! # Run Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `warren-config.yaml`
//! 3. Connect to `PostgreSQL` and run migrations
//! 4. Run the nightly maintenance batch
//! 5. Log the result and exit

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use warren_core::{Engine, EngineConfig};
use warren_db::{PostgresConfig, PostgresPool};

/// Path to the configuration file, relative to the working directory.
const CONFIG_PATH: &str = "warren-config.yaml";

/// Application entry point for the nightly maintenance job.
///
/// # Errors
///
/// Returns an error if configuration, connection, or the batch fails;
/// the scheduler's retry policy decides what happens next.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    let config = EngineConfig::load_or_default(Path::new(CONFIG_PATH))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.filter.clone())),
        )
        .with_target(true)
        .init();

    info!("warren-nightly starting");

    // 2. Connect to PostgreSQL.
    let pg_config = PostgresConfig::new(&config.storage.database_url)
        .with_max_connections(config.storage.max_connections);
    let pool = PostgresPool::connect(&pg_config).await?;

    // 3. Run migrations (idempotent; first run bootstraps the schema).
    pool.run_migrations().await?;

    // 4. Run the batch.
    let engine = Engine::with_system_clock(pool.clone());
    let report = engine.run_nightly_maintenance().await?;

    info!(
        dailies_reset = report.dailies_reset,
        streaks_reset = report.streaks_reset,
        "Nightly maintenance finished"
    );

    // 5. Close the pool and exit.
    pool.close().await;
    Ok(())
}
