//! Terminal front end for the priority list.
//!
//! Stores data under `$PRIORITIES_DATA_DIR` (default `.priorities`); a `.env`
//! file in the working directory is honoured. Logs go to stderr, filtered by
//! `RUST_LOG`.

use priorities::file_store::FileKeyValueStore;
use priorities::{PrioritiesConfig, TodoEnvironment, TodoManager, terminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DATA_DIR: &str = ".priorities";

/// How long to wait for the last writes on exit
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "priorities=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let data_dir =
        std::env::var("PRIORITIES_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
    tracing::info!(%data_dir, "Starting");

    let config = PrioritiesConfig::default();
    let storage = Arc::new(FileKeyValueStore::new(data_dir));
    let manager = TodoManager::new(TodoEnvironment::production(storage, config));

    manager.load().await?;

    terminal::run(&manager, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    // Entries completed just before quitting are stored as completed and
    // expire on the next start
    if let Err(error) = manager.shutdown(SHUTDOWN_GRACE).await {
        tracing::warn!(%error, "Exited with writes still pending");
    }
    Ok(())
}
