// Connection check for fixture loading
//
// Reads the same settings tests use (DATABASE_URL, FIXTURE_DB_DRIVER,
// FIXTURE_DB_USER, FIXTURE_DB_PASSWORD, optionally from .env), opens a
// connection handle, pings it and closes it. Useful before running a test
// suite against a shared database.

use anyhow::{Context, Result};
use fixture_loader::{ConnectionConfig, ConnectionHandle};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> Result<()> {
    let config = ConnectionConfig::from_env().context("reading connection settings")?;
    tracing::info!("Testing {} connection...", config.driver);

    let mut handle = ConnectionHandle::from_config(&config)
        .await
        .context("opening connection")?;
    handle.ping().await.context("pinging database")?;

    println!("✓ Connected to {} ({})", handle.url(), handle.driver());

    handle.close().await?;
    Ok(())
}
