use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use tripsight::{Aggregator, Config, ReferenceTable, web};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    // Loaded once; the process refuses to start without reference data.
    let reference = ReferenceTable::load(&config.reference_path)
        .context("Failed to load emergency-numbers reference table")?;

    let port = config.port;
    let aggregator = Arc::new(Aggregator::new(&config, reference)?);

    web::run(aggregator, port).await
}
