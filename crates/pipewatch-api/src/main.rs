//! Binary entrypoint for the PipeWatch API server.
use pipewatch_api::{run, ApiConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // PIPEWATCH_LOG takes precedence over RUST_LOG
    let filter = EnvFilter::try_from_env("PIPEWATCH_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = ApiConfig::from_env()?;
    run(config).await?;

    Ok(())
}
