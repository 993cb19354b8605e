use anyhow::Context;
use latch_core::LatchConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = LatchConfig::load().context("failed to load configuration")?;
    latch_server::serve(&config).await
}
