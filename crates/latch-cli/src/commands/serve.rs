//! `latch serve` - run the HTTP service.

use anyhow::Context;
use latch_core::LatchConfig;
use std::path::PathBuf;

pub async fn run(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => LatchConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LatchConfig::load().context("failed to load configuration")?,
    };

    latch_server::serve(&config).await
}
