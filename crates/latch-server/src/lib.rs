//! # latch-server
//!
//! HTTP surface for the latch token service.
//!
//! | Route | Auth | Purpose |
//! |-------|------|---------|
//! | `POST /api/auth/login` | `Basic` | Exchange credentials for a bearer token |
//! | `GET /api/auth/whoami` | `Bearer` | Echo the claims of the presented token |
//! | `GET /healthz` | none | Liveness probe |

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;

use anyhow::Context;
use latch_core::LatchConfig;
use std::sync::Arc;

/// Build state from `config`, bind the listener and serve until Ctrl-C.
pub async fn serve(config: &LatchConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = create_router(state);

    let addr = &config.server.bind;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "latch-server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
