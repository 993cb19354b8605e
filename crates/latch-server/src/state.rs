use anyhow::Context;
use latch_core::{CounterLayout, LatchConfig};
use latch_token::{AcceptAnyStore, CodecKeys, CredentialStore, PasswordHashStore, TokenCodec};

/// Shared application state.
///
/// Everything here is read-only after startup, so handlers share it through
/// an `Arc` without locking.
pub struct AppState {
    pub codec: TokenCodec,
    pub store: Box<dyn CredentialStore>,

    /// Lifetime of tokens issued at login.
    pub token_ttl_seconds: i64,
}

impl AppState {
    pub fn new(
        codec: TokenCodec,
        store: impl CredentialStore + 'static,
        token_ttl_seconds: i64,
    ) -> Self {
        Self {
            codec,
            store: Box::new(store),
            token_ttl_seconds,
        }
    }

    /// Resolve keys and the credential store from configuration.
    ///
    /// Missing or wrong-length keys abort startup.
    pub fn from_config(cfg: &LatchConfig) -> anyhow::Result<Self> {
        let auth = &cfg.auth;

        let payload = auth
            .resolve_payload_secret()
            .context("failed to resolve payload key")?;
        let validator = auth
            .resolve_validator_secret()
            .context("failed to resolve validator key")?;
        let keys = CodecKeys::from_secrets(&payload, &validator)?;

        if auth.counter_layout == CounterLayout::Continuous {
            tracing::warn!(
                "using continuous counter layout; tokens are only compatible with the legacy issuer"
            );
        }
        let codec = TokenCodec::new(keys)
            .with_layout(auth.counter_layout)
            .with_permission(auth.permission.clone());

        let token_ttl_seconds = auth.token_ttl_seconds()?;

        let store: Box<dyn CredentialStore> = if auth.users.is_empty() {
            tracing::warn!(
                "no users configured; any well-formed Basic credentials will receive a token"
            );
            Box::new(AcceptAnyStore)
        } else {
            let store = PasswordHashStore::from_users(&auth.users)?;
            tracing::info!(users = store.len(), "loaded credential store");
            Box::new(store)
        };

        Ok(Self {
            codec,
            store,
            token_ttl_seconds,
        })
    }
}
