//! Token issuance configuration.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the payload fields of a token consume the counter-mode keystream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterLayout {
    /// Every payload field is encrypted with the counter reset to the seed.
    #[default]
    ResetPerField,

    /// The payload fields are encrypted back-to-back against one keystream.
    /// Only needed to read tokens minted by the first deployment.
    Continuous,
}

/// A user accepted by the password-hash credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub username: String,

    /// Argon2 PHC string (`latch hash-password` prints one).
    pub password_hash: String,
}

/// Configuration for token issuance and verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable holding the payload key.
    #[serde(default = "default_payload_key_env")]
    pub payload_key_env: String,

    /// Path to a file holding the payload key (used when the env var is unset).
    #[serde(default)]
    pub payload_key_file: Option<PathBuf>,

    /// Environment variable holding the validator key.
    #[serde(default = "default_validator_key_env")]
    pub validator_key_env: String,

    /// Path to a file holding the validator key (used when the env var is unset).
    #[serde(default)]
    pub validator_key_file: Option<PathBuf>,

    /// Lifetime of issued tokens (e.g. "1h", "30m").
    #[serde(default = "default_token_ttl")]
    pub token_ttl: String,

    /// Permission label written into every token.
    #[serde(default = "default_permission")]
    pub permission: String,

    #[serde(default)]
    pub counter_layout: CounterLayout,

    /// Users checked at login. Empty means every well-formed Basic header is accepted.
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

fn default_payload_key_env() -> String {
    "AUTH_AES_KEY".to_string()
}

fn default_validator_key_env() -> String {
    "AUTH_AES_VALIDATOR_KEY".to_string()
}

fn default_token_ttl() -> String {
    "1h".to_string()
}

fn default_permission() -> String {
    "Admin".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            payload_key_env: default_payload_key_env(),
            payload_key_file: None,
            validator_key_env: default_validator_key_env(),
            validator_key_file: None,
            token_ttl: default_token_ttl(),
            permission: default_permission(),
            counter_layout: CounterLayout::default(),
            users: Vec::new(),
        }
    }
}

impl AuthConfig {
    /// Resolve the payload key secret from environment or file.
    pub fn resolve_payload_secret(&self) -> Result<String, ConfigError> {
        resolve_secret(&self.payload_key_env, self.payload_key_file.as_ref())
    }

    /// Resolve the validator key secret from environment or file.
    pub fn resolve_validator_secret(&self) -> Result<String, ConfigError> {
        resolve_secret(&self.validator_key_env, self.validator_key_file.as_ref())
    }

    /// Token lifetime in whole seconds.
    pub fn token_ttl_seconds(&self) -> Result<i64, ConfigError> {
        let duration = humantime::parse_duration(self.token_ttl.trim()).map_err(|e| {
            ConfigError::InvalidValue {
                field: "auth.token_ttl",
                reason: e.to_string(),
            }
        })?;

        let secs = i64::try_from(duration.as_secs()).map_err(|_| ConfigError::InvalidValue {
            field: "auth.token_ttl",
            reason: "duration too large".to_string(),
        })?;
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "auth.token_ttl",
                reason: "must be at least one second".to_string(),
            });
        }
        Ok(secs)
    }
}

fn resolve_secret(env_var: &str, file: Option<&PathBuf>) -> Result<String, ConfigError> {
    // Try environment variable first
    if let Ok(secret) = std::env::var(env_var) {
        if !secret.is_empty() {
            return Ok(secret);
        }
    }

    // Try file path
    if let Some(path) = file {
        let secret = std::fs::read_to_string(path)?;
        let secret = secret.trim_end_matches(['\r', '\n']);
        if !secret.is_empty() {
            return Ok(secret.to_string());
        }
    }

    Err(ConfigError::MissingSecret {
        env: env_var.to_string(),
    })
}
