//! Configuration types for the latch token service.
//!
//! # Example
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [auth]
//! payload_key_env = "AUTH_AES_KEY"
//! validator_key_env = "AUTH_AES_VALIDATOR_KEY"
//! token_ttl = "1h"
//!
//! [[auth.users]]
//! username = "admin"
//! password_hash = "$argon2id$v=19$..."
//! ```

pub mod auth;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub use auth::{AuthConfig, CounterLayout, UserEntry};
pub use server::ServerConfig;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "LATCH_CONFIG";

/// Configuration file read when `LATCH_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "latch.toml";

/// Complete latch configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatchConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token issuance and key settings.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Neither the environment variable nor the key file produced a secret.
    #[error("secret not configured: set {env} or the matching *_key_file entry")]
    MissingSecret { env: String },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl LatchConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML content.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Load the configuration the process was pointed at.
    ///
    /// An explicit `LATCH_CONFIG` path must exist. When falling back to
    /// `latch.toml` a missing file yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(p) = std::env::var(CONFIG_PATH_ENV) {
            return Self::from_file(PathBuf::from(p));
        }

        let path = Path::new(DEFAULT_CONFIG_PATH);
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = DEFAULT_CONFIG_PATH, "no config file found, using defaults");
            Ok(Self::default())
        }
    }
}
