//! # latch-core
//!
//! Configuration types shared across the latch crates.
//!
//! The service is configured from a single TOML file (`latch.toml` by default,
//! overridden with `LATCH_CONFIG`). Secrets never live in the file itself: the
//! `[auth]` section names the environment variables (or files) the two cipher
//! keys are read from at startup.

pub mod config;

pub use config::{
    AuthConfig, ConfigError, CounterLayout, LatchConfig, ServerConfig, UserEntry,
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH,
};
