//! CLI command implementations.

pub mod keys;
pub mod serve;
pub mod token;
