//! Configuration module for the oracle relay
//!
//! Supports loading configuration from TOML files and environment variables.

mod settings;

pub use settings::*;
