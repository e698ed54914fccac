//! Configuration for the auxchain tools, loaded from TOML.

mod config;
mod errors;

pub use config::{AuxPowConfig, Config, LoggingConfig, NETWORK_ENV_VAR};
pub use errors::ConfigError;
