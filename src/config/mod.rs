//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: TOML-facing config structs (Config, ConnectionConfig, LoggingConfig, ...)
//! - [`session`]: Normalized, immutable settings handed to a chat session
//! - [`validation`]: Startup checks
//! - `defaults`: serde default values

mod defaults;
mod session;
mod types;
mod validation;

pub use session::SessionConfig;
pub use types::{
    AccountConfig, CommandConfig, Config, ConfigError, ConnectionConfig, HelixConfig,
    LoggingConfig, ReconnectConfig, TOKEN_ENV_VAR,
};
pub use validation::{ValidationError, validate};
