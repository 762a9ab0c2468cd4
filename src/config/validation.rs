//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("account.token is required (or set TMICHAT_TOKEN)")]
    MissingToken,
    #[error("channel is required")]
    MissingChannel,
    #[error("channel must not contain whitespace, got '{0}'")]
    InvalidChannel(String),
    #[error("connection.host is required")]
    MissingHost,
    #[error("connection.read_timeout_ms must be greater than zero")]
    ZeroReadTimeout,
    #[error("connection.auth_timeout_ms must be greater than zero")]
    ZeroAuthTimeout,
    #[error("command[{0}].keywords must contain at least one non-empty keyword")]
    EmptyCommandKeywords(usize),
    #[error("command[{0}].reply is required")]
    EmptyCommandReply(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Required fields
    if config.account.token.trim().is_empty() {
        errors.push(ValidationError::MissingToken);
    }
    let channel = config.channel.trim_start_matches(tmi_proto::CHANNEL_PREFIX);
    if channel.is_empty() {
        errors.push(ValidationError::MissingChannel);
    } else if config.channel.chars().any(char::is_whitespace) {
        errors.push(ValidationError::InvalidChannel(config.channel.clone()));
    }

    // Connection
    if config.connection.host.is_empty() {
        errors.push(ValidationError::MissingHost);
    }
    if config.connection.read_timeout_ms == 0 {
        errors.push(ValidationError::ZeroReadTimeout);
    }
    if config.connection.auth_timeout_ms == 0 {
        errors.push(ValidationError::ZeroAuthTimeout);
    }

    // Commands
    for (idx, command) in config.commands.iter().enumerate() {
        if command.keywords.iter().all(|k| k.is_empty()) {
            errors.push(ValidationError::EmptyCommandKeywords(idx));
        }
        if command.reply.is_empty() {
            errors.push(ValidationError::EmptyCommandReply(idx));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
