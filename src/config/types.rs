//! Core configuration types and loading.

use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::defaults::{
    default_api_base, default_api_host, default_auth_timeout_ms, default_command_prefix,
    default_host, default_nickname, default_port, default_read_timeout_ms,
    default_reconnect_delay_secs, default_true,
};
use super::session::SessionConfig;
use super::validation::{ValidationError, validate};
use crate::helix::HelixClient;

/// Environment variable that overrides `account.token`.
pub const TOKEN_ENV_VAR: &str = "TMICHAT_TOKEN";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {}", join_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Channel to join, with or without the leading `#`.
    pub channel: String,
    /// Account credentials.
    #[serde(default)]
    pub account: AccountConfig,
    /// Server endpoint and timeouts.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Logging switches.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Caller-level reconnect policy used by the binary.
    #[serde(default)]
    pub reconnect: ReconnectConfig,
    /// Canned command replies registered by the binary.
    #[serde(default, rename = "command")]
    pub commands: Vec<CommandConfig>,
    /// Helix REST API endpoint.
    #[serde(default)]
    pub helix: HelixConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// `TMICHAT_TOKEN` overrides `account.token` when set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content, |key| std::env::var(key).ok())
    }

    /// Parse and validate configuration text, reading overrides through `env`.
    pub fn from_toml(
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        if let Some(token) = env(TOKEN_ENV_VAR).filter(|t| !t.is_empty()) {
            config.account.token = token;
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the startup checks, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate(self).map_err(ConfigError::Invalid)
    }

    /// Normalized settings for a chat session.
    pub fn session(&self) -> SessionConfig {
        SessionConfig::new(&self.account.token, &self.channel)
            .with_server(&self.connection.host, self.connection.port)
            .with_nickname(&self.connection.nickname)
            .with_read_timeout(self.connection.read_timeout())
            .with_auth_timeout(self.connection.auth_timeout())
            .with_verbose(self.logging.verbose)
            .with_debug(self.logging.debug)
    }

    /// Helix client for `[helix]`, authenticated with the account token.
    pub fn helix_client(&self) -> HelixClient {
        let mut client = HelixClient::from_config(&self.helix);
        client.authenticate(&self.account.token);
        client
    }
}

/// Account credentials.
#[derive(Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Chat token, with or without the `oauth:` prefix.
    #[serde(default)]
    pub token: String,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("token", &tmi_proto::REDACTED)
            .finish()
    }
}

/// Server endpoint and timeouts.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Placeholder nickname sent during authentication.
    #[serde(default = "default_nickname")]
    pub nickname: String,
    /// Bound on each blocking read, so a stop request is noticed.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// How long to wait for the authentication reply.
    #[serde(default = "default_auth_timeout_ms")]
    pub auth_timeout_ms: u64,
}

impl ConnectionConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_millis(self.auth_timeout_ms)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            nickname: default_nickname(),
            read_timeout_ms: default_read_timeout_ms(),
            auth_timeout_ms: default_auth_timeout_ms(),
        }
    }
}

/// Logging switches.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Trace outbound lines (credential redacted) and lifecycle steps.
    #[serde(default)]
    pub verbose: bool,
    /// Log lines that fail to parse; lowers the default filter to `debug`.
    #[serde(default)]
    pub debug: bool,
    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub json: bool,
}

/// Reconnect policy applied by the binary, never by the session itself.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconnectConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_reconnect_delay_secs")]
    pub delay_secs: u64,
    /// Consecutive failed attempts before giving up; 0 means unlimited.
    #[serde(default)]
    pub max_attempts: u32,
}

impl ReconnectConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_secs: default_reconnect_delay_secs(),
            max_attempts: 0,
        }
    }
}

/// A command answered with a fixed reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandConfig {
    #[serde(default = "default_command_prefix")]
    pub prefix: String,
    pub keywords: Vec<String>,
    #[serde(default = "default_true")]
    pub anchored: bool,
    pub reply: String,
}

/// Helix REST API endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HelixConfig {
    #[serde(default = "default_api_host")]
    pub api_host: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Application client id, sent as `Client-Id` when present.
    #[serde(default)]
    pub client_id: Option<String>,
}

impl Default for HelixConfig {
    fn default() -> Self {
        Self {
            api_host: default_api_host(),
            api_base: default_api_base(),
            client_id: None,
        }
    }
}
