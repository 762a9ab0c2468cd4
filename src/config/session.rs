//! Normalized settings handed to a chat session.

use std::time::Duration;

use tmi_proto::normalize_channel;

use super::defaults::{
    default_auth_timeout_ms, default_host, default_nickname, default_port,
    default_read_timeout_ms,
};
use crate::credential::Credential;

/// Immutable session settings.
///
/// The credential and channel are normalized once, on construction.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    credential: Credential,
    channel: String,
    host: String,
    port: u16,
    nickname: String,
    verbose: bool,
    debug: bool,
    read_timeout: Duration,
    auth_timeout: Duration,
}

impl SessionConfig {
    /// Settings for `channel` on the default server.
    pub fn new(token: &str, channel: &str) -> Self {
        Self {
            credential: Credential::new(token),
            channel: normalize_channel(channel),
            host: default_host(),
            port: default_port(),
            nickname: default_nickname(),
            verbose: false,
            debug: false,
            read_timeout: Duration::from_millis(default_read_timeout_ms()),
            auth_timeout: Duration::from_millis(default_auth_timeout_ms()),
        }
    }

    pub fn with_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = nickname.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    #[inline]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Channel name, always `#`-prefixed.
    #[inline]
    pub fn channel(&self) -> &str {
        &self.channel
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, for logs and errors.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    #[inline]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    #[inline]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[inline]
    pub fn debug(&self) -> bool {
        self.debug
    }

    #[inline]
    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    #[inline]
    pub fn auth_timeout(&self) -> Duration {
        self.auth_timeout
    }
}
