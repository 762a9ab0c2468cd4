//! Unified error handling for tmichat.
//!
//! Connection- and authentication-level failures abort the current
//! `connect_and_listen` attempt and are handed back to the caller, who
//! decides whether to reconnect. Per-line parse failures never show up
//! here: the read loop skips the line and carries on.

use thiserror::Error;
use tmi_proto::{MessageParseError, ProtocolError};

// ============================================================================
// Session Errors
// ============================================================================

/// Errors surfaced by a chat session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server rejected the credential.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// No authentication verdict arrived in time.
    #[error("timed out waiting for authentication reply")]
    AuthTimeout,

    /// The authentication reply was not a chat line.
    #[error("unexpected authentication reply: {0}")]
    Handshake(#[source] MessageParseError),

    /// The server closed the connection.
    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// No connection is open, or the session is gone.
    #[error("not connected")]
    NotConnected,
}

impl SessionError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Auth(_) => "auth",
            Self::AuthTimeout => "auth_timeout",
            Self::Handshake(_) => "handshake",
            Self::ConnectionClosed => "connection_closed",
            Self::Protocol(_) => "protocol",
            Self::NotConnected => "not_connected",
        }
    }

    /// Whether a caller-level reconnect policy may retry after this error.
    ///
    /// A rejected credential will be rejected again, so it is never retried.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::Auth(_) | Self::NotConnected)
    }
}

/// Result type for session operations.
pub type SessionResult<T = ()> = Result<T, SessionError>;

// ============================================================================
// Helix Errors (REST collaborator)
// ============================================================================

/// Errors from the Helix REST collaborator.
#[derive(Debug, Error)]
pub enum HelixError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API answered with a non-2xx status.
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },

    /// The endpoint needs at least one identifying filter.
    #[error("missing filter: one of {0} is required")]
    MissingFilter(&'static str),
}

/// Result type for Helix requests.
pub type HelixResult<T> = Result<T, HelixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SessionError::Auth("x".into()).error_code(), "auth");
        assert_eq!(SessionError::AuthTimeout.error_code(), "auth_timeout");
        assert_eq!(SessionError::ConnectionClosed.error_code(), "connection_closed");
    }

    #[test]
    fn test_auth_is_not_retryable() {
        assert!(!SessionError::Auth("Login authentication failed".into()).is_retryable());
        assert!(SessionError::ConnectionClosed.is_retryable());
        assert!(SessionError::AuthTimeout.is_retryable());
    }

    #[test]
    fn test_connect_display() {
        let err = SessionError::Connect {
            addr: "irc.twitch.tv:6667".into(),
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert_eq!(err.to_string(), "failed to connect to irc.twitch.tv:6667: refused");
    }

    #[test]
    fn test_api_display() {
        let err = HelixError::Api {
            status: 401,
            message: "Invalid OAuth token".into(),
        };
        assert_eq!(err.to_string(), "api error 401: Invalid OAuth token");
    }
}
