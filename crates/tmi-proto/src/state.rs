//! Session lifecycle states.
//!
//! The session walks `Disconnected -> Connecting -> Authenticating ->
//! Joining -> Listening` and falls back to `Disconnected` on stop or on a
//! fatal error. `Reconnecting` marks the teardown of a stale connection
//! before `Connecting` is entered again.

use std::fmt;

/// Current state of a chat session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No connection is open.
    #[default]
    Disconnected,
    /// Opening the TCP connection.
    Connecting,
    /// Sent `PASS`/`NICK`, waiting for the server's verdict.
    Authenticating,
    /// Sending `JOIN`; stays here until the read loop starts.
    Joining,
    /// Read loop is running.
    Listening,
    /// Retiring the previous connection before connecting again.
    Reconnecting,
}

impl SessionState {
    /// Whether a connection handle is expected to be open.
    pub fn is_connected(self) -> bool {
        matches!(
            self,
            SessionState::Authenticating | SessionState::Joining | SessionState::Listening
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Disconnected => "disconnected",
            SessionState::Connecting => "connecting",
            SessionState::Authenticating => "authenticating",
            SessionState::Joining => "joining",
            SessionState::Listening => "listening",
            SessionState::Reconnecting => "reconnecting",
        };
        f.write_str(name)
    }
}
