//! tmichat - a persistent Twitch chat client.
//!
//! [`ChatSession`] connects to the chat gateway, authenticates, joins one
//! channel and dispatches incoming messages to registered command callbacks.
//! Framing, parsing and command matching live in the sans-IO `tmi-proto`
//! crate; this crate adds the tokio transport, configuration and the Helix
//! REST collaborator.
//!
//! ```no_run
//! use tmichat::{ChatSession, SessionConfig};
//!
//! # async fn run() -> tmichat::SessionResult {
//! let mut session = ChatSession::new(SessionConfig::new("abc123", "mychannel"));
//! session.register("!", ["hello", "hi"], |inv| {
//!     let _ = inv.reply(format!("hello {}", inv.sender()));
//! });
//! session.connect_and_listen().await
//! # }
//! ```

pub mod config;
pub mod credential;
pub mod error;
pub mod helix;
pub mod session;
pub mod telemetry;

pub use config::{Config, ConfigError, SessionConfig};
pub use credential::Credential;
pub use error::{HelixError, HelixResult, SessionError, SessionResult};
pub use session::{
    Callback, ChatSender, ChatSession, Invocation, ListenHandle, ReconnectPolicy, Registration,
    StopHandle,
};
pub use tmi_proto::{ChatMessage, CommandMatcher, SessionState};
