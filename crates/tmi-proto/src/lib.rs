//! # tmi-proto
//!
//! Sans-IO building blocks for talking to Twitch's IRC chat gateway.
//!
//! ## Features
//!
//! - CRLF line framing as a tokio codec ([`LineCodec`])
//! - Parsing of `:<sender> <type> <target> :<content>` lines ([`ChatMessage`])
//! - Prefix/keyword command matching with word-boundary rules ([`CommandMatcher`])
//! - Outbound command encoding and credential redaction ([`Command`])
//! - Credential and channel normalization
//!
//! Nothing in this crate performs I/O; the session that owns the socket
//! lives in the `tmichat` crate.
//!
//! ## Quick Start
//!
//! ```rust
//! use tmi_proto::{ChatMessage, CommandMatcher};
//!
//! let msg: ChatMessage = ":alice!alice@alice.tmi.twitch.tv PRIVMSG #rust :!hello there"
//!     .parse()
//!     .expect("valid chat line");
//! assert_eq!(msg.sender, "alice");
//!
//! let hello = CommandMatcher::new("!", "hello", true);
//! assert_eq!(hello.matches(&msg.content), vec!["!hello".to_string()]);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod auth;
pub mod chan;
pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod matcher;
pub mod message;
pub mod prefix;
pub mod state;

pub use self::auth::{normalize_token, TOKEN_PREFIX};
pub use self::chan::{normalize_channel, CHANNEL_PREFIX};
pub use self::command::{is_keepalive, redact, Command, KEEPALIVE_LINE, KEEPALIVE_SERVER, REDACTED};
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::matcher::{CommandMatcher, IntoKeywords};
pub use self::message::ChatMessage;
pub use self::prefix::nick_of;
pub use self::state::SessionState;
