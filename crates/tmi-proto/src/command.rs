//! Outbound commands.
//!
//! The client only ever sends a handful of commands; each renders to a single
//! protocol line without its terminator (the codec appends `\r\n`).

use std::fmt;

/// Host name Twitch uses in keep-alive pings.
pub const KEEPALIVE_SERVER: &str = "tmi.twitch.tv";

/// Keep-alive ping sent by the server.
pub const KEEPALIVE_LINE: &str = "PING :tmi.twitch.tv";

/// Placeholder substituted for secrets in traces.
pub const REDACTED: &str = "***";

/// A command the client sends to the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `PASS <credential>`
    Pass(String),
    /// `NICK <nickname>`
    Nick(String),
    /// `JOIN <channel>`
    Join(String),
    /// `PRIVMSG <target> :<text>`
    Privmsg {
        /// Channel the text goes to.
        target: String,
        /// Chat text.
        text: String,
    },
    /// `PONG <server>`
    Pong(String),
}

impl Command {
    /// `PRIVMSG` shorthand.
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Command::Privmsg {
            target: target.into(),
            text: text.into(),
        }
    }

    /// Fixed reply to the server's keep-alive ping.
    pub fn keepalive_reply() -> Self {
        Command::Pong(KEEPALIVE_SERVER.to_owned())
    }

    /// Render the line with every occurrence of `secret` replaced by [`REDACTED`].
    pub fn redacted(&self, secret: &str) -> String {
        redact(&self.to_string(), secret)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass(credential) => write!(f, "PASS {credential}"),
            Command::Nick(nick) => write!(f, "NICK {nick}"),
            Command::Join(channel) => write!(f, "JOIN {channel}"),
            Command::Privmsg { target, text } => write!(f, "PRIVMSG {target} :{text}"),
            Command::Pong(server) => write!(f, "PONG {server}"),
        }
    }
}

/// Replace every occurrence of `secret` in `line` with [`REDACTED`].
///
/// An empty secret leaves the line untouched.
pub fn redact(line: &str, secret: &str) -> String {
    if secret.is_empty() {
        line.to_owned()
    } else {
        line.replace(secret, REDACTED)
    }
}

/// Whether an inbound line is the server's keep-alive ping.
pub fn is_keepalive(line: &str) -> bool {
    line.starts_with(KEEPALIVE_LINE)
}
