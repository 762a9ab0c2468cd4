//! Integration test common infrastructure.
//!
//! Provides a scripted in-process chat server, a scripted HTTP server and
//! helpers for building sessions pointed at them.

pub mod http;
pub mod server;

#[allow(unused_imports)]
pub use http::MockHttpServer;
#[allow(unused_imports)]
pub use server::{AuthReply, MockServer};

use std::time::Duration;

use tmichat::config::SessionConfig;

/// Short enough that stop-related tests finish quickly.
#[allow(dead_code)]
pub const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Session settings for `abc123` / `mychannel` on the mock server.
#[allow(dead_code)]
pub fn session_config(port: u16) -> SessionConfig {
    SessionConfig::new("abc123", "mychannel")
        .with_server("127.0.0.1", port)
        .with_read_timeout(READ_TIMEOUT)
        .with_auth_timeout(Duration::from_secs(1))
        .with_verbose(true)
        .with_debug(true)
}

/// A chat line as the server relays it.
#[allow(dead_code)]
pub fn privmsg_from(nick: &str, content: &str) -> String {
    format!(":{nick}!{nick}@{nick}.tmi.twitch.tv PRIVMSG #mychannel :{content}")
}
