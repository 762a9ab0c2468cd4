//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

/// Returns `true` (for serde defaults).
pub fn default_true() -> bool {
    true
}

// =============================================================================
// Connection Defaults
// =============================================================================

pub fn default_host() -> String {
    "irc.twitch.tv".to_string()
}

pub fn default_port() -> u16 {
    6667
}

/// The server ignores the nickname but requires one to be sent.
pub fn default_nickname() -> String {
    "tmichat".to_string()
}

pub fn default_read_timeout_ms() -> u64 {
    1000
}

pub fn default_auth_timeout_ms() -> u64 {
    5000
}

// =============================================================================
// Reconnect Defaults
// =============================================================================

pub fn default_reconnect_delay_secs() -> u64 {
    5
}

// =============================================================================
// Command Defaults
// =============================================================================

pub fn default_command_prefix() -> String {
    "!".to_string()
}

// =============================================================================
// Helix Defaults
// =============================================================================

pub fn default_api_host() -> String {
    "https://api.twitch.tv".to_string()
}

pub fn default_api_base() -> String {
    "/helix".to_string()
}
