//! Credential normalization.
//!
//! Twitch's chat gateway expects `PASS oauth:<token>`. Tokens copied from
//! elsewhere often lack the scheme prefix.

/// Scheme prefix of chat credentials.
pub const TOKEN_PREFIX: &str = "oauth:";

/// Prefix `token` with [`TOKEN_PREFIX`] unless it already carries it.
///
/// Idempotent: normalizing twice equals normalizing once.
///
/// ```
/// use tmi_proto::normalize_token;
///
/// assert_eq!(normalize_token("abc123"), "oauth:abc123");
/// assert_eq!(normalize_token("oauth:abc123"), "oauth:abc123");
/// ```
pub fn normalize_token(token: &str) -> String {
    if token.starts_with(TOKEN_PREFIX) {
        token.to_owned()
    } else {
        format!("{TOKEN_PREFIX}{token}")
    }
}
