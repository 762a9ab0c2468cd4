//! Chat credential handling.

use std::fmt;

use tmi_proto::{normalize_token, redact};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An `oauth:` chat token that never shows up in debug output or traces.
///
/// The value is normalized on construction and wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential(String);

impl Credential {
    /// Normalize `token` to the `oauth:<token>` form.
    pub fn new(token: &str) -> Self {
        Self(normalize_token(token))
    }

    /// The actual credential, for the `PASS` line only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replace the credential in `line` with the redaction placeholder.
    pub fn redact(&self, line: &str) -> String {
        redact(line, &self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(tmi_proto::REDACTED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_on_construction() {
        assert_eq!(Credential::new("abc123").expose(), "oauth:abc123");
        assert_eq!(Credential::new("oauth:abc123").expose(), "oauth:abc123");
    }

    #[test]
    fn test_debug_and_display_hide_value() {
        let credential = Credential::new("abc123");
        assert!(!format!("{credential:?}").contains("abc123"));
        assert_eq!(credential.to_string(), "***");
    }

    #[test]
    fn test_redact_line() {
        let credential = Credential::new("abc123");
        assert_eq!(credential.redact("PASS oauth:abc123"), "PASS ***");
    }
}
