//! Sender prefix handling.
//!
//! Users appear on the wire as `nick!user@host`; servers as a bare host
//! name. Only the nickname matters for dispatch.

/// Reduce a sender of the form `<name>!<rest>` to `<name>`.
///
/// The name must be non-empty, so the split happens at the first `!` after
/// the first character. Anything without such a `!` is returned unchanged.
///
/// # Examples
///
/// ```
/// use tmi_proto::nick_of;
///
/// assert_eq!(nick_of("alice!alice@alice.tmi.twitch.tv"), "alice");
/// assert_eq!(nick_of("tmi.twitch.tv"), "tmi.twitch.tv");
/// ```
pub fn nick_of(sender: &str) -> &str {
    sender
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c == '!')
        .map_or(sender, |(pos, _)| &sender[..pos])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_hostmask() {
        assert_eq!(nick_of("bob!bob@bob.tmi.twitch.tv"), "bob");
    }

    #[test]
    fn test_server_name_unchanged() {
        assert_eq!(nick_of("tmi.twitch.tv"), "tmi.twitch.tv");
    }

    #[test]
    fn test_first_bang_wins() {
        assert_eq!(nick_of("a!b!c"), "a");
    }

    #[test]
    fn test_leading_bang_is_part_of_name() {
        assert_eq!(nick_of("!x!y"), "!x");
        assert_eq!(nick_of("!x"), "!x");
    }

    #[test]
    fn test_multibyte_name() {
        assert_eq!(nick_of("ñandú!n@h"), "ñandú");
    }
}
