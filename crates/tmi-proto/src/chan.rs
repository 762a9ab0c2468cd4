//! Channel name utilities.
//!
//! Twitch channels are named after the broadcaster's login with a leading
//! `#`.

/// Leading marker of channel names.
pub const CHANNEL_PREFIX: char = '#';

/// Prefix `name` with [`CHANNEL_PREFIX`] unless it already starts with it.
///
/// Idempotent: normalizing twice equals normalizing once.
///
/// ```
/// use tmi_proto::normalize_channel;
///
/// assert_eq!(normalize_channel("mychannel"), "#mychannel");
/// assert_eq!(normalize_channel("#mychannel"), "#mychannel");
/// ```
pub fn normalize_channel(name: &str) -> String {
    if name.starts_with(CHANNEL_PREFIX) {
        name.to_owned()
    } else {
        format!("{CHANNEL_PREFIX}{name}")
    }
}
