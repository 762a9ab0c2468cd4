//! Chat message parsing.
//!
//! Twitch chat traffic that is worth dispatching has the fixed shape
//!
//! ```text
//! :<sender> <type> <target> :<content>
//! ```
//!
//! Anything else (server numerics without a trailing parameter, `JOIN`
//! echoes, keep-alive pings) fails to parse and is skipped by the session.

use std::fmt;
use std::str::FromStr;

use nom::{
    bytes::complete::take_while1,
    character::complete::{char, satisfy},
    IResult,
};

use crate::error::MessageParseError;
use crate::prefix::nick_of;

/// A parsed inbound chat line.
///
/// `content` never ends with `\r`, and `sender` is the bare nickname when the
/// wire sender was a `nick!user@host` mask.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// Nickname (or server name) that sent the line.
    pub sender: String,
    /// Message type, e.g. `PRIVMSG` or `NOTICE`.
    pub kind: String,
    /// Target of the message, usually the channel.
    pub target: String,
    /// Trailing text of the line.
    pub content: String,
}

/// Non-empty run of non-whitespace characters.
fn token(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

/// Exactly one whitespace character between fields.
fn separator(input: &str) -> IResult<&str, char> {
    satisfy(char::is_whitespace)(input)
}

/// Non-empty trailing text up to the end of the line.
fn trailing(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '\n')(input)
}

/// Run one parsing step, reporting where the line broke the expected shape.
fn expect<'a, O>(
    line: &str,
    input: &'a str,
    expected: &'static str,
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> Result<(&'a str, O), MessageParseError> {
    parser(input).map_err(|_| MessageParseError::Malformed {
        position: line.len() - input.len(),
        expected,
    })
}

impl ChatMessage {
    /// Parse one line with its `\r\n` terminator already removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tmi_proto::ChatMessage;
    ///
    /// let msg = ChatMessage::parse(":a!b c d :e").unwrap();
    /// assert_eq!((msg.sender.as_str(), msg.kind.as_str()), ("a", "c"));
    /// assert_eq!((msg.target.as_str(), msg.content.as_str()), ("d", "e"));
    ///
    /// assert!(ChatMessage::parse("PING :tmi.twitch.tv").is_err());
    /// ```
    pub fn parse(line: &str) -> Result<Self, MessageParseError> {
        // A single trailing '\n' is tolerated, as an end-of-line anchor would.
        let line = line.strip_suffix('\n').unwrap_or(line);
        if line.is_empty() {
            return Err(MessageParseError::EmptyMessage);
        }

        let input = line
            .strip_prefix(':')
            .ok_or(MessageParseError::MissingPrefix)?;

        let (input, sender) = expect(line, input, "sender", token)?;
        let (input, _) = expect(line, input, "whitespace after sender", separator)?;
        let (input, kind) = expect(line, input, "message type", token)?;
        let (input, _) = expect(line, input, "whitespace after type", separator)?;
        let (input, target) = expect(line, input, "target", token)?;
        let (input, _) = expect(line, input, "whitespace after target", separator)?;
        let (input, _) = expect(line, input, "':' before content", char(':'))?;
        let (rest, content) = expect(line, input, "content", trailing)?;

        if !rest.is_empty() {
            return Err(MessageParseError::Malformed {
                position: line.len() - rest.len(),
                expected: "end of line",
            });
        }

        let content = content.strip_suffix('\r').unwrap_or(content);

        Ok(Self {
            sender: nick_of(sender).to_owned(),
            kind: kind.to_owned(),
            target: target.to_owned(),
            content: content.to_owned(),
        })
    }

    /// Whether this is a chat message (`PRIVMSG`).
    pub fn is_privmsg(&self) -> bool {
        self.kind == "PRIVMSG"
    }
}

impl FromStr for ChatMessage {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ":{} {} {} :{}",
            self.sender, self.kind, self.target, self.content
        )
    }
}
