//! Error types for the chat protocol library.
//!
//! [`ProtocolError`] covers failures of the framing layer, while
//! [`MessageParseError`] describes why a single line could not be turned
//! into a [`ChatMessage`](crate::ChatMessage). Parse errors are recoverable:
//! the offending line is dropped and the stream continues.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the optional length bound of the codec.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered so far.
        actual: usize,
        /// Configured maximum.
        limit: usize,
    },
}

/// Errors encountered when parsing chat lines.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Line was empty.
    #[error("empty message")]
    EmptyMessage,

    /// Line did not start with the `:` that introduces the sender.
    #[error("missing sender prefix")]
    MissingPrefix,

    /// Line broke the `:<sender> <type> <target> :<content>` shape.
    #[error("malformed message at position {position}: expected {expected}")]
    Malformed {
        /// Byte offset where the shape was broken.
        position: usize,
        /// What the parser was looking for.
        expected: &'static str,
    },
}
