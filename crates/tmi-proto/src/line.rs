//! CRLF line codec for tokio.
//!
//! Chat lines are terminated by `\r\n`. The decoder buffers bytes until the
//! two-byte terminator is seen and yields the line without it; a lone `\r`
//! or `\n` is ordinary content. Bytes that are not valid UTF-8 are replaced
//! with U+FFFD rather than failing the stream.
//!
//! Lines are unbounded unless [`LineCodec::with_max_len`] is used, so a peer
//! that never sends a terminator can grow the buffer without limit.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};

use crate::error;

/// Line terminator used in both directions.
pub const TERMINATOR: &[u8; 2] = b"\r\n";

/// Line-based codec that handles CRLF-terminated chat lines.
#[derive(Debug, Default)]
pub struct LineCodec {
    /// Index of the next byte to scan for a terminator.
    next_index: usize,
    /// Optional maximum line length, terminator excluded.
    max_len: Option<usize>,
}

impl LineCodec {
    /// Create an unbounded codec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec that rejects lines longer than `max_len` bytes.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len: Some(max_len),
        }
    }

    /// Truncate outbound text at the first line break so one write can only
    /// ever produce one protocol line.
    pub fn sanitize(line: &str) -> &str {
        match line.find(['\r', '\n']) {
            Some(pos) => &line[..pos],
            None => line,
        }
    }

    fn check_len(&self, actual: usize) -> error::Result<()> {
        match self.max_len {
            Some(limit) if actual > limit => Err(error::ProtocolError::LineTooLong { actual, limit }),
            _ => Ok(()),
        }
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        // Step back one byte: the previous chunk may have ended on '\r'.
        let start = self.next_index.saturating_sub(1);

        if let Some(offset) = src[start..]
            .windows(TERMINATOR.len())
            .position(|w| w == TERMINATOR)
        {
            let end = start + offset;
            let mut line = src.split_to(end + TERMINATOR.len());
            line.truncate(end);
            self.next_index = 0;

            self.check_len(line.len())?;

            Ok(Some(String::from_utf8_lossy(&line).into_owned()))
        } else {
            self.next_index = src.len();
            self.check_len(src.len())?;
            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> error::Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                // An unterminated tail is never a line.
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> error::Result<()> {
        let line = Self::sanitize(&line);
        dst.reserve(line.len() + TERMINATOR.len());
        dst.extend_from_slice(line.as_bytes());
        dst.extend_from_slice(TERMINATOR);
        Ok(())
    }
}
