//! One framed TCP connection to the chat server.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::debug;

use tmi_proto::{LineCodec, ProtocolError};

use crate::error::{SessionError, SessionResult};

/// Framed read and write halves of a single `TcpStream`.
///
/// The reader keeps bytes after a terminator buffered for the next line.
#[derive(Debug)]
pub(crate) struct Connection {
    reader: FramedRead<OwnedReadHalf, LineCodec>,
    writer: FramedWrite<OwnedWriteHalf, LineCodec>,
}

impl Connection {
    pub(crate) async fn open(host: &str, port: u16) -> SessionResult<Self> {
        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| SessionError::Connect {
                addr: format!("{host}:{port}"),
                source,
            })?;
        let _ = stream.set_nodelay(true);

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: FramedRead::new(read_half, LineCodec::new()),
            writer: FramedWrite::new(write_half, LineCodec::new()),
        })
    }

    /// Write one line; the codec appends the terminator.
    pub(crate) async fn send(&mut self, line: String) -> SessionResult {
        self.writer.send(line).await?;
        Ok(())
    }

    /// Next complete line, or `None` once the server closed the stream.
    pub(crate) async fn next_line(&mut self) -> Option<Result<String, ProtocolError>> {
        self.reader.next().await
    }

    /// Flush and shut down the write half, then drop both halves.
    pub(crate) async fn close(mut self) {
        if let Err(e) = self.writer.close().await {
            debug!(error = %e, "error while closing connection");
        }
    }
}
