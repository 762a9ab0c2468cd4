//! Scripted chat server.
//!
//! Accepts any number of connections on an ephemeral port, records every
//! line clients send and answers the `PASS`/`NICK` pair with a configurable
//! authentication reply. Tests push further lines to the most recent
//! connection.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(5);

/// How the server answers authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthReply {
    Accept,
    Reject,
    /// Say nothing, so the client's authentication timeout fires.
    Silent,
}

enum Action {
    Raw(Vec<u8>),
    Close,
}

#[derive(Default)]
struct Shared {
    lines: Mutex<Vec<String>>,
    current: Mutex<Option<mpsc::UnboundedSender<Action>>>,
    connections: AtomicUsize,
    disconnects: AtomicUsize,
}

/// A running mock server. Dropping it stops accepting.
pub struct MockServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    received: mpsc::UnboundedReceiver<String>,
    accept_task: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(auth: AuthReply) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shared = Arc::new(Shared::default());
        let (received_tx, received) = mpsc::unbounded_channel();

        let accept_shared = Arc::clone(&shared);
        let accept_task = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let (tx, rx) = mpsc::unbounded_channel();
                *accept_shared.current.lock().unwrap() = Some(tx);
                accept_shared.connections.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(serve(
                    stream,
                    auth,
                    Arc::clone(&accept_shared),
                    received_tx.clone(),
                    rx,
                ));
            }
        });

        Ok(Self {
            addr,
            shared,
            received,
            accept_task,
        })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every line received so far, across all connections.
    pub fn lines(&self) -> Vec<String> {
        self.shared.lines.lock().unwrap().clone()
    }

    pub fn connections(&self) -> usize {
        self.shared.connections.load(Ordering::SeqCst)
    }

    pub fn disconnects(&self) -> usize {
        self.shared.disconnects.load(Ordering::SeqCst)
    }

    /// Wait for the next received line starting with `prefix`, skipping others.
    pub async fn expect_line(&mut self, prefix: &str) -> anyhow::Result<String> {
        let wait = async {
            while let Some(line) = self.received.recv().await {
                if line.starts_with(prefix) {
                    return Ok(line);
                }
            }
            anyhow::bail!("server stopped before receiving {prefix:?}")
        };
        timeout(WAIT, wait)
            .await
            .map_err(|_| anyhow::anyhow!("timed out waiting for {prefix:?}"))?
    }

    /// Assert nothing starting with `prefix` arrives within `within`.
    pub async fn expect_no_line(&mut self, prefix: &str, within: Duration) {
        let wait = async {
            while let Some(line) = self.received.recv().await {
                if line.starts_with(prefix) {
                    return line;
                }
            }
            std::future::pending().await
        };
        if let Ok(line) = timeout(within, wait).await {
            panic!("unexpected line: {line}");
        }
    }

    /// Send `line` plus the terminator to the newest connection.
    pub fn send_line(&self, line: &str) {
        self.send_raw(format!("{line}\r\n").into_bytes());
    }

    /// Send bytes as-is to the newest connection.
    pub fn send_raw(&self, bytes: Vec<u8>) {
        self.act(Action::Raw(bytes));
    }

    /// Close the newest connection from the server side.
    pub fn close_connection(&self) {
        self.act(Action::Close);
    }

    pub async fn wait_for_connections(&self, count: usize) -> anyhow::Result<()> {
        timeout(WAIT, async {
            while self.connections() < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .map_err(|_| anyhow::anyhow!("expected {count} connections, saw {}", self.connections()))
    }

    fn act(&self, action: Action) {
        if let Some(tx) = self.shared.current.lock().unwrap().as_ref() {
            let _ = tx.send(action);
        }
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.accept_task.abort();
    }
}

async fn serve(
    stream: TcpStream,
    auth: AuthReply,
    shared: Arc<Shared>,
    received: mpsc::UnboundedSender<String>,
    mut actions: mpsc::UnboundedReceiver<Action>,
) {
    let (read_half, mut writer) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();

    loop {
        tokio::select! {
            read = reader.read_line(&mut line) => {
                match read {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {}
                }
                let trimmed = line.trim_end_matches(['\r', '\n']).to_owned();
                line.clear();

                shared.lines.lock().unwrap().push(trimmed.clone());
                let is_nick = trimmed.starts_with("NICK ");
                let _ = received.send(trimmed);

                if is_nick {
                    let reply = match auth {
                        AuthReply::Accept => Some(":tmi.twitch.tv 001 tmichat :Welcome, GLHF!\r\n"),
                        AuthReply::Reject => {
                            Some(":tmi.twitch.tv NOTICE * :Login authentication failed\r\n")
                        }
                        AuthReply::Silent => None,
                    };
                    if let Some(reply) = reply {
                        if writer.write_all(reply.as_bytes()).await.is_err() {
                            break;
                        }
                    }
                }
            }
            Some(action) = actions.recv() => match action {
                Action::Raw(bytes) => {
                    if writer.write_all(&bytes).await.is_err() {
                        break;
                    }
                }
                Action::Close => break,
            },
        }
    }

    let _ = writer.shutdown().await;
    shared.disconnects.fetch_add(1, Ordering::SeqCst);
}
