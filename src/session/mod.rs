//! Chat session: connection lifecycle, read loop and command dispatch.
//!
//! ```text
//!  Disconnected -> Connecting -> Authenticating -> Joining -> Listening
//!        ^                                                        |
//!        +--------------------- stop / fatal error ---------------+
//! ```
//!
//! `reconnect()` passes through `Reconnecting` while the stale connection is
//! shut down, so two live connections never coexist. Retrying after a
//! failure is left to the caller (see [`run_until_stopped`]).

mod connection;
mod dispatch;
mod handle;
mod policy;

pub use dispatch::{Callback, Invocation, Registration};
pub use handle::{ChatSender, ListenHandle, StopHandle};
pub use policy::{ReconnectPolicy, run_until_stopped};

use std::fmt;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{Instrument, debug, info, trace, warn};

use tmi_proto::{ChatMessage, Command, IntoKeywords, SessionState, is_keepalive};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::telemetry::spans;
use connection::Connection;
use handle::Request;

/// Substring of the authentication reply that marks a rejected credential.
const AUTH_FAILED: &str = "failed";

/// What woke the read loop.
enum Event {
    Line(String),
    Request(Request),
    Closed,
}

/// A persistent connection to one chat channel.
pub struct ChatSession {
    config: SessionConfig,
    state: SessionState,
    connection: Option<Connection>,
    registrations: Vec<Registration>,
    stop: StopHandle,
    sender: ChatSender,
    requests: mpsc::UnboundedReceiver<Request>,
}

impl ChatSession {
    /// Create a disconnected session.
    pub fn new(config: SessionConfig) -> Self {
        let (tx, requests) = mpsc::unbounded_channel();
        Self {
            config,
            state: SessionState::Disconnected,
            connection: None,
            registrations: Vec::new(),
            stop: StopHandle::new(),
            sender: ChatSender::new(tx),
            requests,
        }
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether a connection handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Register a command that must open the message.
    pub fn register<F>(
        &mut self,
        prefix: &str,
        keywords: impl IntoKeywords,
        callback: F,
    ) -> &mut Self
    where
        F: Fn(&Invocation<'_>) + Send + Sync + 'static,
    {
        self.register_with(prefix, keywords, true, callback)
    }

    /// Register a command; unanchored commands match anywhere, every occurrence.
    pub fn register_with<F>(
        &mut self,
        prefix: &str,
        keywords: impl IntoKeywords,
        anchored: bool,
        callback: F,
    ) -> &mut Self
    where
        F: Fn(&Invocation<'_>) + Send + Sync + 'static,
    {
        let registration = Registration::new(prefix, keywords, anchored, callback);
        debug!(
            prefix = %registration.matcher().prefix(),
            keywords = ?registration.matcher().keywords(),
            anchored,
            "command registered"
        );
        self.registrations.push(registration);
        self
    }

    /// Handle for sending and registering from other tasks.
    pub fn sender(&self) -> ChatSender {
        self.sender.clone()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Ask the read loop to exit after its current timed read.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_running()
    }

    /// Connect, authenticate, join, then listen until stopped or a fatal error.
    ///
    /// The running flag is cleared whenever this returns.
    pub async fn connect_and_listen(&mut self) -> SessionResult {
        self.stop.start();
        self.connect_and_listen_armed().await
    }

    /// Listen on the connection opened by [`reconnect`](Self::reconnect).
    pub async fn listen(&mut self) -> SessionResult {
        self.stop.start();
        self.run().await
    }

    /// Connect and listen on a background task.
    pub fn spawn(mut self) -> ListenHandle {
        // Set before the task starts so an early stop() is never overwritten.
        self.stop.start();
        let stop = self.stop_handle();
        let sender = self.sender();
        let task = tokio::spawn(async move {
            let result = self.connect_and_listen_armed().await;
            (self, result)
        });
        ListenHandle::new(stop, sender, task)
    }

    /// Drop any existing connection, then connect, authenticate and join.
    ///
    /// On failure the session is left `Disconnected` with no connection.
    pub async fn reconnect(&mut self) -> SessionResult {
        if let Some(stale) = self.connection.take() {
            self.transition(SessionState::Reconnecting);
            stale.close().await;
        }

        let result = self.establish().await;
        if let Err(e) = &result {
            warn!(addr = %self.config.addr(), error = %e, code = e.error_code(), "connect failed");
            self.close().await;
            self.transition(SessionState::Disconnected);
        }
        result
    }

    /// Connect and listen with the running flag already set.
    async fn connect_and_listen_armed(&mut self) -> SessionResult {
        if let Err(e) = self.reconnect().await {
            self.stop.stop();
            return Err(e);
        }
        self.run().await
    }

    /// Send `PRIVMSG <channel> :<text>` on the current connection.
    pub async fn send_chat_message(&mut self, text: &str) -> SessionResult {
        let command = Command::privmsg(self.config.channel(), text);
        self.send(command).await
    }

    async fn establish(&mut self) -> SessionResult {
        self.transition(SessionState::Connecting);
        let connection = Connection::open(self.config.host(), self.config.port()).await?;
        info!(host = %self.config.host(), port = self.config.port(), "connection established");
        self.connection = Some(connection);

        self.transition(SessionState::Authenticating);
        self.send(Command::Pass(self.config.credential().expose().to_owned()))
            .await?;
        self.send(Command::Nick(self.config.nickname().to_owned()))
            .await?;
        let reply = self.authenticate().await?;
        info!(reply = %reply.content, "authenticated");

        self.transition(SessionState::Joining);
        self.send(Command::Join(self.config.channel().to_owned()))
            .await?;
        info!(channel = %self.config.channel(), "joined channel");
        Ok(())
    }

    /// Read and judge the server's first line.
    async fn authenticate(&mut self) -> SessionResult<ChatMessage> {
        let auth_timeout = self.config.auth_timeout();
        let connection = self.connection.as_mut().ok_or(SessionError::NotConnected)?;

        let line = match timeout(auth_timeout, connection.next_line()).await {
            Err(_) => return Err(SessionError::AuthTimeout),
            Ok(None) => return Err(SessionError::ConnectionClosed),
            Ok(Some(line)) => line?,
        };
        let reply = ChatMessage::parse(&line).map_err(SessionError::Handshake)?;
        if reply.content.contains(AUTH_FAILED) {
            return Err(SessionError::Auth(reply.content));
        }
        Ok(reply)
    }

    /// Read loop plus teardown. The caller sets the running flag; teardown
    /// clears it.
    async fn run(&mut self) -> SessionResult {
        let span = spans::session(self.config.channel());
        let result = self.listen_loop().instrument(span).await;
        if let Err(e) = &result {
            warn!(error = %e, code = e.error_code(), "listen loop failed");
        }
        self.stop.stop();
        self.close().await;
        self.transition(SessionState::Disconnected);
        result
    }

    async fn listen_loop(&mut self) -> SessionResult {
        if self.connection.is_none() {
            return Err(SessionError::NotConnected);
        }
        self.transition(SessionState::Listening);
        info!("listening to chat");

        let read_timeout = self.config.read_timeout();
        while self.stop.is_running() {
            let connection = self.connection.as_mut().ok_or(SessionError::NotConnected)?;
            let event = tokio::select! {
                read = timeout(read_timeout, connection.next_line()) => match read {
                    // Timed out: re-check the running flag.
                    Err(_) => continue,
                    Ok(None) => Event::Closed,
                    Ok(Some(line)) => Event::Line(line?),
                },
                Some(request) = self.requests.recv() => Event::Request(request),
            };

            match event {
                Event::Request(request) => self.handle_request(request).await?,
                _ if !self.stop.is_running() => break,
                Event::Closed => return Err(SessionError::ConnectionClosed),
                Event::Line(line) => self.handle_line(&line).await?,
            }
        }

        info!("stopped listening");
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> SessionResult {
        trace!(line = %line, "received");

        if is_keepalive(line) {
            return self.send(Command::keepalive_reply()).await;
        }

        match ChatMessage::parse(line) {
            Ok(message) => {
                self.dispatch(&message);
                self.flush_requests().await
            }
            Err(e) => {
                if self.config.debug() {
                    debug!(line = %line, error = %e, "skipping unparseable line");
                }
                Ok(())
            }
        }
    }

    /// Run every matching callback; returns how many ran.
    fn dispatch(&self, message: &ChatMessage) -> usize {
        let _span = spans::dispatch(&message.kind, &message.sender).entered();
        let dispatched = self
            .registrations
            .iter()
            .filter(|registration| registration.dispatch(message, &self.sender))
            .count();
        if dispatched > 0 {
            debug!(count = dispatched, "commands dispatched");
        }
        dispatched
    }

    /// Carry out whatever the callbacks queued.
    async fn flush_requests(&mut self) -> SessionResult {
        while let Ok(request) = self.requests.try_recv() {
            self.handle_request(request).await?;
        }
        Ok(())
    }

    async fn handle_request(&mut self, request: Request) -> SessionResult {
        match request {
            Request::Chat(text) => self.send_chat_message(&text).await,
            Request::Register(registration) => {
                debug!(prefix = %registration.matcher().prefix(), "command registered");
                self.registrations.push(registration);
                Ok(())
            }
        }
    }

    async fn send(&mut self, command: Command) -> SessionResult {
        let line = command.to_string();
        if self.config.verbose() {
            info!(line = %self.config.credential().redact(&line), "sending");
        }
        let connection = self.connection.as_mut().ok_or(SessionError::NotConnected)?;
        connection.send(line).await
    }

    async fn close(&mut self) {
        if let Some(connection) = self.connection.take() {
            connection.close().await;
        }
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "session state");
            self.state = next;
        }
    }
}

impl fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSession")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("connected", &self.connection.is_some())
            .field("registrations", &self.registrations.len())
            .field("running", &self.stop.is_running())
            .finish()
    }
}
