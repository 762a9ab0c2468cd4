//! Handles that reach into a session from other tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;

use super::ChatSession;
use super::dispatch::Registration;
use crate::error::{SessionError, SessionResult};

#[derive(Debug, Default)]
struct RunningFlag {
    running: AtomicBool,
    stopped: Notify,
}

/// The running flag shared between a listen loop and whoever may stop it.
///
/// Cloning is cheap; every clone observes and controls the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    inner: Arc<RunningFlag>,
}

impl StopHandle {
    /// A new flag, initially not running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the loop as running.
    pub fn start(&self) {
        self.inner.running.store(true, Ordering::SeqCst);
    }

    /// Ask the loop to exit after its current timed read.
    pub fn stop(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
        self.inner.stopped.notify_waiters();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// Resolves once the flag is cleared.
    pub async fn stopped(&self) {
        loop {
            // Registered before the check so a concurrent stop() is not missed.
            let notified = self.inner.stopped.notified();
            if !self.is_running() {
                return;
            }
            notified.await;
        }
    }
}

/// Work queued for the listen loop.
pub(crate) enum Request {
    Chat(String),
    Register(Registration),
}

/// Cloneable handle for sending chat messages and registering commands while
/// the loop runs.
///
/// Requests are queued and carried out by the listen loop; messages queued
/// while the session is not listening go out once it listens again.
#[derive(Clone)]
pub struct ChatSender {
    tx: mpsc::UnboundedSender<Request>,
}

impl ChatSender {
    pub(crate) fn new(tx: mpsc::UnboundedSender<Request>) -> Self {
        Self { tx }
    }

    /// Queue `PRIVMSG <channel> :<text>`.
    ///
    /// Fails with [`SessionError::NotConnected`] once the session is gone.
    pub fn send_chat_message(&self, text: impl Into<String>) -> SessionResult {
        self.request(Request::Chat(text.into()))
    }

    /// Add an anchored command registration from outside the loop.
    pub fn register<F>(
        &self,
        prefix: &str,
        keywords: impl tmi_proto::IntoKeywords,
        callback: F,
    ) -> SessionResult
    where
        F: Fn(&super::Invocation<'_>) + Send + Sync + 'static,
    {
        self.register_with(prefix, keywords, true, callback)
    }

    /// Add a command registration from outside the loop.
    pub fn register_with<F>(
        &self,
        prefix: &str,
        keywords: impl tmi_proto::IntoKeywords,
        anchored: bool,
        callback: F,
    ) -> SessionResult
    where
        F: Fn(&super::Invocation<'_>) + Send + Sync + 'static,
    {
        let registration = Registration::new(prefix, keywords, anchored, callback);
        self.request(Request::Register(registration))
    }

    fn request(&self, request: Request) -> SessionResult {
        self.tx
            .send(request)
            .map_err(|_| SessionError::NotConnected)
    }
}

impl std::fmt::Debug for ChatSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSender")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}

/// A session listening on a background task.
#[derive(Debug)]
pub struct ListenHandle {
    stop: StopHandle,
    sender: ChatSender,
    task: JoinHandle<(ChatSession, SessionResult)>,
}

impl ListenHandle {
    pub(crate) fn new(
        stop: StopHandle,
        sender: ChatSender,
        task: JoinHandle<(ChatSession, SessionResult)>,
    ) -> Self {
        Self { stop, sender, task }
    }

    /// Ask the background loop to exit.
    pub fn stop(&self) {
        self.stop.stop();
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn sender(&self) -> ChatSender {
        self.sender.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to exit and take the session back.
    pub async fn join(self) -> Result<(ChatSession, SessionResult), tokio::task::JoinError> {
        self.task.await
    }
}
