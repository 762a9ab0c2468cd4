//! Command registrations and the per-match invocation context.

use std::fmt;

use tmi_proto::{ChatMessage, CommandMatcher, IntoKeywords};

use super::handle::ChatSender;
use crate::error::SessionResult;

/// A command callback. Runs synchronously inside the listen loop.
pub type Callback = Box<dyn Fn(&Invocation<'_>) + Send + Sync>;

/// A matcher paired with the callback it triggers.
pub struct Registration {
    matcher: CommandMatcher,
    callback: Callback,
}

impl Registration {
    pub fn new<F>(prefix: &str, keywords: impl IntoKeywords, anchored: bool, callback: F) -> Self
    where
        F: Fn(&Invocation<'_>) + Send + Sync + 'static,
    {
        Self {
            matcher: CommandMatcher::new(prefix, keywords, anchored),
            callback: Box::new(callback),
        }
    }

    pub fn matcher(&self) -> &CommandMatcher {
        &self.matcher
    }

    /// Run the callback if `message` contains a command token.
    ///
    /// Returns whether the callback ran.
    pub(crate) fn dispatch(&self, message: &ChatMessage, sender: &ChatSender) -> bool {
        let matches = self.matcher.matches(&message.content);
        if matches.is_empty() {
            return false;
        }
        let invocation = Invocation {
            message,
            matches,
            handle: sender,
        };
        (self.callback)(&invocation);
        true
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// What a callback sees: the message, the matched tokens and a way to answer.
#[derive(Debug)]
pub struct Invocation<'a> {
    message: &'a ChatMessage,
    matches: Vec<String>,
    handle: &'a ChatSender,
}

impl<'a> Invocation<'a> {
    #[inline]
    pub fn message(&self) -> &'a ChatMessage {
        self.message
    }

    /// Matched command tokens, in order of appearance.
    #[inline]
    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    /// Bare nickname of the author.
    #[inline]
    pub fn sender(&self) -> &'a str {
        &self.message.sender
    }

    #[inline]
    pub fn content(&self) -> &'a str {
        &self.message.content
    }

    /// Outbound handle, for work that outlives the callback.
    pub fn handle(&self) -> &'a ChatSender {
        self.handle
    }

    /// Answer in the session's channel. The line goes out right after dispatch.
    pub fn reply(&self, text: impl Into<String>) -> SessionResult {
        self.handle.send_chat_message(text)
    }
}
