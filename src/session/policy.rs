//! Caller-level reconnect policy.
//!
//! The session never retries on its own; this module is the retry loop the
//! binary wraps around it.

use std::time::Duration;

use tracing::{info, warn};

use super::{ChatSession, StopHandle};
use crate::config::ReconnectConfig;
use crate::error::{SessionError, SessionResult};

/// When and how often to reconnect after a failed session run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    enabled: bool,
    delay: Duration,
    /// Consecutive failures tolerated; 0 means unlimited.
    max_attempts: u32,
}

impl ReconnectPolicy {
    pub fn new(delay: Duration, max_attempts: u32) -> Self {
        Self {
            enabled: true,
            delay,
            max_attempts,
        }
    }

    /// Never retry.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            delay: Duration::ZERO,
            max_attempts: 0,
        }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether to retry after `error`, given `failures` consecutive failures
    /// so far (including this one).
    pub fn should_retry(&self, error: &SessionError, failures: u32) -> bool {
        self.enabled
            && error.is_retryable()
            && (self.max_attempts == 0 || failures <= self.max_attempts)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::from(&ReconnectConfig::default())
    }
}

impl From<&ReconnectConfig> for ReconnectPolicy {
    fn from(config: &ReconnectConfig) -> Self {
        Self {
            enabled: config.enabled,
            delay: config.delay(),
            max_attempts: config.max_attempts,
        }
    }
}

/// Connect and listen until `shutdown` is stopped, reconnecting per `policy`.
///
/// Returns `Ok(())` after a requested stop (through `shutdown` or the
/// session's own stop handle), or the error that ended the
/// retries. Authentication failures are never retried. The failure count
/// resets whenever a connection is established.
pub async fn run_until_stopped(
    session: &mut ChatSession,
    policy: &ReconnectPolicy,
    shutdown: &StopHandle,
) -> SessionResult {
    let mut failures = 0u32;

    loop {
        if !shutdown.is_running() {
            return Ok(());
        }

        let error = match session.reconnect().await {
            Ok(()) => {
                failures = 0;
                session.stop.start();
                // A shutdown that landed before start() would otherwise be lost.
                if !shutdown.is_running() {
                    session.stop.stop();
                }
                match session.run().await {
                    Ok(()) => return Ok(()),
                    Err(e) => e,
                }
            }
            Err(e) => e,
        };

        failures += 1;
        if !shutdown.is_running() {
            return Ok(());
        }
        if !policy.should_retry(&error, failures) {
            return Err(error);
        }

        warn!(
            error = %error,
            attempt = failures,
            delay_ms = policy.delay().as_millis() as u64,
            "session ended, reconnecting"
        );
        tokio::select! {
            _ = tokio::time::sleep(policy.delay()) => {}
            _ = shutdown.stopped() => {
                info!("shutdown requested during reconnect delay");
                return Ok(());
            }
        }
    }
}
