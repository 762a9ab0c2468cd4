//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise the filter is `debug` with the debug
/// flag and `info` without.
pub fn init_tracing(logging: &LoggingConfig) {
    let fallback = if logging.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Standardized span constructors for chat observability.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span around one session run on `channel`.
    pub fn session(channel: &str) -> Span {
        info_span!("session", channel = %channel)
    }

    /// Span around dispatching one message to its command callbacks.
    pub fn dispatch(kind: &str, sender: &str) -> Span {
        debug_span!("dispatch", kind = %kind, sender = %sender)
    }
}
