//! tmichat - Twitch chat client
//!
//! Joins the configured channel, answers the configured `[[command]]`
//! entries and reconnects according to `[reconnect]` until Ctrl-C.

use tmichat::config::Config;
use tmichat::session::{ChatSession, ReconnectPolicy, StopHandle, run_until_stopped};
use tmichat::telemetry::init_tracing;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    // Tracing is configured from the file, so load errors go to stderr.
    let config = Config::load(&config_path)
        .map_err(|e| anyhow::anyhow!("failed to load {config_path}: {e}"))?;

    init_tracing(&config.logging);

    let session_config = config.session();
    info!(
        addr = %session_config.addr(),
        channel = %session_config.channel(),
        commands = config.commands.len(),
        "Starting tmichat"
    );

    let mut session = ChatSession::new(session_config);
    for command in &config.commands {
        let reply = command.reply.clone();
        session.register_with(
            &command.prefix,
            command.keywords.as_slice(),
            command.anchored,
            move |invocation| {
                if let Err(e) = invocation.reply(reply.as_str()) {
                    warn!(error = %e, "failed to queue reply");
                }
            },
        );
    }

    let shutdown = StopHandle::new();
    shutdown.start();
    {
        let shutdown = shutdown.clone();
        let session_stop = session.stop_handle();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Ctrl-C received, stopping");
                // Shutdown first: the policy checks it after re-arming the session.
                shutdown.stop();
                session_stop.stop();
            }
        });
    }

    let policy = ReconnectPolicy::from(&config.reconnect);
    match run_until_stopped(&mut session, &policy, &shutdown).await {
        Ok(()) => {
            info!("tmichat stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, code = e.error_code(), "session ended");
            Err(e.into())
        }
    }
}
