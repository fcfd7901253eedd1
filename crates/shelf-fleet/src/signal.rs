use crate::error::{FleetError, FleetResult};

/// Listener for the host's stop requests.
///
/// Register it before launching workers so a signal that arrives mid-spawn
/// is queued instead of killing the coordinator with its children orphaned.
pub struct TerminationSignals {
    #[cfg(unix)]
    interrupt: tokio::signal::unix::Signal,
    #[cfg(unix)]
    terminate: tokio::signal::unix::Signal,
}

impl TerminationSignals {
    /// Install handlers for SIGINT and SIGTERM (ctrl-c off unix).
    pub fn register() -> FleetResult<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            Ok(Self {
                interrupt: signal(SignalKind::interrupt()).map_err(FleetError::Signal)?,
                terminate: signal(SignalKind::terminate()).map_err(FleetError::Signal)?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Wait for the next stop request and name it.
    pub async fn recv(&mut self) -> &'static str {
        #[cfg(unix)]
        {
            tokio::select! {
                _ = self.interrupt.recv() => "SIGINT",
                _ = self.terminate.recv() => "SIGTERM",
            }
        }
        #[cfg(not(unix))]
        {
            match tokio::signal::ctrl_c().await {
                Ok(()) => "ctrl-c",
                Err(err) => {
                    tracing::error!(error = %err, "ctrl-c handler failed");
                    std::future::pending().await
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use nix::sys::signal::{raise, Signal};
    use std::time::Duration;

    #[tokio::test]
    async fn sigterm_is_reported() {
        let mut signals = TerminationSignals::register().unwrap();
        raise(Signal::SIGTERM).unwrap();
        let name = tokio::time::timeout(Duration::from_secs(5), signals.recv())
            .await
            .unwrap();
        assert_eq!(name, "SIGTERM");
    }
}
