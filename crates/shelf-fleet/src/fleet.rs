use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::{FleetError, FleetResult};
use crate::launcher::WorkerLauncher;

/// How a watched worker ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WorkerExit {
    /// Died on its own while the fleet was running.
    Exited(Option<ExitStatus>),
    /// Killed by fleet shutdown.
    Killed(Option<ExitStatus>),
}

struct WorkerHandle {
    index: usize,
    pid: Option<u32>,
    task: JoinHandle<WorkerExit>,
}

/// Tally of a fleet shutdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Workers killed by this shutdown.
    pub killed: usize,
    /// Workers that had already exited on their own.
    pub exited: usize,
    /// Workers not reaped before the timeout.
    pub unreaped: usize,
}

/// The set of live worker processes.
///
/// Each worker is owned by a watcher task that waits on it. On shutdown the
/// watchers send `SIGKILL` and reap; there is no grace period. A worker that
/// dies on its own is logged and never replaced.
pub struct WorkerFleet {
    workers: Vec<WorkerHandle>,
    shutdown: watch::Sender<bool>,
}

impl WorkerFleet {
    /// Launch `count` workers.
    ///
    /// All-or-nothing: if any launch fails, the workers already started are
    /// killed and reaped before the error is returned.
    pub async fn spawn_all(
        launcher: &dyn WorkerLauncher,
        count: usize,
        reap_timeout: Duration,
    ) -> FleetResult<Self> {
        let (shutdown, _) = watch::channel(false);
        let mut fleet = Self {
            workers: Vec::with_capacity(count),
            shutdown,
        };
        for index in 0..count {
            match launcher.launch(index) {
                Ok(child) => fleet.adopt(index, child),
                Err(source) => {
                    tracing::error!(
                        index,
                        started = fleet.len(),
                        error = %source,
                        "worker spawn failed; killing started workers"
                    );
                    fleet.shutdown(reap_timeout).await;
                    return Err(FleetError::Spawn { index, source });
                }
            }
        }
        Ok(fleet)
    }

    fn adopt(&mut self, index: usize, child: Child) {
        let pid = child.id();
        tracing::info!(index, pid, "worker started");
        let task = tokio::spawn(watch_worker(index, child, self.shutdown.subscribe()));
        self.workers.push(WorkerHandle { index, pid, task });
    }

    pub(crate) fn len(&self) -> usize {
        self.workers.len()
    }

    /// Process ids of the launched workers, in launch order.
    pub fn pids(&self) -> Vec<u32> {
        self.workers.iter().filter_map(|w| w.pid).collect()
    }

    /// Kill every worker and wait for the kills to land.
    ///
    /// Reaping shares one deadline of `reap_timeout` across the fleet.
    pub async fn shutdown(self, reap_timeout: Duration) -> ShutdownReport {
        let _ = self.shutdown.send(true);
        let deadline = Instant::now() + reap_timeout;
        let mut report = ShutdownReport::default();
        for worker in self.workers {
            let WorkerHandle { index, pid, mut task } = worker;
            match tokio::time::timeout_at(deadline, &mut task).await {
                Ok(Ok(WorkerExit::Killed(_))) => report.killed += 1,
                Ok(Ok(WorkerExit::Exited(_))) => report.exited += 1,
                Ok(Err(err)) => {
                    tracing::error!(index, pid, error = %err, "worker watcher failed");
                    report.unreaped += 1;
                }
                Err(_) => {
                    tracing::warn!(index, pid, "worker not reaped before deadline");
                    task.abort();
                    report.unreaped += 1;
                }
            }
        }
        tracing::info!(
            killed = report.killed,
            exited = report.exited,
            unreaped = report.unreaped,
            "fleet stopped"
        );
        report
    }
}

async fn watch_worker(
    index: usize,
    mut child: Child,
    mut shutdown: watch::Receiver<bool>,
) -> WorkerExit {
    tokio::select! {
        status = child.wait() => {
            let status = status.ok();
            tracing::warn!(index, ?status, "worker exited; not restarting");
            WorkerExit::Exited(status)
        }
        // Also fires if the fleet is dropped without a shutdown.
        _ = shutdown.changed() => {
            if let Err(err) = child.start_kill() {
                tracing::warn!(index, error = %err, "kill failed");
            }
            let status = child.wait().await.ok();
            tracing::debug!(index, ?status, "worker killed");
            WorkerExit::Killed(status)
        }
    }
}
