use std::future::Future;
use std::path::PathBuf;

use shelf_store::{SeedReport, Seeder};

use crate::config::FleetConfig;
use crate::error::FleetResult;
use crate::fleet::{ShutdownReport, WorkerFleet};
use crate::launcher::WorkerLauncher;
use crate::phase::Phase;
use crate::signal::TerminationSignals;

/// Summary of one coordinator lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoordinatorReport {
    pub seed: SeedReport,
    pub workers: usize,
    pub stop_reason: &'static str,
    pub shutdown: ShutdownReport,
}

/// The parent process: seeds, spawns, waits, kills.
pub struct Coordinator {
    db_path: PathBuf,
    config: FleetConfig,
    launcher: Box<dyn WorkerLauncher>,
    phase: Phase,
}

impl Coordinator {
    pub fn new(
        db_path: impl Into<PathBuf>,
        config: FleetConfig,
        launcher: Box<dyn WorkerLauncher>,
    ) -> Self {
        Self {
            db_path: db_path.into(),
            config,
            launcher,
            phase: Phase::Seeding,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run until SIGINT or SIGTERM.
    pub async fn run(self) -> FleetResult<CoordinatorReport> {
        let mut signals = TerminationSignals::register()?;
        self.run_until(async move { signals.recv().await }).await
    }

    /// Run until `stop` resolves; its output is recorded as the stop reason.
    ///
    /// Seeding completes, and its write handle is closed, before the first
    /// worker is launched. Any seeding or spawn error ends the run.
    pub async fn run_until<F>(mut self, stop: F) -> FleetResult<CoordinatorReport>
    where
        F: Future<Output = &'static str>,
    {
        tracing::info!(phase = %self.phase, db = %self.db_path.display(), "coordinator starting");
        // Nothing else is running yet, so blocking here is harmless.
        let seed = Seeder::new(&self.db_path).run()?;

        self.advance(Phase::Spawning);
        let count = self.config.worker_count();
        let reap_timeout = self.config.reap_timeout();
        let fleet = WorkerFleet::spawn_all(self.launcher.as_ref(), count, reap_timeout).await?;

        self.advance(Phase::Running);
        tracing::info!(workers = fleet.len(), "all workers launched");
        let stop_reason = stop.await;

        self.advance(Phase::ShuttingDown);
        tracing::info!(reason = stop_reason, "stop requested; killing workers");
        let workers = fleet.len();
        let shutdown = fleet.shutdown(reap_timeout).await;

        self.advance(Phase::Terminated);
        Ok(CoordinatorReport {
            seed,
            workers,
            stop_reason,
            shutdown,
        })
    }

    fn advance(&mut self, to: Phase) {
        debug_assert_eq!(self.phase.next(), Some(to), "illegal phase transition");
        tracing::debug!(from = %self.phase, to = %to, "phase change");
        self.phase = to;
    }
}
