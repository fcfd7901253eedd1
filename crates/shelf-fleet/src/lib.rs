//! Coordinator for the shelf catalog service.
//!
//! The coordinator is the parent process. It walks a fixed sequence of
//! [`Phase`]s: seed the catalog file once, launch one worker process per
//! logical CPU, sleep until SIGINT or SIGTERM, then `SIGKILL` every worker and
//! exit. It never binds the service port and never restarts workers.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fleet;
pub mod launcher;
pub mod phase;
pub mod signal;

pub use config::FleetConfig;
pub use coordinator::{Coordinator, CoordinatorReport};
pub use error::{FleetError, FleetResult};
pub use fleet::{ShutdownReport, WorkerFleet};
pub use launcher::{ProcessLauncher, WorkerLauncher, WORKER_ENV_MARKER};
pub use phase::Phase;
pub use signal::TerminationSignals;
