use std::num::NonZeroUsize;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Coordinator settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Number of workers. `None` means one per logical CPU.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Total time shutdown waits to reap the killed workers. One deadline
    /// covers the whole fleet.
    pub reap_timeout_ms: u64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            workers: None,
            reap_timeout_ms: 2_000,
        }
    }
}

impl FleetConfig {
    /// Resolve the worker count: explicit override, else available
    /// parallelism, never below one. Without port sharing only one worker can
    /// bind, so the count collapses to one.
    pub fn worker_count(&self) -> usize {
        let wanted = self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        });
        if !shelf_server::SHARES_PORT && wanted > 1 {
            tracing::warn!(
                wanted,
                "SO_REUSEPORT unavailable on this platform; running a single worker"
            );
            return 1;
        }
        wanted.max(1)
    }

    pub fn reap_timeout(&self) -> Duration {
        Duration::from_millis(self.reap_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = FleetConfig::default();
        assert_eq!(c.workers, None);
        assert_eq!(c.reap_timeout(), Duration::from_secs(2));
    }

    #[test]
    fn defaults_to_parallelism() {
        let cpus = std::thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
        let expected = if shelf_server::SHARES_PORT { cpus } else { 1 };
        assert_eq!(FleetConfig::default().worker_count(), expected);
    }

    #[test]
    fn zero_override_still_runs_one() {
        let c = FleetConfig { workers: Some(0), ..Default::default() };
        assert_eq!(c.worker_count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn explicit_override() {
        let c = FleetConfig { workers: Some(3), ..Default::default() };
        assert_eq!(c.worker_count(), 3);
    }
}
