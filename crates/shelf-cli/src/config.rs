use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use shelf_fleet::FleetConfig;
use shelf_server::ServerConfig;

use crate::cli::Cli;

/// Whole-program configuration, one TOML table per concern.
///
/// ```toml
/// [server]
/// bind_addr = "0.0.0.0:8080"
/// db_path = "books.db"
///
/// [fleet]
/// workers = 4
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub server: ServerConfig,
    pub fleet: FleetConfig,
}

impl ShelfConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// File (if any), then command-line overrides.
    pub fn resolve(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_overrides(cli);
        Ok(config)
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(bind) = cli.bind {
            self.server.bind_addr = bind;
        }
        if let Some(db) = &cli.db {
            self.server.db_path = db.clone();
        }
        if let Some(workers) = cli.workers {
            self.fleet.workers = Some(workers);
        }
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
