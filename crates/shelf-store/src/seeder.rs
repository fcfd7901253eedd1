use std::path::PathBuf;

use shelf_types::{seed_set, CatalogEntry};

use crate::error::StoreResult;
use crate::sqlite::SqliteCatalog;
use crate::traits::CatalogStore;

/// Outcome of one seeding pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedReport {
    /// Rows written by this pass.
    pub inserted: usize,
    /// Rows in the catalog afterwards.
    pub total: usize,
    pub journal_mode: String,
}

/// One-shot initializer for the catalog file.
///
/// Opens a read-write handle, switches to WAL, creates the schema, inserts
/// the seed rows if absent and closes the handle. The handle never outlives
/// [`run`](Self::run), so no writer is open once workers start reading.
pub struct Seeder {
    path: PathBuf,
    entries: Vec<CatalogEntry>,
}

impl Seeder {
    /// Seeder for the built-in seed set.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_entries(path, seed_set())
    }

    pub fn with_entries(path: impl Into<PathBuf>, entries: Vec<CatalogEntry>) -> Self {
        Self {
            path: path.into(),
            entries,
        }
    }

    pub fn run(&self) -> StoreResult<SeedReport> {
        let store = SqliteCatalog::open_read_write(&self.path)?;
        let journal_mode = store.set_wal_mode()?;
        store.init_schema()?;
        let inserted = store.seed(&self.entries)?;
        let total = store.count()?;
        store.close()?;
        tracing::info!(
            path = %self.path.display(),
            inserted,
            total,
            "catalog seeded"
        );
        Ok(SeedReport {
            inserted,
            total,
            journal_mode,
        })
    }
}
