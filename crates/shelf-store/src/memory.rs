use std::collections::BTreeMap;
use std::sync::RwLock;

use shelf_types::{BookId, CatalogEntry};

use crate::error::StoreResult;
use crate::traits::CatalogStore;

/// In-memory, BTreeMap-based catalog.
///
/// Intended for tests and embedding. Seeding follows the same
/// insert-if-absent rule as the SQLite backend.
pub struct InMemoryCatalog {
    rows: RwLock<BTreeMap<BookId, CatalogEntry>>,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a catalog holding the given entries.
    pub fn with_entries(entries: &[CatalogEntry]) -> Self {
        let catalog = Self::new();
        catalog.seed(entries);
        catalog
    }

    /// Insert entries whose id is not yet present; returns how many were added.
    pub fn seed(&self, entries: &[CatalogEntry]) -> usize {
        let mut rows = self.rows.write().expect("lock poisoned");
        let mut inserted = 0;
        for entry in entries {
            if !rows.contains_key(&entry.id) {
                rows.insert(entry.id, entry.clone());
                inserted += 1;
            }
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.rows.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryCatalog {
    fn list_all(&self) -> StoreResult<Vec<CatalogEntry>> {
        Ok(self.rows.read().expect("lock poisoned").values().cloned().collect())
    }

    fn get_by_id(&self, id: BookId) -> StoreResult<Option<CatalogEntry>> {
        Ok(self.rows.read().expect("lock poisoned").get(&id).cloned())
    }

    fn count(&self) -> StoreResult<usize> {
        Ok(self.len())
    }
}
