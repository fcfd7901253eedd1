use shelf_types::{BookId, CatalogEntry};

use crate::error::StoreResult;

/// Read access to the book catalog.
///
/// All implementations must satisfy these invariants:
/// - Lookups never mutate the catalog.
/// - An unknown id is `Ok(None)`; `Err` is reserved for backend failures.
/// - Callers must not depend on the order returned by [`list_all`](Self::list_all).
pub trait CatalogStore: Send + Sync {
    /// Every entry in the catalog.
    fn list_all(&self) -> StoreResult<Vec<CatalogEntry>>;

    /// The entry with the given id, if present.
    fn get_by_id(&self, id: BookId) -> StoreResult<Option<CatalogEntry>>;

    /// Number of entries.
    ///
    /// Default implementation lists everything. Backends may override.
    fn count(&self) -> StoreResult<usize> {
        Ok(self.list_all()?.len())
    }
}
