use std::path::PathBuf;

use shelf_types::TypeError;

/// Errors from catalog store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database file does not exist (read-only opens never create it).
    #[error("catalog database not found: {}", .0.display())]
    Missing(PathBuf),

    /// The database exists but has no catalog table.
    #[error("catalog schema missing in {}", .0.display())]
    SchemaMissing(PathBuf),

    /// A write was attempted through a read-only handle.
    #[error("store is read-only")]
    ReadOnly,

    /// The journal mode could not be switched to WAL.
    #[error("journal mode is {0:?}, expected \"wal\"")]
    JournalMode(String),

    /// An entry failed validation before being written.
    #[error("invalid entry: {0}")]
    InvalidEntry(#[from] TypeError),

    /// Error from the SQLite engine.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A thread panicked while holding the connection lock.
    #[error("connection lock poisoned")]
    Poisoned,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
