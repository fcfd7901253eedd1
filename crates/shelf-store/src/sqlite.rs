use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use shelf_types::{BookId, CatalogEntry};

use crate::error::{StoreError, StoreResult};
use crate::traits::CatalogStore;

const BUSY_TIMEOUT_MS: u64 = 100;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year INTEGER NOT NULL
)";
const INSERT_IF_ABSENT: &str =
    "INSERT OR IGNORE INTO books (id, title, author, year) VALUES (?1, ?2, ?3, ?4)";
const SELECT_ALL: &str = "SELECT id, title, author, year FROM books ORDER BY id";
const SELECT_ONE: &str = "SELECT id, title, author, year FROM books WHERE id = ?1";
const COUNT_ALL: &str = "SELECT COUNT(*) FROM books";
const HAS_TABLE: &str =
    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'books'";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenMode {
    /// Workers: never creates the file, rejects writes at the engine level.
    ReadOnly,
    /// Seeder: creates the file if missing.
    ReadWrite,
}

/// SQLite-backed catalog.
///
/// Wraps exactly one connection. The mutex only serializes callers inside
/// one process; cross-process readers rely on WAL mode.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
    mode: OpenMode,
}

impl SqliteCatalog {
    pub fn open(path: &Path, mode: OpenMode) -> StoreResult<Self> {
        let flags = match mode {
            OpenMode::ReadOnly => {
                if !path.exists() {
                    return Err(StoreError::Missing(path.to_path_buf()));
                }
                OpenFlags::SQLITE_OPEN_READ_ONLY
            }
            OpenMode::ReadWrite => {
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
        };
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        if mode == OpenMode::ReadOnly {
            conn.pragma_update(None, "query_only", 1)?;
            let tables: i64 = conn.query_row(HAS_TABLE, [], |row| row.get(0))?;
            if tables == 0 {
                return Err(StoreError::SchemaMissing(path.to_path_buf()));
            }
        }
        tracing::debug!(path = %path.display(), ?mode, "opened catalog");
        Ok(Self {
            conn: Mutex::new(conn),
            mode,
        })
    }

    pub fn open_read_only(path: &Path) -> StoreResult<Self> {
        Self::open(path, OpenMode::ReadOnly)
    }

    pub fn open_read_write(path: &Path) -> StoreResult<Self> {
        Self::open(path, OpenMode::ReadWrite)
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    /// Switch the file to write-ahead logging and return the resulting mode.
    ///
    /// The setting is persistent, so workers opening later inherit it.
    pub fn set_wal_mode(&self) -> StoreResult<String> {
        self.require_writable()?;
        let conn = self.lock()?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        if !mode.eq_ignore_ascii_case("wal") {
            return Err(StoreError::JournalMode(mode));
        }
        Ok(mode.to_ascii_lowercase())
    }

    /// Create the catalog table if it does not already exist.
    pub fn init_schema(&self) -> StoreResult<()> {
        self.require_writable()?;
        self.lock()?.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    /// Insert each entry unless a row with the same id exists.
    ///
    /// Runs in one transaction and returns the number of rows actually
    /// inserted, so a repeated call returns 0.
    pub fn seed(&self, entries: &[CatalogEntry]) -> StoreResult<usize> {
        self.require_writable()?;
        for entry in entries {
            entry.validate()?;
        }
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(INSERT_IF_ABSENT)?;
            for entry in entries {
                inserted += stmt.execute(params![
                    entry.id.get(),
                    entry.title,
                    entry.author,
                    entry.year
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Close the connection, surfacing any error from the final checkpoint.
    pub fn close(self) -> StoreResult<()> {
        let conn = self.conn.into_inner().map_err(|_| StoreError::Poisoned)?;
        conn.close().map_err(|(_, err)| StoreError::Sqlite(err))
    }

    fn require_writable(&self) -> StoreResult<()> {
        match self.mode {
            OpenMode::ReadWrite => Ok(()),
            OpenMode::ReadOnly => Err(StoreError::ReadOnly),
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    Ok(CatalogEntry {
        id: BookId(row.get(0)?),
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
    })
}

impl CatalogStore for SqliteCatalog {
    fn list_all(&self) -> StoreResult<Vec<CatalogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(SELECT_ALL)?;
        let rows = stmt
            .query_map([], row_to_entry)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get_by_id(&self, id: BookId) -> StoreResult<Option<CatalogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(SELECT_ONE)?;
        Ok(stmt.query_row([id.get()], row_to_entry).optional()?)
    }

    fn count(&self) -> StoreResult<usize> {
        let conn = self.lock()?;
        let n: i64 = conn.query_row(COUNT_ALL, [], |row| row.get(0))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_types::seed_set;
    use std::path::PathBuf;

    fn seeded(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("books.db");
        let rw = SqliteCatalog::open_read_write(&path).unwrap();
        rw.set_wal_mode().unwrap();
        rw.init_schema().unwrap();
        rw.seed(&seed_set()).unwrap();
        rw.close().unwrap();
        path
    }

    #[test]
    fn init_schema_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let rw = SqliteCatalog::open_read_write(&dir.path().join("books.db")).unwrap();
        rw.init_schema().unwrap();
        rw.init_schema().unwrap();
        assert_eq!(rw.count().unwrap(), 0);
    }

    #[test]
    fn wal_mode_sticks() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded(&dir);
        let ro = SqliteCatalog::open_read_only(&path).unwrap();
        let mode: String = ro
            .lock()
            .unwrap()
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_ascii_lowercase(), "wal");
    }

    #[test]
    fn seed_twice_inserts_once() {
        let dir = tempfile::tempdir().unwrap();
        let rw = SqliteCatalog::open_read_write(&dir.path().join("books.db")).unwrap();
        rw.init_schema().unwrap();
        assert_eq!(rw.seed(&seed_set()).unwrap(), 5);
        let before = rw.list_all().unwrap();
        assert_eq!(rw.seed(&seed_set()).unwrap(), 0);
        assert_eq!(rw.list_all().unwrap(), before);
        assert_eq!(rw.count().unwrap(), 5);
    }

    #[test]
    fn seed_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let rw = SqliteCatalog::open_read_write(&dir.path().join("books.db")).unwrap();
        rw.init_schema().unwrap();
        let original = CatalogEntry::new(1, "First Title", "Someone", 1999).unwrap();
        rw.seed(std::slice::from_ref(&original)).unwrap();
        assert_eq!(rw.seed(&seed_set()).unwrap(), 4);
        assert_eq!(rw.get_by_id(BookId(1)).unwrap(), Some(original));
    }

    #[test]
    fn seed_rejects_invalid_entries() {
        let dir = tempfile::tempdir().unwrap();
        let rw = SqliteCatalog::open_read_write(&dir.path().join("books.db")).unwrap();
        rw.init_schema().unwrap();
        let bad = CatalogEntry {
            id: BookId(9),
            title: String::new(),
            author: "x".into(),
            year: 1,
        };
        assert!(matches!(rw.seed(&[bad]), Err(StoreError::InvalidEntry(_))));
        assert_eq!(rw.count().unwrap(), 0);
    }

    #[test]
    fn read_only_lookups() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded(&dir);
        let ro = SqliteCatalog::open_read_only(&path).unwrap();
        assert_eq!(ro.mode(), OpenMode::ReadOnly);

        for expected in seed_set() {
            assert_eq!(ro.get_by_id(expected.id).unwrap(), Some(expected));
        }
        assert_eq!(ro.get_by_id(BookId(999_999)).unwrap(), None);
        assert_eq!(ro.get_by_id(BookId(-1)).unwrap(), None);
        assert_eq!(ro.list_all().unwrap(), seed_set());
    }

    #[test]
    fn read_only_rejects_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded(&dir);
        let ro = SqliteCatalog::open_read_only(&path).unwrap();
        assert!(matches!(ro.init_schema(), Err(StoreError::ReadOnly)));
        assert!(matches!(ro.seed(&seed_set()), Err(StoreError::ReadOnly)));
        assert!(matches!(ro.set_wal_mode(), Err(StoreError::ReadOnly)));
    }

    #[test]
    fn read_only_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(matches!(
            SqliteCatalog::open_read_only(&path),
            Err(StoreError::Missing(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn read_only_requires_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        SqliteCatalog::open_read_write(&path).unwrap().close().unwrap();
        assert!(matches!(
            SqliteCatalog::open_read_only(&path),
            Err(StoreError::SchemaMissing(_))
        ));
    }

    #[test]
    fn many_readers_at_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = seeded(&dir);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let ro = SqliteCatalog::open_read_only(&path).unwrap();
                    ro.get_by_id(BookId(1)).unwrap()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap().unwrap().title, "The Rust Programming Language");
        }
    }
}
