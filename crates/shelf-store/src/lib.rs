//! Durable catalog storage for shelf.
//!
//! The catalog lives in a single SQLite file. It is written exactly once per
//! coordinator start by the [`Seeder`], before any worker exists, and is then
//! read concurrently by every worker process through its own read-only
//! [`SqliteCatalog`] handle.
//!
//! # Storage Backends
//!
//! All backends implement the [`CatalogStore`] trait:
//!
//! - [`SqliteCatalog`] -- file-backed store in WAL journal mode
//! - [`InMemoryCatalog`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Single writer before readers: seeding finishes and its handle is closed
//!    before any read-only handle is opened.
//! 2. Seeding is insert-if-absent keyed by id, so re-running it never
//!    duplicates or rewrites rows.
//! 3. A missing row is `Ok(None)`, never an error.
//! 4. All SQLite errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod seeder;
pub mod sqlite;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCatalog;
pub use seeder::{SeedReport, Seeder};
pub use sqlite::{OpenMode, SqliteCatalog};
pub use traits::CatalogStore;
