//! Foundation types for the shelf catalog service.
//!
//! Every other shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`BookId`] -- Primary key of a catalog row, parsed strictly from path segments
//! - [`CatalogEntry`] -- One book record as stored and served
//! - [`SEED_SET`] -- The fixed rows written by the seeder on every coordinator start

pub mod entry;
pub mod error;
pub mod seed;

pub use entry::{BookId, CatalogEntry};
pub use error::TypeError;
pub use seed::{seed_set, SeedRow, SEED_SET};
