//! Worker process for the shelf catalog service.
//!
//! Each worker opens its own read-only catalog handle, binds the shared
//! listening port with `SO_REUSEPORT` and serves the catalog API until it is
//! killed. Workers hold no state beyond that handle; the kernel spreads
//! incoming connections across all of them.

pub mod config;
pub mod error;
pub mod handler;
pub mod listener;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError, ServerResult};
pub use listener::{bind_shared, SHARES_PORT};
pub use router::{build_router, endpoints, AppState};
pub use server::WorkerServer;
