use std::sync::Arc;

use shelf_store::{CatalogStore, SqliteCatalog};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::listener::bind_shared;
use crate::router::build_router;

/// One catalog worker.
///
/// Serves until the process is killed. There is no graceful drain; the
/// coordinator stops workers with `SIGKILL`.
pub struct WorkerServer {
    config: ServerConfig,
    index: usize,
}

impl WorkerServer {
    pub fn new(config: ServerConfig, index: usize) -> Self {
        Self { config, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Open this worker's read-only catalog handle.
    pub fn open_store(&self) -> ServerResult<Arc<dyn CatalogStore>> {
        let store = SqliteCatalog::open_read_only(&self.config.db_path)?;
        Ok(Arc::new(store))
    }

    /// Bind the shared port and hand the socket to tokio.
    pub fn bind(&self) -> ServerResult<TcpListener> {
        let addr = self.config.bind_addr;
        let std_listener = bind_shared(addr, self.config.backlog)
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(TcpListener::from_std(std_listener)?)
    }

    /// Open the store, bind, and serve forever.
    pub async fn serve(self) -> ServerResult<()> {
        let store = self.open_store()?;
        let listener = self.bind()?;
        tracing::info!(
            index = self.index,
            addr = %self.config.bind_addr,
            db = %self.config.db_path.display(),
            "worker listening"
        );
        serve_on(listener, store).await
    }
}

/// Serve the catalog API on an already-bound listener.
pub async fn serve_on(listener: TcpListener, store: Arc<dyn CatalogStore>) -> ServerResult<()> {
    axum::serve(listener, build_router(store)).await?;
    Ok(())
}
