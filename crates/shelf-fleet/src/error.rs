use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("seeding failed: {0}")]
    Seed(#[from] shelf_store::StoreError),

    #[error("failed to spawn worker {index}: {source}")]
    Spawn {
        index: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

pub type FleetResult<T> = Result<T, FleetError>;
