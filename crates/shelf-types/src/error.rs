use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("id must be positive, got {0}")]
    NonPositiveId(i64),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
