//! Store client error types

use thiserror::Error;

/// Errors surfaced by a store session
#[derive(Error, Debug)]
pub enum StoreError {
    /// Statement referenced a table the store does not know
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Wrong number of bound values for a prepared statement
    #[error("statement expects {expected} bound values, got {got}")]
    BindCount { expected: usize, got: usize },

    /// Transport or backend failure
    #[error("store request failed: {0}")]
    Request(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
