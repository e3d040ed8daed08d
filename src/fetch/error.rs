//! Fan-out error types

use thiserror::Error;

use crate::partition::SequenceError;
use crate::store::StoreError;

/// Errors from the partition fan-out path
#[derive(Error, Debug)]
pub enum FetchError {
    /// Window could not be sequenced into partition keys
    #[error(transparent)]
    Sequence(#[from] SequenceError),

    /// Statement preparation failed before any partition was read
    #[error("failed to prepare partition query: {0}")]
    Prepare(#[source] StoreError),

    /// A partition read failed; the whole fan-out is aborted
    #[error("partition fetch failed: {0}")]
    FetchFailed(#[source] StoreError),
}

/// Result type for fan-out operations
pub type FetchResult<T> = Result<T, FetchError>;
