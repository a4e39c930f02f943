//! Errors surfaced by fallible growth.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("capacity overflow: cannot grow past {capacity} buckets")]
    CapacityOverflow { capacity: usize },
    #[error("failed to allocate a bucket store of {buckets} buckets")]
    AllocFailed {
        buckets: usize,
        #[source]
        source: TryReserveError,
    },
}
