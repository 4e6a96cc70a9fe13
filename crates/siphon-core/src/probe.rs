//! Boundary probing — single-query discovery of a partition column's
//! minimum, maximum, and (optionally) row count.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boundaries of the partition column, discovered by a single probe query.
///
/// Not cached: every probe re-reads the table, so concurrent planners always
/// see fresh values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundaries {
    /// Smallest value of the partition column.
    pub min: i64,
    /// Largest value of the partition column.
    pub max: i64,
    /// Total row count. Populated only when no explicit partition count was
    /// requested; reported as 0 otherwise since it is unused downstream.
    pub count: u64,
}

/// Errors raised by a boundary probe.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The driver cannot handle the connection string, or the connection
    /// could not be established.
    #[error("connectivity failure: {0}")]
    Connectivity(String),

    /// The boundary query was rejected, returned no row, or returned NULL
    /// bounds.
    #[error("boundary query failed: {0}")]
    Query(String),
}

/// A source that can discover the boundaries of an integer partition column.
///
/// The target table is bound to the implementing value. Passing
/// `requested_partitions == 0` means the caller did not fix a partition
/// count, so the probe must also retrieve the row count for
/// batch-size-driven planning.
///
/// Implementations own a dedicated connection for the duration of the call
/// and release it on every exit path.
#[async_trait]
pub trait BoundaryProber: Send + Sync {
    async fn probe(
        &self,
        column: &str,
        requested_partitions: usize,
    ) -> Result<Boundaries, ProbeError>;
}
