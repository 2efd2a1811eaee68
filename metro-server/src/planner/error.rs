//! Query error types.

use crate::domain::StationId;

/// Errors from network queries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SolverError {
    /// The query names a station that is not in the network
    #[error("unknown station {0}")]
    UnknownStation(StationId),

    /// Edge relaxation did not settle after |V|-1 passes
    #[error("network contains a negative-weight cycle")]
    NegativeCycleDetected,
}
