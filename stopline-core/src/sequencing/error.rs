use thiserror::Error;

use crate::{OptimizeError, StopId, StopStoreError};

/// Errors returned by [`SequencingEngine::run`](crate::SequencingEngine::run).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencingError {
    /// Another run is still outstanding on this engine.
    #[error("a sequencing run is already in progress")]
    InProgress,
    /// The itinerary has no stops.
    #[error("the itinerary has no stops to sequence")]
    EmptyItinerary,
    /// Some stops have no coordinate yet.
    #[error("{} stop(s) lack a resolved coordinate", .unresolved.len())]
    IncompleteItinerary {
        /// Stops still waiting for geocoding, in itinerary order.
        unresolved: Vec<StopId>,
    },
    /// The optimiser could not produce a trip.
    #[error("route optimisation failed: {0}")]
    OptimizationFailed(#[source] OptimizeError),
    /// The optimiser answered with something that is not a valid permutation.
    #[error("optimiser returned an invalid response: {reason}")]
    InvalidOptimizerResponse {
        /// Description of the defect.
        reason: String,
    },
    /// Adding the delay pushed an ETA past the representable range.
    #[error("ETA for position {position} is out of range")]
    EtaOverflow {
        /// Zero-based position in the new order.
        position: usize,
    },
    /// The store rejected a mutation while applying the new order.
    #[error(transparent)]
    Store(#[from] StopStoreError),
}

impl From<OptimizeError> for SequencingError {
    fn from(error: OptimizeError) -> Self {
        match error {
            OptimizeError::MalformedResponse { message } => {
                Self::InvalidOptimizerResponse { reason: message }
            }
            other => Self::OptimizationFailed(other),
        }
    }
}
