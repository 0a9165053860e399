use thiserror::Error;

use crate::{DelayOutOfRange, StopId};

/// Why an id sequence is not a permutation of the stored ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermutationDefect {
    /// The sequence has a different number of ids than the store.
    #[error("expected {expected} ids, got {supplied}")]
    LengthMismatch {
        /// Number of stops in the store.
        expected: usize,
        /// Number of ids supplied.
        supplied: usize,
    },
    /// The sequence names a stop the store does not hold.
    #[error("stop {0} is not in the itinerary")]
    UnknownId(StopId),
    /// The sequence names the same stop twice.
    #[error("stop {0} appears more than once")]
    DuplicateId(StopId),
}

/// Errors from [`StopStore`](crate::StopStore) mutations.
///
/// These indicate a caller bug: the sequencing engine never triggers them when
/// used as documented.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StopStoreError {
    /// `replace_order` received something other than a permutation.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(#[source] PermutationDefect),
    /// The named stop is not in the itinerary.
    #[error("unknown stop {0}")]
    UnknownStop(StopId),
    /// The delay per stop was outside `0..=30` minutes.
    #[error(transparent)]
    OutOfRange(#[from] DelayOutOfRange),
    /// The stop already has a coordinate; coordinates are set once.
    #[error("stop {0} already has a resolved coordinate")]
    CoordinateAlreadyResolved(StopId),
}
