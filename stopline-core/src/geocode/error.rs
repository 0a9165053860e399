use thiserror::Error;

use crate::TransportError;

/// Errors from [`crate::geocode::GeocodeClient::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// The provider returned no match for the address.
    ///
    /// The stop is kept without a coordinate so the user can retry or remove
    /// it.
    #[error("no match found for address {address:?}")]
    NotFound {
        /// The address that was looked up.
        address: String,
    },
    /// The provider could not be reached or answered unintelligibly.
    #[error("geocoding failed: {0}")]
    Transient(#[from] TransportError),
}

impl GeocodeError {
    /// Whether the failure came from the transport rather than the lookup.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}
