use thiserror::Error;

use crate::TransportError;

/// Errors from [`crate::optimizer::RouteOptimizer::optimize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// No coordinates were provided.
    #[error("at least one coordinate is required")]
    EmptyInput,
    /// The provider could not be reached or answered unintelligibly.
    #[error("route optimisation request failed: {0}")]
    Transport(#[from] TransportError),
    /// The provider answered with a non-`Ok` status code.
    #[error("routing service returned {code}: {message}")]
    Service {
        /// Status code reported by the service.
        code: String,
        /// Message reported by the service, if any.
        message: String,
    },
    /// The provider's answer broke the response contract.
    ///
    /// Examples include a missing trip or a waypoint list whose length or
    /// indices do not match the request.
    #[error("malformed optimiser response: {message}")]
    MalformedResponse {
        /// Description of the defect.
        message: String,
    },
}
