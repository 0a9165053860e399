//! Resolve free-text addresses to coordinates.
//!
//! The [`GeocodeClient`] trait abstracts the geocoding provider. Callers pass
//! an address and receive a [`LatLng`](crate::LatLng) for the provider's best
//! match, [`GeocodeError::NotFound`] when there is no match, or
//! [`GeocodeError::Transient`] when the provider could not be reached.

mod client;
mod error;

pub use client::GeocodeClient;
pub use error::GeocodeError;
