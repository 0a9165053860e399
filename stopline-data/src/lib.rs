//! HTTP adapters for the Stopline external services.
//!
//! [`NominatimGeocoder`] implements [`stopline_core::GeocodeClient`] against a
//! Nominatim-compatible search endpoint and [`OsrmTripOptimizer`] implements
//! [`stopline_core::RouteOptimizer`] against the OSRM Trip service.
//!
//! Both adapters expose the synchronous core traits and block on `reqwest`
//! calls internally, so the core stays usable outside an async context.

pub mod geocoding;
mod http;
pub mod routing;

pub use geocoding::{DEFAULT_NOMINATIM_URL, NominatimGeocoder};
pub use http::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpServiceConfig, ProviderBuildError};
pub use routing::{DEFAULT_OSRM_PROFILE, OsrmTripOptimizer};
