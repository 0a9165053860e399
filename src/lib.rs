//! Facade crate for the Stopline stop sequencing engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP geocoding
//! and routing adapters behind the `http` feature flag.

#![forbid(unsafe_code)]

pub use stopline_core::{
    Clock, DelayOutOfRange, DelayPerStop, GeocodeClient, GeocodeError, IntakeError,
    ItineraryView, LatLng, MapView, NavigationLinkBuilder, OptimizeError, OptimizedTrip,
    RetryGeocodeError, RouteGeometry, RouteOptimizer, SequencingEngine, SequencingError,
    SequencingPhase, SequencingReport, Stop, StopAdded, StopId, StopStore, StopStoreError,
    SystemClock, TransportError, add_stop, retry_geocode,
};

#[cfg(feature = "http")]
pub use stopline_data::{
    HttpServiceConfig, NominatimGeocoder, OsrmTripOptimizer, ProviderBuildError,
};
