//! Core domain types for the Stopline itinerary planner.
//!
//! The crate owns the canonical ordered list of stops ([`StopStore`]), the
//! boundaries to the external geocoding and route optimisation services
//! ([`GeocodeClient`], [`RouteOptimizer`]) and the [`SequencingEngine`] that
//! reorders an itinerary and stamps each stop with an estimated time of
//! arrival.
//!
//! Invariants:
//! - The store's sequence is the only ordering authority; stops never carry
//!   their own rank.
//! - Coordinates are held as latitude/longitude ([`LatLng`]). Wire formats use
//!   longitude/latitude and are converted explicitly at the boundary.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod clock;
pub mod coordinate;
pub mod delay;
pub mod geocode;
pub mod geometry;
pub mod intake;
pub mod optimizer;
pub mod presentation;
pub mod sequencing;
pub mod stop;
pub mod store;
pub mod transport;

#[doc(hidden)]
pub mod test_support;

pub use clock::{Clock, SystemClock};
pub use coordinate::LatLng;
pub use delay::{DelayOutOfRange, DelayPerStop};
pub use geocode::{GeocodeClient, GeocodeError};
pub use geometry::RouteGeometry;
pub use intake::{IntakeError, RetryGeocodeError, StopAdded, add_stop, retry_geocode};
pub use optimizer::{OptimizeError, OptimizedTrip, RouteOptimizer};
pub use presentation::{ItineraryView, MapView, NavigationLinkBuilder};
pub use sequencing::{SequencingEngine, SequencingError, SequencingPhase, SequencingReport};
pub use stop::{Stop, StopId};
pub use store::{PermutationDefect, StopStore, StopStoreError};
pub use transport::TransportError;
