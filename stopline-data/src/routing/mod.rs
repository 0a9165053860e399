//! Stop ordering via the OSRM Trip service.
//!
//! [`OsrmTripOptimizer`] implements [`stopline_core::RouteOptimizer`]: it
//! sends the stop coordinates to `/trip/v1/{profile}`, inverts the returned
//! waypoint ranks into a visiting order and hands back the trip geometry in
//! wire order.
//!
//! # Example
//!
//! ```no_run
//! use stopline_core::{LatLng, RouteOptimizer};
//! use stopline_data::routing::OsrmTripOptimizer;
//!
//! let optimizer = OsrmTripOptimizer::new("http://localhost:5000")?.with_profile("cycling");
//! let trip = optimizer.optimize(
//!     &[LatLng::new(49.28, -123.12), LatLng::new(49.26, -123.10)],
//!     true,
//! )?;
//! println!("visit order: {:?}", trip.permutation);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod osrm;
mod provider;

pub use provider::{DEFAULT_OSRM_PROFILE, OsrmTripOptimizer};
