//! OSRM API response types for the Trip service.
//!
//! The Trip service solves a travelling salesman problem over the supplied
//! coordinates. With `geometries=geojson` the route line arrives as
//! `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#trip-service>

use serde::Deserialize;

/// OSRM Trip API response.
#[derive(Debug, Deserialize)]
pub struct TripResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"InvalidQuery"` - Invalid query parameters
    /// - `"NoTrips"` - No trip visiting all destinations possible
    /// - `"NotImplemented"` - Unsupported source/destination combination
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Computed trips; normally exactly one.
    #[serde(default)]
    pub trips: Vec<Trip>,

    /// One entry per input coordinate, in input order.
    #[serde(default)]
    pub waypoints: Vec<TripWaypoint>,
}

impl TripResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }
}

/// One computed trip.
#[derive(Debug, Deserialize)]
pub struct Trip {
    /// Full route line; absent unless `overview` was requested.
    pub geometry: Option<LineGeometry>,
    /// Total distance in metres.
    pub distance: Option<f64>,
    /// Total duration in seconds.
    pub duration: Option<f64>,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct LineGeometry {
    /// `[longitude, latitude]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}

/// Where an input coordinate landed in the trip.
#[derive(Debug, Deserialize)]
pub struct TripWaypoint {
    /// Position of this input within its trip.
    pub waypoint_index: usize,
    /// Which trip the input belongs to.
    #[serde(default)]
    pub trips_index: usize,
}
