//! `RouteOptimizer` backed by OSRM's Trip API.
//!
//! The provider sends all stop coordinates in one request and converts the
//! answer into the core's visiting-order contract. OSRM reports, for each
//! input, its rank within the trip; the provider inverts those ranks so that
//! `permutation[k]` names the input visited k-th.

use geo::{Coord, LineString};
use log::debug;
use stopline_core::{LatLng, OptimizeError, OptimizedTrip, RouteOptimizer, TransportError};

use super::osrm::TripResponse;
use crate::http::{BlockingClient, HttpServiceConfig, ProviderBuildError};

/// Routing profile used unless another is configured.
pub const DEFAULT_OSRM_PROFILE: &str = "driving";

/// Route optimiser using the OSRM Trip service.
///
/// # Runtime behaviour
///
/// Requests block the calling thread. Inside a multi-threaded Tokio runtime
/// the caller's runtime drives the request; elsewhere the provider uses its
/// own current-thread runtime.
#[derive(Debug)]
pub struct OsrmTripOptimizer {
    http: BlockingClient,
    profile: String,
}

impl OsrmTripOptimizer {
    /// Create an optimiser for `base_url` with default configuration.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL for the OSRM service (e.g., `"http://localhost:5000"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpServiceConfig::new(base_url))
    }

    /// Create an optimiser with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            http: BlockingClient::new(config)?,
            profile: DEFAULT_OSRM_PROFILE.to_owned(),
        })
    }

    /// Use a different routing profile, such as `cycling` or `foot`.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// The configured routing profile.
    #[must_use]
    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// The configuration the optimiser was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpServiceConfig {
        self.http.config()
    }

    /// Build the Trip API URL.
    ///
    /// The path carries semicolon-separated `lon,lat` pairs. OSRM rejects an
    /// open trip whose source is free, so an unfixed request asks for a
    /// round trip instead.
    fn build_trip_url(
        &self,
        coordinates: &[LatLng],
        source_fixed: bool,
    ) -> Result<url::Url, TransportError> {
        let coords = coordinates
            .iter()
            .map(|point| format!("{},{}", point.longitude, point.latitude))
            .collect::<Vec<_>>()
            .join(";");
        let (source, roundtrip) = if source_fixed {
            ("first", "false")
        } else {
            ("any", "true")
        };
        self.http.endpoint(
            &format!("trip/v1/{}/{coords}", self.profile),
            &[
                ("source", source),
                ("roundtrip", roundtrip),
                ("overview", "full"),
                ("geometries", "geojson"),
            ],
        )
    }
}

fn malformed(message: impl Into<String>) -> OptimizeError {
    OptimizeError::MalformedResponse {
        message: message.into(),
    }
}

/// Convert an OSRM response for `expected` inputs into an `OptimizedTrip`.
fn convert_response(response: TripResponse, expected: usize) -> Result<OptimizedTrip, OptimizeError> {
    if !response.is_ok() {
        return Err(OptimizeError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    if response.waypoints.len() != expected {
        return Err(malformed(format!(
            "expected {expected} waypoints, OSRM returned {}",
            response.waypoints.len()
        )));
    }
    if let Some(split) = response.waypoints.iter().find(|w| w.trips_index != 0) {
        return Err(malformed(format!(
            "stops were split across trips (trip index {})",
            split.trips_index
        )));
    }
    let ranks: Vec<usize> = response
        .waypoints
        .iter()
        .map(|waypoint| waypoint.waypoint_index)
        .collect();
    let permutation = visiting_order(&ranks).map_err(malformed)?;

    let trip = response
        .trips
        .into_iter()
        .next()
        .ok_or_else(|| malformed("OSRM response contains no trips"))?;
    debug!(
        "OSRM trip over {expected} stops: {:?} m, {:?} s",
        trip.distance, trip.duration
    );
    let line = trip
        .geometry
        .ok_or_else(|| malformed("OSRM trip has no geometry"))?;
    let geometry: LineString<f64> = line
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();

    Ok(OptimizedTrip {
        permutation,
        geometry,
    })
}

/// Invert per-input trip ranks into the list of inputs in visiting order.
fn visiting_order(ranks: &[usize]) -> Result<Vec<usize>, String> {
    let mut order: Vec<Option<usize>> = vec![None; ranks.len()];
    for (input, &rank) in ranks.iter().enumerate() {
        let slot = order
            .get_mut(rank)
            .ok_or_else(|| format!("waypoint rank {rank} is outside 0..{}", ranks.len()))?;
        if slot.replace(input).is_some() {
            return Err(format!("waypoint rank {rank} is assigned twice"));
        }
    }
    order
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| "waypoint ranks leave a gap".to_owned())
}

impl RouteOptimizer for OsrmTripOptimizer {
    fn optimize(
        &self,
        coordinates: &[LatLng],
        source_fixed: bool,
    ) -> Result<OptimizedTrip, OptimizeError> {
        if coordinates.is_empty() {
            return Err(OptimizeError::EmptyInput);
        }
        let url = self.build_trip_url(coordinates, source_fixed)?;
        let response: TripResponse = self.http.get_json(url)?;
        convert_response(response, coordinates.len())
    }
}
