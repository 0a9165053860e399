//! Deterministic test doubles for the external collaborators.
//!
//! [`StubGeocoder`], [`StubOptimizer`] and [`FixedClock`] return
//! pre-configured answers without touching the network or the system clock.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use geo::LineString;

use crate::{
    Clock, GeocodeClient, GeocodeError, LatLng, OptimizeError, OptimizedTrip, RouteOptimizer,
};

/// Stub `GeocodeClient` answering from a fixed table.
///
/// Addresses missing from the table resolve to [`GeocodeError::NotFound`].
///
/// # Example
///
/// ```
/// use stopline_core::test_support::StubGeocoder;
/// use stopline_core::{GeocodeClient, LatLng};
///
/// let geocoder = StubGeocoder::new().with_match("Depot", LatLng::new(49.28, -123.12));
/// assert!(geocoder.resolve("Depot").is_ok());
/// assert!(geocoder.resolve("Elsewhere").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StubGeocoder {
    answers: HashMap<String, Result<LatLng, GeocodeError>>,
}

impl StubGeocoder {
    /// A geocoder that knows no addresses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `address` to `point`.
    #[must_use]
    pub fn with_match(mut self, address: impl Into<String>, point: LatLng) -> Self {
        self.answers.insert(address.into(), Ok(point));
        self
    }

    /// Fail lookups of `address` with `error`.
    #[must_use]
    pub fn with_failure(mut self, address: impl Into<String>, error: GeocodeError) -> Self {
        self.answers.insert(address.into(), Err(error));
        self
    }
}

impl GeocodeClient for StubGeocoder {
    fn resolve(&self, address: &str) -> Result<LatLng, GeocodeError> {
        self.answers
            .get(address)
            .cloned()
            .unwrap_or_else(|| {
                Err(GeocodeError::NotFound {
                    address: address.to_owned(),
                })
            })
    }
}

#[derive(Debug, Clone)]
enum StubTrip {
    Identity,
    Permutation(Vec<usize>),
    Trip(OptimizedTrip),
    Error(OptimizeError),
}

/// Stub `RouteOptimizer` returning a pre-configured answer.
///
/// Empty input always yields [`OptimizeError::EmptyInput`].
#[derive(Debug, Clone)]
pub struct StubOptimizer {
    response: StubTrip,
}

impl StubOptimizer {
    /// Keep the input order; the geometry joins the inputs in wire order.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            response: StubTrip::Identity,
        }
    }

    /// Return `permutation`, with geometry joining the inputs it names.
    #[must_use]
    pub const fn with_permutation(permutation: Vec<usize>) -> Self {
        Self {
            response: StubTrip::Permutation(permutation),
        }
    }

    /// Return `trip` unchanged, whatever the input.
    #[must_use]
    pub const fn with_trip(trip: OptimizedTrip) -> Self {
        Self {
            response: StubTrip::Trip(trip),
        }
    }

    /// Fail every non-empty request with `error`.
    #[must_use]
    pub const fn with_error(error: OptimizeError) -> Self {
        Self {
            response: StubTrip::Error(error),
        }
    }
}

/// Join the coordinates named by `order` into a wire-order line string.
fn wire_path(coordinates: &[LatLng], order: &[usize]) -> LineString<f64> {
    order
        .iter()
        .filter_map(|index| coordinates.get(*index))
        .map(|point| point.to_lon_lat())
        .collect()
}

impl RouteOptimizer for StubOptimizer {
    fn optimize(
        &self,
        coordinates: &[LatLng],
        _source_fixed: bool,
    ) -> Result<OptimizedTrip, OptimizeError> {
        if coordinates.is_empty() {
            return Err(OptimizeError::EmptyInput);
        }
        match &self.response {
            StubTrip::Identity => {
                let permutation: Vec<usize> = (0..coordinates.len()).collect();
                let geometry = wire_path(coordinates, &permutation);
                Ok(OptimizedTrip {
                    permutation,
                    geometry,
                })
            }
            StubTrip::Permutation(permutation) => Ok(OptimizedTrip {
                permutation: permutation.clone(),
                geometry: wire_path(coordinates, permutation),
            }),
            StubTrip::Trip(trip) => Ok(trip.clone()),
            StubTrip::Error(error) => Err(error.clone()),
        }
    }
}

/// [`Clock`] frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    /// Freeze the clock at `at`.
    #[must_use]
    pub const fn new(at: NaiveDateTime) -> Self {
        Self(at)
    }

    /// Freeze the clock at `hour:minute` on 1 May 2024.
    ///
    /// Out-of-range values fall back to midnight.
    #[must_use]
    pub fn at_hm(hour: u32, minute: u32) -> Self {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap_or_default();
        let at = day
            .and_hms_opt(hour, minute, 0)
            .unwrap_or_else(|| day.and_time(chrono::NaiveTime::MIN));
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn permutation_stub_builds_matching_geometry() {
        let coordinates = [LatLng::new(1.0, 10.0), LatLng::new(2.0, 20.0)];
        let trip = StubOptimizer::with_permutation(vec![1, 0])
            .optimize(&coordinates, true)
            .expect("should succeed");
        assert_eq!(trip.geometry.0[0].x, 20.0);
        assert_eq!(trip.geometry.0[0].y, 2.0);
    }

    #[rstest]
    fn error_stub_returns_configured_error() {
        let optimizer = StubOptimizer::with_error(OptimizeError::Service {
            code: "NoTrips".to_owned(),
            message: "no trip found".to_owned(),
        });
        let err = optimizer
            .optimize(&[LatLng::new(0.0, 0.0)], true)
            .expect_err("should fail");
        assert!(matches!(err, OptimizeError::Service { .. }));
    }

    #[rstest]
    fn fixed_clock_is_stable() {
        let clock = FixedClock::at_hm(14, 30);
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().format("%H:%M").to_string(), "14:30");
    }

    #[rstest]
    fn geocoder_failure_is_returned() {
        let geocoder = StubGeocoder::new().with_failure(
            "Depot",
            GeocodeError::Transient(crate::TransportError::Parse {
                message: "bad json".to_owned(),
            }),
        );
        assert!(geocoder.resolve("Depot").expect_err("failure").is_transient());
    }
}
