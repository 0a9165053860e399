//! `SequencingEngine`: optimise the stop order and stamp ETAs.

use std::sync::Mutex;

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::{
    Clock, LatLng, RouteGeometry, RouteOptimizer, StopId, StopStore, SystemClock,
};

use super::error::SequencingError;
use super::phase::{self, RunGuard, SequencingPhase};
use super::schedule::{eta_schedule, validate_permutation};

/// Outcome of a successful sequencing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencingReport {
    /// Wall-clock time read at the start of the run; the first stop's ETA.
    pub started_at: NaiveDateTime,
    /// Stop ids in their new order.
    pub order: Vec<StopId>,
    /// ETA for each stop, in the new order.
    pub etas: Vec<(StopId, NaiveDateTime)>,
    /// Route geometry stored for the run, in latitude/longitude order.
    pub geometry: RouteGeometry,
}

/// Reorders a [`StopStore`] through a [`RouteOptimizer`] and stamps ETAs.
///
/// The engine is generic over the optimiser and the clock so tests can pin
/// both. Runs are serialised: starting a run while another is outstanding on
/// the same engine fails with [`SequencingError::InProgress`].
///
/// # Examples
/// ```
/// use stopline_core::test_support::{FixedClock, StubOptimizer};
/// use stopline_core::{LatLng, SequencingEngine, StopStore};
///
/// let mut store = StopStore::new();
/// let depot = store.append("Depot", Some(LatLng::new(49.28, -123.12)));
/// let bakery = store.append("Bakery", Some(LatLng::new(49.26, -123.10)));
/// store.set_delay_per_stop(10)?;
///
/// let engine = SequencingEngine::with_clock(
///     StubOptimizer::identity(),
///     FixedClock::at_hm(9, 0),
/// );
/// let report = engine.run(&mut store)?;
///
/// assert_eq!(report.order, vec![depot, bakery]);
/// let eta = store.eta(bakery).expect("stamped");
/// assert_eq!(eta.format("%H:%M").to_string(), "09:10");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct SequencingEngine<O, C = SystemClock>
where
    O: RouteOptimizer,
    C: Clock,
{
    optimizer: O,
    clock: C,
    phase: Mutex<SequencingPhase>,
}

impl<O> SequencingEngine<O>
where
    O: RouteOptimizer,
{
    /// Construct an engine that reads the system's local time.
    pub const fn new(optimizer: O) -> Self {
        Self::with_clock(optimizer, SystemClock)
    }
}

impl<O, C> SequencingEngine<O, C>
where
    O: RouteOptimizer,
    C: Clock,
{
    /// Construct an engine with an explicit clock.
    pub const fn with_clock(optimizer: O, clock: C) -> Self {
        Self {
            optimizer,
            clock,
            phase: Mutex::new(SequencingPhase::Idle),
        }
    }

    /// The phase of the current or most recent run.
    #[must_use]
    pub fn phase(&self) -> SequencingPhase {
        phase::current(&self.phase)
    }

    /// The wrapped optimiser.
    #[must_use]
    pub const fn optimizer(&self) -> &O {
        &self.optimizer
    }

    /// Optimise the stop order in `store` and stamp every stop with an ETA.
    ///
    /// The first stop in the current order is treated as the fixed starting
    /// point. A single-stop itinerary skips the optimiser and is stamped with
    /// the run's start time.
    ///
    /// # Errors
    ///
    /// - [`SequencingError::InProgress`] if another run is outstanding.
    /// - [`SequencingError::IncompleteItinerary`] if any stop lacks a
    ///   coordinate, and [`SequencingError::EmptyItinerary`] if there are no
    ///   stops. The store is untouched.
    /// - [`SequencingError::OptimizationFailed`] or
    ///   [`SequencingError::InvalidOptimizerResponse`] if the optimiser fails
    ///   or breaks its contract. The store is untouched.
    /// - [`SequencingError::Store`] or [`SequencingError::EtaOverflow`] while
    ///   applying; mutations made before the failure are kept.
    pub fn run(&self, store: &mut StopStore) -> Result<SequencingReport, SequencingError> {
        let guard = RunGuard::begin(&self.phase)?;
        let snapshot = resolved_snapshot(store)?;
        let started_at = self.clock.now();

        let (order, geometry) = match snapshot.as_slice() {
            [(id, point)] => (vec![*id], RouteGeometry::new(vec![*point])),
            _ => {
                guard.advance(SequencingPhase::Optimizing);
                self.optimise(&snapshot)?
            }
        };
        let etas = eta_schedule(started_at, store.delay_per_stop(), order.len())?;

        guard.advance(SequencingPhase::Applying);
        store.replace_order(&order)?;
        for (id, eta) in order.iter().zip(&etas) {
            store.set_eta(*id, *eta)?;
        }
        store.set_route_geometry(geometry.clone());
        guard.finish();

        info!(
            "sequenced {} stops starting at {}",
            order.len(),
            started_at.format("%H:%M")
        );
        Ok(SequencingReport {
            started_at,
            etas: order.iter().copied().zip(etas).collect(),
            order,
            geometry,
        })
    }

    fn optimise(
        &self,
        snapshot: &[(StopId, LatLng)],
    ) -> Result<(Vec<StopId>, RouteGeometry), SequencingError> {
        let coordinates: Vec<LatLng> = snapshot.iter().map(|(_, point)| *point).collect();
        let trip = self.optimizer.optimize(&coordinates, true).map_err(|err| {
            warn!("route optimisation failed: {err}");
            SequencingError::from(err)
        })?;
        validate_permutation(&trip.permutation, snapshot.len()).map_err(|reason| {
            warn!("rejecting optimiser permutation: {reason}");
            SequencingError::InvalidOptimizerResponse { reason }
        })?;
        let order = trip
            .permutation
            .iter()
            .map(|&index| snapshot.get(index).map(|(id, _)| *id))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| SequencingError::InvalidOptimizerResponse {
                reason: "permutation index outside the itinerary".to_owned(),
            })?;
        Ok((order, RouteGeometry::from_wire(&trip.geometry)))
    }
}

/// Ids and coordinates of every stop, in order, if all are resolved.
fn resolved_snapshot(store: &StopStore) -> Result<Vec<(StopId, LatLng)>, SequencingError> {
    let unresolved = store.unresolved_ids();
    if !unresolved.is_empty() {
        warn!(
            "refusing to sequence: {} stop(s) are not geocoded",
            unresolved.len()
        );
        return Err(SequencingError::IncompleteItinerary { unresolved });
    }
    let snapshot: Vec<(StopId, LatLng)> = store
        .iter()
        .filter_map(|stop| stop.coordinate().map(|point| (stop.id(), point)))
        .collect();
    if snapshot.is_empty() {
        return Err(SequencingError::EmptyItinerary);
    }
    Ok(snapshot)
}
