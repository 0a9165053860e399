//! Canonical ordered itinerary.
//!
//! [`StopStore`] keeps the stop sequence, the per-stop delay and the current
//! route geometry. Order lives in a `Vec` of ids; an id-keyed map sits
//! alongside it for constant-time lookup.
//!
//! Stamped ETAs carry the store's ETA generation. Reordering, removing a stop
//! or changing the delay bumps the generation, so older stamps read back as
//! absent until the next sequencing run.

mod error;

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use log::debug;

use crate::stop::StampedEta;
use crate::{DelayPerStop, LatLng, RouteGeometry, Stop, StopId};

pub use error::{PermutationDefect, StopStoreError};

/// Ordered collection of [`Stop`] values with their sequencing state.
///
/// # Examples
/// ```
/// use stopline_core::{LatLng, StopStore};
///
/// let mut store = StopStore::new();
/// let depot = store.append("1 Depot Road", Some(LatLng::new(49.28, -123.12)));
/// let pending = store.append("Unknown Lane", None);
///
/// assert_eq!(store.ids(), &[depot, pending]);
/// assert_eq!(store.unresolved_ids(), vec![pending]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopStore {
    order: Vec<StopId>,
    stops: HashMap<StopId, Stop>,
    next_id: u64,
    eta_generation: u64,
    delay: DelayPerStop,
    route: RouteGeometry,
}

impl StopStore {
    /// Create an empty store with a zero-minute delay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stop to the end of the itinerary and return its new id.
    ///
    /// `coordinate` is `None` when geocoding failed; such stops are kept so
    /// they can be retried or removed.
    pub fn append(&mut self, address: impl Into<String>, coordinate: Option<LatLng>) -> StopId {
        let id = StopId::from_raw(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let stop = Stop::new(id, address.into(), coordinate);
        debug!(
            "appended stop {id} ({}) at position {}",
            stop.address(),
            self.order.len()
        );
        self.stops.insert(id, stop);
        self.order.push(id);
        id
    }

    /// Replace the itinerary order.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::InvalidPermutation`] unless `ids` contains
    /// every stored id exactly once. The store is left untouched on error.
    pub fn replace_order(&mut self, ids: &[StopId]) -> Result<(), StopStoreError> {
        self.check_permutation(ids)
            .map_err(StopStoreError::InvalidPermutation)?;
        if self.order != ids {
            self.order = ids.to_vec();
            self.invalidate_etas("order replaced");
        }
        Ok(())
    }

    fn check_permutation(&self, ids: &[StopId]) -> Result<(), PermutationDefect> {
        if ids.len() != self.order.len() {
            return Err(PermutationDefect::LengthMismatch {
                expected: self.order.len(),
                supplied: ids.len(),
            });
        }
        let mut seen = HashSet::with_capacity(ids.len());
        for id in ids {
            if !self.stops.contains_key(id) {
                return Err(PermutationDefect::UnknownId(*id));
            }
            if !seen.insert(*id) {
                return Err(PermutationDefect::DuplicateId(*id));
            }
        }
        Ok(())
    }

    /// Stamp `id` with an ETA valid for the current order and delay.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::UnknownStop`] if the id is absent.
    pub fn set_eta(&mut self, id: StopId, at: NaiveDateTime) -> Result<(), StopStoreError> {
        let generation = self.eta_generation;
        let stop = self.stop_mut(id)?;
        stop.eta = Some(StampedEta { at, generation });
        Ok(())
    }

    /// The stop's ETA, if one was stamped since the last invalidation.
    #[must_use]
    pub fn eta(&self, id: StopId) -> Option<NaiveDateTime> {
        self.stops
            .get(&id)
            .and_then(|stop| stop.eta)
            .filter(|stamp| stamp.generation == self.eta_generation)
            .map(|stamp| stamp.at)
    }

    /// Remove a stop, keeping the relative order of the others.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::UnknownStop`] if the id is absent.
    pub fn remove(&mut self, id: StopId) -> Result<Stop, StopStoreError> {
        let stop = self
            .stops
            .remove(&id)
            .ok_or(StopStoreError::UnknownStop(id))?;
        self.order.retain(|entry| *entry != id);
        self.invalidate_etas("stop removed");
        Ok(stop)
    }

    /// Set the per-stop delay used by the next sequencing run.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::OutOfRange`] unless `minutes` is in `0..=30`.
    pub fn set_delay_per_stop(&mut self, minutes: i64) -> Result<(), StopStoreError> {
        let delay = DelayPerStop::new(minutes)?;
        if delay != self.delay {
            self.delay = delay;
            self.invalidate_etas("delay per stop changed");
        }
        Ok(())
    }

    /// The configured per-stop delay.
    #[must_use]
    pub const fn delay_per_stop(&self) -> DelayPerStop {
        self.delay
    }

    /// Record a coordinate for a stop that has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::UnknownStop`] if the id is absent and
    /// [`StopStoreError::CoordinateAlreadyResolved`] if it already has one.
    pub fn resolve_coordinate(
        &mut self,
        id: StopId,
        coordinate: LatLng,
    ) -> Result<(), StopStoreError> {
        let stop = self.stop_mut(id)?;
        if stop.is_resolved() {
            return Err(StopStoreError::CoordinateAlreadyResolved(id));
        }
        stop.set_coordinate(coordinate);
        Ok(())
    }

    /// Set the visited flag.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::UnknownStop`] if the id is absent.
    pub fn set_visited(&mut self, id: StopId, visited: bool) -> Result<(), StopStoreError> {
        self.stop_mut(id)?.visited = visited;
        Ok(())
    }

    /// Flip the visited flag and return its new value.
    ///
    /// # Errors
    ///
    /// Returns [`StopStoreError::UnknownStop`] if the id is absent.
    pub fn toggle_visited(&mut self, id: StopId) -> Result<bool, StopStoreError> {
        let stop = self.stop_mut(id)?;
        stop.visited = !stop.visited;
        Ok(stop.visited)
    }

    /// Replace the current route geometry.
    pub fn set_route_geometry(&mut self, geometry: RouteGeometry) {
        self.route = geometry;
    }

    /// The route geometry from the last successful sequencing run.
    #[must_use]
    pub const fn route_geometry(&self) -> &RouteGeometry {
        &self.route
    }

    /// Drop every stop and the route geometry.
    ///
    /// The delay setting is kept and ids continue from where they left off.
    pub fn reset(&mut self) {
        self.order.clear();
        self.stops.clear();
        self.route = RouteGeometry::empty();
        self.invalidate_etas("store reset");
    }

    /// Look up a stop by id.
    #[must_use]
    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(&id)
    }

    /// Stops in itinerary order.
    pub fn iter(&self) -> impl Iterator<Item = &Stop> + '_ {
        self.order.iter().filter_map(|id| self.stops.get(id))
    }

    /// Ids in itinerary order.
    #[must_use]
    pub fn ids(&self) -> &[StopId] {
        &self.order
    }

    /// Zero-based position of a stop in the itinerary.
    #[must_use]
    pub fn position(&self, id: StopId) -> Option<usize> {
        self.order.iter().position(|entry| *entry == id)
    }

    /// Ids of stops still waiting for a coordinate, in itinerary order.
    #[must_use]
    pub fn unresolved_ids(&self) -> Vec<StopId> {
        self.iter()
            .filter(|stop| !stop.is_resolved())
            .map(Stop::id)
            .collect()
    }

    /// Number of stops.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the itinerary has no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn stop_mut(&mut self, id: StopId) -> Result<&mut Stop, StopStoreError> {
        self.stops
            .get_mut(&id)
            .ok_or(StopStoreError::UnknownStop(id))
    }

    fn invalidate_etas(&mut self, reason: &str) {
        self.eta_generation = self.eta_generation.wrapping_add(1);
        debug!("stamped ETAs invalidated: {reason}");
    }
}
