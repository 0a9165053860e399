//! Itinerary entries and their identifiers.

use std::fmt;

use chrono::NaiveDateTime;

use crate::LatLng;

/// Opaque identifier for a [`Stop`].
///
/// Identifiers are handed out by [`StopStore`](crate::StopStore) from a
/// counter that only moves forward, so an id is never reused within a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StopId(u64);

impl StopId {
    /// Wrap a raw identifier.
    ///
    /// Stores allocate their own ids; this exists for callers that need to
    /// name an id the store never issued.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Return the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An ETA together with the store generation it was computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StampedEta {
    pub(crate) at: NaiveDateTime,
    pub(crate) generation: u64,
}

/// One address-bound entry in an itinerary.
///
/// The address is fixed at creation. The coordinate may arrive later, once,
/// when geocoding succeeds. The stop's position is not stored here; it is the
/// stop's index in the owning [`StopStore`](crate::StopStore).
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    id: StopId,
    address: String,
    coordinate: Option<LatLng>,
    pub(crate) eta: Option<StampedEta>,
    pub(crate) visited: bool,
}

impl Stop {
    pub(crate) const fn new(id: StopId, address: String, coordinate: Option<LatLng>) -> Self {
        Self {
            id,
            address,
            coordinate,
            eta: None,
            visited: false,
        }
    }

    /// Identifier assigned by the store.
    #[must_use]
    pub const fn id(&self) -> StopId {
        self.id
    }

    /// Address exactly as the user entered it.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Resolved position, if geocoding has succeeded.
    #[must_use]
    pub const fn coordinate(&self) -> Option<LatLng> {
        self.coordinate
    }

    /// Whether the stop has a coordinate and can take part in sequencing.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.coordinate.is_some()
    }

    /// Whether the user has marked the stop as visited.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }

    pub(crate) const fn set_coordinate(&mut self, coordinate: LatLng) {
        self.coordinate = Some(coordinate);
    }
}
