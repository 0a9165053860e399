//! Add stops from user input and retry failed geocoding.
//!
//! Geocoding happens before the stop is appended, so lookups for different
//! addresses never touch the store and can run concurrently. A failed lookup
//! still appends the stop, without a coordinate, and reports the failure.

use log::{debug, warn};
use thiserror::Error;

use crate::{GeocodeClient, GeocodeError, LatLng, StopId, StopStore, StopStoreError};

/// A stop appended by [`add_stop`], with the outcome of its lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct StopAdded {
    /// Id of the new stop.
    pub id: StopId,
    /// The resolved coordinate, or why geocoding failed.
    pub geocode: Result<LatLng, GeocodeError>,
}

impl StopAdded {
    /// Whether the stop was appended with a coordinate.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.geocode.is_ok()
    }
}

/// Errors from [`add_stop`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// The address was empty or whitespace only.
    #[error("address must not be blank")]
    BlankAddress,
}

/// Errors from [`retry_geocode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetryGeocodeError {
    /// The stop is not in the itinerary.
    #[error(transparent)]
    Store(#[from] StopStoreError),
    /// The stop already has a coordinate.
    #[error("stop {0} is already geocoded")]
    AlreadyResolved(StopId),
    /// The lookup failed again.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
}

/// Geocode `address` and append it to `store`.
///
/// Surrounding whitespace is trimmed. The stop is appended whether or not
/// geocoding succeeds; inspect [`StopAdded::geocode`] for the outcome.
///
/// # Errors
///
/// Returns [`IntakeError::BlankAddress`] for an empty address. Nothing is
/// appended and the geocoder is not called.
///
/// # Examples
/// ```
/// use stopline_core::test_support::StubGeocoder;
/// use stopline_core::{LatLng, StopStore, add_stop};
///
/// let geocoder = StubGeocoder::new().with_match("Depot", LatLng::new(49.28, -123.12));
/// let mut store = StopStore::new();
///
/// let found = add_stop(&mut store, &geocoder, "  Depot ")?;
/// let missing = add_stop(&mut store, &geocoder, "Atlantis")?;
///
/// assert!(found.is_resolved());
/// assert!(!missing.is_resolved());
/// assert_eq!(store.len(), 2);
/// # Ok::<(), stopline_core::IntakeError>(())
/// ```
pub fn add_stop<G>(
    store: &mut StopStore,
    geocoder: &G,
    address: &str,
) -> Result<StopAdded, IntakeError>
where
    G: GeocodeClient + ?Sized,
{
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::BlankAddress);
    }
    let geocode = geocoder.resolve(trimmed);
    if let Err(err) = &geocode {
        warn!("could not geocode {trimmed:?}: {err}");
    }
    let id = store.append(trimmed, geocode.as_ref().ok().copied());
    Ok(StopAdded { id, geocode })
}

/// Geocode a stored stop that has no coordinate yet.
///
/// # Errors
///
/// Returns [`RetryGeocodeError::Store`] for an unknown id,
/// [`RetryGeocodeError::AlreadyResolved`] if the stop has a coordinate, and
/// [`RetryGeocodeError::Geocode`] if the lookup fails again.
pub fn retry_geocode<G>(
    store: &mut StopStore,
    geocoder: &G,
    id: StopId,
) -> Result<LatLng, RetryGeocodeError>
where
    G: GeocodeClient + ?Sized,
{
    let stop = store.get(id).ok_or(StopStoreError::UnknownStop(id))?;
    if stop.is_resolved() {
        return Err(RetryGeocodeError::AlreadyResolved(id));
    }
    let point = geocoder.resolve(stop.address())?;
    store.resolve_coordinate(id, point)?;
    debug!("stop {id} geocoded on retry");
    Ok(point)
}
