//! Render a [`StopStore`](crate::StopStore) for list and map views.
//!
//! These adapters only read the store. They produce plain view models that a
//! UI or the CLI can display or serialise.

mod list;
mod map;
mod navigation;

pub use list::{ItineraryView, StopRow};
pub use map::{DEFAULT_CENTRE, DEFAULT_ZOOM, MapBounds, MapView, Marker};
pub use navigation::{DEFAULT_DIRECTIONS_URL, DEFAULT_TRAVEL_MODE, NavigationLinkBuilder};
