//! Map view: markers, the route polyline and the area to frame.

use geo::{BoundingRect, MultiPoint, Point};

use crate::{LatLng, StopId, StopStore};

/// Centre used when no stop has a coordinate.
pub const DEFAULT_CENTRE: LatLng = LatLng::new(49.25, -123.1);

/// Zoom level suggested to the map surface.
pub const DEFAULT_ZOOM: u8 = 11;

/// A pin for one resolved stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Marker {
    /// Stop identifier.
    pub id: StopId,
    /// Pin location.
    pub position: LatLng,
    /// Popup text; the stop's address.
    pub label: String,
}

/// Rectangle covering everything drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapBounds {
    /// Minimum latitude and longitude.
    pub south_west: LatLng,
    /// Maximum latitude and longitude.
    pub north_east: LatLng,
}

/// Everything a map surface needs to draw the itinerary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MapView {
    /// Pins for resolved stops, in itinerary order.
    pub markers: Vec<Marker>,
    /// The current route geometry.
    pub polyline: Vec<LatLng>,
    /// Area covering markers and polyline, if anything is drawn.
    pub bounds: Option<MapBounds>,
    /// Suggested map centre.
    pub centre: LatLng,
    /// Suggested zoom level.
    pub zoom: u8,
}

impl MapView {
    /// Render the resolved stops and route geometry of `store`.
    #[must_use]
    pub fn render(store: &StopStore) -> Self {
        let markers: Vec<Marker> = store
            .iter()
            .filter_map(|stop| {
                stop.coordinate().map(|position| Marker {
                    id: stop.id(),
                    position,
                    label: stop.address().to_owned(),
                })
            })
            .collect();
        let polyline = store.route_geometry().points().to_vec();

        let drawn: MultiPoint<f64> = markers
            .iter()
            .map(|marker| marker.position)
            .chain(polyline.iter().copied())
            .map(|point| Point::from(point.to_lon_lat()))
            .collect();
        let rect = drawn.bounding_rect();
        let bounds = rect.map(|rect| MapBounds {
            south_west: LatLng::from_lon_lat(rect.min()),
            north_east: LatLng::from_lon_lat(rect.max()),
        });
        let centre = rect.map_or(DEFAULT_CENTRE, |rect| LatLng::from_lon_lat(rect.center()));

        Self {
            markers,
            polyline,
            bounds,
            centre,
            zoom: DEFAULT_ZOOM,
        }
    }
}
