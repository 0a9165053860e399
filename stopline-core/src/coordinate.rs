//! Geographic positions in the engine's latitude/longitude convention.
//!
//! Routing services and `geo` store points as `x = longitude`,
//! `y = latitude`. Everything inside the engine uses [`LatLng`] instead, so a
//! conversion between the two always goes through a named method.

use geo::Coord;

/// A WGS84 position given as latitude then longitude, in decimal degrees.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use stopline_core::LatLng;
///
/// let point = LatLng::from_lon_lat(Coord { x: -123.1, y: 49.25 });
/// assert_eq!(point.latitude, 49.25);
/// assert_eq!(point.to_lon_lat(), Coord { x: -123.1, y: 49.25 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatLng {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl LatLng {
    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Convert from wire order, where `x` is longitude and `y` latitude.
    #[must_use]
    pub const fn from_lon_lat(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }

    /// Convert to wire order, where `x` is longitude and `y` latitude.
    #[must_use]
    pub const fn to_lon_lat(self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        value.to_lon_lat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn from_lon_lat_swaps_axes() {
        let point = LatLng::from_lon_lat(Coord { x: 10.0, y: 20.0 });
        assert_eq!(point, LatLng::new(20.0, 10.0));
    }

    #[rstest]
    fn into_coord_uses_wire_order() {
        let coord: Coord<f64> = LatLng::new(51.5, -0.1).into();
        assert_eq!(coord, Coord { x: -0.1, y: 51.5 });
    }
}
