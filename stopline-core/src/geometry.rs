//! Path geometry for the most recent sequencing run.

use geo::LineString;

use crate::LatLng;

/// Ordered path to draw between stops, in latitude/longitude order.
///
/// The geometry is derived data: each successful sequencing run replaces it
/// wholesale.
///
/// # Examples
/// ```
/// use geo::LineString;
/// use stopline_core::{LatLng, RouteGeometry};
///
/// let wire: LineString<f64> = vec![(10.0, 20.0), (30.0, 40.0)].into();
/// let geometry = RouteGeometry::from_wire(&wire);
/// assert_eq!(
///     geometry.points(),
///     &[LatLng::new(20.0, 10.0), LatLng::new(40.0, 30.0)]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RouteGeometry(Vec<LatLng>);

impl RouteGeometry {
    /// Wrap points that are already in latitude/longitude order.
    #[must_use]
    pub const fn new(points: Vec<LatLng>) -> Self {
        Self(points)
    }

    /// An empty geometry.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Flip a wire-order line string (`x = lon`, `y = lat`) into engine order.
    #[must_use]
    pub fn from_wire(line: &LineString<f64>) -> Self {
        Self(line.coords().copied().map(LatLng::from_lon_lat).collect())
    }

    /// Convert back to a wire-order line string.
    #[must_use]
    pub fn to_wire(&self) -> LineString<f64> {
        self.0.iter().map(|point| point.to_lon_lat()).collect()
    }

    /// Points in drawing order.
    #[must_use]
    pub fn points(&self) -> &[LatLng] {
        &self.0
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there is nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
