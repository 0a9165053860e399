//! Route optimiser trait and its result type.

use geo::LineString;

use crate::LatLng;

use super::error::OptimizeError;

/// Visiting order and path returned by a [`RouteOptimizer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedTrip {
    /// Input indices in visiting order: `permutation[k]` is the index of the
    /// coordinate visited k-th.
    pub permutation: Vec<usize>,
    /// Path to draw, in wire order (`x = longitude`, `y = latitude`).
    pub geometry: LineString<f64>,
}

/// Find a near-optimal order in which to visit a set of coordinates.
///
/// Implementations must return a `permutation` of `[0, n)` for `n` inputs.
/// When `source_fixed` is set the first input must stay first. Callers should
/// still validate the permutation, since providers can break the contract.
///
/// # Examples
///
/// ```rust
/// use geo::LineString;
/// use stopline_core::{LatLng, OptimizeError, OptimizedTrip, RouteOptimizer};
///
/// struct Reverse;
///
/// impl RouteOptimizer for Reverse {
///     fn optimize(
///         &self,
///         coordinates: &[LatLng],
///         _source_fixed: bool,
///     ) -> Result<OptimizedTrip, OptimizeError> {
///         if coordinates.is_empty() {
///             return Err(OptimizeError::EmptyInput);
///         }
///         Ok(OptimizedTrip {
///             permutation: (0..coordinates.len()).rev().collect(),
///             geometry: LineString::new(Vec::new()),
///         })
///     }
/// }
///
/// let trip = Reverse.optimize(&[LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)], false)?;
/// assert_eq!(trip.permutation, vec![1, 0]);
/// # Ok::<(), OptimizeError>(())
/// ```
pub trait RouteOptimizer {
    /// Optimise the visiting order of `coordinates`.
    ///
    /// Implementations must return `Err(OptimizeError::EmptyInput)` when
    /// `coordinates` is empty.
    fn optimize(
        &self,
        coordinates: &[LatLng],
        source_fixed: bool,
    ) -> Result<OptimizedTrip, OptimizeError>;
}

impl<T> RouteOptimizer for &T
where
    T: RouteOptimizer + ?Sized,
{
    fn optimize(
        &self,
        coordinates: &[LatLng],
        source_fixed: bool,
    ) -> Result<OptimizedTrip, OptimizeError> {
        (**self).optimize(coordinates, source_fixed)
    }
}

impl<T> RouteOptimizer for Box<T>
where
    T: RouteOptimizer + ?Sized,
{
    fn optimize(
        &self,
        coordinates: &[LatLng],
        source_fixed: bool,
    ) -> Result<OptimizedTrip, OptimizeError> {
        (**self).optimize(coordinates, source_fixed)
    }
}
