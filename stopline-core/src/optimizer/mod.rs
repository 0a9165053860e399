//! Compute a visiting order for a set of coordinates.
//!
//! The [`RouteOptimizer`] trait abstracts the route optimisation provider.
//! Callers supply coordinates in their current order and receive an
//! [`OptimizedTrip`]: the visiting order as input indices, plus the path
//! geometry in wire order.

mod client;
mod error;

pub use client::{OptimizedTrip, RouteOptimizer};
pub use error::OptimizeError;
