//! Reorder an itinerary and stamp ETAs.
//!
//! A sequencing run moves through [`SequencingPhase::Validating`],
//! [`SequencingPhase::Optimizing`] and [`SequencingPhase::Applying`] before
//! reaching [`SequencingPhase::Done`]. Validation and optimisation failures
//! return the engine to [`SequencingPhase::Idle`] without touching the store.
//!
//! The run is all-or-nothing with respect to geocoding: if any stop lacks a
//! coordinate the run fails with [`SequencingError::IncompleteItinerary`].

mod engine;
mod error;
mod phase;
mod schedule;

pub use engine::{SequencingEngine, SequencingReport};
pub use error::SequencingError;
pub use phase::SequencingPhase;
pub use schedule::{eta_schedule, validate_permutation};
