//! Sequencing run state and the guard that serialises runs.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;

use super::error::SequencingError;

/// Where a [`SequencingEngine`](crate::SequencingEngine) is in its current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SequencingPhase {
    /// No run has started, or the last one failed.
    #[default]
    Idle,
    /// Checking that every stop is resolved.
    Validating,
    /// Waiting on the route optimiser.
    Optimizing,
    /// Writing the new order, ETAs and geometry to the store.
    Applying,
    /// The last run completed successfully.
    Done,
}

impl SequencingPhase {
    /// Whether a run is currently outstanding.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Validating | Self::Optimizing | Self::Applying)
    }
}

fn lock(phase: &Mutex<SequencingPhase>) -> MutexGuard<'_, SequencingPhase> {
    phase.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(super) fn current(phase: &Mutex<SequencingPhase>) -> SequencingPhase {
    *lock(phase)
}

/// Claims the engine for one run.
///
/// Dropping the guard before [`RunGuard::finish`] returns the engine to
/// [`SequencingPhase::Idle`].
pub(super) struct RunGuard<'a> {
    phase: &'a Mutex<SequencingPhase>,
    finished: bool,
}

impl<'a> RunGuard<'a> {
    pub(super) fn begin(phase: &'a Mutex<SequencingPhase>) -> Result<Self, SequencingError> {
        let mut state = lock(phase);
        if state.is_running() {
            return Err(SequencingError::InProgress);
        }
        *state = SequencingPhase::Validating;
        debug!("sequencing run started");
        Ok(Self {
            phase,
            finished: false,
        })
    }

    pub(super) fn advance(&self, next: SequencingPhase) {
        *lock(self.phase) = next;
        debug!("sequencing phase: {next:?}");
    }

    pub(super) fn finish(mut self) {
        self.advance(SequencingPhase::Done);
        self.finished = true;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.phase) = SequencingPhase::Idle;
            debug!("sequencing run abandoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_guard_is_rejected_while_first_is_live() {
        let phase = Mutex::new(SequencingPhase::Idle);
        let first = RunGuard::begin(&phase).expect("first run");
        assert!(matches!(
            RunGuard::begin(&phase),
            Err(SequencingError::InProgress)
        ));
        drop(first);
        assert_eq!(current(&phase), SequencingPhase::Idle);
    }

    #[test]
    fn finished_guard_leaves_done() {
        let phase = Mutex::new(SequencingPhase::Idle);
        let guard = RunGuard::begin(&phase).expect("first run");
        guard.advance(SequencingPhase::Applying);
        guard.finish();
        assert_eq!(current(&phase), SequencingPhase::Done);
        assert!(RunGuard::begin(&phase).is_ok());
    }
}
