//! Per-stop dwell time applied when stamping ETAs.

use chrono::TimeDelta;
use thiserror::Error;

/// Minutes spent at each stop before moving on to the next.
///
/// Values are limited to the inclusive range `0..=30`.
///
/// # Examples
/// ```
/// use stopline_core::DelayPerStop;
///
/// let delay = DelayPerStop::new(5)?;
/// assert_eq!(delay.minutes(), 5);
/// assert!(DelayPerStop::new(31).is_err());
/// # Ok::<(), stopline_core::DelayOutOfRange>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DelayPerStop(u8);

/// Returned when a delay lies outside `0..=30` minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("delay per stop must be between 0 and 30 minutes, got {minutes}")]
pub struct DelayOutOfRange {
    /// The rejected value.
    pub minutes: i64,
}

impl DelayPerStop {
    /// Largest accepted delay in minutes.
    pub const MAX_MINUTES: u8 = 30;

    /// Validate and construct a delay.
    ///
    /// # Errors
    ///
    /// Returns [`DelayOutOfRange`] when `minutes` is negative or above
    /// [`Self::MAX_MINUTES`].
    pub fn new(minutes: i64) -> Result<Self, DelayOutOfRange> {
        u8::try_from(minutes)
            .ok()
            .filter(|value| *value <= Self::MAX_MINUTES)
            .map(Self)
            .ok_or(DelayOutOfRange { minutes })
    }

    /// The delay in whole minutes.
    #[must_use]
    pub const fn minutes(self) -> u8 {
        self.0
    }

    /// The delay as a signed duration suitable for timestamp arithmetic.
    #[must_use]
    pub fn as_time_delta(self) -> TimeDelta {
        TimeDelta::minutes(i64::from(self.0))
    }
}

impl TryFrom<i64> for DelayPerStop {
    type Error = DelayOutOfRange;

    fn try_from(minutes: i64) -> Result<Self, Self::Error> {
        Self::new(minutes)
    }
}
