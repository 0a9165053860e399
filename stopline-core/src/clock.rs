//! Wall-clock source for ETA stamping.

use chrono::{Local, NaiveDateTime};

/// Supplies the current local wall-clock time.
///
/// The sequencing engine reads the clock once per run; everything after that
/// is pure arithmetic on the returned value.
pub trait Clock {
    /// The current local time.
    fn now(&self) -> NaiveDateTime;
}

/// [`Clock`] backed by the operating system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<T> Clock for &T
where
    T: Clock + ?Sized,
{
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
