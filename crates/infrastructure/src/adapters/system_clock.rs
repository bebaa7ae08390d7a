//! Wall-clock adapter

use chrono::{Local, NaiveDate};
use submanager_application::ports::Clock;

/// Reads the host clock.
///
/// Renewal countdowns use the host's local calendar date, so a renewal due
/// "tomorrow" flips at local midnight rather than UTC midnight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
