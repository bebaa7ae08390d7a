//! Time source for renewal countdowns

use chrono::NaiveDate;

/// Current calendar date, swappable in tests.
pub trait Clock: Send + Sync {
    /// Date that "days until renewal" is counted from.
    fn today(&self) -> NaiveDate;
}
