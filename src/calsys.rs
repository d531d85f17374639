//! Day-count transform between epoch days and structured dates.

use crate::error::ChronoError;

/// An era a calendar system counts its years in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarEra {
    pub name:  &'static str,
    /// Epoch day on which year 1 of the era begins.
    pub start: i64,
}

/// Bidirectional conversion between Unix epoch days and a calendar date type.
///
/// Implementations must agree with the calendar's day-of-year layout:
/// `to_epoch_days(next day) == to_epoch_days(date) + 1`.
pub trait CalendarSystem<T>: Send + Sync {
    /// # Errors
    /// Fails if `epoch_days` is outside the supported range.
    fn to_date(&self, epoch_days: i64) -> Result<T, ChronoError>;

    /// # Errors
    /// Fails if the date cannot be placed on the day scale.
    fn to_epoch_days(&self, date: &T) -> Result<i64, ChronoError>;

    fn minimum_epoch_days(&self) -> i64;

    fn maximum_epoch_days(&self) -> i64;

    fn eras(&self) -> Vec<CalendarEra>;

    /// Checks the epoch day against the supported range.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` otherwise.
    fn check_range(&self, epoch_days: i64) -> Result<i64, ChronoError> {
        let (min, max) = (self.minimum_epoch_days(), self.maximum_epoch_days());
        if (min..=max).contains(&epoch_days) {
            Ok(epoch_days)
        } else {
            Err(ChronoError::out_of_range("EPOCH_DAYS", epoch_days, min, max))
        }
    }
}
