use crate::consts::{DAYS_IN_MONTH, DAYS_PER_WEEK, FEBRUARY, FEBRUARY_DAYS_LEAP, MAX_MONTH};
use crate::error::ChronoError;
use crate::gregorian::PlainDate;
use crate::prelude::*;
use crate::week_year::week_date;
use serde::{Deserialize, Serialize};

/// Day of week, numbered the ISO way (Monday = 1 ... Sunday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// ISO number of this weekday (Monday = 1).
    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    /// Looks up a weekday by its ISO number.
    pub fn from_value(value: i64) -> Option<Self> {
        usize::try_from(value - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Position of this weekday within a week of the given model (first day = 1).
    pub const fn value_in(self, model: &Weekmodel) -> i32 {
        (self.value() - model.first_day_of_week.value()).rem_euclid(7) + 1
    }

    /// Inverse of [`Weekday::value_in`].
    pub fn from_value_in(value: i64, model: &Weekmodel) -> Option<Self> {
        if !(1..=DAYS_PER_WEEK).contains(&value) {
            return None;
        }
        Some(model.first_day_of_week.roll(value - 1))
    }

    /// Weekday of a Unix epoch day (1970-01-01 was a Thursday).
    pub fn from_epoch_days(epoch_days: i64) -> Self {
        Self::ALL[(epoch_days + 3).rem_euclid(DAYS_PER_WEEK) as usize]
    }

    /// Moves forward (or backward) by the given number of days.
    pub fn roll(self, days: i64) -> Self {
        Self::ALL[(i64::from(self.value()) - 1 + days).rem_euclid(DAYS_PER_WEEK) as usize]
    }

    /// The following weekday.
    pub fn next(self) -> Self {
        self.roll(1)
    }
}

/// Week definition: first day of week, minimal days in the first week of a
/// year and the weekend span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawWeekmodel")]
pub struct Weekmodel {
    first_day_of_week:          Weekday,
    minimal_days_in_first_week: u8,
    start_of_weekend:           Weekday,
    end_of_weekend:             Weekday,
}

#[derive(Deserialize)]
struct RawWeekmodel {
    first_day_of_week:          Weekday,
    minimal_days_in_first_week: u8,
    start_of_weekend:           Weekday,
    end_of_weekend:             Weekday,
}

impl TryFrom<RawWeekmodel> for Weekmodel {
    type Error = ChronoError;

    fn try_from(raw: RawWeekmodel) -> Result<Self, Self::Error> {
        Self::with_weekend(
            raw.first_day_of_week,
            raw.minimal_days_in_first_week,
            raw.start_of_weekend,
            raw.end_of_weekend,
        )
    }
}

impl Weekmodel {
    /// ISO-8601: weeks start on Monday, the first week has at least four days.
    pub const ISO: Self = Self {
        first_day_of_week:          Weekday::Monday,
        minimal_days_in_first_week: 4,
        start_of_weekend:           Weekday::Saturday,
        end_of_weekend:             Weekday::Sunday,
    };

    /// Badi week: starts on Saturday, the week containing the new year is
    /// week 1, the weekend is Saturday and Sunday.
    pub const BADI: Self = Self {
        first_day_of_week:          Weekday::Saturday,
        minimal_days_in_first_week: 1,
        start_of_weekend:           Weekday::Saturday,
        end_of_weekend:             Weekday::Sunday,
    };

    /// Creates a model with a Saturday-Sunday weekend.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` if `minimal_days` is not in 1-7.
    pub fn new(first_day_of_week: Weekday, minimal_days: u8) -> Result<Self, ChronoError> {
        Self::with_weekend(first_day_of_week, minimal_days, Weekday::Saturday, Weekday::Sunday)
    }

    /// Creates a model with an explicit weekend span.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` if `minimal_days` is not in 1-7.
    pub fn with_weekend(
        first_day_of_week: Weekday,
        minimal_days: u8,
        start_of_weekend: Weekday,
        end_of_weekend: Weekday,
    ) -> Result<Self, ChronoError> {
        if !(1..=7).contains(&minimal_days) {
            return Err(ChronoError::out_of_range(
                "MINIMAL_DAYS_IN_FIRST_WEEK",
                i64::from(minimal_days),
                1,
                DAYS_PER_WEEK,
            ));
        }
        Ok(Self {
            first_day_of_week,
            minimal_days_in_first_week: minimal_days,
            start_of_weekend,
            end_of_weekend,
        })
    }

    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    pub const fn minimal_days_in_first_week(&self) -> u8 {
        self.minimal_days_in_first_week
    }

    pub const fn start_of_weekend(&self) -> Weekday {
        self.start_of_weekend
    }

    pub const fn end_of_weekend(&self) -> Weekday {
        self.end_of_weekend
    }

    /// First day after the weekend.
    pub fn first_workday(&self) -> Weekday {
        self.end_of_weekend.next()
    }

    /// Checks if the weekday falls into the (possibly wrapping) weekend span.
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        let span = (self.end_of_weekend.value() - self.start_of_weekend.value()).rem_euclid(7);
        let offset = (weekday.value() - self.start_of_weekend.value()).rem_euclid(7);
        offset <= span
    }

    /// Day of year on which week 1 starts, given the weekday of January 1.
    /// The result can be zero or negative when week 1 starts in December.
    pub const fn first_week_start(&self, new_year: Weekday) -> i32 {
        let dow = new_year.value_in(self);
        if dow <= 8 - self.minimal_days_in_first_week as i32 {
            2 - dow
        } else {
            9 - dow
        }
    }

    /// Week of the week-based year containing `date`.
    pub fn week_of_year(&self, date: &PlainDate) -> i32 {
        week_date(date, self).1
    }
}

// Helper functions

pub const fn is_leap_year(year: i32) -> bool {
    calendrical_calculations::gregorian::is_leap_year(year)
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

pub const fn length_of_year(year: i32) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}
