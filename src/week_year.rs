//! Week-based year on Gregorian dates.
//!
//! The week-based year is the year owning the week a date falls into. It
//! differs from the calendar year for a few days around January 1: those days
//! can belong to the last week of the previous year or to week 1 of the next.
//! Which days do is decided by the [`Weekmodel`].

use std::cmp::Ordering;

use crate::consts::{DAYS_PER_WEEK, JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::element::{Element, ElementInfo, ElementRule};
use crate::error::{ChronoError, narrow};
use crate::gregorian::date::epoch_days_of;
use crate::gregorian::{PlainDate, PlainTimestamp, WEEK_OF_YEAR, WallTime};
use crate::types::{Weekday, Weekmodel, length_of_year};
use crate::unit::{UnitRule, complete_units};

/// Year of the week-based calendar.
pub static YEAR_OF_WEEKDATE: Element<i32> = Element::integer("YEAR_OF_WEEKDATE", MIN_YEAR, MAX_YEAR);

/// A value positioned on a Gregorian calendar date, optionally with a time of day.
pub trait WeekDated: Clone + Send + Sync {
    fn calendar_date(&self) -> PlainDate;

    #[must_use]
    fn with_calendar_date(&self, date: PlainDate) -> Self;

    /// Time of day, if the value has one.
    fn wall_time(&self) -> Option<WallTime> {
        None
    }
}

impl WeekDated for PlainDate {
    fn calendar_date(&self) -> PlainDate {
        *self
    }

    fn with_calendar_date(&self, date: PlainDate) -> Self {
        date
    }
}

impl WeekDated for PlainTimestamp {
    fn calendar_date(&self) -> PlainDate {
        self.date()
    }

    fn with_calendar_date(&self, date: PlainDate) -> Self {
        self.with_date(date)
    }

    fn wall_time(&self) -> Option<WallTime> {
        Some(self.time())
    }
}

/// Day of year on which week 1 of `year` starts (possibly zero or negative).
fn first_week_start(year: i32, model: &Weekmodel) -> i32 {
    let new_year = Weekday::from_epoch_days(epoch_days_of(year, JANUARY, MIN_DAY));
    model.first_week_start(new_year)
}

/// Number of weeks (52 or 53) in a week-based year.
pub fn weeks_in_year(year: i32, model: &Weekmodel) -> i32 {
    let days = length_of_year(year) + first_week_start(year + 1, model) - first_week_start(year, model);
    days / DAYS_PER_WEEK as i32
}

/// Week-based year and week of year of a date.
pub fn week_date(date: &PlainDate, model: &Weekmodel) -> (i32, i32) {
    let year = date.year();
    let day_of_year = date.day_of_year();
    let start = first_week_start(year, model);

    if day_of_year < start {
        let previous = year - 1;
        let week = (day_of_year + length_of_year(previous) - first_week_start(previous, model)) / 7 + 1;
        return (previous, week);
    }
    if day_of_year >= length_of_year(year) + first_week_start(year + 1, model) {
        return (year + 1, 1);
    }
    (year, (day_of_year - start) / 7 + 1)
}

/// Date of a weekday in a week of a week-based year.
///
/// # Errors
/// Returns `ChronoError::OutOfRange` if the year or week does not exist or the
/// date falls outside the supported range.
pub fn of_week_date(year: i32, week: i32, weekday: Weekday, model: &Weekmodel) -> Result<PlainDate, ChronoError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ChronoError::out_of_range(
            YEAR_OF_WEEKDATE.name(),
            year.into(),
            MIN_YEAR.into(),
            MAX_YEAR.into(),
        ));
    }
    let max_week = weeks_in_year(year, model);
    if !(1..=max_week).contains(&week) {
        return Err(ChronoError::out_of_range(
            WEEK_OF_YEAR.name(),
            week.into(),
            1,
            max_week.into(),
        ));
    }
    let day_of_year = first_week_start(year, model) + (week - 1) * 7 + weekday.value_in(model) - 1;
    PlainDate::from_epoch_days(epoch_days_of(year, JANUARY, MIN_DAY) + i64::from(day_of_year) - 1)
}

/// Moves a value to another week-based year keeping week and weekday. Week 53
/// becomes week 52 if the target year has no 53rd week.
fn move_to_year<T: WeekDated>(context: &T, year: i32, model: &Weekmodel) -> Result<T, ChronoError> {
    let date = context.calendar_date();
    let (_, week) = week_date(&date, model);
    let week = week.min(weeks_in_year(year, model));
    let target = of_week_date(year, week, date.weekday(), model)?;
    Ok(context.with_calendar_date(target))
}

/// Element rule of [`YEAR_OF_WEEKDATE`].
#[derive(Debug, Clone, Copy)]
pub struct WeekBasedYearRule {
    model: Weekmodel,
}

impl WeekBasedYearRule {
    pub const fn new(model: Weekmodel) -> Self {
        Self { model }
    }
}

impl<T: WeekDated> ElementRule<T> for WeekBasedYearRule {
    fn value(&self, context: &T) -> Result<i64, ChronoError> {
        Ok(week_date(&context.calendar_date(), &self.model).0.into())
    }

    fn minimum(&self, _context: &T) -> i64 {
        MIN_YEAR.into()
    }

    fn maximum(&self, _context: &T) -> i64 {
        MAX_YEAR.into()
    }

    fn is_valid(&self, context: &T, value: i64) -> bool {
        (ElementRule::<T>::minimum(self, context)..=ElementRule::<T>::maximum(self, context)).contains(&value)
    }

    fn with_value(&self, context: &T, value: i64, _lenient: bool) -> Result<T, ChronoError> {
        if !ElementRule::<T>::is_valid(self, context, value) {
            return Err(ChronoError::out_of_range(
                YEAR_OF_WEEKDATE.name(),
                value,
                MIN_YEAR.into(),
                MAX_YEAR.into(),
            ));
        }
        move_to_year(context, narrow(value)?, &self.model)
    }

    fn child_at_floor(&self, _context: &T) -> Option<&'static ElementInfo> {
        Some(WEEK_OF_YEAR.info())
    }

    fn child_at_ceiling(&self, _context: &T) -> Option<&'static ElementInfo> {
        Some(WEEK_OF_YEAR.info())
    }
}

/// Arithmetic in whole week-based years.
#[derive(Debug, Clone, Copy)]
pub struct WeekBasedYearUnitRule {
    model: Weekmodel,
}

impl WeekBasedYearUnitRule {
    pub const fn new(model: Weekmodel) -> Self {
        Self { model }
    }

    /// Same week and weekday one week-based year later.
    ///
    /// # Errors
    /// Fails at the end of the supported range.
    pub fn incremented<T: WeekDated>(&self, context: &T) -> Result<T, ChronoError> {
        UnitRule::<T>::add_to(self, context, 1)
    }

    /// Same week and weekday one week-based year earlier.
    ///
    /// # Errors
    /// Fails at the start of the supported range.
    pub fn decremented<T: WeekDated>(&self, context: &T) -> Result<T, ChronoError> {
        UnitRule::<T>::add_to(self, context, -1)
    }
}

impl<T: WeekDated> UnitRule<T> for WeekBasedYearUnitRule {
    fn add_to(&self, date: &T, amount: i64) -> Result<T, ChronoError> {
        let (year, _) = week_date(&date.calendar_date(), &self.model);
        let target = i64::from(year)
            .checked_add(amount)
            .ok_or_else(|| ChronoError::overflow(format!("{year} + {amount} week-based years")))?;
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&target) {
            return Err(ChronoError::out_of_range(
                YEAR_OF_WEEKDATE.name(),
                target,
                MIN_YEAR.into(),
                MAX_YEAR.into(),
            ));
        }
        move_to_year(date, narrow(target)?, &self.model)
    }

    fn between(&self, start: &T, end: &T) -> Result<i64, ChronoError> {
        let (start_year, start_week) = week_date(&start.calendar_date(), &self.model);
        let (end_year, end_week) = week_date(&end.calendar_date(), &self.model);
        let delta = i64::from(end_year) - i64::from(start_year);

        let start_day = start.calendar_date().weekday().value_in(&self.model);
        let end_day = end.calendar_date().weekday().value_in(&self.model);

        // year, then week, then weekday, then time of day where both have one
        let ordering = end_week
            .cmp(&start_week)
            .then(end_day.cmp(&start_day))
            .then_with(|| match (start.wall_time(), end.wall_time()) {
                (Some(start_time), Some(end_time)) => end_time.cmp(&start_time),
                _ => Ordering::Equal,
            });

        Ok(complete_units(delta, ordering))
    }
}
