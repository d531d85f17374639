//! Proleptic Gregorian calendar: the base date types and an engine exposing
//! them through the generic element and unit rules.

pub(crate) mod date;
mod merger;
mod rules;
mod time;

use std::sync::Arc;

pub use date::PlainDate;
pub use time::{PlainTimestamp, WallTime};

use crate::calsys::{CalendarEra, CalendarSystem};
use crate::chronology::{Chronology, ChronologyBuilder};
use crate::consts::{DAYS_PER_WEEK, MAX_YEAR, MIN_YEAR, SECONDS_PER_DAY};
use crate::element::{Element, ValueKind};
use crate::error::ChronoError;
use crate::types::{Weekday, Weekmodel};
use crate::unit::ChronoUnit;
use crate::week_year::{WeekBasedYearRule, WeekBasedYearUnitRule, YEAR_OF_WEEKDATE, week_date};
use merger::GregorianMerger;
use rules::{DayArithmetic, Field, FieldRule, MonthArithmetic, WeekOfYearRule, WeekdayRule};

pub static YEAR: Element<i32> = Element::integer("YEAR", MIN_YEAR, MAX_YEAR);
pub static MONTH_OF_YEAR: Element<i32> = Element::integer("MONTH_OF_YEAR", 1, 12);
pub static DAY_OF_MONTH: Element<i32> = Element::integer("DAY_OF_MONTH", 1, 31);
pub static DAY_OF_YEAR: Element<i32> = Element::integer("DAY_OF_YEAR", 1, 366);
pub static DAY_OF_WEEK: Element<Weekday> = Element::new("DAY_OF_WEEK", ValueKind::Weekday, 1, 7);
/// Week of the week-based year, see [`YEAR_OF_WEEKDATE`].
pub static WEEK_OF_YEAR: Element<i32> = Element::integer("WEEK_OF_YEAR", 1, 53);

/// Mean Gregorian year in days.
const MEAN_YEAR_DAYS: f64 = 365.2425;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GregorianUnit {
    Years,
    Months,
    Weeks,
    Days,
    WeekBasedYears,
}

impl ChronoUnit for GregorianUnit {
    fn length(&self) -> f64 {
        let day = SECONDS_PER_DAY as f64;
        match self {
            Self::Years | Self::WeekBasedYears => MEAN_YEAR_DAYS * day,
            Self::Months => MEAN_YEAR_DAYS * day / 12.0,
            Self::Weeks => DAYS_PER_WEEK as f64 * day,
            Self::Days => day,
        }
    }

    fn is_calendrical(&self) -> bool {
        true
    }
}

/// Day count of the proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianSystem;

impl CalendarSystem<PlainDate> for GregorianSystem {
    fn to_date(&self, epoch_days: i64) -> Result<PlainDate, ChronoError> {
        PlainDate::from_epoch_days(epoch_days)
    }

    fn to_epoch_days(&self, date: &PlainDate) -> Result<i64, ChronoError> {
        Ok(date.to_epoch_days())
    }

    fn minimum_epoch_days(&self) -> i64 {
        PlainDate::MIN.to_epoch_days()
    }

    fn maximum_epoch_days(&self) -> i64 {
        PlainDate::MAX.to_epoch_days()
    }

    fn eras(&self) -> Vec<CalendarEra> {
        vec![CalendarEra {
            name:  "CE",
            start: PlainDate::MIN.to_epoch_days(),
        }]
    }
}

/// Gregorian engine bound to one week model.
#[derive(Debug)]
pub struct GregorianCalendar {
    chronology: Chronology<PlainDate, GregorianUnit>,
    weekmodel:  Weekmodel,
}

impl GregorianCalendar {
    /// # Errors
    /// Fails only if the element table is inconsistent.
    pub fn new(weekmodel: Weekmodel) -> Result<Self, ChronoError> {
        let chronology = ChronologyBuilder::set_up(
            "gregorian",
            GregorianMerger::new(weekmodel),
            Arc::new(GregorianSystem),
        )
        .append_element_with_unit(&YEAR, FieldRule(Field::Year), GregorianUnit::Years)
        .append_element_with_unit(&MONTH_OF_YEAR, FieldRule(Field::Month), GregorianUnit::Months)
        .append_element_with_unit(&DAY_OF_MONTH, FieldRule(Field::DayOfMonth), GregorianUnit::Days)
        .append_element_with_unit(&DAY_OF_YEAR, FieldRule(Field::DayOfYear), GregorianUnit::Days)
        .append_element(&DAY_OF_WEEK, WeekdayRule { model: weekmodel })
        .append_element_with_unit(&WEEK_OF_YEAR, WeekOfYearRule { model: weekmodel }, GregorianUnit::Weeks)
        .append_element_with_unit(
            &YEAR_OF_WEEKDATE,
            WeekBasedYearRule::new(weekmodel),
            GregorianUnit::WeekBasedYears,
        )
        .append_unit(GregorianUnit::Years, MonthArithmetic { months_per_unit: 12 })
        .append_unit(GregorianUnit::Months, MonthArithmetic { months_per_unit: 1 })
        .append_unit(GregorianUnit::Weeks, DayArithmetic { days_per_unit: DAYS_PER_WEEK })
        .append_unit(GregorianUnit::Days, DayArithmetic { days_per_unit: 1 })
        .append_unit(GregorianUnit::WeekBasedYears, WeekBasedYearUnitRule::new(weekmodel))
        .build()?;

        Ok(Self { chronology, weekmodel })
    }

    /// Engine with the ISO-8601 week model.
    ///
    /// # Errors
    /// See [`GregorianCalendar::new`].
    pub fn iso() -> Result<Self, ChronoError> {
        Self::new(Weekmodel::ISO)
    }

    pub const fn chronology(&self) -> &Chronology<PlainDate, GregorianUnit> {
        &self.chronology
    }

    pub const fn weekmodel(&self) -> &Weekmodel {
        &self.weekmodel
    }

    pub fn year_of_weekdate(&self, date: &PlainDate) -> i32 {
        week_date(date, &self.weekmodel).0
    }

    pub fn week_of_year(&self, date: &PlainDate) -> i32 {
        week_date(date, &self.weekmodel).1
    }

    pub fn is_weekend(&self, date: &PlainDate) -> bool {
        self.weekmodel.is_weekend(date.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merger::ElementBag;
    use crate::test_utils::plain_date;

    fn engine() -> GregorianCalendar {
        GregorianCalendar::iso().expect("engine builds")
    }

    #[test]
    fn test_registered_elements_in_order() {
        let names: Vec<_> = engine()
            .chronology()
            .registered_elements()
            .map(|e| e.name())
            .collect();
        assert_eq!(
            names,
            [
                "YEAR",
                "MONTH_OF_YEAR",
                "DAY_OF_MONTH",
                "DAY_OF_YEAR",
                "DAY_OF_WEEK",
                "WEEK_OF_YEAR",
                "YEAR_OF_WEEKDATE"
            ]
        );
        assert!(engine().chronology().element("WEEK_OF_YEAR").is_some_and(|e| e.is(WEEK_OF_YEAR.info())));
        assert!(engine().chronology().element("VAHID").is_none());
    }

    #[test]
    fn test_get_and_bounds() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        let date = plain_date(2024, 2, 10);
        assert_eq!(chrono.get(&date, &DAY_OF_MONTH).expect("registered"), 10);
        assert_eq!(chrono.maximum_of(&date, &DAY_OF_MONTH).expect("registered"), 29);
        assert_eq!(chrono.get(&date, &DAY_OF_WEEK).expect("registered"), Weekday::Saturday);
        assert_eq!(chrono.get(&plain_date(2021, 1, 1), &YEAR_OF_WEEKDATE).expect("registered"), 2020);
        assert_eq!(chrono.get(&plain_date(2021, 1, 1), &WEEK_OF_YEAR).expect("registered"), 53);
    }

    #[test]
    fn test_with_strict_and_lenient() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        let date = plain_date(2023, 1, 31);

        assert_eq!(chrono.with(&date, &MONTH_OF_YEAR, 2).expect("clamps day"), plain_date(2023, 2, 28));
        assert!(chrono.with(&date, &DAY_OF_MONTH, 32).is_err());
        assert_eq!(chrono.with_lenient(&date, &DAY_OF_MONTH, 32).expect("carries"), plain_date(2023, 2, 1));
        assert_eq!(chrono.with_lenient(&date, &DAY_OF_MONTH, 0).expect("carries"), plain_date(2022, 12, 31));
        assert_eq!(chrono.with_lenient(&date, &MONTH_OF_YEAR, 14).expect("carries"), plain_date(2024, 2, 29));
    }

    #[test]
    fn test_weekday_moves_within_week() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        // Wednesday
        let date = plain_date(2024, 3, 20);
        assert_eq!(chrono.with(&date, &DAY_OF_WEEK, Weekday::Monday).expect("valid"), plain_date(2024, 3, 18));
        assert_eq!(chrono.with(&date, &DAY_OF_WEEK, Weekday::Sunday).expect("valid"), plain_date(2024, 3, 24));
    }

    #[test]
    fn test_floor_and_ceiling() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        let date = plain_date(2024, 3, 20);
        assert_eq!(chrono.at_floor(&date, YEAR.info()).expect("valid"), plain_date(2024, 1, 1));
        assert_eq!(chrono.at_ceiling(&date, YEAR.info()).expect("valid"), plain_date(2024, 12, 31));
        assert_eq!(chrono.at_ceiling(&date, MONTH_OF_YEAR.info()).expect("valid"), plain_date(2024, 3, 31));
        assert_eq!(chrono.at_floor(&date, WEEK_OF_YEAR.info()).expect("valid"), plain_date(2024, 3, 18));
        assert_eq!(chrono.at_floor(&date, YEAR_OF_WEEKDATE.info()).expect("valid"), plain_date(2024, 1, 1));
        assert_eq!(chrono.at_floor(&date, DAY_OF_YEAR.info()).expect("valid"), date);
    }

    #[test]
    fn test_unit_arithmetic() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        let leap_day = plain_date(2024, 2, 29);

        assert_eq!(chrono.plus(&leap_day, 1, GregorianUnit::Years).expect("valid"), plain_date(2025, 2, 28));
        assert_eq!(chrono.minus(&leap_day, 1, GregorianUnit::Months).expect("valid"), plain_date(2024, 1, 29));
        assert_eq!(chrono.plus(&leap_day, 2, GregorianUnit::Weeks).expect("valid"), plain_date(2024, 3, 14));
        assert_eq!(
            chrono.between(&leap_day, &plain_date(2025, 2, 28), GregorianUnit::Years).expect("valid"),
            0
        );
        assert_eq!(
            chrono.between(&leap_day, &plain_date(2025, 3, 1), GregorianUnit::Years).expect("valid"),
            1
        );
        assert_eq!(
            chrono.between(&plain_date(2024, 3, 31), &plain_date(2024, 1, 1), GregorianUnit::Months).expect("valid"),
            -2
        );
        assert_eq!(
            chrono.between(&leap_day, &plain_date(2024, 3, 13), GregorianUnit::Weeks).expect("valid"),
            1
        );
        assert!(chrono.plus(&plain_date(9999, 12, 1), 1, GregorianUnit::Months).is_err());
    }

    #[test]
    fn test_bounds_and_eras() {
        let gregorian = engine();
        let chrono = gregorian.chronology();
        assert_eq!(chrono.minimum().expect("valid"), PlainDate::MIN);
        assert_eq!(chrono.maximum().expect("valid"), PlainDate::MAX);
        assert_eq!(chrono.eras().len(), 1);
        assert!(chrono.calendar_system().check_range(PlainDate::MAX.to_epoch_days() + 1).is_err());
    }

    #[test]
    fn test_merge_paths() {
        let gregorian = engine();
        let chrono = gregorian.chronology();

        let mut bag = ElementBag::new().with(&YEAR, 2024).with(&MONTH_OF_YEAR, 2).with(&DAY_OF_MONTH, 29);
        assert_eq!(chrono.create_from(&mut bag, false), Some(plain_date(2024, 2, 29)));

        let mut bag = ElementBag::new().with(&YEAR, 2023).with(&MONTH_OF_YEAR, 2).with(&DAY_OF_MONTH, 29);
        assert_eq!(chrono.create_from(&mut bag, false), None);
        assert!(bag.validation_failure().is_some_and(|m| m.starts_with("year-month-day")));

        let mut bag = ElementBag::new().with(&YEAR, 2023).with(&MONTH_OF_YEAR, 2).with(&DAY_OF_MONTH, 29);
        assert_eq!(chrono.create_from(&mut bag, true), Some(plain_date(2023, 3, 1)));

        let mut bag = ElementBag::new().with(&YEAR, 2024).with(&DAY_OF_YEAR, 61);
        assert_eq!(chrono.create_from(&mut bag, false), Some(plain_date(2024, 3, 1)));

        let mut bag = ElementBag::new()
            .with(&YEAR_OF_WEEKDATE, 2020)
            .with(&WEEK_OF_YEAR, 53)
            .with(&DAY_OF_WEEK, Weekday::Friday);
        assert_eq!(chrono.create_from(&mut bag, false), Some(plain_date(2021, 1, 1)));

        let mut bag = ElementBag::new().with(&MONTH_OF_YEAR, 2);
        assert_eq!(chrono.create_from(&mut bag, false), None);
        assert!(!bag.has_failure());
    }

    #[test]
    fn test_week_accessors_and_weekend() {
        let gregorian = engine();
        let date = plain_date(2024, 12, 30);
        assert_eq!(gregorian.year_of_weekdate(&date), 2025);
        assert_eq!(gregorian.week_of_year(&date), 1);
        assert!(!gregorian.is_weekend(&date));
        assert!(gregorian.is_weekend(&plain_date(2024, 12, 29)));
    }
}
