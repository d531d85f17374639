//! The Badi calendar of the Bahai faith.
//!
//! A Badi year has 19 months of 19 days and an intercalary period of four or
//! five days (Ayyam-i-Ha) between the 18th and the 19th month. Nineteen years
//! form a vahid and nineteen vahids form a major cycle (kull-i-shai); three
//! major cycles are supported.
//!
//! The year begins on Naw-Ruz. Up to the configured switch date that is a
//! fixed civil day (March 21). From then on it is the day, counted from
//! sunset to sunset at the configured location, in which the March equinox
//! falls. Whether a year is a leap year follows from the distance between two
//! consecutive new years, so a [`BadiCalendar`] computes a table of new years
//! once when it is created.
//!
//! ```
//! use calendar_axis::{BadiCalendar, BadiConfig, BadiMonth, BadiUnit};
//!
//! let badi = BadiCalendar::new(BadiConfig::default())?;
//! let date = badi.of(5, 11, BadiMonth::Jalal, 13)?;
//! assert_eq!(date.to_string(), "Bahai-1-5-11-2-13");
//! assert!(!badi.is_leap(&date));
//!
//! let later = badi.plus(&date, 19, BadiUnit::Months)?;
//! assert_eq!(later.to_string(), "Bahai-1-5-12-2-13");
//! # Ok::<(), calendar_axis::ChronoError>(())
//! ```

mod date;
mod elements;
mod merger;
mod transform;
mod units;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

pub use date::{BadiDate, BadiDivision, BadiEra, BadiIntercalaryDays, BadiMonth};
pub use elements::{
    AYYAM_I_HA, DAY_OF_DIVISION, DAY_OF_WEEK, DAY_OF_YEAR, ERA, KULL_I_SHAI, MONTH_OF_YEAR, VAHID, YEAR_OF_ERA,
    YEAR_OF_VAHID,
};
pub(crate) use transform::NawRuzTable;
pub use units::BadiUnit;

use crate::chronology::{Chronology, ChronologyBuilder};
use crate::config::BadiConfig;
use crate::consts::{AYYAM_I_HA_LABEL, BADI_PREFIX, BADI_SEPARATOR, SECONDS_PER_DAY};
use crate::element::{Element, ElementInfo, ElementValue};
use crate::error::{ChronoError, ParseError};
use crate::gregorian::PlainDate;
use crate::merger::ElementBag;
use crate::solar::{SolarCalculator, StdSolarCalculator};
use crate::types::Weekday;
use elements::{EraRule, IntegerField, IntegerRule, IntercalaryRule, MonthRule, WeekdayRule};
use merger::BadiMerger;
use transform::BadiSystem;
use units::BadiUnitRule;

/// Badi calendar engine.
///
/// Creating an engine computes the new years of all supported years, so
/// create it once and share it. It is immutable and `Send + Sync`.
pub struct BadiCalendar {
    config:     BadiConfig,
    solar:      Arc<dyn SolarCalculator>,
    table:      Arc<NawRuzTable>,
    chronology: Chronology<BadiDate, BadiUnit>,
}

impl fmt::Debug for BadiCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BadiCalendar")
            .field("config", &self.config)
            .field("chronology", &self.chronology)
            .finish_non_exhaustive()
    }
}

impl BadiCalendar {
    /// Engine using the built-in astronomical calculations.
    ///
    /// # Errors
    /// Returns `ChronoError::InvalidConfig` if the configuration is rejected.
    pub fn new(config: BadiConfig) -> Result<Self, ChronoError> {
        Self::with_solar_calculator(config, Arc::new(StdSolarCalculator))
    }

    /// Engine using a custom source of equinox and sunset times.
    ///
    /// # Errors
    /// Returns `ChronoError::InvalidConfig` if the configuration is rejected or
    /// the calculator produces years that are not 365 or 366 days long.
    pub fn with_solar_calculator(config: BadiConfig, solar: Arc<dyn SolarCalculator>) -> Result<Self, ChronoError> {
        config.validate()?;
        let table = Arc::new(NawRuzTable::compute(&config, solar.as_ref())?);
        let integer = |field| IntegerRule::new(field, Arc::clone(&table));
        let unit = |unit| BadiUnitRule::new(unit, Arc::clone(&table));

        let chronology = ChronologyBuilder::set_up(
            "bahai",
            BadiMerger::new(Arc::clone(&table)),
            Arc::new(BadiSystem::new(Arc::clone(&table))),
        )
        .append_element(&ERA, EraRule)
        .append_element_with_unit(&YEAR_OF_ERA, integer(IntegerField::YearOfEra), BadiUnit::Years)
        .append_element(&KULL_I_SHAI, integer(IntegerField::KullIShai))
        .append_element_with_unit(&VAHID, integer(IntegerField::Vahid), BadiUnit::VahidCycles)
        .append_element_with_unit(&YEAR_OF_VAHID, integer(IntegerField::YearOfVahid), BadiUnit::Years)
        .append_element_with_unit(&MONTH_OF_YEAR, MonthRule, BadiUnit::Months)
        .append_element(&AYYAM_I_HA, IntercalaryRule::new(Arc::clone(&table)))
        .append_element_with_unit(&DAY_OF_DIVISION, integer(IntegerField::DayOfDivision), BadiUnit::Days)
        .append_element_with_unit(&DAY_OF_YEAR, integer(IntegerField::DayOfYear), BadiUnit::Days)
        .append_element(&DAY_OF_WEEK, WeekdayRule::new(config.weekmodel, Arc::clone(&table)))
        .append_unit(BadiUnit::VahidCycles, unit(BadiUnit::VahidCycles))
        .append_unit(BadiUnit::Years, unit(BadiUnit::Years))
        .append_unit(BadiUnit::Months, unit(BadiUnit::Months))
        .append_unit(BadiUnit::Weeks, unit(BadiUnit::Weeks))
        .append_unit(BadiUnit::Days, unit(BadiUnit::Days))
        .build()?;

        debug!(location = ?config.location, switch_date = %config.switch_date, "badi calendar ready");
        Ok(Self {
            config,
            solar,
            table,
            chronology,
        })
    }

    pub const fn config(&self) -> &BadiConfig {
        &self.config
    }

    pub const fn chronology(&self) -> &Chronology<BadiDate, BadiUnit> {
        &self.chronology
    }

    /// Date from all five fields.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` naming the first invalid field; the
    /// fifth day of Ayyam-i-Ha is only valid in leap years.
    pub fn of_complete(
        &self,
        kull_i_shai: i32,
        vahid: i32,
        year_of_vahid: i32,
        division: impl Into<BadiDivision>,
        day: i32,
    ) -> Result<BadiDate, ChronoError> {
        self.table
            .create(kull_i_shai, vahid, year_of_vahid, division.into().index(), day)
    }

    /// Month date in the first major cycle.
    ///
    /// # Errors
    /// See [`BadiCalendar::of_complete`].
    pub fn of(&self, vahid: i32, year_of_vahid: i32, month: BadiMonth, day: i32) -> Result<BadiDate, ChronoError> {
        self.of_complete(1, vahid, year_of_vahid, month, day)
    }

    /// Intercalary day in the first major cycle.
    ///
    /// # Errors
    /// See [`BadiCalendar::of_complete`].
    pub fn of_intercalary(&self, vahid: i32, year_of_vahid: i32, day: i32) -> Result<BadiDate, ChronoError> {
        self.of_complete(1, vahid, year_of_vahid, BadiDivision::AyyamIHa, day)
    }

    /// Whether five fields form a date; `division` is 0 for Ayyam-i-Ha.
    pub fn is_valid(&self, kull_i_shai: i32, vahid: i32, year_of_vahid: i32, division: i32, day: i32) -> bool {
        self.table.is_valid(kull_i_shai, vahid, year_of_vahid, division, day)
    }

    /// # Errors
    /// Returns `ChronoError::OutOfRange` if the year is not supported.
    pub fn is_leap_year(&self, kull_i_shai: i32, vahid: i32, year_of_vahid: i32) -> Result<bool, ChronoError> {
        let first = self.table.create(kull_i_shai, vahid, year_of_vahid, 1, 1)?;
        Ok(self.is_leap(&first))
    }

    /// Whether the year of `date` has five intercalary days.
    pub fn is_leap(&self, date: &BadiDate) -> bool {
        self.table.is_leap(date.year_of_era())
    }

    pub fn length_of_year(&self, date: &BadiDate) -> i32 {
        self.table.length_of_year(date.year_of_era())
    }

    pub fn day_of_year(&self, date: &BadiDate) -> i32 {
        self.table.day_of_year(date)
    }

    /// # Errors
    /// Fails only for a date from an engine with a different year range.
    pub fn day_of_week(&self, date: &BadiDate) -> Result<Weekday, ChronoError> {
        Ok(Weekday::from_epoch_days(self.to_epoch_days(date)?))
    }

    /// # Errors
    /// See [`BadiCalendar::day_of_week`].
    pub fn is_weekend(&self, date: &BadiDate) -> Result<bool, ChronoError> {
        Ok(self.config.weekmodel.is_weekend(self.day_of_week(date)?))
    }

    /// Unix epoch day of `date`.
    ///
    /// # Errors
    /// Fails only for a date from an engine with a different year range.
    pub fn to_epoch_days(&self, date: &BadiDate) -> Result<i64, ChronoError> {
        self.table.to_epoch_days(date)
    }

    /// # Errors
    /// Returns `ChronoError::OutOfRange` outside the supported range.
    pub fn from_epoch_days(&self, epoch_days: i64) -> Result<BadiDate, ChronoError> {
        self.table.to_date(epoch_days)
    }

    /// Gregorian date whose daytime the Badi day contains.
    ///
    /// # Errors
    /// See [`BadiCalendar::to_epoch_days`].
    pub fn to_gregorian(&self, date: &BadiDate) -> Result<PlainDate, ChronoError> {
        PlainDate::from_epoch_days(self.to_epoch_days(date)?)
    }

    /// # Errors
    /// Returns `ChronoError::OutOfRange` outside the supported range.
    pub fn from_gregorian(&self, date: &PlainDate) -> Result<BadiDate, ChronoError> {
        self.from_epoch_days(date.to_epoch_days())
    }

    /// Badi date at an instant: the day changes at sunset.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` outside the supported range.
    pub fn at_instant(&self, unix_seconds: i64) -> Result<BadiDate, ChronoError> {
        let local = unix_seconds
            .checked_add(self.config.utc_offset_seconds.into())
            .ok_or_else(|| ChronoError::overflow(unix_seconds))?;
        let civil_day = local.div_euclid(SECONDS_PER_DAY);
        let after_sunset = self
            .solar
            .sunset(civil_day, &self.config.location)
            .is_some_and(|sunset| unix_seconds as f64 >= sunset);
        self.from_epoch_days(if after_sunset { civil_day + 1 } else { civil_day })
    }

    /// Current Badi date according to the system clock.
    ///
    /// # Errors
    /// Fails if the clock is before 1970 or outside the supported range.
    pub fn today(&self) -> Result<BadiDate, ChronoError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ChronoError::InvalidDate(e.to_string()))?;
        let seconds = i64::try_from(now.as_secs()).map_err(|_| ChronoError::overflow(now.as_secs()))?;
        self.at_instant(seconds)
    }

    /// Whether `date` has a value for `element`: the month and the intercalary
    /// period are mutually exclusive.
    pub fn contains(&self, date: &BadiDate, element: &ElementInfo) -> bool {
        if element.is(MONTH_OF_YEAR.info()) {
            date.has_month()
        } else if element.is(AYYAM_I_HA.info()) {
            date.is_intercalary_day()
        } else {
            self.chronology.is_registered(element)
        }
    }

    /// # Errors
    /// Fails if the element is unregistered or absent from this date.
    pub fn get<V: ElementValue>(&self, date: &BadiDate, element: &'static Element<V>) -> Result<V, ChronoError> {
        self.chronology.get(date, element)
    }

    /// Strict write.
    ///
    /// # Errors
    /// Fails if the element is unregistered or the value is invalid.
    pub fn with<V: ElementValue>(
        &self,
        date: &BadiDate,
        element: &'static Element<V>,
        value: V,
    ) -> Result<BadiDate, ChronoError> {
        self.chronology.with(date, element, value)
    }

    /// # Errors
    /// Fails if the result is out of range.
    pub fn plus(&self, date: &BadiDate, amount: i64, unit: BadiUnit) -> Result<BadiDate, ChronoError> {
        self.chronology.plus(date, amount, unit)
    }

    /// # Errors
    /// Fails if the result is out of range.
    pub fn minus(&self, date: &BadiDate, amount: i64, unit: BadiUnit) -> Result<BadiDate, ChronoError> {
        self.chronology.minus(date, amount, unit)
    }

    /// Complete units from `start` to `end`.
    ///
    /// # Errors
    /// Fails only for dates from an engine with a different year range.
    pub fn between(&self, start: &BadiDate, end: &BadiDate, unit: BadiUnit) -> Result<i64, ChronoError> {
        self.chronology.between(start, end, unit)
    }

    /// Reconstructs a date from partial fields; see [`ElementBag`].
    pub fn merge(&self, bag: &mut ElementBag, lenient: bool) -> Option<BadiDate> {
        self.chronology.create_from(bag, lenient)
    }

    /// Reads the canonical form, e.g. `Bahai-1-5-11-2-13` or
    /// `Bahai-1-5-11-Ayyam-i-Ha-2`.
    ///
    /// # Errors
    /// Returns `ChronoError::Parse` for malformed text and
    /// `ChronoError::OutOfRange` for fields that do not form a date.
    pub fn parse(&self, text: &str) -> Result<BadiDate, ChronoError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }
        let invalid = || ChronoError::from(ParseError::InvalidFormat(text.to_owned()));
        let rest = text
            .strip_prefix(BADI_PREFIX)
            .and_then(|rest| rest.strip_prefix(BADI_SEPARATOR))
            .ok_or_else(invalid)?;

        let intercalary = format!("{BADI_SEPARATOR}{AYYAM_I_HA_LABEL}{BADI_SEPARATOR}");
        let (head, division, day) = match rest.split_once(intercalary.as_str()) {
            Some((head, day)) => (head, 0, day),
            None => {
                let mut parts = rest.rsplitn(3, BADI_SEPARATOR);
                let day = parts.next().ok_or_else(invalid)?;
                let division = parse_field(parts.next().ok_or_else(invalid)?)?;
                let head = parts.next().ok_or_else(invalid)?;
                // Ayyam-i-Ha is only ever written by name
                if division == 0 {
                    return Err(invalid());
                }
                (head, division, day)
            },
        };

        let fields: Vec<&str> = head.split(BADI_SEPARATOR).collect();
        let [major, cycle, year] = fields.as_slice() else {
            return Err(invalid());
        };
        self.table.create(
            parse_field(major)?,
            parse_field(cycle)?,
            parse_field(year)?,
            division,
            parse_field(day)?,
        )
    }
}

fn parse_field(text: &str) -> Result<i32, ChronoError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidNumber(text.to_owned()).into());
    }
    i32::from_str(text).map_err(|_| ParseError::InvalidNumber(text.to_owned()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_YEAR_OF_ERA;
    use crate::solar::GeoLocation;
    use crate::test_utils::{badi, plain_date};
    use crate::types::Weekmodel;

    #[test]
    fn test_registered_elements_in_order() {
        let names: Vec<_> = badi()
            .chronology()
            .registered_elements()
            .map(ElementInfo::name)
            .collect();
        assert_eq!(
            names,
            [
                "ERA",
                "YEAR_OF_ERA",
                "KULL_I_SHAI",
                "VAHID",
                "YEAR_OF_VAHID",
                "MONTH_OF_YEAR",
                "AYYAM_I_HA",
                "DAY_OF_DIVISION",
                "DAY_OF_YEAR",
                "DAY_OF_WEEK"
            ]
        );
        assert!(badi().chronology().is_supported(BadiUnit::VahidCycles));
    }

    #[test]
    fn test_factories_validate() {
        let badi = badi();
        assert!(badi.of(5, 11, BadiMonth::Jalal, 13).is_ok());
        assert!(badi.of(20, 1, BadiMonth::Baha, 1).is_err());
        assert!(badi.of_intercalary(1, 4, 5).is_ok());
        assert!(badi.of_intercalary(5, 11, 5).is_err());
        assert!(badi.of_complete(3, 19, 19, BadiMonth::Ala, 19).is_ok());
        assert!(badi.of_complete(4, 1, 1, BadiMonth::Baha, 1).is_err());
        assert!(badi.is_valid(1, 1, 4, 0, 5));
        assert!(!badi.is_valid(1, 5, 11, 0, 5));
        assert!(!badi.is_valid(1, 5, 11, 20, 1));
    }

    #[test]
    fn test_leap_years() {
        let badi = badi();
        // 174 BE ran from 2017-03-20 to 2018-03-20
        assert!(badi.is_leap_year(1, 10, 3).expect("supported"));
        assert!(!badi.is_leap_year(1, 5, 11).expect("supported"));
        assert!(badi.is_leap_year(1, 20, 1).is_err());
        let date = badi.of(10, 3, BadiMonth::Ala, 19).expect("valid");
        assert_eq!(badi.day_of_year(&date), 366);
        assert_eq!(badi.length_of_year(&date), 366);
    }

    #[test]
    fn test_gregorian_conversion() {
        let badi = badi();
        struct TestCase {
            badi:        &'static str,
            gregorian:   PlainDate,
            description: &'static str,
        }

        let cases = [
            TestCase {
                badi:        "Bahai-1-1-1-1-1",
                gregorian:   plain_date(1844, 3, 21),
                description: "first day of the era",
            },
            TestCase {
                badi:        "Bahai-1-10-10-1-1",
                gregorian:   plain_date(2024, 3, 20),
                description: "Naw-Ruz 181",
            },
            TestCase {
                badi:        "Bahai-1-10-9-19-19",
                gregorian:   plain_date(2024, 3, 19),
                description: "last day of 180",
            },
            TestCase {
                badi:        "Bahai-1-10-10-Ayyam-i-Ha-1",
                gregorian:   plain_date(2025, 2, 25),
                description: "Ayyam-i-Ha of 181",
            },
            TestCase {
                badi:        "Bahai-1-10-11-Ayyam-i-Ha-5",
                gregorian:   plain_date(2026, 3, 1),
                description: "leap day of 182",
            },
            TestCase {
                badi:        "Bahai-1-10-12-1-1",
                gregorian:   plain_date(2026, 3, 21),
                description: "Naw-Ruz 183",
            },
        ];

        for case in &cases {
            let date = badi.parse(case.badi).expect(case.description);
            assert_eq!(badi.to_gregorian(&date).expect("in range"), case.gregorian, "{}", case.description);
            assert_eq!(badi.from_gregorian(&case.gregorian).expect("in range"), date, "{}", case.description);
        }
    }

    #[test]
    fn test_round_trip_sample() {
        let badi = badi();
        let min = badi.chronology().calendar_system().minimum_epoch_days();
        let max = badi.chronology().calendar_system().maximum_epoch_days();
        for epoch in (min..=max).step_by(97) {
            let date = badi.from_epoch_days(epoch).expect("in range");
            assert_eq!(badi.to_epoch_days(&date).expect("valid"), epoch);
            let next = badi.plus(&date, 1, BadiUnit::Days);
            if epoch < max {
                assert_eq!(badi.to_epoch_days(&next.expect("in range")).expect("valid"), epoch + 1);
            }
        }
    }

    #[test]
    fn test_every_day_of_a_leap_year() {
        let badi = badi();
        let first = badi.of(10, 3, BadiMonth::Baha, 1).expect("valid");
        let start = badi.to_epoch_days(&first).expect("valid");
        for offset in 0..366 {
            let date = badi.from_epoch_days(start + offset).expect("in range");
            assert_eq!(date.year_of_era(), first.year_of_era());
            assert_eq!(i64::from(badi.day_of_year(&date)), offset + 1);
            assert_eq!(badi.parse(&date.to_string()).expect("canonical form"), date);
        }
    }

    #[test]
    fn test_years_between_after_adding() {
        let badi = badi();
        let start = badi.of_intercalary(10, 4, 3).expect("valid");
        for years in [1, 5, 19, 100] {
            let end = badi.plus(&start, years, BadiUnit::Years).expect("in range");
            assert_eq!(badi.between(&start, &end, BadiUnit::Years).expect("comparable"), years);
            assert_eq!(badi.between(&end, &start, BadiUnit::Years).expect("comparable"), -years);
        }
    }

    #[test]
    fn test_with_elements() {
        let badi = badi();
        let leap_day = badi.of_intercalary(1, 4, 5).expect("valid");
        let moved = badi.with(&leap_day, &YEAR_OF_VAHID, 5).expect("valid year");
        assert_eq!(moved.to_string(), "Bahai-1-1-5-Ayyam-i-Ha-4");

        let date = badi.of(5, 11, BadiMonth::Jalal, 13).expect("valid");
        assert_eq!(badi.get(&date, &MONTH_OF_YEAR).expect("has month"), BadiMonth::Jalal);
        assert_eq!(badi.get(&date, &YEAR_OF_ERA).expect("always"), 87);
        assert_eq!(badi.get(&date, &ERA).expect("always"), BadiEra::Bahai);
        assert!(matches!(badi.get(&leap_day, &MONTH_OF_YEAR), Err(ChronoError::NoMonth(_))));
        assert!(badi.with(&date, &DAY_OF_DIVISION, 20).is_err());
    }

    #[test]
    fn test_lenient_day_of_division_carries() {
        let badi = badi();
        let date = badi.of(5, 11, BadiMonth::Jalal, 13).expect("valid");
        let carried = badi
            .chronology()
            .with_lenient(&date, &DAY_OF_DIVISION, 20)
            .expect("carries");
        assert_eq!(carried.to_string(), "Bahai-1-5-11-3-1");
    }

    #[test]
    fn test_floor_and_ceiling() {
        let badi = badi();
        let chrono = badi.chronology();
        let date = badi.of(5, 11, BadiMonth::Jalal, 13).expect("valid");
        let last = chrono.at_ceiling(&date, YEAR_OF_VAHID.info()).expect("registered");
        assert_eq!(last.to_string(), "Bahai-1-5-11-19-19");
        assert_eq!(badi.day_of_year(&last), badi.length_of_year(&last));
        let first = chrono.at_floor(&date, VAHID.info()).expect("registered");
        assert_eq!(first.to_string(), "Bahai-1-5-1-1-1");
        let first_of_era = chrono.at_floor(&date, ERA.info()).expect("registered");
        assert_eq!(first_of_era.to_string(), "Bahai-1-1-1-1-1");
    }

    #[test]
    fn test_contains() {
        let badi = badi();
        let date = badi.of(5, 11, BadiMonth::Jalal, 13).expect("valid");
        let ayyam = badi.of_intercalary(5, 11, 2).expect("valid");
        assert!(badi.contains(&date, MONTH_OF_YEAR.info()));
        assert!(!badi.contains(&date, AYYAM_I_HA.info()));
        assert!(!badi.contains(&ayyam, MONTH_OF_YEAR.info()));
        assert!(badi.contains(&ayyam, AYYAM_I_HA.info()));
        assert!(badi.contains(&ayyam, DAY_OF_YEAR.info()));
        assert!(!badi.contains(&ayyam, crate::gregorian::DAY_OF_MONTH.info()));
    }

    #[test]
    fn test_merge_through_engine() {
        let badi = badi();
        let mut bag = ElementBag::new()
            .with(&KULL_I_SHAI, 1)
            .with(&VAHID, 5)
            .with(&YEAR_OF_VAHID, 11)
            .with(&AYYAM_I_HA, BadiIntercalaryDays::AyyamIHa)
            .with(&DAY_OF_DIVISION, 5);
        assert_eq!(badi.merge(&mut bag, false), None);
        assert!(bag.has_failure());
    }

    #[test]
    fn test_parse_errors() {
        let badi = badi();
        assert!(matches!(badi.parse(""), Err(ChronoError::Parse(ParseError::EmptyInput))));
        assert!(matches!(badi.parse("Bahai-1-5-11-2"), Err(ChronoError::Parse(_))));
        assert!(matches!(badi.parse("1-5-11-2-13"), Err(ChronoError::Parse(_))));
        assert!(matches!(badi.parse("Bahai-1-5-x-2-13"), Err(ChronoError::Parse(ParseError::InvalidNumber(_)))));
        assert!(matches!(badi.parse("Bahai-1-5-11-2--13"), Err(ChronoError::Parse(_))));
        assert!(matches!(badi.parse("Bahai-1-5-11-Ayyam-i-Ha-5"), Err(ChronoError::OutOfRange { .. })));
        assert!(matches!(badi.parse("Bahai-1-5-11-0-2"), Err(ChronoError::Parse(ParseError::InvalidFormat(_)))));
        assert!(matches!(badi.parse("Bahai-1-5-11-00-2"), Err(ChronoError::Parse(ParseError::InvalidFormat(_)))));
        assert_eq!(
            badi.parse(" Bahai-1-5-11-Ayyam-i-Ha-4 ").expect("valid").to_string(),
            "Bahai-1-5-11-Ayyam-i-Ha-4"
        );
    }

    #[test]
    fn test_weekday_and_weekend() {
        let badi = badi();
        let naw_ruz = badi.of(10, 10, BadiMonth::Baha, 1).expect("valid");
        assert_eq!(badi.day_of_week(&naw_ruz).expect("in range"), Weekday::Wednesday);
        assert!(!badi.is_weekend(&naw_ruz).expect("in range"));
        let saturday = badi.plus(&naw_ruz, 3, BadiUnit::Days).expect("in range");
        assert!(badi.is_weekend(&saturday).expect("in range"));
        assert_eq!(badi.config().weekmodel, Weekmodel::BADI);
    }

    #[test]
    fn test_day_starts_at_sunset() {
        let badi = badi();
        // 2024-03-19, the last day of 180
        let civil_day = plain_date(2024, 3, 19).to_epoch_days();
        let noon_tehran = civil_day * SECONDS_PER_DAY + 12 * 3600 - 12_600;
        let before = badi.at_instant(noon_tehran).expect("in range");
        assert_eq!(before.to_string(), "Bahai-1-10-9-19-19");

        let evening_tehran = civil_day * SECONDS_PER_DAY + 21 * 3600 - 12_600;
        let after = badi.at_instant(evening_tehran).expect("in range");
        assert_eq!(after.to_string(), "Bahai-1-10-10-1-1");
    }

    #[test]
    fn test_range_and_eras() {
        let badi = badi();
        let min = badi.chronology().minimum().expect("consistent");
        let max = badi.chronology().maximum().expect("consistent");
        assert_eq!(min.year_of_era(), 1);
        assert_eq!(max.year_of_era(), MAX_YEAR_OF_ERA);
        let eras = badi.chronology().eras();
        assert_eq!(eras.len(), 1);
        assert_eq!(eras[0].name, "BE");
        assert!(badi.today().is_ok());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = BadiConfig {
            utc_offset_seconds: 20 * 3600,
            ..BadiConfig::default()
        };
        assert!(matches!(BadiCalendar::new(config), Err(ChronoError::InvalidConfig(_))));
    }

    /// Every year starts on March 21 at noon, with sunset at 18:00 UTC.
    struct FixedSolar;

    impl SolarCalculator for FixedSolar {
        fn march_equinox(&self, year: i32) -> f64 {
            let day = crate::gregorian::date::epoch_days_of(year, 3, 21);
            (day * SECONDS_PER_DAY + 12 * 3600) as f64
        }

        fn sunset(&self, epoch_day: i64, _location: &GeoLocation) -> Option<f64> {
            Some((epoch_day * SECONDS_PER_DAY + 18 * 3600) as f64)
        }
    }

    #[test]
    fn test_custom_solar_calculator() {
        let config = BadiConfig {
            utc_offset_seconds:  0,
            published_new_years: false,
            ..BadiConfig::default()
        };
        let badi = BadiCalendar::with_solar_calculator(config, Arc::new(FixedSolar)).expect("consistent");
        let naw_ruz = badi.of(10, 10, BadiMonth::Baha, 1).expect("valid");
        assert_eq!(badi.to_gregorian(&naw_ruz).expect("in range"), plain_date(2024, 3, 21));
        assert!(badi.is_leap_year(1, 10, 9).expect("supported"));
    }
}
