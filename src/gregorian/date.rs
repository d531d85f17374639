use std::str::FromStr;

use calendrical_calculations::gregorian::{fixed_from_gregorian, gregorian_from_fixed};
use calendrical_calculations::rata_die::RataDie;

use crate::consts::{DATE_SEPARATOR, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::error::{ChronoError, ParseError};
use crate::prelude::*;
use crate::types::{Weekday, days_in_month, is_leap_year, length_of_year};

/// 1970-01-01 as a fixed day count (day 1 is 0001-01-01).
const UNIX_EPOCH: RataDie = RataDie::new(719_163);

/// A validated proleptic Gregorian calendar date in the years 1-9999.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct PlainDate {
    year:  i32,
    month: u8,
    day:   u8,
}

impl PlainDate {
    /// 0001-01-01
    pub const MIN: Self = Self {
        year:  MIN_YEAR,
        month: JANUARY,
        day:   MIN_DAY,
    };
    /// 9999-12-31
    pub const MAX: Self = Self {
        year:  MAX_YEAR,
        month: MAX_MONTH,
        day:   31,
    };

    /// Constant construction; the caller guarantees a valid date.
    pub(crate) const fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// # Errors
    /// Returns `ChronoError::OutOfRange` for any component outside its bounds.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, ChronoError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ChronoError::out_of_range(
                "YEAR",
                year.into(),
                MIN_YEAR.into(),
                MAX_YEAR.into(),
            ));
        }
        if !(JANUARY..=MAX_MONTH).contains(&month) {
            return Err(ChronoError::out_of_range(
                "MONTH_OF_YEAR",
                month.into(),
                JANUARY.into(),
                MAX_MONTH.into(),
            ));
        }
        let max_day = days_in_month(year, month);
        if !(MIN_DAY..=max_day).contains(&day) {
            return Err(ChronoError::out_of_range(
                "DAY_OF_MONTH",
                day.into(),
                MIN_DAY.into(),
                max_day.into(),
            ));
        }
        Ok(Self { year, month, day })
    }

    /// Date from a year and a 1-based day of year.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` if the day of year exceeds the year length.
    pub fn of_year_day(year: i32, day_of_year: i32) -> Result<Self, ChronoError> {
        let first = Self::new(year, JANUARY, MIN_DAY)?;
        let max = length_of_year(year);
        if !(1..=max).contains(&day_of_year) {
            return Err(ChronoError::out_of_range(
                "DAY_OF_YEAR",
                day_of_year.into(),
                1,
                max.into(),
            ));
        }
        Self::from_epoch_days(first.to_epoch_days() + i64::from(day_of_year) - 1)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn is_leap_year(&self) -> bool {
        is_leap_year(self.year)
    }

    pub const fn length_of_month(&self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub const fn length_of_year(&self) -> i32 {
        length_of_year(self.year)
    }

    /// 1-based ordinal day within the year.
    pub fn day_of_year(&self) -> i32 {
        (self.to_epoch_days() - epoch_days_of(self.year, JANUARY, MIN_DAY)) as i32 + 1
    }

    pub fn weekday(&self) -> Weekday {
        Weekday::from_epoch_days(self.to_epoch_days())
    }

    /// Days since 1970-01-01.
    pub fn to_epoch_days(&self) -> i64 {
        epoch_days_of(self.year, self.month, self.day)
    }

    /// # Errors
    /// Returns `ChronoError::OutOfRange` outside 0001-01-01..=9999-12-31.
    pub fn from_epoch_days(epoch_days: i64) -> Result<Self, ChronoError> {
        let (min, max) = (Self::MIN.to_epoch_days(), Self::MAX.to_epoch_days());
        if !(min..=max).contains(&epoch_days) {
            return Err(ChronoError::out_of_range("EPOCH_DAYS", epoch_days, min, max));
        }
        let fixed = UNIX_EPOCH + epoch_days;
        let (year, month, day) =
            gregorian_from_fixed(fixed).map_err(|_| ChronoError::out_of_range("EPOCH_DAYS", epoch_days, min, max))?;
        Ok(Self { year, month, day })
    }

    /// Moves by a signed number of days.
    ///
    /// # Errors
    /// Fails if the result leaves the supported range.
    pub fn plus_days(&self, days: i64) -> Result<Self, ChronoError> {
        let target = self
            .to_epoch_days()
            .checked_add(days)
            .ok_or_else(|| ChronoError::overflow(format!("{self} + {days} days")))?;
        Self::from_epoch_days(target)
    }

    /// Same month and day in another year; February 29 becomes February 28
    /// in common years.
    ///
    /// # Errors
    /// Fails if the year is out of range.
    pub fn with_year_clamped(&self, year: i32) -> Result<Self, ChronoError> {
        let day = self.day.min(days_in_month(year, self.month));
        Self::new(year, self.month, day)
    }
}

/// Unix epoch days of a proleptic Gregorian date; defined for any year.
pub(crate) fn epoch_days_of(year: i32, month: u8, day: u8) -> i64 {
    fixed_from_gregorian(year, month, day) - UNIX_EPOCH
}

impl FromStr for PlainDate {
    type Err = ChronoError;

    /// Parses the ISO form `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput.into());
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        if parts.len() != 3 {
            return Err(ParseError::InvalidFormat(format!(
                "expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} {DATE_SEPARATOR} separators in {trimmed}",
                parts.len() - 1
            ))
            .into());
        }
        let year = parse_u16(parts[0])?;
        let month = parse_u8(parts[1])?;
        let day = parse_u8(parts[2])?;

        Self::new(year.into(), month, day)
    }
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidNumber(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>().map_err(|_| ParseError::InvalidNumber(s.to_owned()))
}

impl serde::Serialize for PlainDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for PlainDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_days_cases() {
        struct TestCase {
            date:        (i32, u8, u8),
            epoch_days:  i64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                date:        (1970, 1, 1),
                epoch_days:  0,
                description: "unix epoch",
            },
            TestCase {
                date:        (1969, 12, 31),
                epoch_days:  -1,
                description: "day before epoch",
            },
            TestCase {
                date:        (2000, 3, 1),
                epoch_days:  11_017,
                description: "after a 400-year leap day",
            },
            TestCase {
                date:        (1844, 3, 21),
                epoch_days:  -45_941,
                description: "first Badi new year",
            },
            TestCase {
                date:        (1, 1, 1),
                epoch_days:  -719_162,
                description: "minimum date",
            },
            TestCase {
                date:        (9999, 12, 31),
                epoch_days:  2_932_896,
                description: "maximum date",
            },
        ];

        for case in &cases {
            let (y, m, d) = case.date;
            let date = PlainDate::new(y, m, d).expect("valid date");
            assert_eq!(date.to_epoch_days(), case.epoch_days, "{}", case.description);
            assert_eq!(
                PlainDate::from_epoch_days(case.epoch_days).expect("in range"),
                date,
                "{}",
                case.description
            );
        }
    }

    #[test]
    fn test_from_epoch_days_out_of_range() {
        assert!(PlainDate::from_epoch_days(PlainDate::MIN.to_epoch_days() - 1).is_err());
        assert!(PlainDate::from_epoch_days(PlainDate::MAX.to_epoch_days() + 1).is_err());
    }

    #[test]
    fn test_day_of_year_and_weekday() {
        let date = PlainDate::new(2024, 3, 1).expect("valid date");
        assert_eq!(date.day_of_year(), 61);
        assert_eq!(date.weekday(), Weekday::Friday);
        assert_eq!(PlainDate::of_year_day(2024, 61).expect("valid"), date);
        assert!(PlainDate::of_year_day(2023, 366).is_err());
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            PlainDate::new(2023, 2, 29),
            Err(ChronoError::OutOfRange {
                element: "DAY_OF_MONTH",
                max: 28,
                ..
            })
        ));
        assert!(PlainDate::new(0, 1, 1).is_err());
        assert!(PlainDate::new(2023, 13, 1).is_err());
    }

    #[test]
    fn test_with_year_clamped() {
        let leap_day = PlainDate::new(2024, 2, 29).expect("valid date");
        assert_eq!(
            leap_day.with_year_clamped(2025).expect("valid"),
            PlainDate::new(2025, 2, 28).expect("valid date")
        );
    }

    #[test]
    fn test_parse_and_display() {
        let date: PlainDate = "2015-03-21".parse().expect("valid date");
        assert_eq!(date, PlainDate::new(2015, 3, 21).expect("valid date"));
        assert_eq!(date.to_string(), "2015-03-21");
        assert_eq!(
            PlainDate::new(33, 1, 5).expect("valid date").to_string(),
            "0033-01-05"
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<PlainDate>(), Err(ChronoError::Parse(ParseError::EmptyInput))));
        assert!(matches!(
            "2015-03".parse::<PlainDate>(),
            Err(ChronoError::Parse(ParseError::InvalidFormat(_)))
        ));
        assert!(matches!(
            "2015-xx-21".parse::<PlainDate>(),
            Err(ChronoError::Parse(ParseError::InvalidNumber(_)))
        ));
        assert!(matches!("2015-02-30".parse::<PlainDate>(), Err(ChronoError::OutOfRange { .. })));
    }

    #[test]
    fn test_serde_string_format() {
        let date = PlainDate::new(2015, 3, 21).expect("valid date");
        let json = serde_json::to_string(&date).expect("serialize");
        assert_eq!(json, "\"2015-03-21\"");
        let parsed: PlainDate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, date);
        assert!(serde_json::from_str::<PlainDate>("\"2015-02-30\"").is_err());
    }
}
