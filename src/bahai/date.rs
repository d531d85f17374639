use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{AYYAM_I_HA_LABEL, BADI_CYCLE, BADI_MONTHS_BEFORE_AYYAM_I_HA, BADI_PREFIX, BADI_SEPARATOR, YEARS_PER_KULL_I_SHAI};
use crate::element::ElementValue;
use crate::error::ChronoError;
use crate::prelude::*;

/// The nineteen months of the Badi year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
pub enum BadiMonth {
    Baha = 1,
    Jalal = 2,
    Jamal = 3,
    Azamat = 4,
    Nur = 5,
    Rahmat = 6,
    Kalimat = 7,
    Kamal = 8,
    Asma = 9,
    Izzat = 10,
    Mashiyyat = 11,
    Ilm = 12,
    Qudrat = 13,
    Qawl = 14,
    Masail = 15,
    Sharaf = 16,
    Sultan = 17,
    Mulk = 18,
    Ala = 19,
}

impl BadiMonth {
    const ALL: [Self; 19] = [
        Self::Baha,
        Self::Jalal,
        Self::Jamal,
        Self::Azamat,
        Self::Nur,
        Self::Rahmat,
        Self::Kalimat,
        Self::Kamal,
        Self::Asma,
        Self::Izzat,
        Self::Mashiyyat,
        Self::Ilm,
        Self::Qudrat,
        Self::Qawl,
        Self::Masail,
        Self::Sharaf,
        Self::Sultan,
        Self::Mulk,
        Self::Ala,
    ];

    /// Month number 1-19.
    #[inline]
    pub const fn value(self) -> i32 {
        self as i32
    }

    pub fn from_value(value: i64) -> Option<Self> {
        usize::try_from(value - 1).ok().and_then(|i| Self::ALL.get(i).copied())
    }

    /// Looks up a month by number.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` outside 1-19.
    pub fn of(value: i32) -> Result<Self, ChronoError> {
        Self::from_value(value.into())
            .ok_or_else(|| ChronoError::out_of_range("MONTH_OF_YEAR", value.into(), 1, BADI_CYCLE.into()))
    }
}

impl ElementValue for BadiMonth {
    fn to_raw(self) -> i64 {
        self.value().into()
    }

    fn from_raw(raw: i64) -> Option<Self> {
        Self::from_value(raw)
    }
}

/// Marker of the intercalary period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum BadiIntercalaryDays {
    #[display(fmt = "Ayyam-i-Ha")]
    AyyamIHa,
}

impl ElementValue for BadiIntercalaryDays {
    fn to_raw(self) -> i64 {
        0
    }

    fn from_raw(raw: i64) -> Option<Self> {
        (raw == 0).then_some(Self::AyyamIHa)
    }
}

/// The single era of the Badi calendar, counted from 1844.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum BadiEra {
    #[display(fmt = "BE")]
    Bahai,
}

impl ElementValue for BadiEra {
    fn to_raw(self) -> i64 {
        1
    }

    fn from_raw(raw: i64) -> Option<Self> {
        (raw == 1).then_some(Self::Bahai)
    }
}

/// Either a month or the intercalary period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BadiDivision {
    Month(BadiMonth),
    #[display(fmt = "Ayyam-i-Ha")]
    AyyamIHa,
}

impl BadiDivision {
    /// Division index: 0 for Ayyam-i-Ha, otherwise the month number.
    pub const fn index(self) -> i32 {
        match self {
            Self::Month(month) => month.value(),
            Self::AyyamIHa => 0,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        if index == 0 {
            Some(Self::AyyamIHa)
        } else {
            BadiMonth::from_value(index.into()).map(Self::Month)
        }
    }
}

impl From<BadiMonth> for BadiDivision {
    fn from(month: BadiMonth) -> Self {
        Self::Month(month)
    }
}

impl From<BadiIntercalaryDays> for BadiDivision {
    fn from(_: BadiIntercalaryDays) -> Self {
        Self::AyyamIHa
    }
}

/// A date of the Badi calendar.
///
/// Dates are created by [`BadiCalendar`](crate::BadiCalendar), which knows the
/// leap years; every value is valid. Equality and hashing are structural, the
/// ordering is chronological with Ayyam-i-Ha between months 18 and 19.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BadiDate {
    major:    i32,
    cycle:    i32,
    year:     i32,
    division: i32,
    day:      i32,
}

impl BadiDate {
    /// The caller has validated the fields.
    pub(crate) const fn from_parts(major: i32, cycle: i32, year: i32, division: i32, day: i32) -> Self {
        Self {
            major,
            cycle,
            year,
            division,
            day,
        }
    }

    #[must_use]
    pub(crate) const fn with_division(self, division: i32, day: i32) -> Self {
        Self::from_parts(self.major, self.cycle, self.year, division, day)
    }

    /// Major cycle of 361 years, 1-3.
    pub const fn kull_i_shai(&self) -> i32 {
        self.major
    }

    /// 19-year cycle, 1-19.
    pub const fn vahid(&self) -> i32 {
        self.cycle
    }

    /// Year within the vahid, 1-19.
    pub const fn year_of_vahid(&self) -> i32 {
        self.year
    }

    /// Proleptic year of the Bahai era.
    pub const fn year_of_era(&self) -> i32 {
        year_of_era(self.major, self.cycle, self.year)
    }

    /// # Errors
    /// Returns `ChronoError::NoMonth` on an intercalary day.
    pub fn month(&self) -> Result<BadiMonth, ChronoError> {
        BadiMonth::from_value(self.division.into()).ok_or_else(|| ChronoError::NoMonth(self.to_string()))
    }

    pub fn division(&self) -> BadiDivision {
        BadiDivision::from_index(self.division).unwrap_or(BadiDivision::AyyamIHa)
    }

    pub(crate) const fn division_index(&self) -> i32 {
        self.division
    }

    pub const fn day_of_division(&self) -> i32 {
        self.day
    }

    pub const fn is_intercalary_day(&self) -> bool {
        self.division == 0
    }

    pub const fn has_month(&self) -> bool {
        !self.is_intercalary_day()
    }

    /// Years elapsed since 1 BE.
    pub(crate) const fn elapsed_years(&self) -> i64 {
        (self.year_of_era() - 1) as i64
    }

    /// Months elapsed since 1 BE, counting Ayyam-i-Ha as part of month 18.
    pub(crate) const fn elapsed_months(&self) -> i64 {
        let month = if self.is_intercalary_day() {
            BADI_MONTHS_BEFORE_AYYAM_I_HA
        } else {
            self.division
        };
        BADI_CYCLE as i64 * self.elapsed_years() + (month - 1) as i64
    }

    /// Leap-independent position within the year: Ayyam-i-Ha ranks between
    /// months 18 and 19.
    pub(crate) const fn position_in_year(&self) -> (i32, i32) {
        let rank = if self.is_intercalary_day() {
            2 * BADI_MONTHS_BEFORE_AYYAM_I_HA + 1
        } else {
            2 * self.division
        };
        (rank, self.day)
    }
}

pub(crate) const fn year_of_era(major: i32, cycle: i32, year: i32) -> i32 {
    (major - 1) * YEARS_PER_KULL_I_SHAI + (cycle - 1) * BADI_CYCLE + year
}

impl PartialOrd for BadiDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BadiDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year_of_era()
            .cmp(&other.year_of_era())
            .then_with(|| self.position_in_year().cmp(&other.position_in_year()))
    }
}

impl fmt::Display for BadiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = BADI_SEPARATOR;
        write!(f, "{BADI_PREFIX}{sep}{}{sep}{}{sep}{}{sep}", self.major, self.cycle, self.year)?;
        if self.is_intercalary_day() {
            write!(f, "{AYYAM_I_HA_LABEL}{sep}{}", self.day)
        } else {
            write!(f, "{}{sep}{}", self.division, self.day)
        }
    }
}
