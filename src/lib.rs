//! A rule-driven calendar engine.
//!
//! Calendars are described by a [`Chronology`]: a closed set of elements
//! (calendar fields such as the day of month), each bound to an
//! [`ElementRule`], a set of units bound to a [`UnitRule`], a
//! [`CalendarSystem`] mapping dates to Unix epoch days and a
//! [`ChronoMerger`] that rebuilds dates from partial fields.
//!
//! Two calendars are provided:
//!
//! - [`BadiCalendar`], the Badi calendar of the Bahai faith, whose new year
//!   is fixed by the March equinox as seen from a configurable location.
//! - [`GregorianCalendar`], the proleptic Gregorian calendar with the
//!   week-based year of a configurable [`Weekmodel`].
//!
//! ```
//! use calendar_axis::{GregorianCalendar, GregorianUnit, PlainDate, YEAR_OF_WEEKDATE};
//!
//! let iso = GregorianCalendar::iso()?;
//! let date: PlainDate = "2021-01-01".parse()?;
//! assert_eq!(iso.chronology().get(&date, &YEAR_OF_WEEKDATE)?, 2020);
//!
//! let later = iso.chronology().plus(&date, 1, GregorianUnit::WeekBasedYears)?;
//! assert_eq!(later.to_string(), "2021-12-31");
//! # Ok::<(), calendar_axis::ChronoError>(())
//! ```
//!
//! The crate logs through `tracing` and never installs a subscriber.

mod bahai;
mod calsys;
mod chronology;
mod config;
mod consts;
mod element;
mod error;
mod gregorian;
mod merger;
mod prelude;
mod solar;
mod types;
mod unit;
mod week_year;

#[cfg(test)]
mod test_utils;

pub use bahai::{
    AYYAM_I_HA, BadiCalendar, BadiDate, BadiDivision, BadiEra, BadiIntercalaryDays, BadiMonth, BadiUnit,
    DAY_OF_DIVISION, KULL_I_SHAI, VAHID, YEAR_OF_ERA, YEAR_OF_VAHID,
};
pub use calsys::{CalendarEra, CalendarSystem};
pub use chronology::{Chronology, ChronologyBuilder};
pub use config::{BadiConfig, DEFAULT_SWITCH_DATE, TEHRAN_UTC_OFFSET_SECONDS};
pub use consts::*;
pub use element::{Element, ElementInfo, ElementRule, ElementValue, Granularity, ValueKind};
pub use error::{ChronoError, ParseError};
pub use gregorian::{
    DAY_OF_MONTH, GregorianCalendar, GregorianSystem, GregorianUnit, PlainDate, PlainTimestamp, WEEK_OF_YEAR, WallTime,
    YEAR,
};
pub use merger::{ChronoMerger, ElementBag, MergeStrategy, resolve_first};
pub use solar::{GeoLocation, SolarCalculator, StdSolarCalculator};
pub use types::{Weekday, Weekmodel, days_in_month, is_leap_year, length_of_year};
pub use unit::{ChronoUnit, UnitRule};
pub use week_year::{
    WeekBasedYearRule, WeekBasedYearUnitRule, WeekDated, YEAR_OF_WEEKDATE, of_week_date, week_date, weeks_in_year,
};

/// Elements whose names exist in both calendars.
pub mod elements {
    /// Badi elements.
    pub mod bahai {
        pub use crate::bahai::{
            AYYAM_I_HA, DAY_OF_DIVISION, DAY_OF_WEEK, DAY_OF_YEAR, ERA, KULL_I_SHAI, MONTH_OF_YEAR, VAHID,
            YEAR_OF_ERA, YEAR_OF_VAHID,
        };
    }

    /// Gregorian elements.
    pub mod gregorian {
        pub use crate::gregorian::{DAY_OF_MONTH, DAY_OF_WEEK, DAY_OF_YEAR, MONTH_OF_YEAR, WEEK_OF_YEAR, YEAR};
        pub use crate::week_year::YEAR_OF_WEEKDATE;
    }
}
