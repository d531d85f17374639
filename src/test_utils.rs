//! Shared fixtures for unit tests.

use crate::bahai::{BadiCalendar, NawRuzTable};
use crate::config::BadiConfig;
use crate::gregorian::PlainDate;
use crate::solar::StdSolarCalculator;

pub fn plain_date(year: i32, month: u8, day: u8) -> PlainDate {
    PlainDate::new(year, month, day).expect("valid test date")
}

/// Engine with the default Tehran configuration.
pub fn badi() -> BadiCalendar {
    BadiCalendar::new(BadiConfig::default()).expect("default config is consistent")
}

/// New-year table of the default configuration.
pub fn badi_table() -> NawRuzTable {
    NawRuzTable::compute(&BadiConfig::default(), &StdSolarCalculator).expect("default config is consistent")
}
