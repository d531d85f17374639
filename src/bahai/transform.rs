//! Naw-Ruz table and the day count of the Badi calendar.
//!
//! The start of every supported Badi year is computed once when an engine is
//! created. All leap-year questions and epoch-day conversions are answered
//! from that table.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::bahai::date::{BadiDate, year_of_era};
use crate::calsys::{CalendarEra, CalendarSystem};
use crate::config::BadiConfig;
use crate::consts::{
    AYYAM_I_HA_DAYS, AYYAM_I_HA_DAYS_LEAP, BADI_CYCLE, BADI_EPOCH_OFFSET, LAST_DAY_BEFORE_AYYAM_I_HA, MARCH,
    MAX_KULL_I_SHAI, MAX_YEAR_OF_ERA, SECONDS_PER_DAY, YEARS_PER_KULL_I_SHAI,
};
use crate::error::{ChronoError, narrow};
use crate::gregorian::date::epoch_days_of;
use crate::solar::SolarCalculator;

const COMMON_YEAR_DAYS: i64 = 365;
const LEAP_YEAR_DAYS: i64 = 366;

/// Gregorian year of the first entry in [`PUBLISHED_NAW_RUZ`].
const FIRST_PUBLISHED_YEAR: i32 = 2015;

/// Day of March of Naw-Ruz as published by the Universal House of Justice
/// for 172 to 221 BE.
///
/// The equinox of 2026 and 2059 falls within two minutes of sunset in
/// Tehran, closer than the solar model can decide.
const PUBLISHED_NAW_RUZ: [u8; 50] = [
    21, 20, 20, 21, 21, 20, 20, 21, 21, 20, // 2015
    20, 21, 21, 20, 20, 20, 21, 20, 20, 20, // 2025
    21, 20, 20, 20, 21, 20, 20, 20, 21, 20, // 2035
    20, 20, 21, 20, 20, 20, 21, 20, 20, 20, // 2045
    21, 20, 20, 20, 21, 20, 20, 20, 20, 20, // 2055
];

/// Epoch day of Naw-Ruz for every supported year, plus the start of the year
/// after the last one.
#[derive(Debug)]
pub(crate) struct NawRuzTable {
    starts: Vec<i64>,
}

impl NawRuzTable {
    /// Computes the table for years 1 to `MAX_YEAR_OF_ERA`.
    ///
    /// Before the switch date the new year is the fixed civil day. From then on
    /// it is the published date where one exists, otherwise the day (ending at
    /// sunset at the configured location) in which the March equinox falls.
    ///
    /// # Errors
    /// Returns `ChronoError::InvalidConfig` if the settings produce a year that
    /// is not 365 or 366 days long.
    #[tracing::instrument(skip_all, fields(switch_date = %config.switch_date))]
    pub(crate) fn compute(config: &BadiConfig, solar: &dyn SolarCalculator) -> Result<Self, ChronoError> {
        let switch = config.switch_date.to_epoch_days();
        let (month, day) = config.civil_new_year;
        let mut starts: Vec<i64> = Vec::with_capacity(MAX_YEAR_OF_ERA as usize + 1);

        for year in 1..=MAX_YEAR_OF_ERA + 1 {
            let gregorian = BADI_EPOCH_OFFSET + year;
            let civil = epoch_days_of(gregorian, month, day);
            let start = if civil < switch {
                civil
            } else {
                published_new_year(gregorian)
                    .filter(|_| config.published_new_years)
                    .unwrap_or_else(|| astronomical_new_year(gregorian, config, solar))
            };
            trace!(year, gregorian, start, "naw-ruz");

            if let Some(&previous) = starts.last() {
                let length = start - previous;
                if !(COMMON_YEAR_DAYS..=LEAP_YEAR_DAYS).contains(&length) {
                    return Err(ChronoError::InvalidConfig(format!(
                        "Badi year {} would have {length} days",
                        year - 1
                    )));
                }
            }
            starts.push(start);
        }

        debug!(years = MAX_YEAR_OF_ERA, "naw-ruz table computed");
        Ok(Self { starts })
    }

    /// Start and end (exclusive) of a year of era.
    fn bounds(&self, year_of_era: i32) -> Option<(i64, i64)> {
        let index = usize::try_from(year_of_era).ok()?.checked_sub(1)?;
        Some((*self.starts.get(index)?, *self.starts.get(index + 1)?))
    }

    /// Epoch day of Naw-Ruz of a year of era.
    pub(crate) fn start_of(&self, year_of_era: i32) -> Option<i64> {
        self.bounds(year_of_era).map(|(start, _)| start)
    }

    pub(crate) fn is_leap(&self, year_of_era: i32) -> bool {
        self.bounds(year_of_era)
            .is_some_and(|(start, end)| end - start == LEAP_YEAR_DAYS)
    }

    /// Days of Ayyam-i-Ha in a year of era.
    pub(crate) fn ayyam_i_ha_length(&self, year_of_era: i32) -> i32 {
        if self.is_leap(year_of_era) {
            AYYAM_I_HA_DAYS_LEAP
        } else {
            AYYAM_I_HA_DAYS
        }
    }

    pub(crate) fn length_of_year(&self, year_of_era: i32) -> i32 {
        LAST_DAY_BEFORE_AYYAM_I_HA + self.ayyam_i_ha_length(year_of_era) + BADI_CYCLE
    }

    pub(crate) fn ayyam_i_ha_length_of(&self, date: &BadiDate) -> i32 {
        self.ayyam_i_ha_length(date.year_of_era())
    }

    pub(crate) fn day_of_year(&self, date: &BadiDate) -> i32 {
        day_of_year(date.division_index(), date.day_of_division(), self.ayyam_i_ha_length_of(date))
    }

    /// Checks all five fields, reporting the first one out of range.
    ///
    /// # Errors
    /// Returns `ChronoError::OutOfRange` naming the offending element.
    pub(crate) fn create(
        &self,
        major: i32,
        cycle: i32,
        year: i32,
        division: i32,
        day: i32,
    ) -> Result<BadiDate, ChronoError> {
        check("KULL_I_SHAI", major, 1, MAX_KULL_I_SHAI)?;
        check("VAHID", cycle, 1, BADI_CYCLE)?;
        check("YEAR_OF_VAHID", year, 1, BADI_CYCLE)?;
        check("DIVISION", division, 0, BADI_CYCLE)?;
        let max_day = if division == 0 {
            self.ayyam_i_ha_length(year_of_era(major, cycle, year))
        } else {
            BADI_CYCLE
        };
        check("DAY_OF_DIVISION", day, 1, max_day)?;
        Ok(BadiDate::from_parts(major, cycle, year, division, day))
    }

    pub(crate) fn is_valid(&self, major: i32, cycle: i32, year: i32, division: i32, day: i32) -> bool {
        self.create(major, cycle, year, division, day).is_ok()
    }

    /// Moves a date into another year, keeping division and day. The fifth
    /// day of Ayyam-i-Ha becomes the fourth in a common year.
    pub(crate) fn with_year_of_era(&self, date: &BadiDate, target: i32) -> Result<BadiDate, ChronoError> {
        check("YEAR_OF_ERA", target, 1, MAX_YEAR_OF_ERA)?;
        let (major, cycle, year) = split_year_of_era(target);
        let day = if date.is_intercalary_day() {
            date.day_of_division().min(self.ayyam_i_ha_length(target))
        } else {
            date.day_of_division()
        };
        Ok(BadiDate::from_parts(major, cycle, year, date.division_index(), day))
    }

    /// Date of a day of year within the year of `date`.
    pub(crate) fn with_day_of_year(&self, date: &BadiDate, day_of_year: i32) -> Result<BadiDate, ChronoError> {
        let length = self.length_of_year(date.year_of_era());
        check("DAY_OF_YEAR", day_of_year, 1, length)?;
        let (division, day) = split_day_of_year(day_of_year, self.ayyam_i_ha_length_of(date));
        Ok(date.with_division(division, day))
    }

    pub(crate) fn to_epoch_days(&self, date: &BadiDate) -> Result<i64, ChronoError> {
        let start = self
            .start_of(date.year_of_era())
            .ok_or_else(|| ChronoError::InvalidDate(date.to_string()))?;
        Ok(start + i64::from(self.day_of_year(date)) - 1)
    }

    pub(crate) fn to_date(&self, epoch_days: i64) -> Result<BadiDate, ChronoError> {
        let (min, max) = (self.minimum_epoch_days(), self.maximum_epoch_days());
        if !(min..=max).contains(&epoch_days) {
            return Err(ChronoError::out_of_range("EPOCH_DAYS", epoch_days, min, max));
        }
        // number of years started on or before the day
        let year = self.starts.partition_point(|&start| start <= epoch_days);
        let year = narrow(year as i64)?;
        let start = self.starts[year as usize - 1];
        let (major, cycle, year_of_vahid) = split_year_of_era(year);
        let day_of_year = narrow(epoch_days - start + 1)?;
        let (division, day) = split_day_of_year(day_of_year, self.ayyam_i_ha_length(year));
        Ok(BadiDate::from_parts(major, cycle, year_of_vahid, division, day))
    }

    pub(crate) fn minimum_epoch_days(&self) -> i64 {
        self.starts[0]
    }

    pub(crate) fn maximum_epoch_days(&self) -> i64 {
        self.starts[MAX_YEAR_OF_ERA as usize] - 1
    }
}

fn check(element: &'static str, value: i32, min: i32, max: i32) -> Result<(), ChronoError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ChronoError::out_of_range(
            element,
            value.into(),
            min.into(),
            max.into(),
        ))
    }
}

fn published_new_year(gregorian: i32) -> Option<i64> {
    let index = usize::try_from(gregorian - FIRST_PUBLISHED_YEAR).ok()?;
    let day = *PUBLISHED_NAW_RUZ.get(index)?;
    Some(epoch_days_of(gregorian, MARCH, day))
}

fn astronomical_new_year(gregorian: i32, config: &BadiConfig, solar: &dyn SolarCalculator) -> i64 {
    let equinox = solar.march_equinox(gregorian);
    let local = equinox + f64::from(config.utc_offset_seconds);
    let day = (local / SECONDS_PER_DAY as f64).floor() as i64;
    match solar.sunset(day, &config.location) {
        Some(sunset) if equinox >= sunset => day + 1,
        _ => day,
    }
}

/// Splits a year of era (1-based) into major cycle, vahid and year of vahid.
pub(crate) const fn split_year_of_era(year_of_era: i32) -> (i32, i32, i32) {
    let elapsed = year_of_era - 1;
    let major = elapsed.div_euclid(YEARS_PER_KULL_I_SHAI) + 1;
    let rest = elapsed.rem_euclid(YEARS_PER_KULL_I_SHAI);
    (major, rest / BADI_CYCLE + 1, rest % BADI_CYCLE + 1)
}

pub(crate) const fn day_of_year(division: i32, day: i32, ayyam_i_ha_length: i32) -> i32 {
    match division {
        0 => LAST_DAY_BEFORE_AYYAM_I_HA + day,
        BADI_CYCLE => LAST_DAY_BEFORE_AYYAM_I_HA + ayyam_i_ha_length + day,
        month => (month - 1) * BADI_CYCLE + day,
    }
}

/// Inverse of [`day_of_year`]: (division, day of division).
pub(crate) const fn split_day_of_year(day_of_year: i32, ayyam_i_ha_length: i32) -> (i32, i32) {
    if day_of_year <= LAST_DAY_BEFORE_AYYAM_I_HA {
        (
            (day_of_year - 1) / BADI_CYCLE + 1,
            (day_of_year - 1) % BADI_CYCLE + 1,
        )
    } else if day_of_year <= LAST_DAY_BEFORE_AYYAM_I_HA + ayyam_i_ha_length {
        (0, day_of_year - LAST_DAY_BEFORE_AYYAM_I_HA)
    } else {
        (
            BADI_CYCLE,
            day_of_year - LAST_DAY_BEFORE_AYYAM_I_HA - ayyam_i_ha_length,
        )
    }
}

/// Day count of the Badi calendar backed by a shared [`NawRuzTable`].
#[derive(Debug, Clone)]
pub(crate) struct BadiSystem {
    table: Arc<NawRuzTable>,
}

impl BadiSystem {
    pub(crate) const fn new(table: Arc<NawRuzTable>) -> Self {
        Self { table }
    }
}

impl CalendarSystem<BadiDate> for BadiSystem {
    fn to_date(&self, epoch_days: i64) -> Result<BadiDate, ChronoError> {
        self.table.to_date(epoch_days)
    }

    fn to_epoch_days(&self, date: &BadiDate) -> Result<i64, ChronoError> {
        self.table.to_epoch_days(date)
    }

    fn minimum_epoch_days(&self) -> i64 {
        self.table.minimum_epoch_days()
    }

    fn maximum_epoch_days(&self) -> i64 {
        self.table.maximum_epoch_days()
    }

    fn eras(&self) -> Vec<CalendarEra> {
        vec![CalendarEra {
            name:  "BE",
            start: self.table.minimum_epoch_days(),
        }]
    }
}
