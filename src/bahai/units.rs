use std::sync::Arc;

use crate::bahai::date::BadiDate;
use crate::bahai::transform::{NawRuzTable, split_year_of_era};
use crate::consts::{BADI_CYCLE, DAYS_PER_WEEK, MAX_KULL_I_SHAI, MONTHS_PER_KULL_I_SHAI, SECONDS_PER_DAY, YEARS_PER_KULL_I_SHAI};
use crate::error::{ChronoError, narrow};
use crate::unit::{ChronoUnit, UnitRule, complete_units};

/// Mean tropical year in days.
const MEAN_YEAR_DAYS: f64 = 365.2424;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadiUnit {
    /// Cycles of 19 years.
    VahidCycles,
    Years,
    /// Months of 19 days; Ayyam-i-Ha counts as part of the 18th month.
    Months,
    Weeks,
    Days,
}

impl ChronoUnit for BadiUnit {
    fn length(&self) -> f64 {
        let day = SECONDS_PER_DAY as f64;
        let cycle = f64::from(BADI_CYCLE);
        match self {
            Self::VahidCycles => cycle * MEAN_YEAR_DAYS * day,
            Self::Years => MEAN_YEAR_DAYS * day,
            Self::Months => cycle * day,
            Self::Weeks => DAYS_PER_WEEK as f64 * day,
            Self::Days => day,
        }
    }

    fn is_calendrical(&self) -> bool {
        true
    }
}

/// Arithmetic of one [`BadiUnit`].
#[derive(Debug, Clone)]
pub(crate) struct BadiUnitRule {
    unit:  BadiUnit,
    table: Arc<NawRuzTable>,
}

impl BadiUnitRule {
    pub(crate) const fn new(unit: BadiUnit, table: Arc<NawRuzTable>) -> Self {
        Self { unit, table }
    }

    fn add_years(&self, date: &BadiDate, years: i64) -> Result<BadiDate, ChronoError> {
        let elapsed = date
            .elapsed_years()
            .checked_add(years)
            .ok_or_else(|| ChronoError::overflow(format!("{date} + {years} years")))?;
        check_major(elapsed.div_euclid(YEARS_PER_KULL_I_SHAI.into()) + 1)?;
        // the year table clamps the fifth intercalary day in common years
        self.table.with_year_of_era(date, narrow(elapsed + 1)?)
    }

    fn add_months(date: &BadiDate, months: i64) -> Result<BadiDate, ChronoError> {
        let elapsed = date
            .elapsed_months()
            .checked_add(months)
            .ok_or_else(|| ChronoError::overflow(format!("{date} + {months} months")))?;
        check_major(elapsed.div_euclid(MONTHS_PER_KULL_I_SHAI) + 1)?;
        let cycle = i64::from(BADI_CYCLE);
        let year_of_era = narrow(elapsed.div_euclid(cycle) + 1)?;
        let month = narrow(elapsed.rem_euclid(cycle) + 1)?;
        let (major, vahid, year) = split_year_of_era(year_of_era);
        // an intercalary day maps to the last day of the month
        let day = if date.is_intercalary_day() {
            BADI_CYCLE
        } else {
            date.day_of_division()
        };
        Ok(BadiDate::from_parts(major, vahid, year, month, day))
    }

    fn add_days(&self, date: &BadiDate, days: i64) -> Result<BadiDate, ChronoError> {
        let epoch_days = self
            .table
            .to_epoch_days(date)?
            .checked_add(days)
            .ok_or_else(|| ChronoError::overflow(format!("{date} + {days} days")))?;
        self.table.to_date(epoch_days)
    }

    /// Complete years from `start` to `end`.
    ///
    /// The anniversary of `start` in the year of `end` is placed the way
    /// [`Self::add_years`] places it, so the fifth day of Ayyam-i-Ha reaches
    /// its anniversary on the fourth day of a common year.
    ///
    /// Dates are compared by position in the year, not by day of year. Ala 1
    /// is day 348 of a leap year and day 347 of a common year, and one counts
    /// as the anniversary of the other.
    fn years_between(&self, start: &BadiDate, end: &BadiDate) -> Result<i64, ChronoError> {
        let delta = end.elapsed_years() - start.elapsed_years();
        let anniversary = self.table.with_year_of_era(start, end.year_of_era())?;
        Ok(complete_units(delta, end.position_in_year().cmp(&anniversary.position_in_year())))
    }

    /// Complete months from `start` to `end`, measured against the date that
    /// [`Self::add_months`] reaches in the month of `end`.
    fn months_between(start: &BadiDate, end: &BadiDate) -> Result<i64, ChronoError> {
        let delta = end.elapsed_months() - start.elapsed_months();
        let anniversary = Self::add_months(start, delta)?;
        // intercalary days sit after the 19 days of month 18
        let day_in_slot = |date: &BadiDate| {
            if date.is_intercalary_day() {
                date.day_of_division() + BADI_CYCLE
            } else {
                date.day_of_division()
            }
        };
        Ok(complete_units(delta, day_in_slot(end).cmp(&day_in_slot(&anniversary))))
    }

    fn days_between(&self, start: &BadiDate, end: &BadiDate) -> Result<i64, ChronoError> {
        Ok(self.table.to_epoch_days(end)? - self.table.to_epoch_days(start)?)
    }
}

fn check_major(major: i64) -> Result<(), ChronoError> {
    if (1..=i64::from(MAX_KULL_I_SHAI)).contains(&major) {
        Ok(())
    } else {
        Err(ChronoError::out_of_range(
            "KULL_I_SHAI",
            major,
            1,
            MAX_KULL_I_SHAI.into(),
        ))
    }
}

fn scaled(amount: i64, factor: i64) -> Result<i64, ChronoError> {
    amount
        .checked_mul(factor)
        .ok_or_else(|| ChronoError::overflow(format!("{amount} x {factor}")))
}

impl UnitRule<BadiDate> for BadiUnitRule {
    fn add_to(&self, date: &BadiDate, amount: i64) -> Result<BadiDate, ChronoError> {
        match self.unit {
            BadiUnit::VahidCycles => self.add_years(date, scaled(amount, BADI_CYCLE.into())?),
            BadiUnit::Years => self.add_years(date, amount),
            BadiUnit::Months => Self::add_months(date, amount),
            BadiUnit::Weeks => self.add_days(date, scaled(amount, DAYS_PER_WEEK)?),
            BadiUnit::Days => self.add_days(date, amount),
        }
    }

    fn between(&self, start: &BadiDate, end: &BadiDate) -> Result<i64, ChronoError> {
        Ok(match self.unit {
            BadiUnit::VahidCycles => self.years_between(start, end)? / i64::from(BADI_CYCLE),
            BadiUnit::Years => self.years_between(start, end)?,
            BadiUnit::Months => Self::months_between(start, end)?,
            BadiUnit::Weeks => self.days_between(start, end)? / DAYS_PER_WEEK,
            BadiUnit::Days => self.days_between(start, end)?,
        })
    }
}
