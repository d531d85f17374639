use std::sync::Arc;

use crate::bahai::date::{BadiDate, BadiMonth};
use crate::bahai::elements::{
    AYYAM_I_HA, DAY_OF_DIVISION, DAY_OF_YEAR, ERA, KULL_I_SHAI, MONTH_OF_YEAR, VAHID, YEAR_OF_ERA, YEAR_OF_VAHID,
};
use crate::bahai::transform::{NawRuzTable, split_year_of_era};
use crate::consts::{BADI_CYCLE, MAX_KULL_I_SHAI, MAX_YEAR_OF_ERA};
use crate::element::ElementInfo;
use crate::merger::{ChronoMerger, ElementBag, MergeStrategy, resolve_first};

const INVALID_DATE: &str = "Invalid Badi date.";

/// The year all paths share, resolved before the day is looked at.
pub(crate) struct MergeContext<'a> {
    major: i32,
    cycle: i32,
    year:  i32,
    table: &'a NawRuzTable,
}

impl MergeContext<'_> {
    fn create(&self, division: i32, day: i64) -> Result<BadiDate, String> {
        let day = i32::try_from(day).map_err(|_| INVALID_DATE.to_owned())?;
        self.table
            .create(self.major, self.cycle, self.year, division, day)
            .map_err(|_| INVALID_DATE.to_owned())
    }
}

/// Month and day of month.
struct MonthDay([&'static ElementInfo; 1]);

impl MergeStrategy<MergeContext<'_>, BadiDate> for MonthDay {
    fn name(&self) -> &'static str {
        "month-day"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, context: &MergeContext<'_>) -> Result<BadiDate, String> {
        let month = bag
            .get(&MONTH_OF_YEAR)
            .map(BadiMonth::value)
            .ok_or_else(|| INVALID_DATE.to_owned())?;
        let day = bag.get_raw(DAY_OF_DIVISION.info()).ok_or_else(|| INVALID_DATE.to_owned())?;
        context.create(month, day)
    }
}

/// Day of Ayyam-i-Ha.
struct IntercalaryDay([&'static ElementInfo; 1]);

impl MergeStrategy<MergeContext<'_>, BadiDate> for IntercalaryDay {
    fn name(&self) -> &'static str {
        "ayyam-i-ha"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, context: &MergeContext<'_>) -> Result<BadiDate, String> {
        let day = bag.get_raw(DAY_OF_DIVISION.info()).ok_or_else(|| INVALID_DATE.to_owned())?;
        context.create(0, day)
    }
}

/// Day of year.
struct OrdinalDay([&'static ElementInfo; 1]);

impl MergeStrategy<MergeContext<'_>, BadiDate> for OrdinalDay {
    fn name(&self) -> &'static str {
        "day-of-year"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, context: &MergeContext<'_>) -> Result<BadiDate, String> {
        let day_of_year = bag.get_raw(DAY_OF_YEAR.info()).ok_or_else(|| INVALID_DATE.to_owned())?;
        let day_of_year = i32::try_from(day_of_year).map_err(|_| INVALID_DATE.to_owned())?;
        let first = context.create(1, 1)?;
        context
            .table
            .with_day_of_year(&first, day_of_year)
            .map_err(|_| INVALID_DATE.to_owned())
    }
}

/// Era and year of era alone: the first day of that year.
struct YearStart([&'static ElementInfo; 2]);

impl MergeStrategy<MergeContext<'_>, BadiDate> for YearStart {
    fn name(&self) -> &'static str {
        "year-of-era"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, _bag: &ElementBag, context: &MergeContext<'_>) -> Result<BadiDate, String> {
        context.create(1, 1)
    }
}

/// Builds Badi dates from month, intercalary or ordinal days, in that order,
/// or the first day of a year given as year of era.
pub(crate) struct BadiMerger {
    table: Arc<NawRuzTable>,
}

impl BadiMerger {
    pub(crate) const fn new(table: Arc<NawRuzTable>) -> Self {
        Self { table }
    }

    /// Major cycle, vahid and year of vahid.
    fn resolve_year(bag: &ElementBag, lenient: bool) -> Result<(i32, i32, i32), String> {
        let cycle_of = |value: i64, what: &str| {
            i32::try_from(value)
                .ok()
                .filter(|v| (1..=BADI_CYCLE).contains(v))
                .ok_or_else(|| format!("{what} out of range: {value}"))
        };

        let Some(year) = bag.get_raw(YEAR_OF_VAHID.info()) else {
            if bag.contains(VAHID.info()) {
                return Err("Missing year-of-vahid.".to_owned());
            }
            return match (bag.get(&ERA), bag.get_raw(YEAR_OF_ERA.info())) {
                (Some(_), Some(year_of_era)) => {
                    let year_of_era = i32::try_from(year_of_era)
                        .ok()
                        .filter(|y| (1..=MAX_YEAR_OF_ERA).contains(y))
                        .ok_or_else(|| format!("Year of era out of range: {year_of_era}"))?;
                    Ok(split_year_of_era(year_of_era))
                },
                _ => Err("Missing vahid cycle.".to_owned()),
            };
        };

        let major = match bag.get_raw(KULL_I_SHAI.info()) {
            Some(major) => i32::try_from(major)
                .ok()
                .filter(|m| (1..=MAX_KULL_I_SHAI).contains(m))
                .ok_or_else(|| format!("Major cycle out of range: {major}"))?,
            None if lenient => 1,
            None => return Err("Missing major cycle.".to_owned()),
        };
        let cycle = bag
            .get_raw(VAHID.info())
            .ok_or_else(|| "Missing vahid cycle.".to_owned())?;
        let cycle = cycle_of(cycle, "Vahid cycle")?;
        let year = cycle_of(year, "Year of vahid")?;
        Ok((major, cycle, year))
    }
}

impl ChronoMerger<BadiDate> for BadiMerger {
    fn create_from(&self, bag: &mut ElementBag, lenient: bool) -> Option<BadiDate> {
        let (major, cycle, year) = match Self::resolve_year(bag, lenient) {
            Ok(year) => year,
            Err(message) => {
                bag.record_failure(message);
                return None;
            },
        };

        let month = MonthDay([MONTH_OF_YEAR.info()]);
        let intercalary = IntercalaryDay([AYYAM_I_HA.info()]);
        let ordinal = OrdinalDay([DAY_OF_YEAR.info()]);
        let year_start = YearStart([ERA.info(), YEAR_OF_ERA.info()]);
        let strategies: [&dyn MergeStrategy<MergeContext<'_>, BadiDate>; 4] =
            [&month, &intercalary, &ordinal, &year_start];

        let context = MergeContext {
            major,
            cycle,
            year,
            table: &self.table,
        };
        resolve_first(&strategies, bag, &context)
    }
}
