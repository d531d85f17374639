use crate::consts::MIN_DAY;
use crate::element::ElementInfo;
use crate::gregorian::{DAY_OF_MONTH, DAY_OF_WEEK, DAY_OF_YEAR, MONTH_OF_YEAR, PlainDate, WEEK_OF_YEAR, YEAR};
use crate::merger::{ChronoMerger, ElementBag, MergeStrategy, resolve_first};
use crate::types::{Weekday, Weekmodel};
use crate::week_year::{YEAR_OF_WEEKDATE, of_week_date};

pub(crate) struct MergeContext {
    model:   Weekmodel,
    lenient: bool,
}

fn required(bag: &ElementBag, element: &ElementInfo) -> Result<i64, String> {
    bag.get_raw(element)
        .ok_or_else(|| format!("missing {element}"))
}

fn small(value: i64, element: &ElementInfo) -> Result<i32, String> {
    i32::try_from(value).map_err(|_| format!("{element} out of range: {value}"))
}

/// Year, month and day of month. Lenient merging carries surplus days into
/// the following months.
struct YearMonthDay([&'static ElementInfo; 3]);

impl MergeStrategy<MergeContext, PlainDate> for YearMonthDay {
    fn name(&self) -> &'static str {
        "year-month-day"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, context: &MergeContext) -> Result<PlainDate, String> {
        let year = small(required(bag, YEAR.info())?, YEAR.info())?;
        let month = required(bag, MONTH_OF_YEAR.info())?;
        let month = u8::try_from(month).map_err(|_| format!("{MONTH_OF_YEAR} out of range: {month}"))?;
        let day = required(bag, DAY_OF_MONTH.info())?;

        if context.lenient {
            let first = PlainDate::new(year, month, MIN_DAY).map_err(|e| e.to_string())?;
            return first.plus_days(day - 1).map_err(|e| e.to_string());
        }
        let day = u8::try_from(day).map_err(|_| format!("{DAY_OF_MONTH} out of range: {day}"))?;
        PlainDate::new(year, month, day).map_err(|e| e.to_string())
    }
}

/// Year and day of year.
struct OrdinalDate([&'static ElementInfo; 2]);

impl MergeStrategy<MergeContext, PlainDate> for OrdinalDate {
    fn name(&self) -> &'static str {
        "ordinal"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, _context: &MergeContext) -> Result<PlainDate, String> {
        let year = small(required(bag, YEAR.info())?, YEAR.info())?;
        let day_of_year = small(required(bag, DAY_OF_YEAR.info())?, DAY_OF_YEAR.info())?;
        PlainDate::of_year_day(year, day_of_year).map_err(|e| e.to_string())
    }
}

/// Week-based year, week of year and weekday.
struct WeekDate([&'static ElementInfo; 3]);

impl MergeStrategy<MergeContext, PlainDate> for WeekDate {
    fn name(&self) -> &'static str {
        "week-date"
    }

    fn required(&self) -> &[&'static ElementInfo] {
        &self.0
    }

    fn build(&self, bag: &ElementBag, context: &MergeContext) -> Result<PlainDate, String> {
        let year = small(required(bag, YEAR_OF_WEEKDATE.info())?, YEAR_OF_WEEKDATE.info())?;
        let week = small(required(bag, WEEK_OF_YEAR.info())?, WEEK_OF_YEAR.info())?;
        let weekday = required(bag, DAY_OF_WEEK.info())?;
        let weekday = Weekday::from_value(weekday).ok_or_else(|| format!("{DAY_OF_WEEK} out of range: {weekday}"))?;
        of_week_date(year, week, weekday, &context.model).map_err(|e| e.to_string())
    }
}

/// Builds Gregorian dates from calendar, ordinal or week dates, in that order.
pub(crate) struct GregorianMerger {
    model: Weekmodel,
}

impl GregorianMerger {
    pub(crate) const fn new(model: Weekmodel) -> Self {
        Self { model }
    }
}

impl ChronoMerger<PlainDate> for GregorianMerger {
    fn create_from(&self, bag: &mut ElementBag, lenient: bool) -> Option<PlainDate> {
        let calendar = YearMonthDay([YEAR.info(), MONTH_OF_YEAR.info(), DAY_OF_MONTH.info()]);
        let ordinal = OrdinalDate([YEAR.info(), DAY_OF_YEAR.info()]);
        let week = WeekDate([YEAR_OF_WEEKDATE.info(), WEEK_OF_YEAR.info(), DAY_OF_WEEK.info()]);
        let strategies: [&dyn MergeStrategy<MergeContext, PlainDate>; 3] = [&calendar, &ordinal, &week];

        let context = MergeContext {
            model: self.model,
            lenient,
        };
        resolve_first(&strategies, bag, &context)
    }
}
