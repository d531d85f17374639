use crate::consts::{DAYS_PER_WEEK, MAX_MONTH, MAX_YEAR, MIN_YEAR};
use crate::element::{ElementInfo, ElementRule};
use crate::error::{ChronoError, narrow};
use crate::gregorian::{DAY_OF_MONTH, DAY_OF_WEEK, MONTH_OF_YEAR, PlainDate};
use crate::types::{Weekday, Weekmodel, days_in_month};
use crate::unit::{UnitRule, complete_units};
use crate::week_year::{of_week_date, week_date, weeks_in_year};

/// Plain calendar fields of a Gregorian date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Year,
    Month,
    DayOfMonth,
    DayOfYear,
}

impl Field {
    const fn name(self) -> &'static str {
        match self {
            Self::Year => "YEAR",
            Self::Month => "MONTH_OF_YEAR",
            Self::DayOfMonth => "DAY_OF_MONTH",
            Self::DayOfYear => "DAY_OF_YEAR",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldRule(pub(crate) Field);

impl ElementRule<PlainDate> for FieldRule {
    fn value(&self, context: &PlainDate) -> Result<i64, ChronoError> {
        Ok(match self.0 {
            Field::Year => context.year().into(),
            Field::Month => context.month().into(),
            Field::DayOfMonth => context.day().into(),
            Field::DayOfYear => context.day_of_year().into(),
        })
    }

    fn minimum(&self, _context: &PlainDate) -> i64 {
        1
    }

    fn maximum(&self, context: &PlainDate) -> i64 {
        match self.0 {
            Field::Year => MAX_YEAR.into(),
            Field::Month => MAX_MONTH.into(),
            Field::DayOfMonth => context.length_of_month().into(),
            Field::DayOfYear => context.length_of_year().into(),
        }
    }

    fn is_valid(&self, context: &PlainDate, value: i64) -> bool {
        (self.minimum(context)..=self.maximum(context)).contains(&value)
    }

    fn with_value(&self, context: &PlainDate, value: i64, _lenient: bool) -> Result<PlainDate, ChronoError> {
        if !self.is_valid(context, value) {
            return Err(ChronoError::out_of_range(
                self.0.name(),
                value,
                self.minimum(context),
                self.maximum(context),
            ));
        }
        let value = narrow(value)?;
        match self.0 {
            Field::Year => context.with_year_clamped(value),
            Field::Month => {
                let month = value as u8;
                let day = context.day().min(days_in_month(context.year(), month));
                PlainDate::new(context.year(), month, day)
            },
            Field::DayOfMonth => PlainDate::new(context.year(), context.month(), value as u8),
            Field::DayOfYear => PlainDate::of_year_day(context.year(), value),
        }
    }

    fn child_at_floor(&self, _context: &PlainDate) -> Option<&'static ElementInfo> {
        match self.0 {
            Field::Year => Some(MONTH_OF_YEAR.info()),
            Field::Month => Some(DAY_OF_MONTH.info()),
            Field::DayOfMonth | Field::DayOfYear => None,
        }
    }

    fn child_at_ceiling(&self, context: &PlainDate) -> Option<&'static ElementInfo> {
        self.child_at_floor(context)
    }
}

/// Day of week, moving the date within its week of the model.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeekdayRule {
    pub(crate) model: Weekmodel,
}

impl ElementRule<PlainDate> for WeekdayRule {
    fn value(&self, context: &PlainDate) -> Result<i64, ChronoError> {
        Ok(context.weekday().value().into())
    }

    fn minimum(&self, _context: &PlainDate) -> i64 {
        self.model.first_day_of_week().value().into()
    }

    fn maximum(&self, _context: &PlainDate) -> i64 {
        self.model.first_day_of_week().roll(DAYS_PER_WEEK - 1).value().into()
    }

    fn is_valid(&self, _context: &PlainDate, value: i64) -> bool {
        Weekday::from_value(value).is_some()
    }

    fn with_value(&self, context: &PlainDate, value: i64, _lenient: bool) -> Result<PlainDate, ChronoError> {
        let target = Weekday::from_value(value).ok_or_else(|| ChronoError::out_of_range(DAY_OF_WEEK.name(), value, 1, 7))?;
        let shift = target.value_in(&self.model) - context.weekday().value_in(&self.model);
        context.plus_days(shift.into())
    }

    fn child_at_floor(&self, _context: &PlainDate) -> Option<&'static ElementInfo> {
        None
    }

    fn child_at_ceiling(&self, _context: &PlainDate) -> Option<&'static ElementInfo> {
        None
    }
}

/// Week of the week-based year.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WeekOfYearRule {
    pub(crate) model: Weekmodel,
}

impl ElementRule<PlainDate> for WeekOfYearRule {
    fn value(&self, context: &PlainDate) -> Result<i64, ChronoError> {
        Ok(week_date(context, &self.model).1.into())
    }

    fn minimum(&self, _context: &PlainDate) -> i64 {
        1
    }

    fn maximum(&self, context: &PlainDate) -> i64 {
        let (year, _) = week_date(context, &self.model);
        weeks_in_year(year, &self.model).into()
    }

    fn is_valid(&self, context: &PlainDate, value: i64) -> bool {
        (self.minimum(context)..=self.maximum(context)).contains(&value)
    }

    fn with_value(&self, context: &PlainDate, value: i64, _lenient: bool) -> Result<PlainDate, ChronoError> {
        let (year, _) = week_date(context, &self.model);
        of_week_date(year, narrow(value)?, context.weekday(), &self.model)
    }

    fn child_at_floor(&self, _context: &PlainDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_WEEK.info())
    }

    fn child_at_ceiling(&self, _context: &PlainDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_WEEK.info())
    }
}

/// Month-based arithmetic; years are twelve months.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MonthArithmetic {
    pub(crate) months_per_unit: i64,
}

impl MonthArithmetic {
    fn month_index(date: &PlainDate) -> i64 {
        i64::from(date.year()) * 12 + i64::from(date.month()) - 1
    }
}

impl UnitRule<PlainDate> for MonthArithmetic {
    fn add_to(&self, date: &PlainDate, amount: i64) -> Result<PlainDate, ChronoError> {
        let index = amount
            .checked_mul(self.months_per_unit)
            .and_then(|months| months.checked_add(Self::month_index(date)))
            .ok_or_else(|| ChronoError::overflow(format!("{date} + {amount} x {} months", self.months_per_unit)))?;
        let year = index.div_euclid(12);
        if !(i64::from(MIN_YEAR)..=i64::from(MAX_YEAR)).contains(&year) {
            return Err(ChronoError::out_of_range(
                "YEAR",
                year,
                MIN_YEAR.into(),
                MAX_YEAR.into(),
            ));
        }
        let year = narrow(year)?;
        let month = (index.rem_euclid(12) + 1) as u8;
        PlainDate::new(year, month, date.day().min(days_in_month(year, month)))
    }

    fn between(&self, start: &PlainDate, end: &PlainDate) -> Result<i64, ChronoError> {
        let delta = Self::month_index(end) - Self::month_index(start);
        let ordering = end.day().cmp(&start.day());
        Ok(complete_units(delta, ordering) / self.months_per_unit)
    }
}

/// Day-based arithmetic; weeks are seven days.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DayArithmetic {
    pub(crate) days_per_unit: i64,
}

impl UnitRule<PlainDate> for DayArithmetic {
    fn add_to(&self, date: &PlainDate, amount: i64) -> Result<PlainDate, ChronoError> {
        let days = amount
            .checked_mul(self.days_per_unit)
            .ok_or_else(|| ChronoError::overflow(format!("{amount} x {} days", self.days_per_unit)))?;
        date.plus_days(days)
    }

    fn between(&self, start: &PlainDate, end: &PlainDate) -> Result<i64, ChronoError> {
        Ok((end.to_epoch_days() - start.to_epoch_days()) / self.days_per_unit)
    }
}
