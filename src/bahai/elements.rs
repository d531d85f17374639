use std::sync::Arc;

use crate::bahai::date::{BadiDate, BadiEra, BadiIntercalaryDays, BadiMonth, year_of_era};
use crate::bahai::transform::NawRuzTable;
use crate::consts::{BADI_CYCLE, DAYS_PER_WEEK, MAX_KULL_I_SHAI, MAX_YEAR_OF_ERA};
use crate::element::{Element, ElementInfo, ElementRule, ValueKind};
use crate::error::{ChronoError, narrow};
use crate::types::{Weekday, Weekmodel};

pub static ERA: Element<BadiEra> = Element::new("ERA", ValueKind::Era, 1, 1);
/// Proleptic year counted from 1844.
pub static YEAR_OF_ERA: Element<i32> = Element::integer("YEAR_OF_ERA", 1, MAX_YEAR_OF_ERA);
/// Major cycle of 361 years.
pub static KULL_I_SHAI: Element<i32> = Element::integer("KULL_I_SHAI", 1, MAX_KULL_I_SHAI);
/// 19-year cycle within the major cycle.
pub static VAHID: Element<i32> = Element::integer("VAHID", 1, BADI_CYCLE);
pub static YEAR_OF_VAHID: Element<i32> = Element::integer("YEAR_OF_VAHID", 1, BADI_CYCLE);
pub static MONTH_OF_YEAR: Element<BadiMonth> = Element::new("MONTH_OF_YEAR", ValueKind::Month, 1, 19);
/// Present only on the intercalary days.
pub static AYYAM_I_HA: Element<BadiIntercalaryDays> = Element::new("AYYAM_I_HA", ValueKind::Intercalary, 0, 0);
/// Day of the month, or of Ayyam-i-Ha.
pub static DAY_OF_DIVISION: Element<i32> = Element::integer("DAY_OF_DIVISION", 1, BADI_CYCLE);
pub static DAY_OF_YEAR: Element<i32> = Element::integer("DAY_OF_YEAR", 1, 366);
pub static DAY_OF_WEEK: Element<Weekday> = Element::new("DAY_OF_WEEK", ValueKind::Weekday, 1, 7);

/// Integer-valued elements of a Badi date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum IntegerField {
    KullIShai,
    Vahid,
    YearOfVahid,
    YearOfEra,
    DayOfDivision,
    DayOfYear,
}

impl IntegerField {
    fn name(self) -> &'static str {
        match self {
            Self::KullIShai => KULL_I_SHAI.name(),
            Self::Vahid => VAHID.name(),
            Self::YearOfVahid => YEAR_OF_VAHID.name(),
            Self::YearOfEra => YEAR_OF_ERA.name(),
            Self::DayOfDivision => DAY_OF_DIVISION.name(),
            Self::DayOfYear => DAY_OF_YEAR.name(),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IntegerRule {
    field: IntegerField,
    table: Arc<NawRuzTable>,
}

impl IntegerRule {
    pub(crate) const fn new(field: IntegerField, table: Arc<NawRuzTable>) -> Self {
        Self { field, table }
    }
}

impl ElementRule<BadiDate> for IntegerRule {
    fn value(&self, context: &BadiDate) -> Result<i64, ChronoError> {
        Ok(match self.field {
            IntegerField::KullIShai => context.kull_i_shai(),
            IntegerField::Vahid => context.vahid(),
            IntegerField::YearOfVahid => context.year_of_vahid(),
            IntegerField::YearOfEra => context.year_of_era(),
            IntegerField::DayOfDivision => context.day_of_division(),
            IntegerField::DayOfYear => self.table.day_of_year(context),
        }
        .into())
    }

    fn minimum(&self, _context: &BadiDate) -> i64 {
        1
    }

    fn maximum(&self, context: &BadiDate) -> i64 {
        let max = match self.field {
            IntegerField::KullIShai => MAX_KULL_I_SHAI,
            IntegerField::Vahid | IntegerField::YearOfVahid => BADI_CYCLE,
            IntegerField::YearOfEra => MAX_YEAR_OF_ERA,
            IntegerField::DayOfDivision if context.is_intercalary_day() => self.table.ayyam_i_ha_length_of(context),
            IntegerField::DayOfDivision => BADI_CYCLE,
            IntegerField::DayOfYear => self.table.length_of_year(context.year_of_era()),
        };
        max.into()
    }

    fn is_valid(&self, context: &BadiDate, value: i64) -> bool {
        (self.minimum(context)..=self.maximum(context)).contains(&value)
    }

    fn with_value(&self, context: &BadiDate, value: i64, _lenient: bool) -> Result<BadiDate, ChronoError> {
        if !self.is_valid(context, value) {
            return Err(ChronoError::out_of_range(
                self.field.name(),
                value,
                self.minimum(context),
                self.maximum(context),
            ));
        }
        let value = narrow(value)?;
        let (major, cycle, year) = (context.kull_i_shai(), context.vahid(), context.year_of_vahid());
        match self.field {
            IntegerField::KullIShai => self.table.with_year_of_era(context, year_of_era(value, cycle, year)),
            IntegerField::Vahid => self.table.with_year_of_era(context, year_of_era(major, value, year)),
            IntegerField::YearOfVahid => self.table.with_year_of_era(context, year_of_era(major, cycle, value)),
            IntegerField::YearOfEra => self.table.with_year_of_era(context, value),
            IntegerField::DayOfDivision => Ok(context.with_division(context.division_index(), value)),
            IntegerField::DayOfYear => self.table.with_day_of_year(context, value),
        }
    }

    fn child_at_floor(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        match self.field {
            IntegerField::KullIShai => Some(VAHID.info()),
            IntegerField::Vahid => Some(YEAR_OF_VAHID.info()),
            IntegerField::YearOfVahid | IntegerField::YearOfEra => Some(MONTH_OF_YEAR.info()),
            IntegerField::DayOfDivision | IntegerField::DayOfYear => None,
        }
    }

    fn child_at_ceiling(&self, context: &BadiDate) -> Option<&'static ElementInfo> {
        self.child_at_floor(context)
    }
}

/// Month of year. Intercalary days have none.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MonthRule;

impl ElementRule<BadiDate> for MonthRule {
    fn value(&self, context: &BadiDate) -> Result<i64, ChronoError> {
        Ok(context.month()?.value().into())
    }

    fn minimum(&self, _context: &BadiDate) -> i64 {
        BadiMonth::Baha.value().into()
    }

    fn maximum(&self, _context: &BadiDate) -> i64 {
        BadiMonth::Ala.value().into()
    }

    fn is_valid(&self, _context: &BadiDate, value: i64) -> bool {
        BadiMonth::from_value(value).is_some()
    }

    fn with_value(&self, context: &BadiDate, value: i64, _lenient: bool) -> Result<BadiDate, ChronoError> {
        let month = BadiMonth::from_value(value)
            .ok_or_else(|| ChronoError::out_of_range(MONTH_OF_YEAR.name(), value, 1, BADI_CYCLE.into()))?;
        // an intercalary day maps to the last day of the month
        let day = if context.is_intercalary_day() {
            BADI_CYCLE
        } else {
            context.day_of_division()
        };
        Ok(context.with_division(month.value(), day))
    }

    fn child_at_floor(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_DIVISION.info())
    }

    fn child_at_ceiling(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_DIVISION.info())
    }
}

/// The intercalary period as a whole.
#[derive(Debug, Clone)]
pub(crate) struct IntercalaryRule {
    table: Arc<NawRuzTable>,
}

impl IntercalaryRule {
    pub(crate) const fn new(table: Arc<NawRuzTable>) -> Self {
        Self { table }
    }
}

impl ElementRule<BadiDate> for IntercalaryRule {
    fn value(&self, context: &BadiDate) -> Result<i64, ChronoError> {
        if context.is_intercalary_day() {
            Ok(0)
        } else {
            Err(ChronoError::NotIntercalary(context.to_string()))
        }
    }

    fn minimum(&self, _context: &BadiDate) -> i64 {
        0
    }

    fn maximum(&self, _context: &BadiDate) -> i64 {
        0
    }

    fn is_valid(&self, _context: &BadiDate, value: i64) -> bool {
        value == 0
    }

    fn with_value(&self, context: &BadiDate, value: i64, _lenient: bool) -> Result<BadiDate, ChronoError> {
        if value != 0 {
            return Err(ChronoError::out_of_range(AYYAM_I_HA.name(), value, 0, 0));
        }
        let day = context
            .day_of_division()
            .min(self.table.ayyam_i_ha_length_of(context));
        Ok(context.with_division(0, day))
    }

    fn child_at_floor(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_DIVISION.info())
    }

    fn child_at_ceiling(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(DAY_OF_DIVISION.info())
    }
}

/// The single Bahai era.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EraRule;

impl ElementRule<BadiDate> for EraRule {
    fn value(&self, _context: &BadiDate) -> Result<i64, ChronoError> {
        Ok(1)
    }

    fn minimum(&self, _context: &BadiDate) -> i64 {
        1
    }

    fn maximum(&self, _context: &BadiDate) -> i64 {
        1
    }

    fn is_valid(&self, _context: &BadiDate, value: i64) -> bool {
        value == 1
    }

    fn with_value(&self, context: &BadiDate, value: i64, _lenient: bool) -> Result<BadiDate, ChronoError> {
        if value == 1 {
            Ok(*context)
        } else {
            Err(ChronoError::out_of_range(ERA.name(), value, 1, 1))
        }
    }

    fn child_at_floor(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(YEAR_OF_ERA.info())
    }

    fn child_at_ceiling(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        Some(YEAR_OF_ERA.info())
    }
}

/// Day of week, moving the date within its Badi week.
#[derive(Debug, Clone)]
pub(crate) struct WeekdayRule {
    model: Weekmodel,
    table: Arc<NawRuzTable>,
}

impl WeekdayRule {
    pub(crate) const fn new(model: Weekmodel, table: Arc<NawRuzTable>) -> Self {
        Self { model, table }
    }
}

impl ElementRule<BadiDate> for WeekdayRule {
    fn value(&self, context: &BadiDate) -> Result<i64, ChronoError> {
        let epoch_days = self.table.to_epoch_days(context)?;
        Ok(Weekday::from_epoch_days(epoch_days).value().into())
    }

    fn minimum(&self, _context: &BadiDate) -> i64 {
        self.model.first_day_of_week().value().into()
    }

    fn maximum(&self, _context: &BadiDate) -> i64 {
        self.model.first_day_of_week().roll(DAYS_PER_WEEK - 1).value().into()
    }

    fn is_valid(&self, _context: &BadiDate, value: i64) -> bool {
        Weekday::from_value(value).is_some()
    }

    fn with_value(&self, context: &BadiDate, value: i64, _lenient: bool) -> Result<BadiDate, ChronoError> {
        let target = Weekday::from_value(value).ok_or_else(|| ChronoError::out_of_range(DAY_OF_WEEK.name(), value, 1, 7))?;
        let epoch_days = self.table.to_epoch_days(context)?;
        let current = Weekday::from_epoch_days(epoch_days);
        let shift = target.value_in(&self.model) - current.value_in(&self.model);
        self.table.to_date(epoch_days + i64::from(shift))
    }

    fn child_at_floor(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        None
    }

    fn child_at_ceiling(&self, _context: &BadiDate) -> Option<&'static ElementInfo> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bahai::transform::split_year_of_era;
    use crate::test_utils::badi_table;

    fn rule(field: IntegerField) -> IntegerRule {
        IntegerRule::new(field, Arc::new(badi_table()))
    }

    fn date(table: &NawRuzTable, major: i32, cycle: i32, year: i32, division: i32, day: i32) -> BadiDate {
        table.create(major, cycle, year, division, day).expect("valid date")
    }

    #[test]
    fn test_integer_maximums() {
        let table = badi_table();
        let ordinary = date(&table, 1, 5, 11, 2, 13);
        let common_ayyam = date(&table, 1, 5, 11, 0, 1);
        let leap_ayyam = date(&table, 1, 1, 4, 0, 1);

        assert_eq!(rule(IntegerField::KullIShai).maximum(&ordinary), 3);
        assert_eq!(rule(IntegerField::Vahid).maximum(&ordinary), 19);
        assert_eq!(rule(IntegerField::YearOfEra).maximum(&ordinary), 1083);
        assert_eq!(rule(IntegerField::DayOfDivision).maximum(&ordinary), 19);
        assert_eq!(rule(IntegerField::DayOfDivision).maximum(&common_ayyam), 4);
        assert_eq!(rule(IntegerField::DayOfDivision).maximum(&leap_ayyam), 5);
        assert_eq!(rule(IntegerField::DayOfYear).maximum(&common_ayyam), 365);
        assert_eq!(rule(IntegerField::DayOfYear).maximum(&leap_ayyam), 366);
    }

    #[test]
    fn test_year_change_clamps_fifth_intercalary_day() {
        let table = badi_table();
        let leap_day = date(&table, 1, 1, 4, 0, 5);
        let moved = rule(IntegerField::YearOfVahid)
            .with_value(&leap_day, 5, false)
            .expect("valid year");
        assert_eq!(moved.to_string(), "Bahai-1-1-5-Ayyam-i-Ha-4");

        let moved = rule(IntegerField::Vahid)
            .with_value(&leap_day, 5, false)
            .expect("valid vahid");
        assert_eq!(moved.year_of_era(), 80);
        assert!(moved.day_of_division() <= table.ayyam_i_ha_length(80));
    }

    #[test]
    fn test_year_of_era_round_trip() {
        let table = badi_table();
        let start = date(&table, 1, 1, 1, 7, 7);
        let rule = rule(IntegerField::YearOfEra);
        for year in [1, 19, 20, 361, 362, 723, 1083] {
            let moved = rule.with_value(&start, year.into(), false).expect("valid year");
            assert_eq!(rule.value(&moved).expect("readable"), i64::from(year));
            assert_eq!(
                (moved.kull_i_shai(), moved.vahid(), moved.year_of_vahid()),
                split_year_of_era(year)
            );
        }
        assert!(rule.with_value(&start, 1084, false).is_err());
    }

    #[test]
    fn test_day_of_year_decomposition() {
        let table = badi_table();
        let rule = rule(IntegerField::DayOfYear);
        let common = date(&table, 1, 5, 11, 1, 1);
        let leap = date(&table, 1, 1, 4, 1, 1);

        struct TestCase {
            context:     BadiDate,
            day_of_year: i64,
            expected:    &'static str,
            description: &'static str,
        }

        let cases = [
            TestCase {
                context:     common,
                day_of_year: 342,
                expected:    "Bahai-1-5-11-18-19",
                description: "last day of Mulk",
            },
            TestCase {
                context:     common,
                day_of_year: 343,
                expected:    "Bahai-1-5-11-Ayyam-i-Ha-1",
                description: "first intercalary day",
            },
            TestCase {
                context:     common,
                day_of_year: 347,
                expected:    "Bahai-1-5-11-19-1",
                description: "first of Ala in a common year",
            },
            TestCase {
                context:     leap,
                day_of_year: 347,
                expected:    "Bahai-1-1-4-Ayyam-i-Ha-5",
                description: "fifth intercalary day in a leap year",
            },
            TestCase {
                context:     leap,
                day_of_year: 366,
                expected:    "Bahai-1-1-4-19-19",
                description: "last day of a leap year",
            },
        ];

        for case in &cases {
            let result = rule
                .with_value(&case.context, case.day_of_year, false)
                .expect(case.description);
            assert_eq!(result.to_string(), case.expected, "{}", case.description);
            assert_eq!(rule.value(&result).expect("readable"), case.day_of_year, "{}", case.description);
        }
        assert!(rule.with_value(&common, 366, false).is_err());
    }

    #[test]
    fn test_month_rule() {
        let table = badi_table();
        let ayyam = date(&table, 1, 5, 11, 0, 3);
        assert!(matches!(MonthRule.value(&ayyam), Err(ChronoError::NoMonth(_))));
        let moved = MonthRule.with_value(&ayyam, 2, false).expect("valid month");
        assert_eq!(moved.to_string(), "Bahai-1-5-11-2-19");

        let ordinary = date(&table, 1, 5, 11, 2, 13);
        assert_eq!(MonthRule.value(&ordinary).expect("has month"), 2);
        let moved = MonthRule.with_value(&ordinary, 19, false).expect("valid month");
        assert_eq!(moved.to_string(), "Bahai-1-5-11-19-13");
        assert!(MonthRule.with_value(&ordinary, 20, false).is_err());
    }

    #[test]
    fn test_intercalary_rule() {
        let table = Arc::new(badi_table());
        let rule = IntercalaryRule::new(Arc::clone(&table));
        let ordinary = date(&table, 1, 5, 11, 2, 13);
        assert!(matches!(rule.value(&ordinary), Err(ChronoError::NotIntercalary(_))));
        let moved = rule.with_value(&ordinary, 0, false).expect("valid");
        assert_eq!(moved.to_string(), "Bahai-1-5-11-Ayyam-i-Ha-4");
        assert_eq!(rule.value(&moved).expect("intercalary"), 0);
        assert!(rule.with_value(&ordinary, 1, false).is_err());
    }

    #[test]
    fn test_era_rule() {
        let table = badi_table();
        let ordinary = date(&table, 1, 5, 11, 2, 13);
        assert_eq!(EraRule.value(&ordinary).expect("always"), 1);
        assert_eq!(EraRule.with_value(&ordinary, 1, false).expect("same era"), ordinary);
        assert!(EraRule.with_value(&ordinary, 2, false).is_err());
    }

    #[test]
    fn test_weekday_rule_stays_in_week() {
        let table = Arc::new(badi_table());
        let rule = WeekdayRule::new(Weekmodel::BADI, Arc::clone(&table));
        // 181 BE started on Wednesday 2024-03-20
        let naw_ruz = date(&table, 1, 10, 10, 1, 1);
        assert_eq!(rule.value(&naw_ruz).expect("readable"), i64::from(Weekday::Wednesday.value()));

        let saturday = rule
            .with_value(&naw_ruz, Weekday::Saturday.value().into(), false)
            .expect("in range");
        assert_eq!(table.to_epoch_days(&saturday).expect("valid") - table.to_epoch_days(&naw_ruz).expect("valid"), -4);
        let friday = rule
            .with_value(&naw_ruz, Weekday::Friday.value().into(), false)
            .expect("in range");
        assert_eq!(friday.to_string(), "Bahai-1-10-10-1-3");
    }

    #[test]
    fn test_children() {
        let table = badi_table();
        let ordinary = date(&table, 1, 5, 11, 2, 13);
        assert!(rule(IntegerField::KullIShai).child_at_floor(&ordinary).is_some_and(|e| e.is(VAHID.info())));
        assert!(rule(IntegerField::YearOfEra).child_at_ceiling(&ordinary).is_some_and(|e| e.is(MONTH_OF_YEAR.info())));
        assert!(rule(IntegerField::DayOfYear).child_at_floor(&ordinary).is_none());
        assert!(EraRule.child_at_floor(&ordinary).is_some_and(|e| e.is(YEAR_OF_ERA.info())));
    }
}
