//! Element descriptors and the per-element rule contract.
//!
//! An element is a named calendar field such as the day of month. Elements are
//! declared as `static` items and compared by identity, so two descriptors with
//! the same name are still different elements.

use std::fmt;
use std::marker::PhantomData;

use crate::error::ChronoError;
use crate::types::Weekday;

/// Kind of value an element carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Integer,
    Month,
    Intercalary,
    Weekday,
    Era,
}

/// Whether an element belongs to the date or the time-of-day part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Date,
    Time,
}

/// Untyped part of an element descriptor.
#[derive(Debug)]
pub struct ElementInfo {
    name:        &'static str,
    kind:        ValueKind,
    min:         i64,
    max:         i64,
    granularity: Granularity,
}

impl ElementInfo {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Smallest value this element can take in any context.
    pub const fn default_minimum(&self) -> i64 {
        self.min
    }

    /// Largest value this element can take in any context.
    pub const fn default_maximum(&self) -> i64 {
        self.max
    }

    pub const fn is_date_element(&self) -> bool {
        matches!(self.granularity, Granularity::Date)
    }

    pub const fn is_time_element(&self) -> bool {
        matches!(self.granularity, Granularity::Time)
    }

    /// Identity comparison.
    #[inline]
    pub fn is(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl PartialEq for ElementInfo {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for ElementInfo {}

impl fmt::Display for ElementInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A value that can be stored in an element.
///
/// Rules exchange values in raw `i64` form; this trait converts at the typed
/// boundary.
pub trait ElementValue: Copy + fmt::Debug {
    fn to_raw(self) -> i64;
    fn from_raw(raw: i64) -> Option<Self>;
}

impl ElementValue for i32 {
    fn to_raw(self) -> i64 {
        i64::from(self)
    }

    fn from_raw(raw: i64) -> Option<Self> {
        Self::try_from(raw).ok()
    }
}

impl ElementValue for i64 {
    fn to_raw(self) -> i64 {
        self
    }

    fn from_raw(raw: i64) -> Option<Self> {
        Some(raw)
    }
}

impl ElementValue for Weekday {
    fn to_raw(self) -> i64 {
        i64::from(self.value())
    }

    fn from_raw(raw: i64) -> Option<Self> {
        Self::from_value(raw)
    }
}

/// Typed element descriptor. Declare as a `static`.
pub struct Element<V> {
    info:    ElementInfo,
    _marker: PhantomData<fn() -> V>,
}

impl<V> Element<V> {
    pub const fn new(name: &'static str, kind: ValueKind, min: i64, max: i64) -> Self {
        Self {
            info:    ElementInfo {
                name,
                kind,
                min,
                max,
                granularity: Granularity::Date,
            },
            _marker: PhantomData,
        }
    }

    pub const fn info(&self) -> &ElementInfo {
        &self.info
    }

    pub const fn name(&self) -> &'static str {
        self.info.name
    }
}

impl Element<i32> {
    /// Integer date element with the given default bounds.
    pub const fn integer(name: &'static str, min: i32, max: i32) -> Self {
        Self::new(name, ValueKind::Integer, min as i64, max as i64)
    }
}

impl<V: ElementValue> Element<V> {
    pub fn default_minimum(&self) -> Option<V> {
        V::from_raw(self.info.min)
    }

    pub fn default_maximum(&self) -> Option<V> {
        V::from_raw(self.info.max)
    }
}

impl<V> PartialEq for Element<V> {
    fn eq(&self, other: &Self) -> bool {
        self.info.is(&other.info)
    }
}

impl<V> Eq for Element<V> {}

impl<V> fmt::Debug for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.info.name).finish()
    }
}

impl<V> fmt::Display for Element<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info.name)
    }
}

/// Get/validate/set/navigate contract of one element on one calendar type.
///
/// Rules are pure: `with_value` returns a new value and never mutates `context`.
pub trait ElementRule<T>: Send + Sync {
    /// Reads the element. Fails when the date has no such field (for example
    /// the month of an intercalary day).
    fn value(&self, context: &T) -> Result<i64, ChronoError>;

    fn minimum(&self, context: &T) -> i64;

    fn maximum(&self, context: &T) -> i64;

    fn is_valid(&self, context: &T, value: i64) -> bool;

    /// Returns a copy of `context` with the element set to `value`.
    ///
    /// # Errors
    /// Fails if `value` is invalid for `context` and cannot be accepted.
    fn with_value(&self, context: &T, value: i64, lenient: bool) -> Result<T, ChronoError>;

    /// Next finer element to minimize when this element is set in isolation.
    fn child_at_floor(&self, context: &T) -> Option<&'static ElementInfo>;

    /// Next finer element to maximize when this element is set in isolation.
    fn child_at_ceiling(&self, context: &T) -> Option<&'static ElementInfo>;
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIRST: Element<i32> = Element::integer("SAME", 1, 19);
    static SECOND: Element<i32> = Element::integer("SAME", 1, 19);

    #[test]
    fn test_elements_compare_by_identity() {
        assert_eq!(FIRST, FIRST);
        assert_ne!(FIRST, SECOND);
        assert!(FIRST.info().is(FIRST.info()));
        assert!(!FIRST.info().is(SECOND.info()));
    }

    #[test]
    fn test_default_bounds() {
        assert_eq!(FIRST.default_minimum(), Some(1));
        assert_eq!(FIRST.default_maximum(), Some(19));
        assert!(FIRST.info().is_date_element());
        assert!(!FIRST.info().is_time_element());
        assert_eq!(FIRST.to_string(), "SAME");
    }

    #[test]
    fn test_weekday_raw_values() {
        assert_eq!(Weekday::Sunday.to_raw(), 7);
        assert_eq!(Weekday::from_raw(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_raw(0), None);
        assert_eq!(i32::from_raw(i64::MAX), None);
    }
}
