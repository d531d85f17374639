//! Error types for the calendar_axis crate.

use crate::prelude::*;

/// Failure to read a date from its text form.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid number: {_0}")]
    InvalidNumber(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Hard failure of a calendar operation.
///
/// Soft failures during partial-field reconstruction are not errors; they are
/// recorded on the [`ElementBag`](crate::ElementBag) instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChronoError {
    /// An element value is outside the range allowed by its context.
    #[error("{element} out of range: {value} (must be {min}-{max})")]
    OutOfRange {
        element: &'static str,
        value:   i64,
        min:     i64,
        max:     i64,
    },

    /// A combination of fields does not describe a date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// The element is not registered in the chronology.
    #[error("Unsupported element: {0}")]
    UnsupportedElement(&'static str),

    /// The unit is not registered in the chronology.
    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    /// The date is an intercalary day and has no month.
    #[error("Intercalary days (Ayyam-i-Ha) do not represent any month: {0}")]
    NoMonth(String),

    /// The date is not an intercalary day.
    #[error("The actual calendar date is not an intercalary day: {0}")]
    NotIntercalary(String),

    /// Arithmetic left the representable range.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    /// An element was registered twice while building a chronology.
    #[error("Element already registered: {0}")]
    DuplicateElement(&'static str),

    /// A unit was registered twice while building a chronology.
    #[error("Unit already registered: {0}")]
    DuplicateUnit(String),

    /// Engine configuration cannot produce a consistent calendar.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error parsing a date from text.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ChronoError {
    pub(crate) fn out_of_range(element: &'static str, value: i64, min: i64, max: i64) -> Self {
        Self::OutOfRange {
            element,
            value,
            min,
            max,
        }
    }

    pub(crate) fn overflow(what: impl std::fmt::Display) -> Self {
        Self::Overflow(what.to_string())
    }
}

/// Checked narrowing used after floor division of linear indices.
pub(crate) fn narrow(value: i64) -> Result<i32, ChronoError> {
    i32::try_from(value).map_err(|_| ChronoError::overflow(value))
}
