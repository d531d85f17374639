//! Duration units and the per-unit arithmetic contract.

use std::fmt::Debug;

use crate::error::ChronoError;

/// A duration granularity.
pub trait ChronoUnit: Copy + Eq + Debug + Send + Sync + 'static {
    /// Approximate average length in seconds. Only meant for ordering and
    /// estimation, never for exact arithmetic.
    fn length(&self) -> f64;

    /// Date-only unit without a time-of-day component.
    fn is_calendrical(&self) -> bool;
}

/// Add/difference contract of one unit on one calendar type.
pub trait UnitRule<T>: Send + Sync {
    /// Adds a signed amount of this unit.
    ///
    /// # Errors
    /// Fails if the result is not representable.
    fn add_to(&self, date: &T, amount: i64) -> Result<T, ChronoError>;

    /// Counts complete units from `start` to `end` (negative if `end` is earlier).
    ///
    /// # Errors
    /// Fails if either date cannot be mapped onto the unit's scale.
    fn between(&self, start: &T, end: &T) -> Result<i64, ChronoError>;
}

/// Anniversary correction: drops a unit that has not completed yet.
///
/// `ordering` compares the end position against the start position within
/// the enclosing period.
pub(crate) const fn complete_units(delta: i64, ordering: std::cmp::Ordering) -> i64 {
    use std::cmp::Ordering::{Greater, Less};

    match ordering {
        Less if delta > 0 => delta - 1,
        Greater if delta < 0 => delta + 1,
        _ => delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_complete_units_cases() {
        struct TestCase {
            delta:       i64,
            ordering:    Ordering,
            expected:    i64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                delta:       1,
                ordering:    Ordering::Less,
                expected:    0,
                description: "anniversary not reached",
            },
            TestCase {
                delta:       1,
                ordering:    Ordering::Equal,
                expected:    1,
                description: "exact anniversary",
            },
            TestCase {
                delta:       -2,
                ordering:    Ordering::Greater,
                expected:    -1,
                description: "backwards, anniversary not reached",
            },
            TestCase {
                delta:       -2,
                ordering:    Ordering::Less,
                expected:    -2,
                description: "backwards, anniversary passed",
            },
            TestCase {
                delta:       0,
                ordering:    Ordering::Less,
                expected:    0,
                description: "same period",
            },
        ];

        for case in &cases {
            assert_eq!(
                complete_units(case.delta, case.ordering),
                case.expected,
                "{}",
                case.description
            );
        }
    }
}
