//! Reconstruction of dates from partial element values.
//!
//! Parsers and defaulting code collect whatever fields they found in an
//! [`ElementBag`]. A [`ChronoMerger`] turns the bag into a date or records why
//! it could not; a missing or inconsistent field is an expected outcome here,
//! not a programming error.

use tracing::debug;

use crate::element::{Element, ElementInfo, ElementValue};

/// Unordered set of element values with an optional recorded failure.
#[derive(Debug, Default)]
pub struct ElementBag {
    values:  Vec<(&'static ElementInfo, i64)>,
    failure: Option<String>,
}

impl ElementBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion.
    #[must_use]
    pub fn with<V: ElementValue>(mut self, element: &'static Element<V>, value: V) -> Self {
        self.set(element, value);
        self
    }

    /// Stores a value, replacing any earlier value of the same element.
    pub fn set<V: ElementValue>(&mut self, element: &'static Element<V>, value: V) {
        self.set_raw(element.info(), value.to_raw());
    }

    pub fn set_raw(&mut self, element: &'static ElementInfo, value: i64) {
        match self.values.iter_mut().find(|(info, _)| info.is(element)) {
            Some(slot) => slot.1 = value,
            None => self.values.push((element, value)),
        }
    }

    pub fn get<V: ElementValue>(&self, element: &'static Element<V>) -> Option<V> {
        self.get_raw(element.info()).and_then(V::from_raw)
    }

    pub fn get_raw(&self, element: &ElementInfo) -> Option<i64> {
        self.values.iter().find(|(info, _)| info.is(element)).map(|(_, value)| *value)
    }

    pub fn contains(&self, element: &ElementInfo) -> bool {
        self.get_raw(element).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Records a validation failure; the first message wins.
    pub fn record_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(%message, "merge failed");
        if self.failure.is_none() {
            self.failure = Some(message);
        }
    }

    pub fn validation_failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub const fn has_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Builds a date from an element bag.
pub trait ChronoMerger<T>: Send + Sync {
    /// Returns `None` if the bag does not determine a date; in that case a
    /// failure message is recorded on the bag when the input was inconsistent.
    fn create_from(&self, bag: &mut ElementBag, lenient: bool) -> Option<T>;
}

/// One reconstruction path, applicable when all required elements are present.
pub trait MergeStrategy<C, T>: Send + Sync {
    fn name(&self) -> &'static str;

    fn required(&self) -> &[&'static ElementInfo];

    /// # Errors
    /// Returns the validation message if the inputs are out of range.
    fn build(&self, bag: &ElementBag, context: &C) -> Result<T, String>;

    fn is_applicable(&self, bag: &ElementBag) -> bool {
        self.required().iter().all(|element| bag.contains(element))
    }
}

/// Runs the first applicable strategy in priority order.
///
/// Returns `None` if no strategy applies. A strategy failure is recorded on the
/// bag and also yields `None`.
pub fn resolve_first<C, T>(strategies: &[&dyn MergeStrategy<C, T>], bag: &mut ElementBag, context: &C) -> Option<T> {
    let strategy = strategies.iter().find(|s| s.is_applicable(bag))?;
    match strategy.build(bag, context) {
        Ok(value) => Some(value),
        Err(message) => {
            bag.record_failure(format!("{}: {message}", strategy.name()));
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static LEFT: Element<i32> = Element::integer("LEFT", 1, 10);
    static RIGHT: Element<i32> = Element::integer("RIGHT", 1, 10);

    struct Sum(Vec<&'static ElementInfo>);

    impl MergeStrategy<i32, i32> for Sum {
        fn name(&self) -> &'static str {
            "sum"
        }

        fn required(&self) -> &[&'static ElementInfo] {
            &self.0
        }

        fn build(&self, bag: &ElementBag, offset: &i32) -> Result<i32, String> {
            let total: i64 = self.0.iter().filter_map(|e| bag.get_raw(e)).sum();
            if total > 10 {
                return Err(format!("total too large: {total}"));
            }
            Ok(total as i32 + offset)
        }
    }

    #[test]
    fn test_bag_set_and_replace() {
        let mut bag = ElementBag::new().with(&LEFT, 3);
        assert_eq!(bag.get(&LEFT), Some(3));
        bag.set(&LEFT, 4);
        assert_eq!(bag.get(&LEFT), Some(4));
        assert_eq!(bag.len(), 1);
        assert!(!bag.contains(RIGHT.info()));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut bag = ElementBag::new();
        bag.record_failure("first");
        bag.record_failure("second");
        assert_eq!(bag.validation_failure(), Some("first"));
    }

    #[test]
    fn test_resolve_first_priority() {
        let both = Sum(vec![LEFT.info(), RIGHT.info()]);
        let left_only = Sum(vec![LEFT.info()]);
        let strategies: [&dyn MergeStrategy<i32, i32>; 2] = [&both, &left_only];

        let mut bag = ElementBag::new().with(&LEFT, 2).with(&RIGHT, 5);
        assert_eq!(resolve_first(&strategies, &mut bag, &100), Some(107));

        let mut bag = ElementBag::new().with(&LEFT, 2);
        assert_eq!(resolve_first(&strategies, &mut bag, &100), Some(102));

        let mut bag = ElementBag::new().with(&RIGHT, 2);
        assert_eq!(resolve_first(&strategies, &mut bag, &100), None);
        assert!(!bag.has_failure());
    }

    #[test]
    fn test_resolve_first_records_failure() {
        let both = Sum(vec![LEFT.info(), RIGHT.info()]);
        let strategies: [&dyn MergeStrategy<i32, i32>; 1] = [&both];

        let mut bag = ElementBag::new().with(&LEFT, 9).with(&RIGHT, 9);
        assert_eq!(resolve_first(&strategies, &mut bag, &0), None);
        assert_eq!(bag.validation_failure(), Some("sum: total too large: 18"));
    }
}
