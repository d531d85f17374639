//! Element registry of one calendar type.
//!
//! A [`Chronology`] binds a closed, ordered set of elements to their rules and
//! a set of units to their arithmetic. It is assembled once through
//! [`ChronologyBuilder`] and then only read, so it can be shared freely.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::calsys::{CalendarEra, CalendarSystem};
use crate::element::{Element, ElementInfo, ElementRule, ElementValue};
use crate::error::ChronoError;
use crate::merger::{ChronoMerger, ElementBag};
use crate::unit::{ChronoUnit, UnitRule};

struct Registration<T, U> {
    info:      &'static ElementInfo,
    rule:      Box<dyn ElementRule<T>>,
    base_unit: Option<U>,
}

/// Builds a [`Chronology`]. Registration order is preserved.
pub struct ChronologyBuilder<T, U> {
    name:            &'static str,
    elements:        Vec<Registration<T, U>>,
    units:           Vec<(U, Box<dyn UnitRule<T>>)>,
    calendar_system: Arc<dyn CalendarSystem<T>>,
    merger:          Box<dyn ChronoMerger<T>>,
}

impl<T: Clone, U: ChronoUnit> ChronologyBuilder<T, U> {
    pub fn set_up(
        name: &'static str,
        merger: impl ChronoMerger<T> + 'static,
        calendar_system: Arc<dyn CalendarSystem<T>>,
    ) -> Self {
        Self {
            name,
            elements: Vec::new(),
            units: Vec::new(),
            calendar_system,
            merger: Box::new(merger),
        }
    }

    #[must_use]
    pub fn append_element<V>(mut self, element: &'static Element<V>, rule: impl ElementRule<T> + 'static) -> Self {
        self.elements.push(Registration {
            info:      element.info(),
            rule:      Box::new(rule),
            base_unit: None,
        });
        self
    }

    /// Registers an element together with the unit used for lenient carry-over.
    #[must_use]
    pub fn append_element_with_unit<V>(
        mut self,
        element: &'static Element<V>,
        rule: impl ElementRule<T> + 'static,
        base_unit: U,
    ) -> Self {
        self.elements.push(Registration {
            info:      element.info(),
            rule:      Box::new(rule),
            base_unit: Some(base_unit),
        });
        self
    }

    #[must_use]
    pub fn append_unit(mut self, unit: U, rule: impl UnitRule<T> + 'static) -> Self {
        self.units.push((unit, Box::new(rule)));
        self
    }

    /// # Errors
    /// Returns `ChronoError::DuplicateElement` or `ChronoError::DuplicateUnit`
    /// if anything was registered twice.
    pub fn build(self) -> Result<Chronology<T, U>, ChronoError> {
        for (i, reg) in self.elements.iter().enumerate() {
            if self.elements[..i].iter().any(|earlier| earlier.info.is(reg.info)) {
                return Err(ChronoError::DuplicateElement(reg.info.name()));
            }
        }
        for (i, (unit, _)) in self.units.iter().enumerate() {
            if self.units[..i].iter().any(|(earlier, _)| earlier == unit) {
                return Err(ChronoError::DuplicateUnit(format!("{unit:?}")));
            }
        }
        debug!(
            chronology = self.name,
            elements = self.elements.len(),
            units = self.units.len(),
            "chronology built"
        );
        Ok(Chronology {
            name:            self.name,
            elements:        self.elements,
            units:           self.units,
            calendar_system: self.calendar_system,
            merger:          self.merger,
        })
    }
}

/// Immutable registry of elements, units and the day-count transform of one
/// calendar type.
pub struct Chronology<T, U> {
    name:            &'static str,
    elements:        Vec<Registration<T, U>>,
    units:           Vec<(U, Box<dyn UnitRule<T>>)>,
    calendar_system: Arc<dyn CalendarSystem<T>>,
    merger:          Box<dyn ChronoMerger<T>>,
}

impl<T, U> fmt::Debug for Chronology<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chronology")
            .field("name", &self.name)
            .field(
                "elements",
                &self.elements.iter().map(|reg| reg.info.name()).collect::<Vec<_>>(),
            )
            .field("units", &self.units.len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone, U: ChronoUnit> Chronology<T, U> {
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Looks up a registered element by its symbolic name.
    pub fn element(&self, name: &str) -> Option<&'static ElementInfo> {
        self.elements.iter().find(|reg| reg.info.name() == name).map(|reg| reg.info)
    }

    /// Registered elements in registration order.
    pub fn registered_elements(&self) -> impl Iterator<Item = &'static ElementInfo> + '_ {
        self.elements.iter().map(|reg| reg.info)
    }

    pub fn is_registered(&self, element: &ElementInfo) -> bool {
        self.registration(element).is_some()
    }

    pub fn is_supported(&self, unit: U) -> bool {
        self.units.iter().any(|(u, _)| *u == unit)
    }

    fn registration(&self, element: &ElementInfo) -> Option<&Registration<T, U>> {
        self.elements.iter().find(|reg| reg.info.is(element))
    }

    /// # Errors
    /// Returns `ChronoError::UnsupportedElement` if the element is not registered.
    pub fn rule(&self, element: &ElementInfo) -> Result<&dyn ElementRule<T>, ChronoError> {
        self.registration(element)
            .map(|reg| reg.rule.as_ref())
            .ok_or(ChronoError::UnsupportedElement(element.name()))
    }

    /// # Errors
    /// Returns `ChronoError::UnsupportedUnit` if the unit is not registered.
    pub fn unit_rule(&self, unit: U) -> Result<&dyn UnitRule<T>, ChronoError> {
        self.units
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|(_, rule)| rule.as_ref())
            .ok_or_else(|| ChronoError::UnsupportedUnit(format!("{unit:?}")))
    }

    pub fn base_unit(&self, element: &ElementInfo) -> Option<U> {
        self.registration(element).and_then(|reg| reg.base_unit)
    }

    /// Reads a typed element value.
    ///
    /// # Errors
    /// Fails if the element is unregistered or absent from this date.
    pub fn get<V: ElementValue>(&self, context: &T, element: &'static Element<V>) -> Result<V, ChronoError> {
        let raw = self.rule(element.info())?.value(context)?;
        typed(element, raw)
    }

    /// # Errors
    /// Fails if the element is unregistered.
    pub fn minimum_of<V: ElementValue>(&self, context: &T, element: &'static Element<V>) -> Result<V, ChronoError> {
        typed(element, self.rule(element.info())?.minimum(context))
    }

    /// # Errors
    /// Fails if the element is unregistered.
    pub fn maximum_of<V: ElementValue>(&self, context: &T, element: &'static Element<V>) -> Result<V, ChronoError> {
        typed(element, self.rule(element.info())?.maximum(context))
    }

    /// Unregistered elements are never valid.
    pub fn is_valid<V: ElementValue>(&self, context: &T, element: &'static Element<V>, value: V) -> bool {
        self.rule(element.info())
            .is_ok_and(|rule| rule.is_valid(context, value.to_raw()))
    }

    /// Strict write.
    ///
    /// # Errors
    /// Fails if the element is unregistered or the value is invalid.
    pub fn with<V: ElementValue>(&self, context: &T, element: &'static Element<V>, value: V) -> Result<T, ChronoError> {
        self.with_raw(context, element.info(), value.to_raw(), false)
    }

    /// Lenient write: out-of-range values carry over through the element's
    /// base unit where one is registered.
    ///
    /// # Errors
    /// Fails if the element is unregistered or the value cannot be carried.
    pub fn with_lenient<V: ElementValue>(
        &self,
        context: &T,
        element: &'static Element<V>,
        value: V,
    ) -> Result<T, ChronoError> {
        self.with_raw(context, element.info(), value.to_raw(), true)
    }

    /// # Errors
    /// See [`Chronology::with`] and [`Chronology::with_lenient`].
    pub fn with_raw(&self, context: &T, element: &ElementInfo, value: i64, lenient: bool) -> Result<T, ChronoError> {
        let rule = self.rule(element)?;
        if lenient && !rule.is_valid(context, value) {
            if let Some(unit) = self.base_unit(element) {
                let min = rule.minimum(context);
                let amount = value
                    .checked_sub(min)
                    .ok_or_else(|| ChronoError::overflow(format!("{element} = {value}")))?;
                debug!(element = element.name(), value, ?unit, "lenient carry-over");
                let floor = rule.with_value(context, min, false)?;
                return self.plus(&floor, amount, unit);
            }
        }
        rule.with_value(context, value, lenient)
    }

    /// Keeps `element` and sets every finer element down the child-at-floor
    /// chain to its minimum.
    ///
    /// # Errors
    /// Fails if a child element is unregistered.
    pub fn at_floor(&self, context: &T, element: &ElementInfo) -> Result<T, ChronoError> {
        self.descend(context, element, true)
    }

    /// Keeps `element` and sets every finer element down the child-at-ceiling
    /// chain to its maximum.
    ///
    /// # Errors
    /// Fails if a child element is unregistered.
    pub fn at_ceiling(&self, context: &T, element: &ElementInfo) -> Result<T, ChronoError> {
        self.descend(context, element, false)
    }

    fn descend(&self, context: &T, element: &ElementInfo, floor: bool) -> Result<T, ChronoError> {
        let mut current = context.clone();
        let mut rule = self.rule(element)?;
        loop {
            let child = if floor {
                rule.child_at_floor(&current)
            } else {
                rule.child_at_ceiling(&current)
            };
            let Some(child) = child else {
                return Ok(current);
            };
            rule = self.rule(child)?;
            let value = if floor {
                rule.minimum(&current)
            } else {
                rule.maximum(&current)
            };
            current = rule.with_value(&current, value, false)?;
        }
    }

    /// # Errors
    /// Fails if the unit is unregistered or the result is out of range.
    pub fn plus(&self, context: &T, amount: i64, unit: U) -> Result<T, ChronoError> {
        self.unit_rule(unit)?.add_to(context, amount)
    }

    /// # Errors
    /// Fails if the unit is unregistered or the result is out of range.
    pub fn minus(&self, context: &T, amount: i64, unit: U) -> Result<T, ChronoError> {
        let negated = amount
            .checked_neg()
            .ok_or_else(|| ChronoError::overflow(amount))?;
        self.plus(context, negated, unit)
    }

    /// Complete units from `start` to `end`.
    ///
    /// # Errors
    /// Fails if the unit is unregistered.
    pub fn between(&self, start: &T, end: &T, unit: U) -> Result<i64, ChronoError> {
        self.unit_rule(unit)?.between(start, end)
    }

    pub fn calendar_system(&self) -> &dyn CalendarSystem<T> {
        self.calendar_system.as_ref()
    }

    /// Earliest supported date.
    ///
    /// # Errors
    /// Fails only for an inconsistent calendar system.
    pub fn minimum(&self) -> Result<T, ChronoError> {
        let cs = self.calendar_system();
        cs.to_date(cs.minimum_epoch_days())
    }

    /// Latest supported date.
    ///
    /// # Errors
    /// Fails only for an inconsistent calendar system.
    pub fn maximum(&self) -> Result<T, ChronoError> {
        let cs = self.calendar_system();
        cs.to_date(cs.maximum_epoch_days())
    }

    pub fn eras(&self) -> Vec<CalendarEra> {
        self.calendar_system.eras()
    }

    /// Reconstructs a date from partial element values.
    pub fn create_from(&self, bag: &mut ElementBag, lenient: bool) -> Option<T> {
        self.merger.create_from(bag, lenient)
    }
}

fn typed<V: ElementValue>(element: &Element<V>, raw: i64) -> Result<V, ChronoError> {
    V::from_raw(raw).ok_or_else(|| ChronoError::InvalidDate(format!("{element} holds unexpected value {raw}")))
}
