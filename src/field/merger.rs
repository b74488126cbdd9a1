// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The engine that reconciles a bag of field values into complete
//! date-time values.

use std::collections::{BTreeMap, BTreeSet};

use crate::chronology::{iso, Chronology};
use crate::date::Date;
use crate::error::{Error, ErrorKind};
use crate::field::{Calendrical, Rule, Value};
use crate::offset::ZoneOffset;
use crate::period::Period;
use crate::time::Time;
use crate::zone::resolver::{ZoneResolver, RETAIN_OFFSET};
use crate::zone::TimeZone;

/// How a merge interprets its inputs.
///
/// A strict context rejects out-of-range field values; a lenient context
/// lets rules fold them into range, pushing the rollover into the merge's
/// overflow period. The context also carries the [`ZoneResolver`] used when
/// the merge has to fix a local date-time into a zone.
#[derive(Clone, Copy)]
pub struct CalendricalContext {
    strict: bool,
    resolver: &'static dyn ZoneResolver,
}

impl CalendricalContext {
    /// A strict context with the retain-offset resolver.
    pub fn strict() -> CalendricalContext {
        CalendricalContext { strict: true, resolver: &RETAIN_OFFSET }
    }

    /// A lenient context with the retain-offset resolver.
    pub fn lenient() -> CalendricalContext {
        CalendricalContext { strict: false, resolver: &RETAIN_OFFSET }
    }

    /// This context with a different zone resolver.
    pub fn with_resolver(self, resolver: &'static dyn ZoneResolver) -> CalendricalContext {
        CalendricalContext { resolver, ..self }
    }

    /// True when out-of-range inputs are rejected rather than folded.
    #[inline]
    pub const fn is_strict(&self) -> bool {
        self.strict
    }

    /// The resolver for ambiguous local date-times.
    #[inline]
    pub fn resolver(&self) -> &'static dyn ZoneResolver {
        self.resolver
    }
}

impl Default for CalendricalContext {
    fn default() -> CalendricalContext {
        CalendricalContext::strict()
    }
}

/// A single-use engine merging independently supplied field values into the
/// most complete consistent composite values.
///
/// Values are fed into the input map with [`insert`](Self::insert), then
/// [`merge`](Self::merge) — which consumes the merger, so it cannot be
/// reused or shared — interprets them, runs every rule's merge hook,
/// invokes the chronology completion, and returns the [`Merged`] result.
///
/// The merger is the one mutable object in this crate's core; everything it
/// produces is an immutable value.
pub struct CalendricalMerger {
    context: CalendricalContext,
    chronology: &'static dyn Chronology,
    input: BTreeMap<Rule, Value>,
    processing: BTreeMap<Rule, Value>,
    overflow: Period,
}

impl CalendricalMerger {
    /// Makes a merger for the ISO chronology.
    pub fn new(context: CalendricalContext) -> CalendricalMerger {
        CalendricalMerger::with_chronology(context, &iso::ISO)
    }

    /// Makes a merger completing through a specific chronology.
    pub fn with_chronology(
        context: CalendricalContext,
        chronology: &'static dyn Chronology,
    ) -> CalendricalMerger {
        CalendricalMerger {
            context,
            chronology,
            input: BTreeMap::new(),
            processing: BTreeMap::new(),
            overflow: Period::ZERO,
        }
    }

    /// The context this merger runs under.
    #[inline]
    pub const fn context(&self) -> &CalendricalContext {
        &self.context
    }

    /// Adds a raw input value for a rule. Inserting the same rule twice is
    /// allowed only with an equal value; differing values conflict
    /// immediately.
    pub fn insert(&mut self, rule: Rule, value: Value) -> Result<(), Error> {
        match self.input.get(&rule) {
            Some(stored) if *stored != value => Err(Error::new(ErrorKind::MergeConflict {
                rule: rule.id(),
                stored: stored.to_string(),
                new: value.to_string(),
            })),
            _ => {
                self.input.insert(rule, value);
                Ok(())
            }
        }
    }

    /// Adds a raw integer input value for a rule.
    pub fn insert_integer(&mut self, rule: Rule, value: i64) -> Result<(), Error> {
        self.insert(rule, Value::Integer(value))
    }

    /// The interpreted value for a rule, during merging.
    pub fn get(&self, rule: Rule) -> Option<&Value> {
        self.processing.get(&rule)
    }

    /// The interpreted integer value for a rule, during merging.
    pub fn get_integer(&self, rule: Rule) -> Option<i64> {
        self.processing.get(&rule).and_then(Value::as_integer)
    }

    /// Stores a value produced by merging other fields. An existing value
    /// for the rule must be equal, or the merge fails citing both values.
    pub fn store_merged(&mut self, rule: Rule, value: Value) -> Result<(), Error> {
        match self.processing.get(&rule) {
            Some(stored) if *stored != value => Err(Error::new(ErrorKind::MergeConflict {
                rule: rule.id(),
                stored: stored.to_string(),
                new: value.to_string(),
            })),
            Some(_) => Ok(()),
            None => {
                self.processing.insert(rule, value);
                Ok(())
            }
        }
    }

    /// Removes a field that has been consumed by a merge.
    pub fn remove_processed(&mut self, rule: Rule) {
        self.processing.remove(&rule);
    }

    /// Accumulates a rollover period from reinterpreting an out-of-range
    /// input. Two independent contributions may not set the same field to
    /// different non-zero amounts; equal contributions coincide rather than
    /// sum.
    pub fn add_to_overflow(&mut self, period: Period) -> Result<(), Error> {
        fn combine(
            field: &'static str,
            stored: i64,
            new: i64,
        ) -> Result<i64, Error> {
            if stored == 0 || new == 0 || stored == new {
                Ok(if new != 0 { new } else { stored })
            } else {
                Err(Error::new(ErrorKind::ConflictingOverflow { field, stored, new }))
            }
        }

        let years = combine("years", self.overflow.years() as i64, period.years() as i64)?;
        let months = combine("months", self.overflow.months() as i64, period.months() as i64)?;
        let days = combine("days", self.overflow.days() as i64, period.days() as i64)?;
        let hours = combine("hours", self.overflow.hours() as i64, period.hours() as i64)?;
        let minutes = combine("minutes", self.overflow.minutes() as i64, period.minutes() as i64)?;
        let seconds = combine("seconds", self.overflow.seconds() as i64, period.seconds() as i64)?;
        let nanos = combine("nanos", self.overflow.nanos(), period.nanos())?;
        self.overflow = Period::of(
            years as i32,
            months as i32,
            days as i32,
            hours as i32,
            minutes as i32,
            seconds as i32,
            nanos,
        );
        Ok(())
    }

    /// The accumulated overflow period.
    #[inline]
    pub const fn overflow(&self) -> &Period {
        &self.overflow
    }

    pub(crate) fn take_overflow(&mut self) -> Period {
        std::mem::replace(&mut self.overflow, Period::ZERO)
    }

    pub(crate) fn set_overflow(&mut self, overflow: Period) {
        self.overflow = overflow;
    }

    /// Replaces a stored value without the equality check; used by the
    /// chronology completion when it applies overflow to a composed value.
    pub(crate) fn replace(&mut self, rule: Rule, value: Value) {
        self.processing.insert(rule, value);
    }

    /// Merges the input fields into the most complete consistent result.
    ///
    /// The steps are: interpret every input into canonical in-range form;
    /// run each stored rule's merge hook, restarting whenever the field set
    /// grows; run the chronology completion; then drop any leftover field
    /// whose value is re-derivable from the composed results, failing when a
    /// derivation disagrees.
    ///
    /// # Panics
    ///
    /// Panics after 100 merge-loop iterations. The loop bound can only be
    /// hit by a defective rule implementation that keeps growing the field
    /// set, never by input data; it is a programmer error, not an input
    /// error.
    pub fn merge(mut self) -> Result<Merged, Error> {
        self.processing.clear();
        self.interpret_inputs()?;
        self.merge_loop()?;
        let chronology = self.chronology;
        chronology.merge(&mut self)?;
        self.remove_derivable()?;
        Ok(Merged { fields: self.processing, overflow: self.overflow })
    }

    fn interpret_inputs(&mut self) -> Result<(), Error> {
        let inputs: Vec<(Rule, Value)> =
            self.input.iter().map(|(rule, value)| (*rule, value.clone())).collect();
        for (rule, raw) in inputs {
            let value = self.interpret_value(rule, raw)?;
            self.processing.insert(rule, value);
        }
        Ok(())
    }

    /// Interprets one raw value: canonical in-range values pass through;
    /// everything else goes to the rule's `interpret` hook.
    fn interpret_value(&mut self, rule: Rule, raw: Value) -> Result<Value, Error> {
        if raw.kind() == rule.get().canonical_kind() {
            if let (Value::Integer(v), Some((min, max))) = (&raw, rule.get().range()) {
                if !(min..=max).contains(v) {
                    if !self.context.is_strict() {
                        if let Some(adjusted) = rule.get().interpret(self, &raw)? {
                            return Ok(adjusted);
                        }
                    }
                    return Err(Error::out_of_range(rule.id(), *v, min, max));
                }
            }
            return Ok(raw);
        }
        match rule.get().interpret(self, &raw)? {
            Some(adjusted) => Ok(adjusted),
            None => Err(Error::new(ErrorKind::UnrecognizedValue {
                rule: rule.id(),
                kind: raw.kind().name(),
            })),
        }
    }

    fn merge_loop(&mut self) -> Result<(), Error> {
        let mut processed: BTreeSet<Rule> = BTreeSet::new();
        let mut iterations = 0u32;
        loop {
            let next = self
                .processing
                .keys()
                .find(|rule| !processed.contains(*rule))
                .copied();
            let rule = match next {
                Some(rule) => rule,
                None => return Ok(()),
            };
            iterations += 1;
            if iterations > 100 {
                panic!(
                    "infinite loop blocked: merge exceeded 100 iterations; \
                     a rule keeps adding fields (defective rule implementation)"
                );
            }
            processed.insert(rule);
            rule.get().merge(self)?;
        }
    }

    /// Drops every leftover field-level entry whose value can be re-derived,
    /// equal, from the composed results; a differing derivation is a
    /// conflict between the supplied fields.
    fn remove_derivable(&mut self) -> Result<(), Error> {
        if self.processing.len() <= 1 {
            return Ok(());
        }
        let view = Merged { fields: self.processing.clone(), overflow: Period::ZERO };
        let mut redundant = Vec::new();
        for (rule, value) in &self.processing {
            if !value.kind().is_field() {
                continue;
            }
            if let Some(derived) = rule.get().derive(&view) {
                if derived == *value {
                    redundant.push(*rule);
                } else {
                    return Err(Error::new(ErrorKind::MergeConflict {
                        rule: rule.id(),
                        stored: derived.to_string(),
                        new: value.to_string(),
                    }));
                }
            }
        }
        for rule in redundant {
            self.processing.remove(&rule);
        }
        Ok(())
    }
}

/// The immutable result of a merge: the final field map plus any overflow
/// the completion step could not fold into a date.
#[derive(Clone, Debug)]
pub struct Merged {
    fields: BTreeMap<Rule, Value>,
    overflow: Period,
}

impl Merged {
    /// The value for a rule: stored directly, or derived from the composed
    /// results.
    pub fn get(&self, rule: Rule) -> Option<Value> {
        self.fields.get(&rule).cloned().or_else(|| rule.get().derive(self))
    }

    /// Like [`get`](Self::get), but failing with an unsupported-rule error
    /// when the value cannot be produced.
    pub fn get_or_err(&self, rule: Rule) -> Result<Value, Error> {
        self.get(rule)
            .ok_or_else(|| Error::new(ErrorKind::UnsupportedRule { rule: rule.id() }))
    }

    /// Overflow left over after completion, zero in the common case.
    #[inline]
    pub const fn overflow(&self) -> &Period {
        &self.overflow
    }

    /// The stored rule-to-value entries.
    pub fn entries(&self) -> impl Iterator<Item = (&Rule, &Value)> {
        self.fields.iter()
    }
}

impl Calendrical for Merged {
    fn date(&self) -> Option<Date> {
        self.fields.values().find_map(|value| match value {
            Value::Zoned(zdt) => Some(zdt.datetime().date()),
            Value::OffsetDateTime(odt) => Some(odt.datetime().date()),
            Value::DateTime(dt) => Some(dt.date()),
            Value::Date(date) => Some(*date),
            _ => None,
        })
    }

    fn time(&self) -> Option<Time> {
        self.fields.values().find_map(|value| match value {
            Value::Zoned(zdt) => Some(zdt.datetime().time()),
            Value::OffsetDateTime(odt) => Some(odt.datetime().time()),
            Value::DateTime(dt) => Some(dt.time()),
            Value::Time(time) => Some(*time),
            _ => None,
        })
    }

    fn offset(&self) -> Option<ZoneOffset> {
        self.fields.values().find_map(|value| match value {
            Value::Zoned(zdt) => Some(zdt.offset()),
            Value::OffsetDateTime(odt) => Some(odt.offset()),
            Value::Offset(offset) => Some(*offset),
            _ => None,
        })
    }

    fn zone(&self) -> Option<TimeZone> {
        self.fields.values().find_map(|value| match value {
            Value::Zoned(zdt) => Some(zdt.zone().clone()),
            Value::Zone(zone) => Some(zone.clone()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::iso;

    #[test]
    fn test_insert_conflict_detection() {
        let mut merger = CalendricalMerger::new(CalendricalContext::strict());
        merger.insert_integer(iso::YEAR, 2020).unwrap();
        merger.insert_integer(iso::YEAR, 2020).unwrap();
        let err = merger.insert_integer(iso::YEAR, 2021).unwrap_err();
        assert!(err.is_merge_conflict());
        assert_eq!(err.to_string(), "conflicting values for ISO.Year: 2020 and 2021");
    }

    #[test]
    fn test_overflow_conflict_detection() {
        let mut merger = CalendricalMerger::new(CalendricalContext::lenient());
        merger.add_to_overflow(Period::of_years(1)).unwrap();
        // equal contribution coincides
        merger.add_to_overflow(Period::of_years(1)).unwrap();
        assert_eq!(merger.overflow().years(), 1);
        // an independent different contribution conflicts
        let err = merger.add_to_overflow(Period::of_years(2)).unwrap_err();
        assert!(err.is_merge_conflict());
        // a different field is independent
        merger.add_to_overflow(Period::of_days(3)).unwrap();
        assert_eq!(merger.overflow().days(), 3);
    }

    #[test]
    fn test_strict_rejects_out_of_range() {
        let mut merger = CalendricalMerger::new(CalendricalContext::strict());
        merger.insert_integer(iso::MONTH_OF_YEAR, 13).unwrap();
        let err = merger.merge().unwrap_err();
        assert!(err.is_invalid_value());

        let mut merger = CalendricalMerger::new(CalendricalContext::strict());
        merger.insert_integer(iso::HOUR_OF_DAY, 24).unwrap();
        assert!(merger.merge().is_err());
    }

    #[test]
    fn test_unrecognized_value_kind() {
        let mut merger = CalendricalMerger::new(CalendricalContext::strict());
        merger
            .insert(iso::YEAR, Value::Time(Time::NOON))
            .unwrap();
        let err = merger.merge().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unrecognized value kind time for ISO.Year"
        );
    }

    #[test]
    fn test_merged_exposes_overflow() {
        // a lenient hour 26 with no date: one day of overflow remains
        let mut merger = CalendricalMerger::new(CalendricalContext::lenient());
        merger.insert_integer(iso::HOUR_OF_DAY, 26).unwrap();
        let merged = merger.merge().unwrap();
        assert_eq!(merged.get(iso::TIME), Some(Value::Time(Time::of(2, 0).unwrap())));
        assert_eq!(merged.overflow().days(), 1);
    }
}
