// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Time-zones and the rules describing their offset history.
//!
//! A [`TimeZone`] pairs an identifier with a [`ZoneRules`] capability that
//! maps instants and local date-times to offsets. The rules implementations
//! here are deliberately simple: a fixed offset, and an ordered transition
//! list of the shape a TZDB compiler would produce. Where in the offset
//! history a local date-time falls is reported through [`OffsetInfo`]:
//! either a single valid offset, or the [`ZoneOffsetTransition`] whose gap
//! or overlap the local time hit.

use std::fmt;
use std::sync::Arc;

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::{Error, ErrorKind};
use crate::instant::Instant;
use crate::offset::ZoneOffset;

pub mod registry;
pub mod resolver;

/// The result of mapping a local date-time onto a zone's offset history.
///
/// A local time is either valid at exactly one offset, or it fell into a
/// transition: a gap (spring-forward, the local time never happened) or an
/// overlap (fall-back, the local time happened twice).
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OffsetInfo {
    /// The local time maps to a single offset.
    Unambiguous(ZoneOffset),
    /// The local time fell into the gap or overlap of this transition.
    Transition(ZoneOffsetTransition),
}

impl OffsetInfo {
    /// Returns the single offset, or `None` for a gap or overlap.
    pub fn single(&self) -> Option<ZoneOffset> {
        match self {
            OffsetInfo::Unambiguous(offset) => Some(*offset),
            OffsetInfo::Transition(_) => None,
        }
    }
}

/// A change of offset in a zone's history.
///
/// The transition is anchored at `local`, the local date-time at which the
/// change takes effect expressed with the *before* offset. When the offset
/// increases the transition is a gap; when it decreases, an overlap.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ZoneOffsetTransition {
    local: DateTime,
    before: ZoneOffset,
    after: ZoneOffset,
}

impl ZoneOffsetTransition {
    /// Makes a transition from the pre-transition local date-time and the
    /// two offsets, which must differ.
    pub fn new(
        local: DateTime,
        before: ZoneOffset,
        after: ZoneOffset,
    ) -> Result<ZoneOffsetTransition, Error> {
        if before == after {
            return Err(Error::invalid_field(
                "zone-offset-transition",
                after.total_seconds() as i64,
                "offsets before and after a transition must differ".to_owned(),
            ));
        }
        Ok(ZoneOffsetTransition { local, before, after })
    }

    /// The instant the transition takes effect.
    pub fn instant(&self) -> Instant {
        Instant::from_epoch_seconds(self.local.to_epoch_second(self.before))
    }

    /// The local date-time just before the transition, at the before-offset.
    #[inline]
    pub const fn local_before(&self) -> DateTime {
        self.local
    }

    /// The local date-time at the transition instant, at the after-offset.
    pub fn local_after(&self) -> DateTime {
        self.local
            .plus_duration(self.size())
            .expect("transition shift of at most 36 hours stays in range")
    }

    /// The offset in force before the transition.
    #[inline]
    pub const fn offset_before(&self) -> ZoneOffset {
        self.before
    }

    /// The offset in force after the transition.
    #[inline]
    pub const fn offset_after(&self) -> ZoneOffset {
        self.after
    }

    /// The signed size of the transition: positive for a gap, negative for
    /// an overlap.
    pub fn size(&self) -> Duration {
        Duration::of_seconds((self.after.total_seconds() - self.before.total_seconds()) as i64)
    }

    /// True when local times were skipped (the offset increased).
    pub fn is_gap(&self) -> bool {
        self.after > self.before
    }

    /// True when local times repeat (the offset decreased).
    pub fn is_overlap(&self) -> bool {
        self.after < self.before
    }

    /// True when `offset` is valid on at least one side of this transition
    /// for a local time inside it. Gaps have no valid offset.
    pub fn is_valid_offset(&self, offset: ZoneOffset) -> bool {
        self.is_overlap() && (offset == self.before || offset == self.after)
    }

    /// True when the local date-time falls inside this transition's gap or
    /// overlap window.
    pub fn contains_local(&self, local: DateTime) -> bool {
        let (start, end) = if self.is_gap() {
            (self.local_before(), self.local_after())
        } else {
            (self.local_after(), self.local_before())
        };
        local >= start && local < end
    }
}

impl fmt::Display for ZoneOffsetTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transition[{} at {}{} to {}]",
            if self.is_gap() { "gap" } else { "overlap" },
            self.local,
            self.before,
            self.after
        )
    }
}

/// The offset history of a time-zone.
///
/// Implementations are immutable and shared; the core consumes them as an
/// opaque capability supplied by a zone-data provider.
pub trait ZoneRules: fmt::Debug + Send + Sync {
    /// The offset in force at an instant.
    fn offset_at(&self, instant: Instant) -> ZoneOffset;

    /// Classifies a local date-time against the offset history.
    fn offset_info(&self, local: DateTime) -> OffsetInfo;

    /// The ordered transition history, empty for fixed zones.
    fn transitions(&self) -> Vec<ZoneOffsetTransition>;

    /// True when the offset is valid for the local date-time.
    fn is_valid_offset(&self, local: DateTime, offset: ZoneOffset) -> bool {
        match self.offset_info(local) {
            OffsetInfo::Unambiguous(valid) => valid == offset,
            OffsetInfo::Transition(transition) => transition.is_valid_offset(offset),
        }
    }

    /// True when this zone never changes offset.
    fn is_fixed(&self) -> bool {
        false
    }
}

/// Rules for a zone whose offset never changes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FixedRules {
    offset: ZoneOffset,
}

impl FixedRules {
    /// Makes fixed rules for the given offset.
    pub const fn new(offset: ZoneOffset) -> FixedRules {
        FixedRules { offset }
    }
}

impl ZoneRules for FixedRules {
    fn offset_at(&self, _instant: Instant) -> ZoneOffset {
        self.offset
    }

    fn offset_info(&self, _local: DateTime) -> OffsetInfo {
        OffsetInfo::Unambiguous(self.offset)
    }

    fn transitions(&self) -> Vec<ZoneOffsetTransition> {
        Vec::new()
    }

    fn is_fixed(&self) -> bool {
        true
    }
}

/// Rules backed by an ordered list of offset transitions.
///
/// `standard` is the offset in force before the first transition. Each
/// transition must start from the offset the previous one ended with, and
/// the transition instants must strictly increase.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TransitionRules {
    standard: ZoneOffset,
    transitions: Vec<ZoneOffsetTransition>,
}

impl TransitionRules {
    /// Makes transition-list rules, validating continuity and ordering.
    pub fn new(
        standard: ZoneOffset,
        transitions: Vec<ZoneOffsetTransition>,
    ) -> Result<TransitionRules, Error> {
        let mut current = standard;
        let mut previous_instant: Option<Instant> = None;
        for transition in &transitions {
            if transition.offset_before() != current {
                return Err(Error::invalid_field(
                    "zone-transition-list",
                    transition.offset_before().total_seconds() as i64,
                    format!("transition {} does not start from offset {}", transition, current),
                ));
            }
            let instant = transition.instant();
            if let Some(previous) = previous_instant {
                if instant <= previous {
                    return Err(Error::invalid_field(
                        "zone-transition-list",
                        instant.epoch_seconds(),
                        format!("transition {} is not after its predecessor", transition),
                    ));
                }
            }
            previous_instant = Some(instant);
            current = transition.offset_after();
        }
        Ok(TransitionRules { standard, transitions })
    }
}

impl ZoneRules for TransitionRules {
    fn offset_at(&self, instant: Instant) -> ZoneOffset {
        let mut offset = self.standard;
        for transition in &self.transitions {
            if instant < transition.instant() {
                break;
            }
            offset = transition.offset_after();
        }
        offset
    }

    fn offset_info(&self, local: DateTime) -> OffsetInfo {
        let mut offset = self.standard;
        for transition in &self.transitions {
            if transition.contains_local(local) {
                return OffsetInfo::Transition(transition.clone());
            }
            // strictly before both sides of the transition: settled
            let window_start = transition.local_before().min(transition.local_after());
            if local < window_start {
                break;
            }
            offset = transition.offset_after();
        }
        OffsetInfo::Unambiguous(offset)
    }

    fn transitions(&self) -> Vec<ZoneOffsetTransition> {
        self.transitions.clone()
    }
}

/// A time-zone: an identifier plus the rules resolving its offsets.
///
/// Fixed-offset zones are created directly; region zones come from a
/// [`registry::ZoneRulesRegistry`] lookup. Equality and hashing use the
/// identifier only.
#[derive(Clone, Debug)]
pub struct TimeZone {
    id: String,
    rules: Arc<dyn ZoneRules>,
}

impl TimeZone {
    /// The UTC zone.
    pub fn utc() -> TimeZone {
        TimeZone::fixed(ZoneOffset::UTC)
    }

    /// A zone fixed at the given offset, with id `UTC` or `UTC±HH:mm`.
    pub fn fixed(offset: ZoneOffset) -> TimeZone {
        let id = if offset == ZoneOffset::UTC {
            "UTC".to_owned()
        } else {
            format!("UTC{}", offset)
        };
        TimeZone { id, rules: Arc::new(FixedRules::new(offset)) }
    }

    /// A zone from an identifier and externally supplied rules.
    pub fn of_rules(id: &str, rules: Arc<dyn ZoneRules>) -> Result<TimeZone, Error> {
        if id.is_empty() {
            return Err(Error::new(ErrorKind::InvalidZoneId {
                id: id.to_owned(),
                reason: "identifier must not be empty",
            }));
        }
        Ok(TimeZone { id: id.to_owned(), rules })
    }

    /// Parses a fixed-offset zone identifier: `Z`, `UTC`, `UTC±HH:mm[:ss]`
    /// or a bare `±HH:mm[:ss]`. Region identifiers need a registry lookup.
    pub fn of(id: &str) -> Result<TimeZone, Error> {
        if id == "Z" || id == "UTC" {
            return Ok(TimeZone::utc());
        }
        let tail = id.strip_prefix("UTC").unwrap_or(id);
        match tail.parse::<ZoneOffset>() {
            Ok(offset) => Ok(TimeZone::fixed(offset)),
            Err(_) => Err(Error::new(ErrorKind::UnknownZone { id: id.to_owned() })),
        }
    }

    /// The zone identifier.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The offset rules for this zone.
    #[inline]
    pub fn rules(&self) -> &Arc<dyn ZoneRules> {
        &self.rules
    }
}

impl PartialEq for TimeZone {
    fn eq(&self, other: &TimeZone) -> bool {
        self.id == other.id
    }
}

impl Eq for TimeZone {}

impl std::hash::Hash for TimeZone {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::date::Date;
    use crate::time::Time;

    /// A zone with a spring-forward gap 01:00→02:00 on 2020-03-29 and a
    /// fall-back overlap 02:00→01:00 on 2020-10-25, like central Europe.
    pub(crate) fn dst_rules() -> TransitionRules {
        let plus_one = ZoneOffset::of_hours(1).unwrap();
        let plus_two = ZoneOffset::of_hours(2).unwrap();
        let spring = ZoneOffsetTransition::new(
            DateTime::new(Date::from_ymd(2020, 3, 29).unwrap(), Time::of(1, 0).unwrap()),
            plus_one,
            plus_two,
        )
        .unwrap();
        let fall = ZoneOffsetTransition::new(
            DateTime::new(Date::from_ymd(2020, 10, 25).unwrap(), Time::of(2, 0).unwrap()),
            plus_two,
            plus_one,
        )
        .unwrap();
        TransitionRules::new(plus_one, vec![spring, fall]).unwrap()
    }
}
