// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Policies for resolving local date-times that fall into a gap or overlap
//! of a zone's offset history.

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::{Error, ErrorKind};
use crate::offset_datetime::OffsetDateTime;
use crate::zone::{OffsetInfo, ZoneOffsetTransition, ZoneRules};

/// A strategy for fixing an ambiguous or skipped local date-time to a
/// concrete offset.
///
/// `resolve` is a pure function of its inputs: implementations hold no
/// state, and the rules are consulted afresh on every call, since the same
/// zone can carry different transition sets under different rules versions.
/// A local time valid at exactly one offset resolves trivially; gaps and
/// overlaps dispatch to the policy hooks.
pub trait ZoneResolver: Send + Sync {
    /// Resolves a local date-time against the zone rules. `previous` is the
    /// offset date-time the operation started from, when there is one (it
    /// feeds the retain-offset policy).
    fn resolve(
        &self,
        rules: &dyn ZoneRules,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        match rules.offset_info(local) {
            OffsetInfo::Unambiguous(offset) => Ok(OffsetDateTime::new(local, offset)),
            OffsetInfo::Transition(transition) => {
                if transition.is_gap() {
                    self.handle_gap(&transition, local, previous)
                } else {
                    self.handle_overlap(&transition, local, previous)
                }
            }
        }
    }

    /// Picks a result for a local date-time inside a gap.
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error>;

    /// Picks a result for a local date-time inside an overlap.
    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error>;
}

fn gap_error(transition: &ZoneOffsetTransition, local: DateTime) -> Error {
    Error::new(ErrorKind::SkippedLocalTime {
        local: local.to_string(),
        transition: transition.to_string(),
    })
}

fn overlap_error(transition: &ZoneOffsetTransition, local: DateTime) -> Error {
    Error::new(ErrorKind::AmbiguousLocalTime {
        local: local.to_string(),
        transition: transition.to_string(),
    })
}

/// The instant exactly at the transition, expressed at the after-offset.
fn at_transition(transition: &ZoneOffsetTransition) -> OffsetDateTime {
    OffsetDateTime::new(transition.local_after(), transition.offset_after())
}

/// Fails on both gaps and overlaps with a descriptive error.
pub struct Strict;

impl ZoneResolver for Strict {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        Err(gap_error(transition, local))
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        Err(overlap_error(transition, local))
    }
}

/// Resolves to the moment just before the transition: one nanosecond before
/// it for a gap, the earlier offset for an overlap.
pub struct PreTransition;

impl ZoneResolver for PreTransition {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        _local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        let just_before = transition.local_before().minus_duration(Duration::of_nanos(1))?;
        Ok(OffsetDateTime::new(just_before, transition.offset_before()))
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(local, transition.offset_before()))
    }
}

/// Resolves to the moment at or after the transition: the transition instant
/// itself for a gap, the later offset for an overlap.
pub struct PostTransition;

impl ZoneResolver for PostTransition {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        _local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        Ok(at_transition(transition))
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        Ok(OffsetDateTime::new(local, transition.offset_after()))
    }
}

/// Gaps resolve after the transition, overlaps to the earlier offset. This
/// is the conventional choice for "start of day in a zone".
pub struct PostGapPreOverlap;

impl ZoneResolver for PostGapPreOverlap {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        PostTransition.handle_gap(transition, local, previous)
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        PreTransition.handle_overlap(transition, local, previous)
    }
}

/// Keeps the previous offset through an overlap when it is still one of the
/// two valid offsets; otherwise behaves like [`PostTransition`]. This is the
/// policy date-time arithmetic uses so that adding a duration across a
/// transition keeps the wall-clock-intuitive result.
pub struct RetainOffset;

impl ZoneResolver for RetainOffset {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        PostTransition.handle_gap(transition, local, previous)
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        if let Some(previous) = previous {
            if transition.is_valid_offset(previous.offset()) {
                return Ok(OffsetDateTime::new(local, previous.offset()));
            }
        }
        PostTransition.handle_overlap(transition, local, previous)
    }
}

/// Shifts a gapped local time forward by exactly the gap's length; overlaps
/// resolve to the later offset.
pub struct PushForward;

impl ZoneResolver for PushForward {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        _previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        let shifted = local.plus_duration(transition.size())?;
        Ok(OffsetDateTime::new(shifted, transition.offset_after()))
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        PostTransition.handle_overlap(transition, local, previous)
    }
}

/// Combines an independently chosen gap policy and overlap policy.
pub struct Combination {
    /// The policy consulted for gaps.
    pub gap: &'static dyn ZoneResolver,
    /// The policy consulted for overlaps.
    pub overlap: &'static dyn ZoneResolver,
}

impl ZoneResolver for Combination {
    fn handle_gap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        self.gap.handle_gap(transition, local, previous)
    }

    fn handle_overlap(
        &self,
        transition: &ZoneOffsetTransition,
        local: DateTime,
        previous: Option<&OffsetDateTime>,
    ) -> Result<OffsetDateTime, Error> {
        self.overlap.handle_overlap(transition, local, previous)
    }
}

/// The strict resolver.
pub static STRICT: Strict = Strict;
/// The pre-transition resolver.
pub static PRE_TRANSITION: PreTransition = PreTransition;
/// The post-transition resolver.
pub static POST_TRANSITION: PostTransition = PostTransition;
/// The post-gap-pre-overlap resolver.
pub static POST_GAP_PRE_OVERLAP: PostGapPreOverlap = PostGapPreOverlap;
/// The retain-offset resolver.
pub static RETAIN_OFFSET: RetainOffset = RetainOffset;
/// The push-forward resolver.
pub static PUSH_FORWARD: PushForward = PushForward;
