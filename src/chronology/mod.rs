// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Calendar systems.
//!
//! A [`Chronology`] names a calendar system, owns its field rules, and
//! supplies the completion step of a merge: combining the field values left
//! after the per-rule merge loop into the most composite values the
//! chronology can build.

use crate::error::Error;
use crate::field::merger::CalendricalMerger;

pub mod coptic;
pub mod iso;

/// A calendar system owning a set of field rules.
pub trait Chronology: Send + Sync + 'static {
    /// The chronology name, such as `ISO`, which prefixes its rule
    /// identifiers.
    fn name(&self) -> &'static str;

    /// The chronology-specific completion step of a merge: combines field
    /// values in the merger into composite values (dates, times and their
    /// stacked forms), consuming the fields it uses.
    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error>;
}
