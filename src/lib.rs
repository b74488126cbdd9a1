// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Calendrical field engine with date and time arithmetic.
//!
//! calclock models points and intervals on civil time-lines — [`Instant`],
//! [`Date`], [`Time`], [`DateTime`], offset and zoned variants, [`Period`]
//! and [`Duration`] — and provides conversion, arithmetic, comparison and
//! ISO-8601 text handling for them, for the ISO calendar and the Coptic
//! calendar.
//!
//! At its core is a small constraint-propagation engine: every calendrical
//! quantity is described by a [`CalendricalRule`](field::CalendricalRule),
//! and a [`CalendricalMerger`](field::merger::CalendricalMerger) reconciles
//! any bag of independently supplied field values into the most complete
//! consistent composite value, detecting conflicts along the way:
//!
//! ```
//! use calclock::chronology::iso;
//! use calclock::field::merger::{CalendricalContext, CalendricalMerger};
//!
//! let mut merger = CalendricalMerger::new(CalendricalContext::strict());
//! merger.insert_integer(iso::YEAR, 2020)?;
//! merger.insert_integer(iso::MONTH_OF_YEAR, 2)?;
//! merger.insert_integer(iso::DAY_OF_MONTH, 29)?;
//! let merged = merger.merge()?;
//! assert_eq!(merged.get(iso::DATE).unwrap().to_string(), "2020-02-29");
//! # Ok::<(), calclock::Error>(())
//! ```
//!
//! Time-zone support follows the same open design: zone rules are an opaque
//! capability ([`zone::ZoneRules`]), and local times that fall into a
//! daylight-saving gap or overlap are fixed to a concrete offset by a
//! pluggable [`zone::resolver::ZoneResolver`] policy.
//!
//! The time-scale is UTC-SLS: every day is exactly 86,400 seconds and leap
//! seconds are deliberately ignored.
//!
//! All value types are immutable and freely shareable across threads; the
//! merger is the one mutable object, consumed by its own
//! [`merge`](field::merger::CalendricalMerger::merge).

#![deny(missing_docs)]
#![warn(unreachable_pub)]

mod date;
mod datetime;
mod duration;
mod error;
mod format;
mod instant;
mod month;
mod offset;
mod offset_date;
mod offset_datetime;
mod offset_time;
mod period;
mod time;
mod weekday;
mod year_month;
mod zoned;

pub mod chronology;
pub mod field;
pub mod zone;

#[cfg(feature = "serde")]
mod serde;

pub use crate::date::{is_leap_year, Date, MAX_YEAR, MIN_YEAR};
pub use crate::datetime::DateTime;
pub use crate::duration::Duration;
pub use crate::error::Error;
pub use crate::instant::Instant;
pub use crate::month::{Month, Quarter};
pub use crate::offset::ZoneOffset;
pub use crate::offset_date::OffsetDate;
pub use crate::offset_datetime::OffsetDateTime;
pub use crate::offset_time::OffsetTime;
pub use crate::period::Period;
pub use crate::time::{AmPm, Overflow, Time};
pub use crate::weekday::DayOfWeek;
pub use crate::year_month::YearMonth;
pub use crate::zone::TimeZone;
pub use crate::zoned::ZonedDateTime;
