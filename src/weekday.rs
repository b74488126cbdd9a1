// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The day of the week.

use core::fmt;

use crate::error::Error;

/// A day of the week, `Monday` through `Sunday`.
///
/// The ISO-8601 numbering (Monday = 1 through Sunday = 7) is the only
/// numbering used in this crate; locale-dependent week starts belong to a
/// formatting layer. The enum deliberately does not implement `PartialOrd`,
/// since the ordering of days depends on which day a week starts with.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum DayOfWeek {
    /// Monday, ISO day-of-week 1.
    Monday = 0,
    /// Tuesday, ISO day-of-week 2.
    Tuesday = 1,
    /// Wednesday, ISO day-of-week 3.
    Wednesday = 2,
    /// Thursday, ISO day-of-week 4.
    Thursday = 3,
    /// Friday, ISO day-of-week 5.
    Friday = 4,
    /// Saturday, ISO day-of-week 6.
    Saturday = 5,
    /// Sunday, ISO day-of-week 7.
    Sunday = 6,
}

impl DayOfWeek {
    /// Obtains a `DayOfWeek` from its ISO-8601 number, Monday = 1 through
    /// Sunday = 7.
    pub fn of(number: i64) -> Result<DayOfWeek, Error> {
        match number {
            1 => Ok(DayOfWeek::Monday),
            2 => Ok(DayOfWeek::Tuesday),
            3 => Ok(DayOfWeek::Wednesday),
            4 => Ok(DayOfWeek::Thursday),
            5 => Ok(DayOfWeek::Friday),
            6 => Ok(DayOfWeek::Saturday),
            7 => Ok(DayOfWeek::Sunday),
            n => Err(Error::out_of_range("day-of-week", n, 1, 7)),
        }
    }

    /// The ISO-8601 number of this day, Monday = 1 through Sunday = 7.
    #[inline]
    pub const fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// The next day of the week, wrapping from Sunday to Monday.
    #[inline]
    pub const fn next(&self) -> DayOfWeek {
        DayOfWeek::VALUES[(*self as usize + 1) % 7]
    }

    /// The previous day of the week, wrapping from Monday to Sunday.
    #[inline]
    pub const fn previous(&self) -> DayOfWeek {
        DayOfWeek::VALUES[(*self as usize + 6) % 7]
    }

    /// The number of days from `other` forward to this day, in `0..7`.
    #[inline]
    pub const fn days_since(&self, other: DayOfWeek) -> u32 {
        (*self as u32 + 7 - other as u32) % 7
    }

    const VALUES: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];
}

/// Any day of the week can be represented as its ISO-8601 number from 1 to
/// 7. Prefer the explicit methods where possible.
impl num_traits::FromPrimitive for DayOfWeek {
    #[inline]
    fn from_i64(n: i64) -> Option<DayOfWeek> {
        DayOfWeek::of(n).ok()
    }

    #[inline]
    fn from_u64(n: u64) -> Option<DayOfWeek> {
        i64::try_from(n).ok().and_then(|n| DayOfWeek::of(n).ok())
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        })
    }
}
