// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The month of the year and the quarter of the year.

use core::fmt;

use crate::error::Error;

/// A month of the year in the ISO-8601 calendar, `January` through
/// `December`, numbered 1 through 12.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum Month {
    /// January, month 1, 31 days.
    January = 0,
    /// February, month 2, 28 or 29 days.
    February = 1,
    /// March, month 3, 31 days.
    March = 2,
    /// April, month 4, 30 days.
    April = 3,
    /// May, month 5, 31 days.
    May = 4,
    /// June, month 6, 30 days.
    June = 5,
    /// July, month 7, 31 days.
    July = 6,
    /// August, month 8, 31 days.
    August = 7,
    /// September, month 9, 30 days.
    September = 8,
    /// October, month 10, 31 days.
    October = 9,
    /// November, month 11, 30 days.
    November = 10,
    /// December, month 12, 31 days.
    December = 11,
}

impl Month {
    /// Obtains a `Month` from its number, January = 1 through December = 12.
    pub fn of(number: i64) -> Result<Month, Error> {
        if !(1..=12).contains(&number) {
            return Err(Error::out_of_range("month-of-year", number, 1, 12));
        }
        Ok(Month::VALUES[number as usize - 1])
    }

    /// The number of this month, January = 1 through December = 12.
    #[inline]
    pub const fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// The length of this month in days for the given leap-year flag.
    pub const fn length(&self, leap_year: bool) -> u32 {
        match *self {
            Month::February => {
                if leap_year {
                    29
                } else {
                    28
                }
            }
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }

    /// Days in the year before the first day of this month.
    pub const fn days_before(&self, leap_year: bool) -> u32 {
        // cumulative lengths for a common year; February adjustment after
        const BEFORE: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
        let base = BEFORE[*self as usize];
        if leap_year && (*self as u32) >= 2 {
            base + 1
        } else {
            base
        }
    }

    /// The month `months` after this one, wrapping within the year.
    pub const fn plus(&self, months: i64) -> Month {
        let idx = ((*self as i64 + months % 12) + 12) % 12;
        Month::VALUES[idx as usize]
    }

    /// The next month, wrapping from December to January.
    #[inline]
    pub const fn next(&self) -> Month {
        self.plus(1)
    }

    /// The previous month, wrapping from January to December.
    #[inline]
    pub const fn previous(&self) -> Month {
        self.plus(-1)
    }

    /// The quarter of the year this month falls in.
    pub const fn quarter(&self) -> Quarter {
        match *self {
            Month::January | Month::February | Month::March => Quarter::Q1,
            Month::April | Month::May | Month::June => Quarter::Q2,
            Month::July | Month::August | Month::September => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// The month of the quarter, 1 through 3.
    #[inline]
    pub const fn month_of_quarter(&self) -> u32 {
        (*self as u32) % 3 + 1
    }

    const VALUES: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];
}

/// Any month can be represented as its number from 1 to 12. Prefer the
/// explicit methods where possible.
impl num_traits::FromPrimitive for Month {
    #[inline]
    fn from_i64(n: i64) -> Option<Month> {
        Month::of(n).ok()
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Month> {
        i64::try_from(n).ok().and_then(|n| Month::of(n).ok())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        })
    }
}

/// A quarter of the year, Q1 through Q4.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum Quarter {
    /// January through March, quarter 1.
    Q1 = 0,
    /// April through June, quarter 2.
    Q2 = 1,
    /// July through September, quarter 3.
    Q3 = 2,
    /// October through December, quarter 4.
    Q4 = 3,
}

impl Quarter {
    /// Obtains a `Quarter` from its number, 1 through 4.
    pub fn of(number: i64) -> Result<Quarter, Error> {
        match number {
            1 => Ok(Quarter::Q1),
            2 => Ok(Quarter::Q2),
            3 => Ok(Quarter::Q3),
            4 => Ok(Quarter::Q4),
            n => Err(Error::out_of_range("quarter-of-year", n, 1, 4)),
        }
    }

    /// The number of this quarter, 1 through 4.
    #[inline]
    pub const fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// The first month of this quarter.
    pub const fn first_month(&self) -> Month {
        match *self {
            Quarter::Q1 => Month::January,
            Quarter::Q2 => Month::April,
            Quarter::Q3 => Month::July,
            Quarter::Q4 => Month::October,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::{Month, Quarter};

    #[test]
    fn test_of_and_number() {
        for n in 1..=12 {
            assert_eq!(Month::of(n).unwrap().number() as i64, n);
        }
        assert!(Month::of(0).is_err());
        assert!(Month::of(13).is_err());
    }

    #[test]
    fn test_length() {
        assert_eq!(Month::January.length(false), 31);
        assert_eq!(Month::February.length(false), 28);
        assert_eq!(Month::February.length(true), 29);
        assert_eq!(Month::April.length(true), 30);
        assert_eq!(Month::December.length(false), 31);
    }

    #[test]
    fn test_days_before() {
        assert_eq!(Month::January.days_before(false), 0);
        assert_eq!(Month::March.days_before(false), 59);
        assert_eq!(Month::March.days_before(true), 60);
        assert_eq!(Month::December.days_before(false), 334);
        assert_eq!(Month::December.days_before(true), 335);
    }

    #[test]
    fn test_plus_wraps() {
        assert_eq!(Month::December.plus(1), Month::January);
        assert_eq!(Month::January.plus(-1), Month::December);
        assert_eq!(Month::June.plus(25), Month::July);
        assert_eq!(Month::June.plus(-25), Month::May);
    }

    #[test]
    fn test_quarters() {
        assert_eq!(Month::January.quarter(), Quarter::Q1);
        assert_eq!(Month::March.quarter(), Quarter::Q1);
        assert_eq!(Month::April.quarter(), Quarter::Q2);
        assert_eq!(Month::December.quarter(), Quarter::Q4);

        assert_eq!(Month::January.month_of_quarter(), 1);
        assert_eq!(Month::February.month_of_quarter(), 2);
        assert_eq!(Month::March.month_of_quarter(), 3);
        assert_eq!(Month::April.month_of_quarter(), 1);

        for n in 1..=4 {
            assert_eq!(Quarter::of(n).unwrap().number() as i64, n);
        }
        assert!(Quarter::of(5).is_err());
        assert_eq!(Quarter::Q3.first_month(), Month::July);
    }
}
