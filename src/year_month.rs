// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A year paired with a month, such as 2020-02.

use core::fmt;
use core::str::FromStr;

use crate::date::{is_leap_year, write_year, Date, MAX_YEAR, MIN_YEAR};
use crate::error::Error;
use crate::format;
use crate::month::Month;

/// A year and month without a day, such as 2020-02.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// Makes a `YearMonth` from a year and month number.
    pub fn of(year: i32, month: i64) -> Result<YearMonth, Error> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::out_of_range("year", year as i64, MIN_YEAR as i64, MAX_YEAR as i64));
        }
        Ok(YearMonth { year, month: Month::of(month)? })
    }

    /// The year field.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The month field.
    #[inline]
    pub const fn month(&self) -> Month {
        self.month
    }

    /// The length of this month in days, accounting for leap years.
    pub fn length(&self) -> u32 {
        self.month.length(is_leap_year(self.year))
    }

    /// Combines with a day-of-month to make a `Date`, validating the day.
    pub fn at_day(&self, day: i64) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Adds a number of months.
    pub fn plus_months(&self, months: i64) -> Result<YearMonth, Error> {
        let total = (self.year as i64)
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.month.number() as i64 - 1))
            .and_then(|m| m.checked_add(months))
            .ok_or_else(|| Error::overflow("months"))?;
        let year = total.div_euclid(12);
        if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
            return Err(Error::out_of_range("year", year, MIN_YEAR as i64, MAX_YEAR as i64));
        }
        Ok(YearMonth {
            year: year as i32,
            month: Month::of(total.rem_euclid(12) + 1).expect("month in 1..=12"),
        })
    }

    /// Adds a number of years.
    pub fn plus_years(&self, years: i64) -> Result<YearMonth, Error> {
        self.plus_months(years.checked_mul(12).ok_or_else(|| Error::overflow("months"))?)
    }
}

impl fmt::Display for YearMonth {
    /// ISO-8601 form `yyyy-MM`, with the year sign-extended beyond four
    /// digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}", self.month.number())
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    fn from_str(s: &str) -> Result<YearMonth, Error> {
        format::parse_year_month(s)
    }
}
