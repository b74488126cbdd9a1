// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! ISO-8601 calendar date without a time or time-zone.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::format;
use crate::month::Month;
use crate::period::Period;
use crate::weekday::DayOfWeek;

/// The minimum supported year.
pub const MIN_YEAR: i32 = -999_999_999;
/// The maximum supported year.
pub const MAX_YEAR: i32 = 999_999_999;

/// Returns true for a leap year in the proleptic Gregorian calendar.
///
/// A year is a leap year when divisible by 4, except century years not
/// divisible by 400.
#[inline]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// A date in the ISO-8601 (proleptic Gregorian) calendar, such as
/// 2020-02-29.
///
/// The supported year range is ±999,999,999. Conversion to and from an
/// epoch-day count (1970-01-01 is day 0) drives all day-level arithmetic.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct Date {
    year: i32,
    month: Month,
    day: u8,
}

impl Date {
    /// Makes a `Date` from a year, month number (1-12) and day-of-month.
    ///
    /// Fails when the day is invalid for the month and year, reporting the
    /// offending combination.
    pub fn from_ymd(year: i32, month: i64, day: i64) -> Result<Date, Error> {
        let month = Month::of(month)?;
        Date::new(year, month, day)
    }

    /// Makes a `Date` from a year, `Month` and day-of-month.
    pub fn new(year: i32, month: Month, day: i64) -> Result<Date, Error> {
        check_year(year)?;
        let len = month.length(is_leap_year(year)) as i64;
        if !(1..=len).contains(&day) {
            return Err(Error::invalid_field(
                "day-of-month",
                day,
                format!("{} {} has {} days", month, year, len),
            ));
        }
        Ok(Date { year, month, day: day as u8 })
    }

    /// Makes a `Date` from a year and day-of-year (1-365/366).
    pub fn from_year_day(year: i32, day_of_year: i64) -> Result<Date, Error> {
        check_year(year)?;
        let leap = is_leap_year(year);
        let len = if leap { 366 } else { 365 };
        if !(1..=len).contains(&day_of_year) {
            return Err(Error::invalid_field(
                "day-of-year",
                day_of_year,
                format!("year {} has {} days", year, len),
            ));
        }
        let mut month = Month::January;
        while month.days_before(leap) as i64 + (month.length(leap) as i64) < day_of_year {
            month = month.next();
        }
        let day = day_of_year - month.days_before(leap) as i64;
        Ok(Date { year, month, day: day as u8 })
    }

    /// Makes a `Date` from an epoch-day count, day 0 being 1970-01-01.
    pub fn from_epoch_day(epoch_day: i64) -> Result<Date, Error> {
        // standard 400-year-cycle conversion over days shifted to 0000-03-01
        let days = epoch_day
            .checked_add(719_468)
            .ok_or_else(|| Error::overflow("epoch day"))?;
        let era = days.div_euclid(146_097);
        let doe = days.rem_euclid(146_097);
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let year = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = if month <= 2 { year + 1 } else { year };
        if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
            return Err(Error::out_of_range(
                "year",
                year,
                MIN_YEAR as i64,
                MAX_YEAR as i64,
            ));
        }
        Ok(Date {
            year: year as i32,
            month: Month::of(month).expect("month computed in 1..=12"),
            day: day as u8,
        })
    }

    /// The epoch-day count for this date, day 0 being 1970-01-01.
    pub fn to_epoch_day(&self) -> i64 {
        let y = if self.month.number() <= 2 { self.year as i64 - 1 } else { self.year as i64 };
        let m = self.month.number() as i64;
        let era = y.div_euclid(400);
        let yoe = y - era * 400;
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
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

    /// The day-of-month field, 1 through 31.
    #[inline]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    /// The day-of-year, 1 through 365 or 366.
    pub fn day_of_year(&self) -> u32 {
        self.month.days_before(is_leap_year(self.year)) + self.day as u32
    }

    /// The day of the week.
    pub fn day_of_week(&self) -> DayOfWeek {
        // 1970-01-01 was a Thursday
        let index = (self.to_epoch_day() + 3).rem_euclid(7);
        DayOfWeek::of(index + 1).expect("weekday index in 0..7")
    }

    /// The length of this date's month in days.
    pub fn length_of_month(&self) -> u32 {
        self.month.length(is_leap_year(self.year))
    }

    /// Returns this date with the year changed, resolving February 29th in a
    /// non-leap target year to February 28th.
    pub fn with_year(&self, year: i32) -> Result<Date, Error> {
        check_year(year)?;
        let day = (self.day as u32).min(self.month.length(is_leap_year(year)));
        Date::new(year, self.month, day as i64)
    }

    /// Returns this date with the day-of-month changed, validating it.
    pub fn with_day(&self, day: i64) -> Result<Date, Error> {
        Date::new(self.year, self.month, day)
    }

    /// Adds a number of years, resolving an invalid day-of-month to the last
    /// valid day of the target month.
    pub fn plus_years(&self, years: i64) -> Result<Date, Error> {
        self.plus_months(years.checked_mul(12).ok_or_else(|| Error::overflow("months"))?)
    }

    /// Adds a number of months, resolving an invalid day-of-month to the
    /// last valid day of the target month.
    pub fn plus_months(&self, months: i64) -> Result<Date, Error> {
        if months == 0 {
            return Ok(*self);
        }
        let total = (self.year as i64)
            .checked_mul(12)
            .and_then(|m| m.checked_add(self.month.number() as i64 - 1))
            .and_then(|m| m.checked_add(months))
            .ok_or_else(|| Error::overflow("months"))?;
        let year = total.div_euclid(12);
        if year < MIN_YEAR as i64 || year > MAX_YEAR as i64 {
            return Err(Error::out_of_range("year", year, MIN_YEAR as i64, MAX_YEAR as i64));
        }
        let year = year as i32;
        let month = Month::of(total.rem_euclid(12) + 1).expect("month in 1..=12");
        let day = (self.day as u32).min(month.length(is_leap_year(year)));
        Date::new(year, month, day as i64)
    }

    /// Adds a number of weeks exactly.
    pub fn plus_weeks(&self, weeks: i64) -> Result<Date, Error> {
        self.plus_days(weeks.checked_mul(7).ok_or_else(|| Error::overflow("days"))?)
    }

    /// Adds a number of days exactly.
    pub fn plus_days(&self, days: i64) -> Result<Date, Error> {
        if days == 0 {
            return Ok(*self);
        }
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or_else(|| Error::overflow("epoch day"))?;
        Date::from_epoch_day(epoch_day)
    }

    /// Adds the date part of a period: years, then months (clamping the
    /// day-of-month to the last valid day), then days exactly.
    ///
    /// The time part of the period is ignored here; see
    /// [`DateTime::plus_period`](crate::DateTime::plus_period) for the
    /// combined operation.
    pub fn plus_period(&self, period: &Period) -> Result<Date, Error> {
        self.plus_years(period.years() as i64)?
            .plus_months(period.months() as i64)?
            .plus_days(period.days() as i64)
    }

    /// Subtracts the date part of a period.
    pub fn minus_period(&self, period: &Period) -> Result<Date, Error> {
        self.plus_period(&period.negated()?)
    }

    /// The next day.
    pub fn next(&self) -> Result<Date, Error> {
        self.plus_days(1)
    }

    /// The previous day.
    pub fn previous(&self) -> Result<Date, Error> {
        self.plus_days(-1)
    }
}

fn check_year(year: i32) -> Result<(), Error> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(Error::out_of_range("year", year as i64, MIN_YEAR as i64, MAX_YEAR as i64));
    }
    Ok(())
}

/// Writes a year with at least four digits, adding an explicit sign beyond
/// the four-digit range, as in `2020`, `-0044` or `+10000`.
pub(crate) fn write_year(f: &mut fmt::Formatter<'_>, year: i32) -> fmt::Result {
    if (0..=9999).contains(&year) {
        write!(f, "{:04}", year)
    } else if year < 0 {
        write!(f, "-{:04}", -(year as i64))
    } else {
        write!(f, "+{}", year)
    }
}

impl fmt::Display for Date {
    /// ISO-8601 form `yyyy-MM-dd`, with the year sign-extended beyond four
    /// digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_year(f, self.year)?;
        write!(f, "-{:02}-{:02}", self.month.number(), self.day)
    }
}

impl FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Date, Error> {
        format::parse_date(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{is_leap_year, Date};
    use crate::month::Month;
    use crate::period::Period;
    use crate::weekday::DayOfWeek;

    #[test]
    fn test_leap_year_law() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2004));
        assert!(!is_leap_year(1901));
        for y in -400..=400 {
            assert_eq!(is_leap_year(y), y % 4 == 0 && (y % 100 != 0 || y % 400 == 0), "{}", y);
        }
    }

    #[test]
    fn test_from_ymd_validation() {
        assert!(Date::from_ymd(2020, 2, 29).is_ok());
        assert!(Date::from_ymd(2019, 2, 29).is_err());
        assert!(Date::from_ymd(2019, 2, 30).is_err());
        assert!(Date::from_ymd(2019, 4, 31).is_err());
        assert!(Date::from_ymd(2019, 13, 1).is_err());
        assert!(Date::from_ymd(2019, 0, 1).is_err());
        assert!(Date::from_ymd(2019, 1, 0).is_err());

        let err = Date::from_ymd(2019, 2, 29).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value 29 for day-of-month is invalid: February 2019 has 28 days"
        );
    }

    #[test]
    fn test_epoch_day_round_trip() {
        assert_eq!(Date::from_ymd(1970, 1, 1).unwrap().to_epoch_day(), 0);
        assert_eq!(Date::from_ymd(1970, 1, 2).unwrap().to_epoch_day(), 1);
        assert_eq!(Date::from_ymd(1969, 12, 31).unwrap().to_epoch_day(), -1);
        assert_eq!(Date::from_ymd(2000, 3, 1).unwrap().to_epoch_day(), 11_017);

        for &day in &[0i64, 1, -1, 365, -365, 11_017, 18_321, -719_468, 2_932_896] {
            let date = Date::from_epoch_day(day).unwrap();
            assert_eq!(date.to_epoch_day(), day, "{}", date);
        }
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(Date::from_ymd(2020, 1, 1).unwrap().day_of_year(), 1);
        assert_eq!(Date::from_ymd(2020, 2, 29).unwrap().day_of_year(), 60);
        assert_eq!(Date::from_ymd(2020, 12, 31).unwrap().day_of_year(), 366);
        assert_eq!(Date::from_ymd(2019, 12, 31).unwrap().day_of_year(), 365);

        assert_eq!(Date::from_year_day(2020, 60).unwrap(), Date::from_ymd(2020, 2, 29).unwrap());
        assert_eq!(Date::from_year_day(2019, 60).unwrap(), Date::from_ymd(2019, 3, 1).unwrap());
        assert!(Date::from_year_day(2019, 366).is_err());
        assert!(Date::from_year_day(2019, 0).is_err());
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(Date::from_ymd(1970, 1, 1).unwrap().day_of_week(), DayOfWeek::Thursday);
        assert_eq!(Date::from_ymd(2020, 2, 29).unwrap().day_of_week(), DayOfWeek::Saturday);
        assert_eq!(Date::from_ymd(2000, 1, 1).unwrap().day_of_week(), DayOfWeek::Saturday);
        assert_eq!(Date::from_ymd(1969, 12, 31).unwrap().day_of_week(), DayOfWeek::Wednesday);
    }

    #[test]
    fn test_plus_months_clamps() {
        let jan31 = Date::from_ymd(2020, 1, 31).unwrap();
        assert_eq!(jan31.plus_months(1).unwrap(), Date::from_ymd(2020, 2, 29).unwrap());
        assert_eq!(jan31.plus_months(13).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
        assert_eq!(jan31.plus_months(-2).unwrap(), Date::from_ymd(2019, 11, 30).unwrap());

        let feb29 = Date::from_ymd(2020, 2, 29).unwrap();
        assert_eq!(feb29.plus_years(1).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
        assert_eq!(feb29.with_year(2021).unwrap(), Date::from_ymd(2021, 2, 28).unwrap());
    }

    #[test]
    fn test_plus_period_order() {
        // years, then months with clamping, then days
        let d = Date::from_ymd(2019, 1, 31).unwrap();
        let p = Period::of_date(1, 1, 1);
        assert_eq!(d.plus_period(&p).unwrap(), Date::from_ymd(2020, 3, 1).unwrap());

        let p = Period::of_days(30);
        assert_eq!(d.plus_period(&p).unwrap(), Date::from_ymd(2019, 3, 2).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Date::from_ymd(2020, 2, 29).unwrap().to_string(), "2020-02-29");
        assert_eq!(Date::from_ymd(-44, 3, 15).unwrap().to_string(), "-0044-03-15");
        assert_eq!(Date::from_ymd(10000, 1, 1).unwrap().to_string(), "+10000-01-01");
        assert_eq!(Date::from_ymd(0, 1, 1).unwrap().to_string(), "0000-01-01");
    }

    #[test]
    fn test_round_trip() {
        for &(y, m, d) in &[(2020, 2, 29), (-44, 3, 15), (10000, 1, 1), (1969, 12, 31)] {
            let date = Date::from_ymd(y, m, d).unwrap();
            assert_eq!(date.to_string().parse::<Date>().unwrap(), date);
        }
    }

    #[test]
    fn test_month_accessor() {
        let d = Date::from_ymd(2020, 7, 4).unwrap();
        assert_eq!(d.month(), Month::July);
        assert_eq!(d.length_of_month(), 31);
    }
}
