// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The Coptic calendar system.
//!
//! The Coptic calendar has twelve months of thirty days followed by a
//! thirteenth month of five days, six in a leap year; a year is a leap year
//! when `year % 4 == 3`. Year 1 began on 284-08-29 (Julian), 615,558 days
//! before the 1970-01-01 epoch.

use crate::chronology::{iso, Chronology};
use crate::date::Date;
use crate::error::Error;
use crate::field::merger::CalendricalMerger;
use crate::field::{Calendrical, CalendricalRule, PeriodUnit, Rule, Value, ValueKind};

use core::fmt;

/// Days from the Coptic epoch to 1970-01-01.
const EPOCH_DAY_OFFSET: i64 = 615_558;

/// The minimum supported Coptic year.
pub const MIN_COPTIC_YEAR: i32 = 1;
/// The maximum supported Coptic year.
pub const MAX_COPTIC_YEAR: i32 = 999_999_999;

/// Returns true for a Coptic leap year.
#[inline]
pub const fn is_coptic_leap_year(year: i32) -> bool {
    year % 4 == 3
}

/// A date in the Coptic calendar, such as 1741-01-01 (Coptic).
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct CopticDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CopticDate {
    /// Makes a `CopticDate` from a year, month (1-13) and day-of-month.
    pub fn from_ymd(year: i32, month: i64, day: i64) -> Result<CopticDate, Error> {
        if !(MIN_COPTIC_YEAR..=MAX_COPTIC_YEAR).contains(&year) {
            return Err(Error::out_of_range(
                "coptic year",
                year as i64,
                MIN_COPTIC_YEAR as i64,
                MAX_COPTIC_YEAR as i64,
            ));
        }
        if !(1..=13).contains(&month) {
            return Err(Error::out_of_range("coptic month-of-year", month, 1, 13));
        }
        let len = month_length(month as u8, is_coptic_leap_year(year));
        if !(1..=len as i64).contains(&day) {
            return Err(Error::invalid_field(
                "coptic day-of-month",
                day,
                format!("month {} of Coptic year {} has {} days", month, year, len),
            ));
        }
        Ok(CopticDate { year, month: month as u8, day: day as u8 })
    }

    /// Makes a `CopticDate` from a year and day-of-year (1-365/366).
    pub fn from_year_day(year: i32, day_of_year: i64) -> Result<CopticDate, Error> {
        let len = if is_coptic_leap_year(year) { 366 } else { 365 };
        if !(1..=len) .contains(&day_of_year) {
            return Err(Error::invalid_field(
                "coptic day-of-year",
                day_of_year,
                format!("Coptic year {} has {} days", year, len),
            ));
        }
        CopticDate::from_ymd(year, (day_of_year - 1) / 30 + 1, (day_of_year - 1) % 30 + 1)
    }

    /// Converts an ISO date to its Coptic equivalent. Dates before the
    /// Coptic epoch are not representable.
    pub fn from_date(date: Date) -> Result<CopticDate, Error> {
        let proleptic_day = date.to_epoch_day() + EPOCH_DAY_OFFSET;
        if proleptic_day < 0 {
            return Err(Error::invalid_field(
                "coptic year",
                proleptic_day,
                "the date predates the Coptic epoch".to_owned(),
            ));
        }
        let year = (proleptic_day * 4 + 1463) / 1461;
        let day_of_year = proleptic_day - ((year - 1) * 365 + year / 4);
        CopticDate::from_year_day(year as i32, day_of_year + 1)
    }

    /// The ISO date equivalent to this Coptic date.
    pub fn to_date(&self) -> Result<Date, Error> {
        Date::from_epoch_day(self.to_epoch_day())
    }

    /// The epoch-day count for this date, day 0 being ISO 1970-01-01.
    pub fn to_epoch_day(&self) -> i64 {
        let y = self.year as i64;
        (y - 1) * 365 + y / 4 + 30 * (self.month as i64 - 1) + (self.day as i64 - 1)
            - EPOCH_DAY_OFFSET
    }

    /// The year field.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The month-of-year field, 1 through 13.
    #[inline]
    pub const fn month(&self) -> u32 {
        self.month as u32
    }

    /// The day-of-month field, 1 through 30.
    #[inline]
    pub const fn day(&self) -> u32 {
        self.day as u32
    }

    /// The day-of-year, 1 through 365 or 366.
    pub const fn day_of_year(&self) -> u32 {
        (self.month as u32 - 1) * 30 + self.day as u32
    }

    /// Adds a number of days exactly.
    pub fn plus_days(&self, days: i64) -> Result<CopticDate, Error> {
        let epoch_day = self
            .to_epoch_day()
            .checked_add(days)
            .ok_or_else(|| Error::overflow("epoch day"))?;
        CopticDate::from_date(Date::from_epoch_day(epoch_day)?)
    }

    /// Adds a number of months, clamping the day-of-month to the last valid
    /// day of the target month.
    pub fn plus_months(&self, months: i64) -> Result<CopticDate, Error> {
        let total = (self.year as i64)
            .checked_mul(13)
            .and_then(|m| m.checked_add(self.month as i64 - 1))
            .and_then(|m| m.checked_add(months))
            .ok_or_else(|| Error::overflow("months"))?;
        let year = total.div_euclid(13);
        let month = total.rem_euclid(13) + 1;
        if year < MIN_COPTIC_YEAR as i64 || year > MAX_COPTIC_YEAR as i64 {
            return Err(Error::out_of_range(
                "coptic year",
                year,
                MIN_COPTIC_YEAR as i64,
                MAX_COPTIC_YEAR as i64,
            ));
        }
        let len = month_length(month as u8, is_coptic_leap_year(year as i32));
        let day = (self.day as i64).min(len as i64);
        CopticDate::from_ymd(year as i32, month, day)
    }

    /// Adds a number of years, clamping the day-of-month for the short
    /// thirteenth month.
    pub fn plus_years(&self, years: i64) -> Result<CopticDate, Error> {
        self.plus_months(years.checked_mul(13).ok_or_else(|| Error::overflow("months"))?)
    }
}

const fn month_length(month: u8, leap: bool) -> u32 {
    if month < 13 {
        30
    } else if leap {
        6
    } else {
        5
    }
}

impl fmt::Display for CopticDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02} (Coptic)", self.year, self.month, self.day)
    }
}

/// The Coptic proleptic year.
pub static COPTIC_YEAR: Rule = Rule::of(&CopticYearRule);
/// The Coptic month-of-year, 1 through 13.
pub static COPTIC_MONTH_OF_YEAR: Rule = Rule::of(&CopticMonthOfYearRule);
/// The Coptic day-of-month, 1 through 30.
pub static COPTIC_DAY_OF_MONTH: Rule = Rule::of(&CopticDayOfMonthRule);
/// The Coptic day-of-year, 1 through 366.
pub static COPTIC_DAY_OF_YEAR: Rule = Rule::of(&CopticDayOfYearRule);

fn coptic_of(from: &dyn Calendrical) -> Option<CopticDate> {
    from.date().and_then(|date| CopticDate::from_date(date).ok())
}

struct CopticYearRule;

impl CalendricalRule for CopticYearRule {
    fn id(&self) -> &'static str {
        "Coptic.Year"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((MIN_COPTIC_YEAR as i64, MAX_COPTIC_YEAR as i64))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        coptic_of(from).map(|c| Value::Integer(c.year() as i64))
    }
}

struct CopticMonthOfYearRule;

impl CalendricalRule for CopticMonthOfYearRule {
    fn id(&self) -> &'static str {
        "Coptic.MonthOfYear"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Months)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 13))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        coptic_of(from).map(|c| Value::Integer(c.month() as i64))
    }
}

struct CopticDayOfMonthRule;

impl CalendricalRule for CopticDayOfMonthRule {
    fn id(&self) -> &'static str {
        "Coptic.DayOfMonth"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Months)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 30))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        coptic_of(from).map(|c| Value::Integer(c.day() as i64))
    }
}

struct CopticDayOfYearRule;

impl CalendricalRule for CopticDayOfYearRule {
    fn id(&self) -> &'static str {
        "Coptic.DayOfYear"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 366))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        coptic_of(from).map(|c| Value::Integer(c.day_of_year() as i64))
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let (year, day_of_year) = match (
            merger.get_integer(COPTIC_YEAR),
            merger.get_integer(COPTIC_DAY_OF_YEAR),
        ) {
            (Some(year), Some(day_of_year)) => (year, day_of_year),
            _ => return Ok(()),
        };
        let date = CopticDate::from_year_day(year as i32, day_of_year)?.to_date()?;
        merger.store_merged(iso::DATE, Value::Date(date))?;
        merger.remove_processed(COPTIC_YEAR);
        merger.remove_processed(COPTIC_DAY_OF_YEAR);
        Ok(())
    }
}

/// The Coptic chronology.
pub struct CopticChronology;

/// The Coptic chronology singleton.
pub static COPTIC: CopticChronology = CopticChronology;

impl Chronology for CopticChronology {
    fn name(&self) -> &'static str {
        "Coptic"
    }

    /// Combines Coptic year, month and day into an ISO date value, the
    /// common currency of merge results.
    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let year = match merger.get_integer(COPTIC_YEAR) {
            Some(year) => year,
            None => return Ok(()),
        };
        let month = match merger.get_integer(COPTIC_MONTH_OF_YEAR) {
            Some(month) => month,
            None => return Ok(()),
        };
        let day = match merger.get_integer(COPTIC_DAY_OF_MONTH) {
            Some(day) => day,
            None => return Ok(()),
        };
        let date = CopticDate::from_ymd(year as i32, month, day)?.to_date()?;
        merger.store_merged(iso::DATE, Value::Date(date))?;
        merger.remove_processed(COPTIC_YEAR);
        merger.remove_processed(COPTIC_MONTH_OF_YEAR);
        merger.remove_processed(COPTIC_DAY_OF_MONTH);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::merger::CalendricalContext;

    #[test]
    fn test_leap_year_rule() {
        assert!(is_coptic_leap_year(3));
        assert!(is_coptic_leap_year(7));
        assert!(is_coptic_leap_year(1739));
        assert!(!is_coptic_leap_year(1740));
        assert!(!is_coptic_leap_year(4));
    }

    #[test]
    fn test_month_lengths() {
        assert!(CopticDate::from_ymd(1740, 12, 30).is_ok());
        assert!(CopticDate::from_ymd(1740, 12, 31).is_err());
        // month 13 has 5 days in a common year, 6 in a leap year
        assert!(CopticDate::from_ymd(1740, 13, 5).is_ok());
        assert!(CopticDate::from_ymd(1740, 13, 6).is_err());
        assert!(CopticDate::from_ymd(1739, 13, 6).is_ok());
        assert!(CopticDate::from_ymd(1740, 14, 1).is_err());
        assert!(CopticDate::from_ymd(0, 1, 1).is_err());
    }

    #[test]
    fn test_epoch_day_round_trip() {
        let epoch = CopticDate::from_ymd(1, 1, 1).unwrap();
        assert_eq!(epoch.to_epoch_day(), -615_558);

        for &(y, m, d) in &[(1, 1, 1), (3, 13, 6), (1739, 13, 6), (1741, 1, 1), (1740, 7, 19)] {
            let date = CopticDate::from_ymd(y, m, d).unwrap();
            let iso = date.to_date().unwrap();
            assert_eq!(CopticDate::from_date(iso).unwrap(), date, "{}", date);
        }
    }

    #[test]
    fn test_known_correspondence() {
        // Coptic new year 1741 fell on 2024-09-11
        let coptic = CopticDate::from_ymd(1741, 1, 1).unwrap();
        assert_eq!(coptic.to_date().unwrap(), Date::from_ymd(2024, 9, 11).unwrap());

        let back = CopticDate::from_date(Date::from_ymd(2024, 9, 11).unwrap()).unwrap();
        assert_eq!(back, coptic);

        // the day before is the last day of 1740, a 5-day thirteenth month
        let previous = CopticDate::from_date(Date::from_ymd(2024, 9, 10).unwrap()).unwrap();
        assert_eq!((previous.year(), previous.month(), previous.day()), (1740, 13, 5));
    }

    #[test]
    fn test_arithmetic() {
        let date = CopticDate::from_ymd(1740, 12, 30).unwrap();
        assert_eq!(date.plus_days(1).unwrap(), CopticDate::from_ymd(1740, 13, 1).unwrap());
        assert_eq!(date.plus_days(6).unwrap(), CopticDate::from_ymd(1741, 1, 1).unwrap());

        // clamping into the short thirteenth month
        let date = CopticDate::from_ymd(1740, 12, 8).unwrap();
        assert_eq!(date.plus_months(1).unwrap(), CopticDate::from_ymd(1740, 13, 5).unwrap());
        let date = CopticDate::from_ymd(1739, 13, 6).unwrap();
        assert_eq!(date.plus_years(1).unwrap(), CopticDate::from_ymd(1740, 13, 5).unwrap());
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(CopticDate::from_ymd(1740, 1, 1).unwrap().day_of_year(), 1);
        assert_eq!(CopticDate::from_ymd(1740, 2, 1).unwrap().day_of_year(), 31);
        assert_eq!(CopticDate::from_ymd(1739, 13, 6).unwrap().day_of_year(), 366);
        assert_eq!(
            CopticDate::from_year_day(1739, 366).unwrap(),
            CopticDate::from_ymd(1739, 13, 6).unwrap()
        );
    }

    #[test]
    fn test_merge_coptic_fields() {
        let mut merger =
            CalendricalMerger::with_chronology(CalendricalContext::strict(), &COPTIC);
        merger.insert_integer(COPTIC_YEAR, 1741).unwrap();
        merger.insert_integer(COPTIC_MONTH_OF_YEAR, 1).unwrap();
        merger.insert_integer(COPTIC_DAY_OF_MONTH, 1).unwrap();
        let merged = merger.merge().unwrap();
        assert_eq!(
            merged.get(iso::DATE),
            Some(Value::Date(Date::from_ymd(2024, 9, 11).unwrap()))
        );
        // coptic fields remain derivable from the result
        assert_eq!(merged.get(COPTIC_YEAR), Some(Value::Integer(1741)));
    }

    #[test]
    fn test_merge_coptic_day_of_year() {
        let mut merger =
            CalendricalMerger::with_chronology(CalendricalContext::strict(), &COPTIC);
        merger.insert_integer(COPTIC_YEAR, 1741).unwrap();
        merger.insert_integer(COPTIC_DAY_OF_YEAR, 31).unwrap();
        let merged = merger.merge().unwrap();
        match merged.get(iso::DATE) {
            Some(Value::Date(date)) => {
                assert_eq!(CopticDate::from_date(date).unwrap().month(), 2);
            }
            other => panic!("expected a date, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_invalid_coptic_date_fails() {
        let mut merger =
            CalendricalMerger::with_chronology(CalendricalContext::strict(), &COPTIC);
        merger.insert_integer(COPTIC_YEAR, 1740).unwrap();
        merger.insert_integer(COPTIC_MONTH_OF_YEAR, 13).unwrap();
        merger.insert_integer(COPTIC_DAY_OF_MONTH, 6).unwrap();
        assert!(merger.merge().unwrap_err().is_invalid_value());
    }

    #[test]
    fn test_display() {
        assert_eq!(CopticDate::from_ymd(1741, 1, 1).unwrap().to_string(), "1741-01-01 (Coptic)");
    }
}
