// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A calendar-field quantity of time, such as "2 years, 3 months and 4
//! days".

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// A quantity of time measured in calendar and clock fields.
///
/// Each field is tracked independently and signed; fields are never
/// normalized between units unless [`normalized`](Period::normalized) is
/// called explicitly, so a period of 13 months stays 13 months. This is what
/// distinguishes a `Period` from a [`Duration`](crate::Duration): a period
/// of one month has no fixed length until it is anchored to a date.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash, Default)]
pub struct Period {
    years: i32,
    months: i32,
    days: i32,
    hours: i32,
    minutes: i32,
    seconds: i32,
    nanos: i64,
}

impl Period {
    /// A period of zero length.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        nanos: 0,
    };

    /// Makes a `Period` from all seven fields.
    #[allow(clippy::too_many_arguments)]
    pub const fn of(
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: i32,
        nanos: i64,
    ) -> Period {
        Period { years, months, days, hours, minutes, seconds, nanos }
    }

    /// Makes a date-based `Period` of years, months and days.
    pub const fn of_date(years: i32, months: i32, days: i32) -> Period {
        Period { years, months, days, ..Period::ZERO }
    }

    /// Makes a time-based `Period` of hours, minutes and seconds.
    pub const fn of_time(hours: i32, minutes: i32, seconds: i32) -> Period {
        Period { hours, minutes, seconds, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of years.
    pub const fn of_years(years: i32) -> Period {
        Period { years, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of months.
    pub const fn of_months(months: i32) -> Period {
        Period { months, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of days.
    pub const fn of_days(days: i32) -> Period {
        Period { days, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of hours.
    pub const fn of_hours(hours: i32) -> Period {
        Period { hours, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of minutes.
    pub const fn of_minutes(minutes: i32) -> Period {
        Period { minutes, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of seconds.
    pub const fn of_seconds(seconds: i32) -> Period {
        Period { seconds, ..Period::ZERO }
    }

    /// Makes a `Period` of a number of nanoseconds.
    pub const fn of_nanos(nanos: i64) -> Period {
        Period { nanos, ..Period::ZERO }
    }

    /// The years field.
    #[inline]
    pub const fn years(&self) -> i32 {
        self.years
    }

    /// The months field.
    #[inline]
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// The days field.
    #[inline]
    pub const fn days(&self) -> i32 {
        self.days
    }

    /// The hours field.
    #[inline]
    pub const fn hours(&self) -> i32 {
        self.hours
    }

    /// The minutes field.
    #[inline]
    pub const fn minutes(&self) -> i32 {
        self.minutes
    }

    /// The seconds field.
    #[inline]
    pub const fn seconds(&self) -> i32 {
        self.seconds
    }

    /// The nanoseconds field.
    #[inline]
    pub const fn nanos(&self) -> i64 {
        self.nanos
    }

    /// True when every field is zero.
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.nanos == 0
    }

    /// True when the date fields (years, months, days) are all zero.
    pub const fn is_date_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// True when the time fields (hours through nanos) are all zero.
    pub const fn is_time_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.nanos == 0
    }

    /// The total months implied by the years and months fields. No other
    /// field participates.
    pub fn total_months(&self) -> i64 {
        self.years as i64 * 12 + self.months as i64
    }

    /// The total nanoseconds implied by the time fields (hours through
    /// nanos). Days do not participate, since a day is a calendar unit here.
    pub fn total_time_nanos(&self) -> i128 {
        ((self.hours as i64 * 3600 + self.minutes as i64 * 60 + self.seconds as i64) as i128)
            * NANOS_PER_SECOND as i128
            + self.nanos as i128
    }

    /// Adds another period field by field, failing on overflow.
    pub fn plus(&self, other: &Period) -> Result<Period, Error> {
        let add = |a: i32, b: i32| {
            a.checked_add(b).ok_or_else(|| Error::overflow("period field"))
        };
        Ok(Period {
            years: add(self.years, other.years)?,
            months: add(self.months, other.months)?,
            days: add(self.days, other.days)?,
            hours: add(self.hours, other.hours)?,
            minutes: add(self.minutes, other.minutes)?,
            seconds: add(self.seconds, other.seconds)?,
            nanos: self
                .nanos
                .checked_add(other.nanos)
                .ok_or_else(|| Error::overflow("period nanos"))?,
        })
    }

    /// Subtracts another period field by field, failing on overflow.
    pub fn minus(&self, other: &Period) -> Result<Period, Error> {
        self.plus(&other.negated()?)
    }

    /// Negates every field, failing on overflow.
    pub fn negated(&self) -> Result<Period, Error> {
        let neg = |a: i32| a.checked_neg().ok_or_else(|| Error::overflow("period field"));
        Ok(Period {
            years: neg(self.years)?,
            months: neg(self.months)?,
            days: neg(self.days)?,
            hours: neg(self.hours)?,
            minutes: neg(self.minutes)?,
            seconds: neg(self.seconds)?,
            nanos: self.nanos.checked_neg().ok_or_else(|| Error::overflow("period nanos"))?,
        })
    }

    /// Folds the fields into canonical units: months into years, and the
    /// time part into hours, minutes, seconds and nanoseconds. The days
    /// field is left untouched, since days do not convert to either
    /// neighbouring unit without a calendar.
    pub fn normalized(&self) -> Result<Period, Error> {
        let total_months = self.total_months();
        let years = total_months.div_euclid(12);
        let months = total_months.rem_euclid(12);
        if years > i32::MAX as i64 || years < i32::MIN as i64 {
            return Err(Error::overflow("period years"));
        }

        let total = self.total_time_nanos();
        let nanos = total.rem_euclid(NANOS_PER_SECOND as i128) as i64;
        let total_secs = total.div_euclid(NANOS_PER_SECOND as i128);
        let hours = total_secs.div_euclid(3600);
        if hours > i32::MAX as i128 || hours < i32::MIN as i128 {
            return Err(Error::overflow("period hours"));
        }
        let rem = total_secs.rem_euclid(3600);
        Ok(Period {
            years: years as i32,
            months: months as i32,
            days: self.days,
            hours: hours as i32,
            minutes: (rem / 60) as i32,
            seconds: (rem % 60) as i32,
            nanos,
        })
    }
}

impl fmt::Display for Period {
    /// ISO-8601 form `PnYnMnDTnHnMn.nS`, omitting zero fields; the zero
    /// period prints as `PT0S`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        if self.years != 0 {
            write!(f, "{}Y", self.years)?;
        }
        if self.months != 0 {
            write!(f, "{}M", self.months)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        if !self.is_time_zero() {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0 || self.nanos != 0 {
                let total = self.seconds as i64 * NANOS_PER_SECOND + self.nanos;
                let (sign, abs) = if total < 0 { ("-", -(total as i128)) } else { ("", total as i128) };
                let secs = abs / NANOS_PER_SECOND as i128;
                let nanos = (abs % NANOS_PER_SECOND as i128) as u32;
                if nanos == 0 {
                    write!(f, "{}{}S", sign, secs)?;
                } else {
                    let mut frac = format!("{:09}", nanos);
                    while frac.ends_with('0') {
                        frac.pop();
                    }
                    write!(f, "{}{}.{}S", sign, secs, frac)?;
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parses the ISO-8601 period format `PnYnMnDTnHnMn.nS`.
    ///
    /// Letters are matched case-insensitively in strict order; each number
    /// may carry a sign; the seconds may carry a fraction of up to nine
    /// digits separated by `.` or `,`.
    fn from_str(s: &str) -> Result<Period, Error> {
        let mut p = PeriodTokenizer::new(s);
        p.expect_letter(b'P')?;
        let mut period = Period::ZERO;
        let mut seen = false;

        if let Some(v) = p.number_before(b'Y')? {
            period.years = p.to_i32(v)?;
            seen = true;
        }
        if let Some(v) = p.number_before(b'M')? {
            period.months = p.to_i32(v)?;
            seen = true;
        }
        if let Some(v) = p.number_before(b'D')? {
            period.days = p.to_i32(v)?;
            seen = true;
        }
        if p.accept_letter(b'T') {
            let mut time_seen = false;
            if let Some(v) = p.number_before(b'H')? {
                period.hours = p.to_i32(v)?;
                time_seen = true;
            }
            if let Some(v) = p.number_before(b'M')? {
                period.minutes = p.to_i32(v)?;
                time_seen = true;
            }
            if let Some((secs, nanos)) = p.seconds_with_fraction()? {
                period.seconds = p.to_i32(secs)?;
                period.nanos = nanos;
                time_seen = true;
            }
            if !time_seen {
                return Err(Error::parse(p.input, p.pos, "time component after 'T'"));
            }
            seen = true;
        }
        if !seen {
            return Err(Error::parse(p.input, p.pos, "at least one period component"));
        }
        if p.pos != p.input.len() {
            return Err(Error::parse(p.input, p.pos, "end of input"));
        }
        Ok(period)
    }
}

/// Cursor over a period string. Numbers are scanned speculatively: a signed
/// integer is only consumed when the expected unit letter follows it.
struct PeriodTokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> PeriodTokenizer<'a> {
    fn new(input: &'a str) -> PeriodTokenizer<'a> {
        PeriodTokenizer { input, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn expect_letter(&mut self, letter: u8) -> Result<(), Error> {
        if !self.accept_letter(letter) {
            return Err(Error::parse(self.input, self.pos, "period designator"));
        }
        Ok(())
    }

    fn accept_letter(&mut self, letter: u8) -> bool {
        match self.peek() {
            Some(c) if c.eq_ignore_ascii_case(&letter) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Scans a signed integer and checks that `unit` follows; on success
    /// both are consumed, otherwise the cursor does not move.
    fn number_before(&mut self, unit: u8) -> Result<Option<i64>, Error> {
        let start = self.pos;
        let value = match self.signed_int()? {
            Some(v) => v,
            None => return Ok(None),
        };
        if self.accept_letter(unit) {
            Ok(Some(value))
        } else {
            self.pos = start;
            Ok(None)
        }
    }

    /// Scans a signed integer with an optional `.`/`,` fraction followed by
    /// `S`. The fraction scales to nanoseconds and inherits the sign.
    fn seconds_with_fraction(&mut self) -> Result<Option<(i64, i64)>, Error> {
        let start = self.pos;
        let negative = matches!(self.peek(), Some(b'-'));
        let value = match self.signed_int()? {
            Some(v) => v,
            None => return Ok(None),
        };
        let mut nanos = 0i64;
        if matches!(self.peek(), Some(b'.') | Some(b',')) {
            self.pos += 1;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            let digits = &self.input[digits_start..self.pos];
            if digits.is_empty() || digits.len() > 9 {
                return Err(Error::parse(self.input, digits_start, "1 to 9 fraction digits"));
            }
            nanos = digits.parse::<i64>().expect("digits fit in i64");
            for _ in digits.len()..9 {
                nanos *= 10;
            }
            if negative {
                nanos = -nanos;
            }
        }
        if self.accept_letter(b'S') {
            Ok(Some((value, nanos)))
        } else if nanos != 0 || self.input[start..self.pos].contains(|c| c == '.' || c == ',') {
            Err(Error::parse(self.input, self.pos, "'S' after fractional seconds"))
        } else {
            self.pos = start;
            Ok(None)
        }
    }

    /// Scans an optionally signed integer, or `None` when the cursor is not
    /// on a sign or digit.
    fn signed_int(&mut self) -> Result<Option<i64>, Error> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };
        let digits_start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos == digits_start {
            self.pos = start;
            return Ok(None);
        }
        let value: i64 = self.input[digits_start..self.pos]
            .parse()
            .map_err(|_| Error::parse(self.input, digits_start, "number in range"))?;
        Ok(Some(if negative { -value } else { value }))
    }

    fn to_i32(&self, value: i64) -> Result<i32, Error> {
        i32::try_from(value)
            .map_err(|_| Error::parse(self.input, self.pos, "number in range"))
    }
}

#[cfg(test)]
mod tests {
    use super::Period;

    #[test]
    fn test_not_auto_normalized() {
        let p = Period::of_months(13);
        assert_eq!(p.total_months(), 13);
        assert_eq!(p.years(), 0);
        assert_eq!(p.months(), 13);

        let n = p.normalized().unwrap();
        assert_eq!(n.years(), 1);
        assert_eq!(n.months(), 1);
        assert_eq!(n.total_months(), 13);
    }

    #[test]
    fn test_normalized_time_part() {
        let p = Period::of(0, 0, 3, 0, 130, 0, 0).normalized().unwrap();
        assert_eq!((p.hours(), p.minutes(), p.days()), (2, 10, 3));

        let p = Period::of(0, 0, 0, 0, 0, 0, 3_500_000_000).normalized().unwrap();
        assert_eq!((p.seconds(), p.nanos()), (3, 500_000_000));

        let p = Period::of_months(-13).normalized().unwrap();
        assert_eq!((p.years(), p.months()), (-2, 11));
    }

    #[test]
    fn test_arithmetic() {
        let a = Period::of_date(1, 2, 3);
        let b = Period::of(0, 1, 0, 4, 0, 0, 5);
        let sum = a.plus(&b).unwrap();
        assert_eq!(sum, Period::of(1, 3, 3, 4, 0, 0, 5));
        assert_eq!(sum.minus(&b).unwrap(), a);
        assert_eq!(a.negated().unwrap(), Period::of_date(-1, -2, -3));
        assert!(Period::of_years(i32::MAX).plus(&Period::of_years(1)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::ZERO.to_string(), "PT0S");
        assert_eq!(Period::of_date(1, 2, 3).to_string(), "P1Y2M3D");
        assert_eq!(Period::of(1, 0, 0, 4, 5, 6, 0).to_string(), "P1YT4H5M6S");
        assert_eq!(Period::of_nanos(500_000_000).to_string(), "PT0.5S");
        assert_eq!(Period::of(0, 0, 0, 0, 0, -1, -500_000_000).to_string(), "PT-1.5S");
        assert_eq!(Period::of_months(-2).to_string(), "P-2M");
    }

    #[test]
    fn test_parse() {
        let p = |s: &str| s.parse::<Period>();
        assert_eq!(p("P1Y2M3D").unwrap(), Period::of_date(1, 2, 3));
        assert_eq!(p("p1y2m3d").unwrap(), Period::of_date(1, 2, 3));
        assert_eq!(p("PT4H5M6S").unwrap(), Period::of_time(4, 5, 6));
        assert_eq!(p("P-6Y+3M").unwrap(), Period::of_date(-6, 3, 0));
        assert_eq!(p("PT0.5S").unwrap(), Period::of_nanos(500_000_000));
        assert_eq!(p("PT0,5S").unwrap(), Period::of_nanos(500_000_000));
        assert_eq!(
            p("PT-0.5S").unwrap(),
            Period::of(0, 0, 0, 0, 0, 0, -500_000_000)
        );
        assert_eq!(p("PT1.123456789S").unwrap(), Period::of(0, 0, 0, 0, 0, 1, 123_456_789));
        assert_eq!(p("P2M").unwrap(), Period::of_months(2));
        assert_eq!(p("PT30M").unwrap(), Period::of_minutes(30));
    }

    #[test]
    fn test_parse_rejects() {
        let p = |s: &str| s.parse::<Period>();
        assert!(p("").is_err());
        assert!(p("P").is_err());
        assert!(p("PT").is_err());
        assert!(p("P1S").is_err()); // seconds before 'T'
        assert!(p("PT1Y").is_err()); // years after 'T'
        assert!(p("P1Y2Y").is_err()); // repeated unit
        assert!(p("PT0.1234567890S").is_err()); // 10 fraction digits
        assert!(p("PT0.S").is_err());
        assert!(p("P1Y junk").is_err());
        assert!(p("P1M2Y").is_err()); // wrong order

        assert_eq!(p("PX").unwrap_err().parse_offset(), Some(1));
    }

    #[test]
    fn test_round_trip() {
        for s in &["P1Y2M3D", "PT4H5M6S", "P-2M", "PT0.5S", "P1Y2M3DT4H5M6.000000007S"] {
            let period = s.parse::<Period>().unwrap();
            assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
        }
    }
}
