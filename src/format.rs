// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Scanning routines for the ISO-8601 parsers.
//!
//! Each parser recognizes fields positionally, feeds them into a
//! [`CalendricalMerger`] by rule, merges once, and extracts the target
//! composite value. Syntax errors carry the input text and the 0-based
//! offset of the offending character; consistency errors surface from the
//! merge with the offending values embedded.

use crate::date::Date;
use crate::datetime::DateTime;
use crate::error::Error;
use crate::field::merger::{CalendricalContext, CalendricalMerger, Merged};
use crate::field::Value;
use crate::instant::Instant;
use crate::offset::ZoneOffset;
use crate::offset_date::OffsetDate;
use crate::offset_datetime::OffsetDateTime;
use crate::offset_time::OffsetTime;
use crate::time::Time;
use crate::year_month::YearMonth;
use crate::zone::TimeZone;
use crate::zoned::ZonedDateTime;
use crate::chronology::iso;

/// A cursor over an input string being parsed.
struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Scanner<'a> {
        Scanner { input, pos: 0 }
    }

    fn error(&self, expected: &'static str) -> Error {
        Error::parse(self.input, self.pos, expected)
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    fn accept(&mut self, c: u8) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: u8, expected: &'static str) -> Result<(), Error> {
        if !self.accept(c) {
            return Err(self.error(expected));
        }
        Ok(())
    }

    /// Scans between `min` and `max` digits into a number.
    fn digits(&mut self, min: usize, max: usize, expected: &'static str) -> Result<i64, Error> {
        let start = self.pos;
        while self.pos - start < max && matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.pos - start < min {
            return Err(self.error(expected));
        }
        self.input[start..self.pos]
            .parse()
            .map_err(|_| Error::parse(self.input, start, "number in range"))
    }

    /// Scans a proleptic year: four digits, or an explicit sign followed by
    /// four to ten digits.
    fn year(&mut self) -> Result<i64, Error> {
        match self.peek() {
            Some(b'+') => {
                self.pos += 1;
                self.digits(4, 10, "year digits")
            }
            Some(b'-') => {
                self.pos += 1;
                Ok(-self.digits(4, 10, "year digits")?)
            }
            _ => self.digits(4, 4, "4-digit year"),
        }
    }

    /// Scans a dot followed by 1-9 fraction digits, left-aligned to
    /// nanoseconds; absent fraction scans as zero.
    fn fraction(&mut self) -> Result<i64, Error> {
        if !self.accept(b'.') {
            return Ok(0);
        }
        let start = self.pos;
        while self.pos - start < 9 && matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        let digits = &self.input[start..self.pos];
        if digits.is_empty() {
            return Err(self.error("fraction digit"));
        }
        let mut nanos: i64 = digits.parse().expect("at most 9 digits fit");
        for _ in digits.len()..9 {
            nanos *= 10;
        }
        Ok(nanos)
    }

    /// Scans a zone offset: `Z`, or `±HH:mm[:ss]`.
    fn offset(&mut self) -> Result<ZoneOffset, Error> {
        let negative = match self.peek() {
            Some(b'Z') | Some(b'z') => {
                self.pos += 1;
                return Ok(ZoneOffset::UTC);
            }
            Some(b'+') => false,
            Some(b'-') => true,
            _ => return Err(self.error("zone offset")),
        };
        self.pos += 1;
        let hours = self.digits(2, 2, "offset hours")?;
        self.expect(b':', "':' in offset")?;
        let minutes = self.digits(2, 2, "offset minutes")?;
        let seconds = if self.accept(b':') { self.digits(2, 2, "offset seconds")? } else { 0 };
        let sign = if negative { -1 } else { 1 };
        ZoneOffset::of_hms(sign * hours, sign * minutes, sign * seconds)
    }

    /// Fails unless the whole input has been consumed.
    fn finish(&self) -> Result<(), Error> {
        if self.pos != self.input.len() {
            return Err(self.error("end of input"));
        }
        Ok(())
    }

    /// Feeds `yyyy-MM-dd` fields into the merger.
    fn scan_date_into(&mut self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let year = self.year()?;
        self.expect(b'-', "'-' after year")?;
        let month = self.digits(2, 2, "2-digit month")?;
        self.expect(b'-', "'-' after month")?;
        let day = self.digits(2, 2, "2-digit day")?;
        merger.insert_integer(iso::YEAR, year)?;
        merger.insert_integer(iso::MONTH_OF_YEAR, month)?;
        merger.insert_integer(iso::DAY_OF_MONTH, day)?;
        Ok(())
    }

    /// Feeds `HH:mm[:ss[.fff]]` fields into the merger.
    fn scan_time_into(&mut self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let hour = self.digits(2, 2, "2-digit hour")?;
        self.expect(b':', "':' after hour")?;
        let minute = self.digits(2, 2, "2-digit minute")?;
        merger.insert_integer(iso::HOUR_OF_DAY, hour)?;
        merger.insert_integer(iso::MINUTE_OF_HOUR, minute)?;
        if self.accept(b':') {
            let second = self.digits(2, 2, "2-digit second")?;
            let nano = self.fraction()?;
            merger.insert_integer(iso::SECOND_OF_MINUTE, second)?;
            merger.insert_integer(iso::NANO_OF_SECOND, nano)?;
        }
        Ok(())
    }
}

fn merge(merger: CalendricalMerger) -> Result<Merged, Error> {
    merger.merge()
}

fn extract_date(merged: &Merged, input: &str) -> Result<Date, Error> {
    match merged.get(iso::DATE) {
        Some(Value::Date(date)) => Ok(date),
        _ => Err(Error::parse(input, 0, "complete date")),
    }
}

fn extract_time(merged: &Merged, input: &str) -> Result<Time, Error> {
    match merged.get(iso::TIME) {
        Some(Value::Time(time)) => Ok(time),
        _ => Err(Error::parse(input, 0, "complete time")),
    }
}

fn extract_offset(merged: &Merged, input: &str) -> Result<ZoneOffset, Error> {
    match merged.get(iso::OFFSET) {
        Some(Value::Offset(offset)) => Ok(offset),
        _ => Err(Error::parse(input, 0, "zone offset")),
    }
}

pub(crate) fn parse_date(input: &str) -> Result<Date, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_date_into(&mut merger)?;
    scanner.finish()?;
    extract_date(&merge(merger)?, input)
}

pub(crate) fn parse_time(input: &str) -> Result<Time, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_time_into(&mut merger)?;
    scanner.finish()?;
    extract_time(&merge(merger)?, input)
}

pub(crate) fn parse_datetime(input: &str) -> Result<DateTime, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_date_into(&mut merger)?;
    scanner.expect(b'T', "'T' between date and time")?;
    scanner.scan_time_into(&mut merger)?;
    scanner.finish()?;
    match merge(merger)?.get(iso::DATE_TIME) {
        Some(Value::DateTime(datetime)) => Ok(datetime),
        _ => Err(Error::parse(input, 0, "complete date-time")),
    }
}

pub(crate) fn parse_year_month(input: &str) -> Result<YearMonth, Error> {
    let mut scanner = Scanner::new(input);
    let year = scanner.year()?;
    scanner.expect(b'-', "'-' after year")?;
    let month = scanner.digits(2, 2, "2-digit month")?;
    scanner.finish()?;
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    merger.insert_integer(iso::YEAR, year)?;
    merger.insert_integer(iso::MONTH_OF_YEAR, month)?;
    let merged = merge(merger)?;
    match (merged.get(iso::YEAR), merged.get(iso::MONTH_OF_YEAR)) {
        (Some(Value::Integer(year)), Some(Value::Month(month))) => {
            YearMonth::of(year as i32, month.number() as i64)
        }
        _ => Err(Error::parse(input, 0, "year and month")),
    }
}

pub(crate) fn parse_offset(input: &str) -> Result<ZoneOffset, Error> {
    let mut scanner = Scanner::new(input);
    let offset = scanner.offset()?;
    scanner.finish()?;
    Ok(offset)
}

pub(crate) fn parse_offset_date(input: &str) -> Result<OffsetDate, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_date_into(&mut merger)?;
    let offset = scanner.offset()?;
    scanner.finish()?;
    merger.insert(iso::OFFSET, Value::Offset(offset))?;
    let merged = merge(merger)?;
    Ok(OffsetDate::new(extract_date(&merged, input)?, extract_offset(&merged, input)?))
}

pub(crate) fn parse_offset_time(input: &str) -> Result<OffsetTime, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_time_into(&mut merger)?;
    let offset = scanner.offset()?;
    scanner.finish()?;
    merger.insert(iso::OFFSET, Value::Offset(offset))?;
    let merged = merge(merger)?;
    Ok(OffsetTime::new(extract_time(&merged, input)?, extract_offset(&merged, input)?))
}

pub(crate) fn parse_offset_datetime(input: &str) -> Result<OffsetDateTime, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_date_into(&mut merger)?;
    scanner.expect(b'T', "'T' between date and time")?;
    scanner.scan_time_into(&mut merger)?;
    let offset = scanner.offset()?;
    scanner.finish()?;
    merger.insert(iso::OFFSET, Value::Offset(offset))?;
    match merge(merger)?.get(iso::OFFSET_DATE_TIME) {
        Some(Value::OffsetDateTime(odt)) => Ok(odt),
        _ => Err(Error::parse(input, 0, "complete offset date-time")),
    }
}

pub(crate) fn parse_instant(input: &str) -> Result<Instant, Error> {
    let mut scanner = Scanner::new(input);
    let mut merger = CalendricalMerger::new(CalendricalContext::strict());
    scanner.scan_date_into(&mut merger)?;
    scanner.expect(b'T', "'T' between date and time")?;
    scanner.scan_time_into(&mut merger)?;
    match scanner.peek() {
        Some(b'Z') | Some(b'z') => scanner.pos += 1,
        _ => return Err(scanner.error("'Z' suffix")),
    }
    scanner.finish()?;
    merger.insert(iso::OFFSET, Value::Offset(ZoneOffset::UTC))?;
    match merge(merger)?.get(iso::OFFSET_DATE_TIME) {
        Some(Value::OffsetDateTime(odt)) => Ok(odt.to_instant()),
        _ => Err(Error::parse(input, 0, "complete instant")),
    }
}

pub(crate) fn parse_zoned(input: &str) -> Result<ZonedDateTime, Error> {
    let bracket = match input.find('[') {
        Some(bracket) => bracket,
        None => return Err(Error::parse(input, input.len(), "'[' before zone id")),
    };
    if !input.ends_with(']') {
        return Err(Error::parse(input, input.len(), "']' after zone id"));
    }
    let odt = parse_offset_datetime(&input[..bracket])
        .map_err(|err| rebase_parse_error(err, input))?;
    let id = &input[bracket + 1..input.len() - 1];
    let zone = TimeZone::of(id)?;
    ZonedDateTime::from_offset_datetime(odt, zone)
}

/// Re-attaches the full input to an error produced while parsing a slice of
/// it.
fn rebase_parse_error(err: Error, input: &str) -> Error {
    match err.parse_offset() {
        Some(offset) => Error::parse(input, offset, "offset date-time"),
        None => err,
    }
}
