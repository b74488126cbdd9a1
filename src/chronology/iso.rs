// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The ISO-8601 calendar system: its field rules and completion merge.

use crate::chronology::Chronology;
use crate::date::{Date, MAX_YEAR, MIN_YEAR};
use crate::datetime::DateTime;
use crate::error::Error;
use crate::field::merger::CalendricalMerger;
use crate::field::{Calendrical, CalendricalRule, PeriodUnit, Rule, Value, ValueKind};
use crate::month::{Month, Quarter};
use crate::offset_datetime::OffsetDateTime;
use crate::period::Period;
use crate::time::{AmPm, Time};
use crate::weekday::DayOfWeek;
use crate::zone::resolver::ZoneResolver;
use crate::zoned::ZonedDateTime;

/// The proleptic year.
pub static YEAR: Rule = Rule::of(&YearRule);
/// The month of the year, January = 1 through December = 12.
pub static MONTH_OF_YEAR: Rule = Rule::of(&MonthOfYearRule);
/// The day of the month, 1 through 28/31.
pub static DAY_OF_MONTH: Rule = Rule::of(&DayOfMonthRule);
/// The day of the year, 1 through 365/366.
pub static DAY_OF_YEAR: Rule = Rule::of(&DayOfYearRule);
/// The day of the week, Monday = 1 through Sunday = 7.
pub static DAY_OF_WEEK: Rule = Rule::of(&DayOfWeekRule);
/// The quarter of the year, 1 through 4.
pub static QUARTER_OF_YEAR: Rule = Rule::of(&QuarterOfYearRule);
/// The month of the quarter, 1 through 3.
pub static MONTH_OF_QUARTER: Rule = Rule::of(&MonthOfQuarterRule);
/// The half of the day, AM = 0 and PM = 1.
pub static AM_PM: Rule = Rule::of(&AmPmRule);
/// The hour within the half-day, 0 through 11.
pub static HOUR_OF_AM_PM: Rule = Rule::of(&HourOfAmPmRule);
/// The hour of the day, 0 through 23.
pub static HOUR_OF_DAY: Rule = Rule::of(&HourOfDayRule);
/// The minute of the hour, 0 through 59.
pub static MINUTE_OF_HOUR: Rule = Rule::of(&MinuteOfHourRule);
/// The second of the minute, 0 through 59.
pub static SECOND_OF_MINUTE: Rule = Rule::of(&SecondOfMinuteRule);
/// The nanosecond of the second, 0 through 999,999,999.
pub static NANO_OF_SECOND: Rule = Rule::of(&NanoOfSecondRule);
/// The complete date.
pub static DATE: Rule = Rule::of(&DateRule);
/// The time of day.
pub static TIME: Rule = Rule::of(&TimeRule);
/// The date with time.
pub static DATE_TIME: Rule = Rule::of(&DateTimeRule);
/// The zone offset.
pub static OFFSET: Rule = Rule::of(&OffsetRule);
/// The time-zone.
pub static ZONE: Rule = Rule::of(&ZoneRule);
/// The date-time with offset.
pub static OFFSET_DATE_TIME: Rule = Rule::of(&OffsetDateTimeRule);
/// The date-time in a zone.
pub static ZONED_DATE_TIME: Rule = Rule::of(&ZonedDateTimeRule);

struct YearRule;

impl CalendricalRule for YearRule {
    fn id(&self) -> &'static str {
        "ISO.Year"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((MIN_YEAR as i64, MAX_YEAR as i64))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.year_month().map(|ym| Value::Integer(ym.year() as i64))
    }
}

struct MonthOfYearRule;

impl CalendricalRule for MonthOfYearRule {
    fn id(&self) -> &'static str {
        "ISO.MonthOfYear"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Months)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 12))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Month
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.year_month().map(|ym| Value::Month(ym.month()))
    }

    fn interpret(
        &self,
        merger: &mut CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        let number = match value.as_integer() {
            Some(number) => number,
            None => return Ok(None),
        };
        if (1..=12).contains(&number) {
            return Ok(Some(Value::Month(Month::of(number)?)));
        }
        if merger.context().is_strict() {
            return Err(Error::out_of_range(self.id(), number, 1, 12));
        }
        // fold into range, carrying whole years into the overflow
        let years = (number - 1).div_euclid(12);
        let month = (number - 1).rem_euclid(12) + 1;
        let years = i32::try_from(years).map_err(|_| Error::overflow("month overflow"))?;
        merger.add_to_overflow(Period::of_years(years))?;
        Ok(Some(Value::Month(Month::of(month)?)))
    }
}

struct DayOfMonthRule;

impl CalendricalRule for DayOfMonthRule {
    fn id(&self) -> &'static str {
        "ISO.DayOfMonth"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Months)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 31))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.date().map(|d| Value::Integer(d.day() as i64))
    }
}

struct DayOfYearRule;

impl CalendricalRule for DayOfYearRule {
    fn id(&self) -> &'static str {
        "ISO.DayOfYear"
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
        from.date().map(|d| Value::Integer(d.day_of_year() as i64))
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let (year, day_of_year) =
            match (merger.get_integer(YEAR), merger.get_integer(DAY_OF_YEAR)) {
                (Some(year), Some(day_of_year)) => (year, day_of_year),
                _ => return Ok(()),
            };
        let date = Date::from_year_day(year as i32, day_of_year)?;
        merger.store_merged(DATE, Value::Date(date))?;
        merger.remove_processed(YEAR);
        merger.remove_processed(DAY_OF_YEAR);
        Ok(())
    }
}

struct DayOfWeekRule;

impl CalendricalRule for DayOfWeekRule {
    fn id(&self) -> &'static str {
        "ISO.DayOfWeek"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Weeks)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 7))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::DayOfWeek
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.date().map(|d| Value::DayOfWeek(d.day_of_week()))
    }

    fn interpret(
        &self,
        _merger: &mut CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        match value.as_integer() {
            Some(number) => Ok(Some(Value::DayOfWeek(DayOfWeek::of(number)?))),
            None => Ok(None),
        }
    }
}

struct QuarterOfYearRule;

impl CalendricalRule for QuarterOfYearRule {
    fn id(&self) -> &'static str {
        "ISO.QuarterOfYear"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Quarters)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Years)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 4))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Quarter
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.year_month().map(|ym| Value::Quarter(ym.month().quarter()))
    }

    fn interpret(
        &self,
        _merger: &mut CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        match value.as_integer() {
            Some(number) => Ok(Some(Value::Quarter(Quarter::of(number)?))),
            None => Ok(None),
        }
    }
}

struct MonthOfQuarterRule;

impl CalendricalRule for MonthOfQuarterRule {
    fn id(&self) -> &'static str {
        "ISO.MonthOfQuarter"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Months)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Quarters)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((1, 3))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.year_month().map(|ym| Value::Integer(ym.month().month_of_quarter() as i64))
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let month_of_quarter = match merger.get_integer(MONTH_OF_QUARTER) {
            Some(v) => v,
            None => return Ok(()),
        };
        let quarter = match merger.get(QUARTER_OF_YEAR) {
            Some(Value::Quarter(q)) => *q,
            _ => return Ok(()),
        };
        let month = quarter.first_month().plus(month_of_quarter - 1);
        merger.store_merged(MONTH_OF_YEAR, Value::Month(month))?;
        merger.remove_processed(QUARTER_OF_YEAR);
        merger.remove_processed(MONTH_OF_QUARTER);
        Ok(())
    }
}

struct AmPmRule;

impl CalendricalRule for AmPmRule {
    fn id(&self) -> &'static str {
        "ISO.AmPmOfDay"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::HalfDays)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 1))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::AmPm
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::AmPm(AmPm::of_hour(t.hour())))
    }

    fn interpret(
        &self,
        _merger: &mut CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        match value.as_integer() {
            Some(number) => Ok(Some(Value::AmPm(AmPm::of(number)?))),
            None => Ok(None),
        }
    }
}

struct HourOfAmPmRule;

impl CalendricalRule for HourOfAmPmRule {
    fn id(&self) -> &'static str {
        "ISO.HourOfAmPm"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Hours)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::HalfDays)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 11))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::Integer((t.hour() % 12) as i64))
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let hour_of_am_pm = match merger.get_integer(HOUR_OF_AM_PM) {
            Some(v) => v,
            None => return Ok(()),
        };
        let am_pm = match merger.get(AM_PM) {
            Some(Value::AmPm(v)) => *v,
            _ => return Ok(()),
        };
        let hour = am_pm.number() as i64 * 12 + hour_of_am_pm;
        merger.store_merged(HOUR_OF_DAY, Value::Integer(hour))?;
        merger.remove_processed(AM_PM);
        merger.remove_processed(HOUR_OF_AM_PM);
        Ok(())
    }
}

struct HourOfDayRule;

impl CalendricalRule for HourOfDayRule {
    fn id(&self) -> &'static str {
        "ISO.HourOfDay"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Hours)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 23))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::Integer(t.hour() as i64))
    }

    fn interpret(
        &self,
        merger: &mut CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        let number = match value.as_integer() {
            Some(number) => number,
            None => return Ok(None),
        };
        if (0..=23).contains(&number) {
            return Ok(Some(Value::Integer(number)));
        }
        if merger.context().is_strict() {
            return Err(Error::out_of_range(self.id(), number, 0, 23));
        }
        // fold into range, carrying whole days into the overflow
        let days = number.div_euclid(24);
        let hour = number.rem_euclid(24);
        let days = i32::try_from(days).map_err(|_| Error::overflow("hour overflow"))?;
        merger.add_to_overflow(Period::of_days(days))?;
        Ok(Some(Value::Integer(hour)))
    }
}

struct MinuteOfHourRule;

impl CalendricalRule for MinuteOfHourRule {
    fn id(&self) -> &'static str {
        "ISO.MinuteOfHour"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Minutes)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Hours)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 59))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::Integer(t.minute() as i64))
    }
}

struct SecondOfMinuteRule;

impl CalendricalRule for SecondOfMinuteRule {
    fn id(&self) -> &'static str {
        "ISO.SecondOfMinute"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Seconds)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Minutes)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 59))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::Integer(t.second() as i64))
    }
}

struct NanoOfSecondRule;

impl CalendricalRule for NanoOfSecondRule {
    fn id(&self) -> &'static str {
        "ISO.NanoOfSecond"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Nanos)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Seconds)
    }

    fn range(&self) -> Option<(i64, i64)> {
        Some((0, 999_999_999))
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(|t| Value::Integer(t.nano() as i64))
    }
}

struct DateRule;

impl CalendricalRule for DateRule {
    fn id(&self) -> &'static str {
        "ISO.Date"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Date
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.date().map(Value::Date)
    }
}

struct TimeRule;

impl CalendricalRule for TimeRule {
    fn id(&self) -> &'static str {
        "ISO.Time"
    }

    fn period_unit(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Nanos)
    }

    fn period_range(&self) -> Option<PeriodUnit> {
        Some(PeriodUnit::Days)
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Time
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.time().map(Value::Time)
    }
}

struct DateTimeRule;

impl CalendricalRule for DateTimeRule {
    fn id(&self) -> &'static str {
        "ISO.DateTime"
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::DateTime
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        match (from.date(), from.time()) {
            (Some(date), Some(time)) => Some(Value::DateTime(DateTime::new(date, time))),
            _ => None,
        }
    }
}

struct OffsetRule;

impl CalendricalRule for OffsetRule {
    fn id(&self) -> &'static str {
        "ISO.ZoneOffset"
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Offset
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.offset().map(Value::Offset)
    }
}

struct ZoneRule;

impl CalendricalRule for ZoneRule {
    fn id(&self) -> &'static str {
        "ISO.Zone"
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Zone
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        from.zone().map(Value::Zone)
    }
}

struct OffsetDateTimeRule;

impl CalendricalRule for OffsetDateTimeRule {
    fn id(&self) -> &'static str {
        "ISO.OffsetDateTime"
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::OffsetDateTime
    }

    fn derive(&self, from: &dyn Calendrical) -> Option<Value> {
        match (from.date(), from.time(), from.offset()) {
            (Some(date), Some(time), Some(offset)) => Some(Value::OffsetDateTime(
                OffsetDateTime::new(DateTime::new(date, time), offset),
            )),
            _ => None,
        }
    }
}

struct ZonedDateTimeRule;

impl CalendricalRule for ZonedDateTimeRule {
    fn id(&self) -> &'static str {
        "ISO.ZonedDateTime"
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Zoned
    }

    fn derive(&self, _from: &dyn Calendrical) -> Option<Value> {
        // a zoned date-time cannot be derived without consulting zone rules
        None
    }
}

/// The ISO-8601 chronology.
pub struct IsoChronology;

/// The ISO-8601 chronology singleton.
pub static ISO: IsoChronology = IsoChronology;

impl IsoChronology {
    /// Combines year, month and day-of-month into a date. Strict contexts
    /// reject a day invalid for the month; lenient contexts count the
    /// excess days forward from the first of the month.
    fn merge_date(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let year = match merger.get_integer(YEAR) {
            Some(year) => year,
            None => return Ok(()),
        };
        let month = match merger.get(MONTH_OF_YEAR) {
            Some(Value::Month(month)) => *month,
            _ => return Ok(()),
        };
        let day = match merger.get_integer(DAY_OF_MONTH) {
            Some(day) => day,
            None => return Ok(()),
        };
        let date = match Date::new(year as i32, month, day) {
            Ok(date) => date,
            Err(err) => {
                if merger.context().is_strict() {
                    return Err(err);
                }
                Date::new(year as i32, month, 1)?.plus_days(day - 1)?
            }
        };
        merger.store_merged(DATE, Value::Date(date))?;
        merger.remove_processed(YEAR);
        merger.remove_processed(MONTH_OF_YEAR);
        merger.remove_processed(DAY_OF_MONTH);
        Ok(())
    }

    /// Combines hour-of-day with any finer fields into a time; absent finer
    /// fields default to zero.
    fn merge_time(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let hour = match merger.get_integer(HOUR_OF_DAY) {
            Some(hour) => hour,
            None => return Ok(()),
        };
        let minute = merger.get_integer(MINUTE_OF_HOUR).unwrap_or(0);
        let second = merger.get_integer(SECOND_OF_MINUTE).unwrap_or(0);
        let nano = merger.get_integer(NANO_OF_SECOND).unwrap_or(0);
        let time = Time::of_hms_nano(hour, minute, second, nano)?;
        merger.store_merged(TIME, Value::Time(time))?;
        merger.remove_processed(HOUR_OF_DAY);
        merger.remove_processed(MINUTE_OF_HOUR);
        merger.remove_processed(SECOND_OF_MINUTE);
        merger.remove_processed(NANO_OF_SECOND);
        Ok(())
    }

    /// Applies accumulated overflow to the most composite date value built
    /// so far. Overflow that cannot attach to a date is left on the merger.
    fn apply_overflow(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        let overflow = merger.take_overflow();
        if overflow.is_zero() {
            return Ok(());
        }
        if let Some(Value::DateTime(dt)) = merger.get(DATE_TIME).cloned() {
            merger.replace(DATE_TIME, Value::DateTime(dt.plus_period(&overflow)?));
            return Ok(());
        }
        if let Some(Value::Date(date)) = merger.get(DATE).cloned() {
            merger.replace(DATE, Value::Date(date.plus_period(&overflow)?));
            if !overflow.is_time_zero() {
                merger.set_overflow(Period::of(
                    0,
                    0,
                    0,
                    overflow.hours(),
                    overflow.minutes(),
                    overflow.seconds(),
                    overflow.nanos(),
                ));
            }
            return Ok(());
        }
        merger.set_overflow(overflow);
        Ok(())
    }
}

impl Chronology for IsoChronology {
    fn name(&self) -> &'static str {
        "ISO"
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), Error> {
        self.merge_date(merger)?;
        self.merge_time(merger)?;

        // date + time -> date-time
        if let (Some(Value::Date(date)), Some(Value::Time(time))) =
            (merger.get(DATE).cloned(), merger.get(TIME).cloned())
        {
            let datetime = DateTime::new(date, time);
            merger.store_merged(DATE_TIME, Value::DateTime(datetime))?;
            merger.remove_processed(DATE);
            merger.remove_processed(TIME);
        }

        self.apply_overflow(merger)?;

        // date-time + offset -> offset date-time
        if let (Some(Value::DateTime(datetime)), Some(Value::Offset(offset))) =
            (merger.get(DATE_TIME).cloned(), merger.get(OFFSET).cloned())
        {
            let odt = OffsetDateTime::new(datetime, offset);
            merger.store_merged(OFFSET_DATE_TIME, Value::OffsetDateTime(odt))?;
            merger.remove_processed(DATE_TIME);
            merger.remove_processed(OFFSET);
        }

        // (offset date-time | date-time) + zone -> zoned date-time
        if let Some(Value::Zone(zone)) = merger.get(ZONE).cloned() {
            if let Some(Value::OffsetDateTime(odt)) = merger.get(OFFSET_DATE_TIME).cloned() {
                let zoned = ZonedDateTime::from_offset_datetime(odt, zone)?;
                merger.store_merged(ZONED_DATE_TIME, Value::Zoned(zoned))?;
                merger.remove_processed(OFFSET_DATE_TIME);
                merger.remove_processed(ZONE);
            } else if let Some(Value::DateTime(datetime)) = merger.get(DATE_TIME).cloned() {
                let resolver = merger.context().resolver();
                let odt = resolver.resolve(zone.rules().as_ref(), datetime, None)?;
                let zoned = ZonedDateTime::from_offset_datetime(odt, zone)?;
                merger.store_merged(ZONED_DATE_TIME, Value::Zoned(zoned))?;
                merger.remove_processed(DATE_TIME);
                merger.remove_processed(ZONE);
            }
        }

        Ok(())
    }
}
