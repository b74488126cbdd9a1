// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! The calendrical rule system.
//!
//! A [`CalendricalRule`] describes one calendrical quantity: its identifier,
//! the period unit it varies in, the span bounding it, its value range, and
//! how to derive it from richer values or combine it with sibling fields.
//! Rules are `'static` singletons compared by identifier and handled through
//! the copyable [`Rule`] key. Field values travel as the closed [`Value`]
//! sum, so a rule pattern-matches the variant it expects instead of
//! downcasting.

use core::cmp::Ordering;
use core::fmt;

use crate::date::Date;
use crate::datetime::DateTime;
use crate::error::Error;
use crate::month::{Month, Quarter};
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::time::{AmPm, Time};
use crate::weekday::DayOfWeek;
use crate::year_month::YearMonth;
use crate::zone::TimeZone;
use crate::zoned::ZonedDateTime;

pub mod merger;

/// The ladder of period units, finest first.
///
/// The derived ordering is the chronological ordering used to sort rules:
/// a rule counting nanoseconds sorts before one counting hours, which sorts
/// before one counting years.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub enum PeriodUnit {
    /// Nanoseconds.
    Nanos,
    /// Microseconds.
    Micros,
    /// Milliseconds.
    Millis,
    /// Seconds.
    Seconds,
    /// Minutes.
    Minutes,
    /// Hours.
    Hours,
    /// Half-days (AM/PM).
    HalfDays,
    /// Days.
    Days,
    /// Weeks.
    Weeks,
    /// Months.
    Months,
    /// Quarters.
    Quarters,
    /// Years.
    Years,
    /// Decades.
    Decades,
    /// Centuries.
    Centuries,
    /// Millennia.
    Millennia,
    /// Eras.
    Eras,
}

/// A calendrical field value.
///
/// This closed sum replaces runtime type tokens: every kind of value a rule
/// can produce or consume is one variant, and mismatches fail cleanly with
/// an unrecognized-value error instead of a downcast.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    /// A plain integer field value, such as a year or a minute.
    Integer(i64),
    /// A month of the year.
    Month(Month),
    /// A day of the week.
    DayOfWeek(DayOfWeek),
    /// A quarter of the year.
    Quarter(Quarter),
    /// A half of the day.
    AmPm(AmPm),
    /// A complete date.
    Date(Date),
    /// A time of day.
    Time(Time),
    /// A date with a time.
    DateTime(DateTime),
    /// A zone offset.
    Offset(ZoneOffset),
    /// A time-zone.
    Zone(TimeZone),
    /// A date-time with an offset.
    OffsetDateTime(OffsetDateTime),
    /// A date-time in a zone.
    Zoned(ZonedDateTime),
}

/// The kind of a [`Value`], used by rules to declare and check the variant
/// they work with.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum ValueKind {
    /// [`Value::Integer`].
    Integer,
    /// [`Value::Month`].
    Month,
    /// [`Value::DayOfWeek`].
    DayOfWeek,
    /// [`Value::Quarter`].
    Quarter,
    /// [`Value::AmPm`].
    AmPm,
    /// [`Value::Date`].
    Date,
    /// [`Value::Time`].
    Time,
    /// [`Value::DateTime`].
    DateTime,
    /// [`Value::Offset`].
    Offset,
    /// [`Value::Zone`].
    Zone,
    /// [`Value::OffsetDateTime`].
    OffsetDateTime,
    /// [`Value::Zoned`].
    Zoned,
}

impl ValueKind {
    /// The kind name, used in error messages.
    pub const fn name(&self) -> &'static str {
        match *self {
            ValueKind::Integer => "integer",
            ValueKind::Month => "month",
            ValueKind::DayOfWeek => "day-of-week",
            ValueKind::Quarter => "quarter",
            ValueKind::AmPm => "am-pm",
            ValueKind::Date => "date",
            ValueKind::Time => "time",
            ValueKind::DateTime => "date-time",
            ValueKind::Offset => "offset",
            ValueKind::Zone => "zone",
            ValueKind::OffsetDateTime => "offset-date-time",
            ValueKind::Zoned => "zoned-date-time",
        }
    }

    /// True for field-level kinds that can be re-derived from a composite
    /// value; composite kinds themselves are not.
    pub(crate) const fn is_field(&self) -> bool {
        matches!(
            *self,
            ValueKind::Integer
                | ValueKind::Month
                | ValueKind::DayOfWeek
                | ValueKind::Quarter
                | ValueKind::AmPm
        )
    }
}

impl Value {
    /// The kind of this value.
    pub const fn kind(&self) -> ValueKind {
        match *self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Month(_) => ValueKind::Month,
            Value::DayOfWeek(_) => ValueKind::DayOfWeek,
            Value::Quarter(_) => ValueKind::Quarter,
            Value::AmPm(_) => ValueKind::AmPm,
            Value::Date(_) => ValueKind::Date,
            Value::Time(_) => ValueKind::Time,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Offset(_) => ValueKind::Offset,
            Value::Zone(_) => ValueKind::Zone,
            Value::OffsetDateTime(_) => ValueKind::OffsetDateTime,
            Value::Zoned(_) => ValueKind::Zoned,
        }
    }

    /// The integer for an `Integer` value, or `None`.
    pub const fn as_integer(&self) -> Option<i64> {
        match *self {
            Value::Integer(v) => Some(v),
            _ => None,
        }
    }

    /// The date for a `Date` value, or `None`.
    pub const fn as_date(&self) -> Option<Date> {
        match *self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::Month(v) => write!(f, "{}", v),
            Value::DayOfWeek(v) => write!(f, "{}", v),
            Value::Quarter(v) => write!(f, "{}", v),
            Value::AmPm(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v),
            Value::Time(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
            Value::Offset(v) => write!(f, "{}", v),
            Value::Zone(v) => write!(f, "{}", v),
            Value::OffsetDateTime(v) => write!(f, "{}", v),
            Value::Zoned(v) => write!(f, "{}", v),
        }
    }
}

/// An object queryable for calendrical field values.
///
/// The base queries expose the composite parts a value carries; rules pull
/// from them in their `derive` implementations. A query returns `None` when
/// the information is simply not present — that is never an error.
pub trait Calendrical {
    /// The complete date, when one is known.
    fn date(&self) -> Option<Date> {
        None
    }

    /// The time of day, when one is known.
    fn time(&self) -> Option<Time> {
        None
    }

    /// The zone offset, when one is known.
    fn offset(&self) -> Option<ZoneOffset> {
        None
    }

    /// The time-zone, when one is known.
    fn zone(&self) -> Option<TimeZone> {
        None
    }

    /// The year-month, when one is known. Falls back to the date.
    fn year_month(&self) -> Option<YearMonth> {
        self.date()
            .map(|d| YearMonth::of(d.year(), d.month().number() as i64).expect("valid date"))
    }

    /// The value of an arbitrary rule for this calendrical, derived through
    /// the rule itself.
    fn field(&self, rule: Rule) -> Option<Value>
    where
        Self: Sized,
    {
        rule.get().derive(self)
    }
}

impl Calendrical for Date {
    fn date(&self) -> Option<Date> {
        Some(*self)
    }
}

impl Calendrical for Time {
    fn time(&self) -> Option<Time> {
        Some(*self)
    }
}

impl Calendrical for DateTime {
    fn date(&self) -> Option<Date> {
        Some(self.date())
    }

    fn time(&self) -> Option<Time> {
        Some(self.time())
    }
}

impl Calendrical for YearMonth {
    fn year_month(&self) -> Option<YearMonth> {
        Some(*self)
    }
}

impl Calendrical for OffsetDateTime {
    fn date(&self) -> Option<Date> {
        Some(self.datetime().date())
    }

    fn time(&self) -> Option<Time> {
        Some(self.datetime().time())
    }

    fn offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }
}

impl Calendrical for ZonedDateTime {
    fn date(&self) -> Option<Date> {
        Some(self.datetime().date())
    }

    fn time(&self) -> Option<Time> {
        Some(self.datetime().time())
    }

    fn offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }

    fn zone(&self) -> Option<TimeZone> {
        Some(self.zone().clone())
    }
}

/// A typed, chronology-scoped descriptor of one calendrical quantity.
///
/// Implementations are unit-struct singletons with a `'static` lifetime,
/// addressed through [`Rule`]. The identifier is `"{chronology}.{name}"` and
/// is the basis of equality.
pub trait CalendricalRule: Send + Sync + 'static {
    /// The identifier, `"{chronology}.{name}"`.
    fn id(&self) -> &'static str;

    /// The unit this field varies in, such as hours for hour-of-day. `None`
    /// for composite rules without a single unit.
    fn period_unit(&self) -> Option<PeriodUnit> {
        None
    }

    /// The span bounding this field, such as days for hour-of-day. `None`
    /// when unbounded.
    fn period_range(&self) -> Option<PeriodUnit> {
        None
    }

    /// The fixed minimum and maximum for an integer-valued field.
    fn range(&self) -> Option<(i64, i64)> {
        None
    }

    /// The value kind this rule stores and produces.
    fn canonical_kind(&self) -> ValueKind;

    /// Derives this rule's value from a richer calendrical, or `None` when
    /// the information is not present.
    ///
    /// Implementations must be side-effect-free and must not query this same
    /// rule back on `from`, which would recurse without bound.
    fn derive(&self, from: &dyn Calendrical) -> Option<Value>;

    /// Reinterprets a raw value that is not already in canonical form:
    /// wrong variant, or an integer outside the field range in a lenient
    /// context. May push rollover amounts into the merger's overflow.
    /// Returns `None` when the value cannot be made sense of.
    fn interpret(
        &self,
        merger: &mut merger::CalendricalMerger,
        value: &Value,
    ) -> Result<Option<Value>, Error> {
        let _ = (merger, value);
        Ok(None)
    }

    /// Combines this field with sibling fields in the merger into a more
    /// composite value, storing results with
    /// [`store_merged`](merger::CalendricalMerger::store_merged) and
    /// consuming inputs with
    /// [`remove_processed`](merger::CalendricalMerger::remove_processed).
    fn merge(&self, merger: &mut merger::CalendricalMerger) -> Result<(), Error> {
        let _ = merger;
        Ok(())
    }
}

/// A copyable handle to a rule singleton, usable as an ordered map key.
#[derive(Clone, Copy)]
pub struct Rule(&'static dyn CalendricalRule);

impl Rule {
    /// Wraps a rule singleton.
    #[inline]
    pub const fn of(rule: &'static dyn CalendricalRule) -> Rule {
        Rule(rule)
    }

    /// The rule itself.
    #[inline]
    pub fn get(&self) -> &'static dyn CalendricalRule {
        self.0
    }

    /// The rule identifier.
    #[inline]
    pub fn id(&self) -> &'static str {
        self.0.id()
    }

    /// Derives this rule's value from a calendrical.
    pub fn value_of(&self, from: &dyn Calendrical) -> Option<Value> {
        self.0.derive(from)
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.0.id() == other.0.id()
    }
}

impl Eq for Rule {}

impl std::hash::Hash for Rule {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id().hash(state);
    }
}

/// `None` sorts after every `Some`, so rules without a unit or range come
/// last.
fn cmp_unit(a: Option<PeriodUnit>, b: Option<PeriodUnit>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl Ord for Rule {
    /// Orders by period unit, then period range (absent values last), then
    /// identifier, so finer-grained rules sort first.
    fn cmp(&self, other: &Rule) -> Ordering {
        cmp_unit(self.0.period_unit(), other.0.period_unit())
            .then_with(|| cmp_unit(self.0.period_range(), other.0.period_range()))
            .then_with(|| self.0.id().cmp(other.0.id()))
    }
}

impl PartialOrd for Rule {
    fn partial_cmp(&self, other: &Rule) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rule({})", self.0.id())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chronology::iso;

    #[test]
    fn test_unit_ladder_ordering() {
        assert!(PeriodUnit::Nanos < PeriodUnit::Seconds);
        assert!(PeriodUnit::Hours < PeriodUnit::Days);
        assert!(PeriodUnit::Months < PeriodUnit::Quarters);
        assert!(PeriodUnit::Years < PeriodUnit::Eras);
    }

    #[test]
    fn test_rule_ordering_finest_first() {
        // nano-of-second sorts before hour-of-day sorts before year
        assert!(iso::NANO_OF_SECOND < iso::HOUR_OF_DAY);
        assert!(iso::HOUR_OF_DAY < iso::YEAR);
        // same unit: the narrower range sorts first
        assert!(iso::DAY_OF_MONTH < iso::DAY_OF_YEAR);
        // composite rules without a unit sort last
        assert!(iso::YEAR < iso::ZONE);
    }

    #[test]
    fn test_rule_identity() {
        assert_eq!(iso::YEAR, iso::YEAR);
        assert_ne!(iso::YEAR, iso::MONTH_OF_YEAR);
        assert_eq!(iso::YEAR.id(), "ISO.Year");
        assert_eq!(iso::YEAR.to_string(), "ISO.Year");
    }

    #[test]
    fn test_value_kind_and_display() {
        assert_eq!(Value::Integer(42).kind(), ValueKind::Integer);
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::Month(Month::February).kind(), ValueKind::Month);
        assert_eq!(Value::Month(Month::February).to_string(), "February");
        assert!(ValueKind::Integer.is_field());
        assert!(!ValueKind::Date.is_field());
    }

    #[test]
    fn test_derive_through_calendrical() {
        let date = Date::from_ymd(2020, 2, 29).unwrap();
        assert_eq!(iso::YEAR.value_of(&date), Some(Value::Integer(2020)));
        assert_eq!(iso::MONTH_OF_YEAR.value_of(&date), Some(Value::Month(Month::February)));
        assert_eq!(iso::DAY_OF_MONTH.value_of(&date), Some(Value::Integer(29)));
        assert_eq!(iso::HOUR_OF_DAY.value_of(&date), None);

        let time = Time::of_hms(13, 30, 5).unwrap();
        assert_eq!(iso::HOUR_OF_DAY.value_of(&time), Some(Value::Integer(13)));
        assert_eq!(iso::AM_PM.value_of(&time), Some(Value::AmPm(AmPm::Pm)));
        assert_eq!(iso::YEAR.value_of(&time), None);
    }
}
