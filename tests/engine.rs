//! Cross-module scenarios for the field engine: merge consistency,
//! conflict detection and the merge-loop bound.

use calclock::chronology::iso;
use calclock::field::merger::{CalendricalContext, CalendricalMerger};
use calclock::field::{Calendrical, CalendricalRule, Rule, Value, ValueKind};
use calclock::{Date, DayOfWeek, Instant, Period, Time};

fn strict() -> CalendricalMerger {
    CalendricalMerger::new(CalendricalContext::strict())
}

#[test]
fn merge_leap_day_succeeds() {
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::MONTH_OF_YEAR, 2).unwrap();
    merger.insert_integer(iso::DAY_OF_MONTH, 29).unwrap();
    let merged = merger.merge().unwrap();
    assert_eq!(merged.get(iso::DATE), Some(Value::Date(Date::from_ymd(2020, 2, 29).unwrap())));
}

#[test]
fn merge_leap_day_in_common_year_fails() {
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2019).unwrap();
    merger.insert_integer(iso::MONTH_OF_YEAR, 2).unwrap();
    merger.insert_integer(iso::DAY_OF_MONTH, 29).unwrap();
    let err = merger.merge().unwrap_err();
    assert!(err.is_invalid_value());
    assert!(err.to_string().contains("29"));
}

#[test]
fn merge_two_agreeing_derivations() {
    // {year, day-of-year} and {year, month, day} produce the same date
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::DAY_OF_YEAR, 60).unwrap();
    merger.insert_integer(iso::MONTH_OF_YEAR, 2).unwrap();
    merger.insert_integer(iso::DAY_OF_MONTH, 29).unwrap();
    let merged = merger.merge().unwrap();
    assert_eq!(merged.get(iso::DATE), Some(Value::Date(Date::from_ymd(2020, 2, 29).unwrap())));
}

#[test]
fn merge_two_disagreeing_derivations_conflicts() {
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::DAY_OF_YEAR, 60).unwrap();
    merger.insert_integer(iso::MONTH_OF_YEAR, 2).unwrap();
    merger.insert_integer(iso::DAY_OF_MONTH, 28).unwrap();
    let err = merger.merge().unwrap_err();
    assert!(err.is_merge_conflict(), "{}", err);
}

#[test]
fn merge_weekday_cross_check() {
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::DAY_OF_YEAR, 60).unwrap();
    merger
        .insert(iso::DAY_OF_WEEK, Value::DayOfWeek(DayOfWeek::Saturday))
        .unwrap();
    assert!(merger.merge().is_ok());

    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::DAY_OF_YEAR, 60).unwrap();
    merger
        .insert(iso::DAY_OF_WEEK, Value::DayOfWeek(DayOfWeek::Friday))
        .unwrap();
    assert!(merger.merge().unwrap_err().is_merge_conflict());
}

#[test]
fn merge_full_datetime() {
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    merger.insert_integer(iso::MONTH_OF_YEAR, 2).unwrap();
    merger.insert_integer(iso::DAY_OF_MONTH, 29).unwrap();
    merger.insert_integer(iso::HOUR_OF_DAY, 13).unwrap();
    merger.insert_integer(iso::MINUTE_OF_HOUR, 45).unwrap();
    merger.insert_integer(iso::SECOND_OF_MINUTE, 30).unwrap();
    let merged = merger.merge().unwrap();
    match merged.get(iso::DATE_TIME) {
        Some(Value::DateTime(datetime)) => {
            assert_eq!(datetime.to_string(), "2020-02-29T13:45:30");
        }
        other => panic!("expected a date-time, got {:?}", other),
    }
}

#[test]
fn merge_is_single_use() {
    // merge() consumes the merger; a fresh merger is needed per operation
    let mut merger = strict();
    merger.insert_integer(iso::YEAR, 2020).unwrap();
    let merged = merger.merge().unwrap();
    assert_eq!(merged.get(iso::YEAR), Some(Value::Integer(2020)));
    // `merger` is moved here; reusing it does not compile:
    // merger.insert_integer(iso::YEAR, 2021);
}

/// A defective rule for exercising the merge-loop bound: every invocation
/// of `merge` stores a fresh, never-before-seen rule.
struct SpawningRule {
    id: &'static str,
}

impl CalendricalRule for SpawningRule {
    fn id(&self) -> &'static str {
        self.id
    }

    fn canonical_kind(&self) -> ValueKind {
        ValueKind::Integer
    }

    fn derive(&self, _from: &dyn Calendrical) -> Option<Value> {
        None
    }

    fn merge(&self, merger: &mut CalendricalMerger) -> Result<(), calclock::Error> {
        let next: &'static SpawningRule = Box::leak(Box::new(SpawningRule {
            id: Box::leak(format!("{}x", self.id).into_boxed_str()),
        }));
        merger.store_merged(Rule::of(next), Value::Integer(0))?;
        Ok(())
    }
}

#[test]
#[should_panic(expected = "infinite loop blocked")]
fn merge_loop_bound_is_fatal() {
    static SEED: SpawningRule = SpawningRule { id: "Test.Spawn" };
    let mut merger = strict();
    merger.insert(Rule::of(&SEED), Value::Integer(0)).unwrap();
    let _ = merger.merge();
}

#[test]
fn instant_normalization_law() {
    for &(secs, nanos) in
        &[(0i64, 2_500_000_000i64), (10, -1), (-10, -2_000_000_001), (5, 999_999_999)]
    {
        let direct = Instant::from_epoch_seconds_adjusted(secs, nanos).unwrap();
        let prenormalized = Instant::from_epoch_seconds_adjusted(
            secs + nanos.div_euclid(1_000_000_000),
            nanos.rem_euclid(1_000_000_000),
        )
        .unwrap();
        assert_eq!(direct, prenormalized);
    }
}

#[test]
fn period_stays_unnormalized() {
    let period = Period::of_months(13);
    assert_eq!(period.total_months(), 13);
    let normalized = period.normalized().unwrap();
    assert_eq!((normalized.years(), normalized.months()), (1, 1));
}

#[test]
fn time_overflow_is_explicit() {
    let overflow = Time::of(23, 30).unwrap().plus_with_overflow(2, 0, 0, 0);
    assert_eq!(overflow.time, Time::of(1, 30).unwrap());
    assert_eq!(overflow.days, 1);

    // the caller applies the carry to the paired date
    let date = Date::from_ymd(2020, 2, 28).unwrap();
    let date = date.plus_days(overflow.days).unwrap();
    assert_eq!(date, Date::from_ymd(2020, 2, 29).unwrap());
}

#[test]
fn string_round_trips() {
    for s in &["2020-02-29", "-0044-03-15", "+10000-01-01"] {
        assert_eq!(s.parse::<Date>().unwrap().to_string(), *s);
    }
    for s in &["00:00", "13:45:30", "01:02:03.123456789"] {
        assert_eq!(s.parse::<Time>().unwrap().to_string(), *s);
    }
    for s in &["2020-02", "-0044-03", "+10000-12"] {
        assert_eq!(s.parse::<calclock::YearMonth>().unwrap().to_string(), *s);
    }
    let od = "2020-02-29+02:00".parse::<calclock::OffsetDate>().unwrap();
    assert_eq!(od.to_string(), "2020-02-29+02:00");
    let ot = "13:45:30.500-05:30".parse::<calclock::OffsetTime>().unwrap();
    assert_eq!(ot.to_string(), "13:45:30.500-05:30");
    let instant = "2009-02-13T23:31:30.000000005Z".parse::<Instant>().unwrap();
    assert_eq!(instant.to_string(), "2009-02-13T23:31:30.000000005Z");
    let period = "P1Y2M3DT4H5M6.5S".parse::<Period>().unwrap();
    assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
}

#[test]
fn parse_errors_carry_offsets() {
    let err = "2020-13x01".parse::<Date>().unwrap_err();
    assert!(err.is_parse_error() || err.is_invalid_value());

    let err = "2020_02-29".parse::<Date>().unwrap_err();
    assert_eq!(err.parse_offset(), Some(4));

    let err = "P1Y?".parse::<Period>().unwrap_err();
    assert_eq!(err.parse_offset(), Some(3));
}
