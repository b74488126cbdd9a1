// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! A date-time in a time-zone.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;

use crate::datetime::DateTime;
use crate::duration::Duration;
use crate::error::Error;
use crate::format;
use crate::instant::Instant;
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::period::Period;
use crate::zone::resolver::{ZoneResolver, RETAIN_OFFSET};
use crate::zone::TimeZone;

/// A date-time with a time-zone, such as
/// `2020-02-29T13:45+01:00[Europe/Paris]`.
///
/// The value stores the resolved [`OffsetDateTime`] together with the zone
/// whose rules produced it, so the instant is always unambiguous. Whenever
/// the local date-time changes, the offset is re-resolved against the zone
/// rules through a [`ZoneResolver`].
#[derive(PartialEq, Eq, Clone, Debug, Hash)]
pub struct ZonedDateTime {
    datetime: OffsetDateTime,
    zone: TimeZone,
}

impl ZonedDateTime {
    /// Resolves a local date-time in a zone using the given policy for gaps
    /// and overlaps.
    pub fn of_local(
        local: DateTime,
        zone: TimeZone,
        resolver: &dyn ZoneResolver,
    ) -> Result<ZonedDateTime, Error> {
        let datetime = resolver.resolve(zone.rules().as_ref(), local, None)?;
        Ok(ZonedDateTime { datetime, zone })
    }

    /// Makes a `ZonedDateTime` for an instant in a zone. This never needs a
    /// resolver, since every instant maps to exactly one offset.
    pub fn of_instant(instant: Instant, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        let offset = zone.rules().offset_at(instant);
        let datetime = OffsetDateTime::from_instant(instant, offset)?;
        Ok(ZonedDateTime { datetime, zone })
    }

    /// Makes a `ZonedDateTime` carrying the instant of an `OffsetDateTime`
    /// into a zone.
    pub fn from_offset_datetime(
        datetime: OffsetDateTime,
        zone: TimeZone,
    ) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_instant(datetime.to_instant(), zone)
    }

    /// The local date-time part.
    #[inline]
    pub fn datetime(&self) -> DateTime {
        self.datetime.datetime()
    }

    /// The resolved offset.
    #[inline]
    pub fn offset(&self) -> ZoneOffset {
        self.datetime.offset()
    }

    /// The offset date-time part.
    #[inline]
    pub const fn offset_datetime(&self) -> OffsetDateTime {
        self.datetime
    }

    /// The time-zone.
    #[inline]
    pub const fn zone(&self) -> &TimeZone {
        &self.zone
    }

    /// The instant this value represents.
    pub fn to_instant(&self) -> Instant {
        self.datetime.to_instant()
    }

    /// Adds an exact duration. This is instant arithmetic: the local time
    /// moves by however much the wall clock shows after the elapsed time,
    /// crossing transitions as the zone dictates.
    pub fn plus_duration(&self, duration: Duration) -> Result<ZonedDateTime, Error> {
        let instant = self.to_instant().plus(duration)?;
        ZonedDateTime::of_instant(instant, self.zone.clone())
    }

    /// Adds a period to the local date-time and re-resolves the offset with
    /// the retain-offset policy, keeping the wall-clock-intuitive result
    /// when the new local time lands in an overlap.
    pub fn plus_period(&self, period: &Period) -> Result<ZonedDateTime, Error> {
        let local = self.datetime().plus_period(period)?;
        let datetime = RETAIN_OFFSET.resolve(self.zone.rules().as_ref(), local, Some(&self.datetime))?;
        Ok(ZonedDateTime { datetime, zone: self.zone.clone() })
    }

    /// Subtracts a period, re-resolving like [`plus_period`](Self::plus_period).
    pub fn minus_period(&self, period: &Period) -> Result<ZonedDateTime, Error> {
        self.plus_period(&period.negated()?)
    }

    /// The same instant expressed in another zone.
    pub fn with_zone_same_instant(&self, zone: TimeZone) -> Result<ZonedDateTime, Error> {
        ZonedDateTime::of_instant(self.to_instant(), zone)
    }
}

impl Ord for ZonedDateTime {
    /// Orders by instant first, then local date-time, then zone identifier,
    /// keeping the ordering consistent with equality.
    fn cmp(&self, other: &ZonedDateTime) -> Ordering {
        self.to_instant()
            .cmp(&other.to_instant())
            .then_with(|| self.datetime().cmp(&other.datetime()))
            .then_with(|| self.zone.id().cmp(other.zone.id()))
    }
}

impl PartialOrd for ZonedDateTime {
    fn partial_cmp(&self, other: &ZonedDateTime) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ZonedDateTime {
    /// The offset date-time followed by the zone id in brackets, such as
    /// `2020-02-29T13:45+01:00[Europe/Paris]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.datetime, self.zone)
    }
}

impl FromStr for ZonedDateTime {
    type Err = Error;

    /// Parses the `{offset-datetime}[{zone-id}]` form. Only fixed-offset
    /// zone identifiers can be reconstructed without a registry; region
    /// identifiers fail with an unknown-zone error.
    fn from_str(s: &str) -> Result<ZonedDateTime, Error> {
        format::parse_zoned(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Date;
    use crate::time::Time;
    use crate::zone::resolver::{POST_TRANSITION, STRICT};
    use crate::zone::testutil::dst_rules;
    use std::sync::Arc;

    fn dt(y: i32, mo: i64, d: i64, h: i64, mi: i64) -> DateTime {
        DateTime::new(Date::from_ymd(y, mo, d).unwrap(), Time::of(h, mi).unwrap())
    }

    fn test_zone() -> TimeZone {
        TimeZone::of_rules("Test/Europe", Arc::new(dst_rules())).unwrap()
    }

    #[test]
    fn test_of_local_normal() {
        let zdt = ZonedDateTime::of_local(dt(2020, 7, 1, 12, 0), test_zone(), &STRICT).unwrap();
        assert_eq!(zdt.offset(), ZoneOffset::of_hours(2).unwrap());
        assert_eq!(zdt.datetime(), dt(2020, 7, 1, 12, 0));
        assert_eq!(zdt.zone().id(), "Test/Europe");
    }

    #[test]
    fn test_of_local_gap_policies() {
        let local = dt(2020, 3, 29, 1, 30);
        assert!(ZonedDateTime::of_local(local, test_zone(), &STRICT).is_err());

        let zdt = ZonedDateTime::of_local(local, test_zone(), &POST_TRANSITION).unwrap();
        assert_eq!(zdt.datetime(), dt(2020, 3, 29, 2, 0));
        assert_eq!(zdt.offset(), ZoneOffset::of_hours(2).unwrap());
    }

    #[test]
    fn test_duration_arithmetic_crosses_gap() {
        // 00:30 + 1h of real time = 02:30 local: the gap swallows 01:xx
        let start =
            ZonedDateTime::of_local(dt(2020, 3, 29, 0, 30), test_zone(), &STRICT).unwrap();
        let end = start.plus_duration(Duration::of_seconds(3600)).unwrap();
        assert_eq!(end.datetime(), dt(2020, 3, 29, 2, 30));
        assert_eq!(end.offset(), ZoneOffset::of_hours(2).unwrap());
        assert_eq!(
            Duration::between(start.to_instant(), end.to_instant()).unwrap(),
            Duration::of_seconds(3600)
        );
    }

    #[test]
    fn test_period_arithmetic_retains_offset() {
        // start in summer time, add a day landing inside the overlap:
        // the +02:00 offset is still valid there and is retained
        let start =
            ZonedDateTime::of_local(dt(2020, 10, 24, 1, 30), test_zone(), &STRICT).unwrap();
        assert_eq!(start.offset(), ZoneOffset::of_hours(2).unwrap());
        let end = start.plus_period(&Period::of_days(1)).unwrap();
        assert_eq!(end.datetime(), dt(2020, 10, 25, 1, 30));
        assert_eq!(end.offset(), ZoneOffset::of_hours(2).unwrap());

        let back = end.minus_period(&Period::of_days(1)).unwrap();
        assert_eq!(back.datetime(), start.datetime());
    }

    #[test]
    fn test_instant_round_trip() {
        let zdt = ZonedDateTime::of_local(dt(2020, 7, 1, 12, 0), test_zone(), &STRICT).unwrap();
        let roundtrip = ZonedDateTime::of_instant(zdt.to_instant(), test_zone()).unwrap();
        assert_eq!(roundtrip, zdt);

        let utc = zdt.with_zone_same_instant(TimeZone::utc()).unwrap();
        assert_eq!(utc.datetime(), dt(2020, 7, 1, 10, 0));
        assert_eq!(utc.to_instant(), zdt.to_instant());
    }

    #[test]
    fn test_display() {
        let zdt = ZonedDateTime::of_local(dt(2020, 7, 1, 12, 0), test_zone(), &STRICT).unwrap();
        assert_eq!(zdt.to_string(), "2020-07-01T12:00+02:00[Test/Europe]");

        let fixed = ZonedDateTime::of_local(
            dt(2020, 7, 1, 12, 0),
            TimeZone::fixed(ZoneOffset::of_hours(2).unwrap()),
            &STRICT,
        )
        .unwrap();
        assert_eq!(fixed.to_string(), "2020-07-01T12:00+02:00[UTC+02:00]");
        assert_eq!(fixed.to_string().parse::<ZonedDateTime>().unwrap(), fixed);
    }
}
