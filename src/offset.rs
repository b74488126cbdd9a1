// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! An offset from UTC, such as `+02:00`.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::format;

const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// A time-zone offset from UTC, from -18:00 to +18:00 inclusive.
///
/// This is the resolved amount by which local time differs from UTC at some
/// instant; it carries no daylight-saving rules of its own.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug, Hash)]
pub struct ZoneOffset {
    total_secs: i32,
}

impl ZoneOffset {
    /// The UTC offset, `Z`.
    pub const UTC: ZoneOffset = ZoneOffset { total_secs: 0 };

    /// Makes a `ZoneOffset` from a total number of seconds, within ±18:00.
    pub fn of_total_seconds(total_secs: i64) -> Result<ZoneOffset, Error> {
        if total_secs.abs() > MAX_OFFSET_SECONDS as i64 {
            return Err(Error::out_of_range(
                "zone-offset-seconds",
                total_secs,
                -(MAX_OFFSET_SECONDS as i64),
                MAX_OFFSET_SECONDS as i64,
            ));
        }
        Ok(ZoneOffset { total_secs: total_secs as i32 })
    }

    /// Makes a `ZoneOffset` from a whole number of hours.
    pub fn of_hours(hours: i64) -> Result<ZoneOffset, Error> {
        ZoneOffset::of_hms(hours, 0, 0)
    }

    /// Makes a `ZoneOffset` from hours and minutes, which must agree in
    /// sign.
    pub fn of_hours_minutes(hours: i64, minutes: i64) -> Result<ZoneOffset, Error> {
        ZoneOffset::of_hms(hours, minutes, 0)
    }

    /// Makes a `ZoneOffset` from hours, minutes and seconds, which must all
    /// agree in sign.
    pub fn of_hms(hours: i64, minutes: i64, seconds: i64) -> Result<ZoneOffset, Error> {
        let mixed = (hours > 0 && (minutes < 0 || seconds < 0))
            || (hours < 0 && (minutes > 0 || seconds > 0))
            || (minutes > 0 && seconds < 0)
            || (minutes < 0 && seconds > 0);
        if mixed {
            return Err(Error::invalid_field(
                "zone-offset",
                minutes,
                "hours, minutes and seconds must have the same sign".to_owned(),
            ));
        }
        if minutes.abs() > 59 {
            return Err(Error::out_of_range("zone-offset-minutes", minutes, -59, 59));
        }
        if seconds.abs() > 59 {
            return Err(Error::out_of_range("zone-offset-seconds", seconds, -59, 59));
        }
        ZoneOffset::of_total_seconds(hours * 3600 + minutes * 60 + seconds)
    }

    /// The total offset in seconds, `-64800..=64800`.
    #[inline]
    pub const fn total_seconds(&self) -> i32 {
        self.total_secs
    }

    /// The normalized identifier, `Z` or `±HH:mm[:ss]`.
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ZoneOffset {
    /// The normalized offset string: `Z` for UTC, otherwise `±HH:mm` with a
    /// `:ss` tail only when the seconds are non-zero.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total_secs == 0 {
            return f.write_str("Z");
        }
        let (sign, abs) = if self.total_secs < 0 { ('-', -self.total_secs) } else { ('+', self.total_secs) };
        write!(f, "{}{:02}:{:02}", sign, abs / 3600, abs % 3600 / 60)?;
        if abs % 60 != 0 {
            write!(f, ":{:02}", abs % 60)?;
        }
        Ok(())
    }
}

impl FromStr for ZoneOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<ZoneOffset, Error> {
        format::parse_offset(s)
    }
}

#[cfg(test)]
mod tests {
    use super::ZoneOffset;

    #[test]
    fn test_factories() {
        assert_eq!(ZoneOffset::of_hours(2).unwrap().total_seconds(), 7200);
        assert_eq!(ZoneOffset::of_hours_minutes(-5, -30).unwrap().total_seconds(), -19800);
        assert_eq!(ZoneOffset::of_hms(1, 2, 3).unwrap().total_seconds(), 3723);
        assert!(ZoneOffset::of_hours(19).is_err());
        assert!(ZoneOffset::of_hours_minutes(1, -30).is_err());
        assert!(ZoneOffset::of_hours_minutes(0, 60).is_err());
        assert!(ZoneOffset::of_total_seconds(64_801).is_err());
        assert!(ZoneOffset::of_total_seconds(-64_800).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(ZoneOffset::UTC.to_string(), "Z");
        assert_eq!(ZoneOffset::of_hours(2).unwrap().to_string(), "+02:00");
        assert_eq!(ZoneOffset::of_hours_minutes(-5, -30).unwrap().to_string(), "-05:30");
        assert_eq!(ZoneOffset::of_hms(1, 2, 3).unwrap().to_string(), "+01:02:03");
        assert_eq!(ZoneOffset::of_hms(-1, -2, -3).unwrap().to_string(), "-01:02:03");
    }

    #[test]
    fn test_round_trip() {
        for s in &["Z", "+02:00", "-05:30", "+01:02:03"] {
            let offset = s.parse::<ZoneOffset>().unwrap();
            assert_eq!(offset.to_string(), *s);
        }
        assert_eq!("+00:00".parse::<ZoneOffset>().unwrap(), ZoneOffset::UTC);
        assert!("+19:00".parse::<ZoneOffset>().is_err());
        assert!("02:00".parse::<ZoneOffset>().is_err());
    }

    #[test]
    fn test_ordering() {
        let west = ZoneOffset::of_hours(-5).unwrap();
        let east = ZoneOffset::of_hours(9).unwrap();
        assert!(west < ZoneOffset::UTC && ZoneOffset::UTC < east);
    }
}
