// This is a part of calclock.
// See README.md and LICENSE.txt for details.

//! Serialization and deserialization with serde.
//!
//! The main value types serialize as their ISO-8601 string forms and
//! deserialize by parsing the same forms back.
//!
//! *Available on crate feature `serde` only.*

use core::fmt;
use core::marker::PhantomData;
use core::str::FromStr;

use serde::{de, ser};

use crate::date::Date;
use crate::datetime::DateTime;
use crate::instant::Instant;
use crate::offset::ZoneOffset;
use crate::offset_datetime::OffsetDateTime;
use crate::period::Period;
use crate::time::Time;
use crate::year_month::YearMonth;

struct IsoStringVisitor<T> {
    expecting: &'static str,
    marker: PhantomData<T>,
}

impl<'de, T> de::Visitor<'de> for IsoStringVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E>(self, value: &str) -> Result<T, E>
    where
        E: de::Error,
    {
        value.parse().map_err(E::custom)
    }
}

macro_rules! iso_string_serde {
    ($type:ty, $expecting:expr) => {
        impl ser::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.collect_str(&self)
            }
        }

        impl<'de> de::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                deserializer.deserialize_str(IsoStringVisitor {
                    expecting: $expecting,
                    marker: PhantomData,
                })
            }
        }
    };
}

iso_string_serde!(Date, "an ISO-8601 date string");
iso_string_serde!(Time, "an ISO-8601 time string");
iso_string_serde!(DateTime, "an ISO-8601 date-time string");
iso_string_serde!(Instant, "an ISO-8601 instant string");
iso_string_serde!(ZoneOffset, "a zone-offset string");
iso_string_serde!(OffsetDateTime, "an ISO-8601 offset date-time string");
iso_string_serde!(YearMonth, "an ISO-8601 year-month string");
iso_string_serde!(Period, "an ISO-8601 period string");
