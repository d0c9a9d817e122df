//! Conversion of absolute instants into the market's local civil time.
//!
//! The counting engine only ever sees civil times; this module is the
//! collaborator that produces them, backed by the IANA zone data in `chrono-tz`.

use crate::error::{CalendarError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// US equity markets keep New York time
pub const MARKET_TIME_ZONE: Tz = chrono_tz::America::New_York;

/// Express `instant` as wall-clock time in `tz`
pub fn to_market_local_time<T: TimeZone>(instant: DateTime<Utc>, tz: &T) -> NaiveDateTime {
    instant.with_timezone(tz).naive_local()
}

/// Look up an IANA zone name such as `America/New_York`
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|_| CalendarError::UnknownTimeZone(name.to_string()))
}

/// Current civil time in the market's zone, read from the system clock
pub fn market_now() -> NaiveDateTime {
    to_market_local_time(Utc::now(), &MARKET_TIME_ZONE)
}
