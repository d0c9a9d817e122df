//! Error types for calendar and trading-day computations.

use thiserror::Error;

/// Errors raised while resolving dates or building a year calendar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid date: {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("Invalid date key: {0:?} (expected YYYY-MM-DD)")]
    InvalidDateKey(String),

    #[error("Date arithmetic out of range")]
    DateOutOfRange,

    #[error("Unsupported year {0}: calendars are available for {first}..={last}", first = crate::FIRST_YEAR, last = crate::LAST_YEAR)]
    UnsupportedYear(i32),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Result type alias for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;
