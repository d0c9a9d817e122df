//! Calendar date primitive used throughout the crate.
//!
//! [`CalendarDate`] wraps a [`chrono::NaiveDate`] so that every value is a valid
//! Gregorian date without a time-of-day. Ordering and equality are by calendar
//! value, and the canonical key (`YYYY-MM-DD`) sorts the same way as the dates.

use crate::error::{CalendarError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date with no time component
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month (1-12) and day-of-month
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or(CalendarError::InvalidDate { year, month, day })
    }

    /// Drop the time-of-day from a civil instant
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        CalendarDate(instant.date())
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Day of week as a number, 0 = Sunday through 6 = Saturday
    pub fn day_of_week(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Returns true if the date falls on a Saturday or Sunday
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Shift the date by `days`, which may be negative
    pub fn add_days(&self, days: i64) -> Result<Self> {
        Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(CalendarDate)
            .ok_or(CalendarError::DateOutOfRange)
    }

    /// Canonical sortable key, `YYYY-MM-DD`
    pub fn key(&self) -> String {
        self.0.format(KEY_FORMAT).to_string()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    pub(crate) fn succ(&self) -> Option<Self> {
        self.0.succ_opt().map(CalendarDate)
    }

    pub(crate) fn pred(&self) -> Option<Self> {
        self.0.pred_opt().map(CalendarDate)
    }
}

/// Compare two dates by calendar value, returning -1, 0 or 1
pub fn compare(a: &CalendarDate, b: &CalendarDate) -> i32 {
    a.cmp(b) as i32
}

/// Calculate the last day of a given month in a given year
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32> {
    let invalid = CalendarError::InvalidDate {
        year,
        month,
        day: 1,
    };
    if !(1..=12).contains(&month) {
        return Err(invalid);
    }
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .ok_or(invalid)
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        CalendarDate(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self> {
        NaiveDate::parse_from_str(s, KEY_FORMAT)
            .map(CalendarDate)
            .map_err(|_| CalendarError::InvalidDateKey(s.to_string()))
    }
}
