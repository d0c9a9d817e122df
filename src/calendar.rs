//! US stock exchange holiday calendar for a single year, with full closures
//! and early-close half days.

use crate::date::CalendarDate;
use crate::error::{CalendarError, Result};
use crate::rules::{us_equity_rules, HolidayRule, MarketHours};
use crate::{FIRST_YEAR, LAST_YEAR};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Whether the market is shut for the whole day or closes early
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HolidayKind {
    FullClosure,
    HalfDay { close_time: NaiveTime },
}

/// A named closure or half day on a specific date
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HolidayEvent {
    pub date: CalendarDate,
    pub name: String,
    #[serde(flatten)]
    pub kind: HolidayKind,
}

impl HolidayEvent {
    pub fn full_closure(date: CalendarDate, name: &str) -> HolidayEvent {
        HolidayEvent {
            date,
            name: name.to_string(),
            kind: HolidayKind::FullClosure,
        }
    }

    pub fn half_day(date: CalendarDate, name: &str, close_time: NaiveTime) -> HolidayEvent {
        HolidayEvent {
            date,
            name: name.to_string(),
            kind: HolidayKind::HalfDay { close_time },
        }
    }

    pub fn is_full_closure(&self) -> bool {
        self.kind == HolidayKind::FullClosure
    }

    pub fn is_half_day(&self) -> bool {
        matches!(self.kind, HolidayKind::HalfDay { .. })
    }

    /// Early close time, present only for half days
    pub fn close_time(&self) -> Option<NaiveTime> {
        match self.kind {
            HolidayKind::HalfDay { close_time } => Some(close_time),
            HolidayKind::FullClosure => None,
        }
    }
}

/// Holidays of one calendar year, at most one event per date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearCalendar {
    year: i32,
    events: BTreeMap<CalendarDate, HolidayEvent>,
}

impl YearCalendar {
    /// Build the calendar for `year` from the US equity rule set
    pub fn build(year: i32) -> Result<YearCalendar> {
        Self::build_with_rules(&us_equity_rules(), year, &MarketHours::default())
    }

    /// Build the calendar for `year` from an arbitrary rule set.
    ///
    /// Full closures are placed first. Half days are added afterwards and are
    /// dropped when they land on a weekend or on a date already taken by a
    /// closure.
    pub fn build_with_rules(
        rules: &[HolidayRule],
        year: i32,
        hours: &MarketHours,
    ) -> Result<YearCalendar> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(CalendarError::UnsupportedYear(year));
        }
        let mut events = BTreeMap::new();

        for rule in rules {
            if let Some(date) = rule.date.resolve(year)? {
                events
                    .entry(date)
                    .or_insert_with(|| HolidayEvent::full_closure(date, &rule.name));
            } else {
                log::trace!("{} is not observed in {}", rule.name, year);
            }
        }

        for rule in rules {
            let Some((date, name)) = rule.early_close_date(year)? else {
                continue;
            };
            if date.is_weekend() || date.year() != year {
                log::trace!("skipping {} on {}: not a weekday of {}", name, date, year);
                continue;
            }
            match events.entry(date) {
                Entry::Vacant(slot) => {
                    slot.insert(HolidayEvent::half_day(date, name, hours.early_close));
                }
                Entry::Occupied(taken) => {
                    log::trace!(
                        "skipping {} on {}: {} already closes the market",
                        name,
                        date,
                        taken.get().name
                    );
                }
            }
        }

        let calendar = YearCalendar { year, events };
        log::debug!(
            "built {} calendar: {} closures, {} half days",
            year,
            calendar.full_closures().count(),
            calendar.half_days().count()
        );
        Ok(calendar)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of events (closures and half days)
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, date: &CalendarDate) -> Option<&HolidayEvent> {
        self.events.get(date)
    }

    /// All events in date order
    pub fn events(&self) -> impl Iterator<Item = &HolidayEvent> {
        self.events.values()
    }

    pub fn full_closures(&self) -> impl Iterator<Item = &HolidayEvent> {
        self.events().filter(|e| e.is_full_closure())
    }

    pub fn half_days(&self) -> impl Iterator<Item = &HolidayEvent> {
        self.events().filter(|e| e.is_half_day())
    }

    /// Returns true if the specified day is a full-day holiday
    pub fn is_holiday(&self, date: &CalendarDate) -> bool {
        self.get(date).map_or(false, HolidayEvent::is_full_closure)
    }

    /// Returns true if the specified day is a half-day holiday
    pub fn is_half_day(&self, date: &CalendarDate) -> bool {
        self.get(date).map_or(false, HolidayEvent::is_half_day)
    }

    /// Returns true if the market opens on this day, for a full or half session
    pub fn is_business_day(&self, date: &CalendarDate) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Calculate the next business day, if there is one left in this year
    pub fn next_business_day(&self, date: &CalendarDate) -> Option<CalendarDate> {
        let mut date = date.succ()?;
        while date.year() == self.year && !self.is_business_day(&date) {
            date = date.succ()?;
        }
        (date.year() == self.year).then_some(date)
    }

    /// Calculate the previous business day, if there is an earlier one in this year
    pub fn prev_business_day(&self, date: &CalendarDate) -> Option<CalendarDate> {
        let mut date = date.pred()?;
        while date.year() == self.year && !self.is_business_day(&date) {
            date = date.pred()?;
        }
        (date.year() == self.year).then_some(date)
    }
}
