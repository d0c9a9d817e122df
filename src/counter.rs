//! Count the trading sessions left in the current year.

use crate::calendar::{HolidayEvent, HolidayKind, YearCalendar};
use crate::date::CalendarDate;
use crate::error::Result;
use crate::rules::{us_equity_rules, HolidayRule, MarketHours};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trading days remaining in a year, as seen from one observation instant
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TradingDayReport {
    pub year: i32,
    /// Full sessions plus half a day for each early close
    pub total_trading_days: f64,
    pub full_day_count: u32,
    pub half_day_count: u32,
    /// Closures and half days from today to Dec 31st, in date order
    pub upcoming_events: Vec<HolidayEvent>,
}

impl TradingDayReport {
    fn empty(year: i32) -> TradingDayReport {
        TradingDayReport {
            year,
            total_trading_days: 0.0,
            full_day_count: 0,
            half_day_count: 0,
            upcoming_events: Vec::new(),
        }
    }
}

/// Walks the rest of the year and classifies each day
#[derive(Debug, Clone)]
pub struct TradingDayCounter {
    rules: Vec<HolidayRule>,
    hours: MarketHours,
}

impl Default for TradingDayCounter {
    fn default() -> Self {
        TradingDayCounter::new(us_equity_rules(), MarketHours::default())
    }
}

impl TradingDayCounter {
    pub fn new(rules: Vec<HolidayRule>, hours: MarketHours) -> TradingDayCounter {
        TradingDayCounter { rules, hours }
    }

    pub fn hours(&self) -> &MarketHours {
        &self.hours
    }

    /// Count from `now`, a civil time already expressed in the market's zone.
    ///
    /// Today counts unless `now` is strictly past the regular close; every later
    /// weekday counts as 1, or 0.5 on a half day, and closures count as 0.
    pub fn count(&self, now: NaiveDateTime) -> Result<TradingDayReport> {
        let today = CalendarDate::from_instant(now);
        let year = today.year();
        let calendar = YearCalendar::build_with_rules(&self.rules, year, &self.hours)?;
        let after_close = now.time() > self.hours.regular_close;
        let report = tally(&calendar, today, after_close);
        log::debug!(
            "{} trading days left in {} as of {} ({} full, {} half)",
            report.total_trading_days,
            year,
            now,
            report.full_day_count,
            report.half_day_count
        );
        Ok(report)
    }

    /// Count from an absolute instant, converted with the supplied collaborator
    pub fn count_at<F>(
        &self,
        instant: DateTime<Utc>,
        to_market_local_time: F,
    ) -> Result<TradingDayReport>
    where
        F: FnOnce(DateTime<Utc>) -> NaiveDateTime,
    {
        self.count(to_market_local_time(instant))
    }
}

fn tally(calendar: &YearCalendar, today: CalendarDate, after_close: bool) -> TradingDayReport {
    let mut report = TradingDayReport::empty(calendar.year());
    let mut cursor = Some(today);

    while let Some(date) = cursor.filter(|d| d.year() == calendar.year()) {
        let event = calendar.get(&date);
        if let Some(event) = event {
            report.upcoming_events.push(event.clone());
        }
        if !date.is_weekend() && !(date == today && after_close) {
            match event.map(|e| e.kind) {
                None => report.full_day_count += 1,
                Some(HolidayKind::HalfDay { .. }) => report.half_day_count += 1,
                Some(HolidayKind::FullClosure) => {}
            }
        }
        cursor = date.succ();
    }

    report.upcoming_events.sort_by_key(|e| e.date);
    report.total_trading_days =
        f64::from(report.full_day_count) + 0.5 * f64::from(report.half_day_count);
    report
}
