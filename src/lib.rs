//! Trading days left in the year on U.S. stock exchanges.
//!
//! The calendar covers the ten NYSE/Nasdaq full-day closures (with weekend
//! observance and Good Friday derived from Easter) and the three recurring
//! 1:00 PM early closes. Everything is a pure function of the year or of the
//! observation instant; callers supply "now" themselves.
//!
//! ```
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2024, 12, 24)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//! let report = tdays::compute_trading_day_report(now).unwrap();
//! assert_eq!(report.total_trading_days, 4.5);
//! ```

pub mod calendar;
pub mod clock;
pub mod counter;
pub mod date;
pub mod error;
pub mod rules;

pub use calendar::{HolidayEvent, HolidayKind, YearCalendar};
pub use counter::{TradingDayCounter, TradingDayReport};
pub use date::CalendarDate;
pub use error::{CalendarError, Result};
pub use rules::MarketHours;

use chrono::NaiveDateTime;

/// First year a calendar can be built for
pub const FIRST_YEAR: i32 = 1900;
/// Last year a calendar can be built for
pub const LAST_YEAR: i32 = 2200;

/// All closures and half days of `year`
pub fn build_holiday_calendar(year: i32) -> Result<YearCalendar> {
    YearCalendar::build(year)
}

/// Trading days left in the year of `now`, a civil time in the market's zone
pub fn compute_trading_day_report(now: NaiveDateTime) -> Result<TradingDayReport> {
    TradingDayCounter::default().count(now)
}
