//! Holiday rules for the US equity market and the date resolvers behind them.
//!
//! Each [`HolidayRule`] names a full-day closure and says how to find its date
//! in a given year. A rule may also carry an [`EarlyClose`], which derives a
//! half-day session from the rule's anchor date (the day before July 4th, the
//! day after Thanksgiving and so on).

use crate::date::{last_day_of_month, CalendarDate};
use crate::error::Result;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Specifies the nth week of a month
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NthWeek {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// Do the half-day check before or after the anchor date
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfCheck {
    Before,
    After,
}

/// How the date of a closure is determined for a given year
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub enum DateRule {
    /// A fixed month/day, moved to Friday when it falls on Saturday and to
    /// Monday when it falls on Sunday.
    ObservedFixed { month: u32, day: u32 },
    /// The nth (or last) weekday of a month, e.g. the first Monday in September.
    MonthWeekday {
        month: u32,
        weekday: Weekday,
        nth: NthWeek,
    },
    /// Defined in days relative to Easter Sunday (e.g. -2 for Good Friday).
    EasterOffset { offset: i64 },
}

/// A half-day session derived from a closure's anchor date
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct EarlyClose {
    pub name: String,
    pub half_check: HalfCheck,
}

/// A named market closure, optionally paired with an early-close session
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct HolidayRule {
    pub name: String,
    pub date: DateRule,
    pub early_close: Option<EarlyClose>,
}

impl DateRule {
    /// The unshifted date of the rule in `year`.
    ///
    /// For [`DateRule::ObservedFixed`] this is the literal month/day, before any
    /// weekend observance is applied; half days are derived from it.
    pub fn anchor(&self, year: i32) -> Result<CalendarDate> {
        match *self {
            DateRule::ObservedFixed { month, day } => CalendarDate::new(year, month, day),
            DateRule::MonthWeekday {
                month,
                weekday,
                nth,
            } => match nth {
                NthWeek::First => nth_weekday_of_month(year, month, weekday, 1),
                NthWeek::Second => nth_weekday_of_month(year, month, weekday, 2),
                NthWeek::Third => nth_weekday_of_month(year, month, weekday, 3),
                NthWeek::Fourth => nth_weekday_of_month(year, month, weekday, 4),
                NthWeek::Last => last_weekday_of_month(year, month, weekday),
            },
            DateRule::EasterOffset { offset } => easter_sunday(year)?.add_days(offset),
        }
    }

    /// The date the market is closed in `year`, if the rule is observed that year
    pub fn resolve(&self, year: i32) -> Result<Option<CalendarDate>> {
        match *self {
            DateRule::ObservedFixed { month, day } => observed_fixed_holiday(year, month, day),
            _ => self.anchor(year).map(Some),
        }
    }
}

impl HolidayRule {
    pub fn new(name: &str, date: DateRule) -> HolidayRule {
        HolidayRule {
            name: name.to_string(),
            date,
            early_close: None,
        }
    }

    /// Attach a half-day session on the day before or after the anchor date
    pub fn with_early_close(mut self, name: &str, half_check: HalfCheck) -> HolidayRule {
        self.early_close = Some(EarlyClose {
            name: name.to_string(),
            half_check,
        });
        self
    }

    /// The candidate half-day date for `year`, without weekend or collision checks
    pub fn early_close_date(&self, year: i32) -> Result<Option<(CalendarDate, &str)>> {
        let Some(early_close) = &self.early_close else {
            return Ok(None);
        };
        let anchor = self.date.anchor(year)?;
        let date = match early_close.half_check {
            HalfCheck::Before => anchor.add_days(-1)?,
            HalfCheck::After => anchor.add_days(1)?,
        };
        Ok(Some((date, early_close.name.as_str())))
    }
}

/// Session close times in the market's local civil time
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketHours {
    /// End of a regular session; after it, the current day no longer counts
    pub regular_close: NaiveTime,
    /// End of a scheduled half-day session
    pub early_close: NaiveTime,
}

impl Default for MarketHours {
    /// 4:00 PM regular close, 1:00 PM early close
    fn default() -> Self {
        MarketHours {
            regular_close: NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default(),
            early_close: NaiveTime::from_hms_opt(13, 0, 0).unwrap_or_default(),
        }
    }
}

/// NYSE / Nasdaq closures and early closes
pub fn us_equity_rules() -> Vec<HolidayRule> {
    vec![
        HolidayRule::new("New Year's Day", DateRule::ObservedFixed { month: 1, day: 1 }),
        // MLK, 3rd Monday of January
        HolidayRule::new(
            "Martin Luther King Jr. Day",
            DateRule::MonthWeekday {
                month: 1,
                weekday: Weekday::Mon,
                nth: NthWeek::Third,
            },
        ),
        HolidayRule::new(
            "Presidents' Day",
            DateRule::MonthWeekday {
                month: 2,
                weekday: Weekday::Mon,
                nth: NthWeek::Third,
            },
        ),
        HolidayRule::new("Good Friday", DateRule::EasterOffset { offset: -2 }),
        HolidayRule::new(
            "Memorial Day",
            DateRule::MonthWeekday {
                month: 5,
                weekday: Weekday::Mon,
                nth: NthWeek::Last,
            },
        ),
        HolidayRule::new(
            "Juneteenth National Independence Day",
            DateRule::ObservedFixed { month: 6, day: 19 },
        ),
        HolidayRule::new("Independence Day", DateRule::ObservedFixed { month: 7, day: 4 })
            .with_early_close("Day Before Independence Day (early close)", HalfCheck::Before),
        HolidayRule::new(
            "Labor Day",
            DateRule::MonthWeekday {
                month: 9,
                weekday: Weekday::Mon,
                nth: NthWeek::First,
            },
        ),
        HolidayRule::new(
            "Thanksgiving Day",
            DateRule::MonthWeekday {
                month: 11,
                weekday: Weekday::Thu,
                nth: NthWeek::Fourth,
            },
        )
        .with_early_close("Day After Thanksgiving (early close)", HalfCheck::After),
        HolidayRule::new("Christmas Day", DateRule::ObservedFixed { month: 12, day: 25 })
            .with_early_close("Christmas Eve (early close)", HalfCheck::Before),
    ]
}

/// The `n`th occurrence of `weekday` in the month, counting from 1.
///
/// Callers keep `n` small enough for the result to stay inside the month.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Result<CalendarDate> {
    let first = CalendarDate::new(year, month, 1)?;
    let offset = (7 + weekday.num_days_from_sunday() - first.day_of_week()) % 7;
    first.add_days(i64::from(offset + 7 * n.saturating_sub(1)))
}

/// The last occurrence of `weekday` in the month
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Result<CalendarDate> {
    let last = CalendarDate::new(year, month, last_day_of_month(year, month)?)?;
    let offset = (7 + last.day_of_week() - weekday.num_days_from_sunday()) % 7;
    last.add_days(-i64::from(offset))
}

/// Western (Gregorian) Easter Sunday, by the anonymous Gregorian algorithm
pub fn easter_sunday(year: i32) -> Result<CalendarDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    CalendarDate::new(year, month as u32, day as u32)
}

/// A fixed month/day holiday shifted off the weekend.
///
/// Saturday is observed on the preceding Friday and Sunday on the following
/// Monday. When the shift leaves `year` (New Year's Day on a Saturday) the
/// holiday is not observed and `None` is returned.
pub fn observed_fixed_holiday(year: i32, month: u32, day: u32) -> Result<Option<CalendarDate>> {
    let date = CalendarDate::new(year, month, day)?;
    let observed = match date.weekday() {
        Weekday::Sat => date.add_days(-1)?,
        Weekday::Sun => date.add_days(1)?,
        _ => date,
    };
    if observed.year() != year {
        return Ok(None);
    }
    Ok(Some(observed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month, day).unwrap()
    }

    #[test]
    fn test_easter_sunday() {
        assert_eq!(easter_sunday(2024).unwrap(), ymd(2024, 3, 31));
        assert_eq!(easter_sunday(2025).unwrap(), ymd(2025, 4, 20));
        assert_eq!(easter_sunday(2026).unwrap(), ymd(2026, 4, 5));
        assert_eq!(easter_sunday(2000).unwrap(), ymd(2000, 4, 23));
        assert_eq!(easter_sunday(2008).unwrap(), ymd(2008, 3, 23));
        assert_eq!(easter_sunday(2038).unwrap(), ymd(2038, 4, 25));
        assert_eq!(easter_sunday(1943).unwrap(), ymd(1943, 4, 25));
        assert_eq!(easter_sunday(2160).unwrap(), ymd(2160, 3, 23));
    }

    #[test]
    fn test_observed_fixed_holiday() {
        // Saturday -> Friday
        assert_eq!(observed_fixed_holiday(2026, 7, 4).unwrap(), Some(ymd(2026, 7, 3)));
        assert_eq!(observed_fixed_holiday(2021, 12, 25).unwrap(), Some(ymd(2021, 12, 24)));
        // Sunday -> Monday
        assert_eq!(observed_fixed_holiday(2023, 1, 1).unwrap(), Some(ymd(2023, 1, 2)));
        // weekday stays put
        assert_eq!(observed_fixed_holiday(2024, 7, 4).unwrap(), Some(ymd(2024, 7, 4)));
    }

    #[test]
    fn test_observed_fixed_holiday_leaves_year() {
        // 2022-01-01 is a Saturday, Friday would be 2021-12-31
        assert_eq!(observed_fixed_holiday(2022, 1, 1).unwrap(), None);
        // Dec 31 on a Sunday would move into the next year
        assert_eq!(observed_fixed_holiday(2023, 12, 31).unwrap(), None);
    }

    #[test]
    fn test_observed_fixed_holiday_invalid() {
        assert!(observed_fixed_holiday(2023, 2, 29).is_err());
    }

    #[test]
    fn test_month_weekday() {
        // MLK and President's Day 2022
        assert_eq!(nth_weekday_of_month(2022, 1, Weekday::Mon, 3).unwrap(), ymd(2022, 1, 17));
        assert_eq!(nth_weekday_of_month(2022, 2, Weekday::Mon, 3).unwrap(), ymd(2022, 2, 21));
        // Labor Day, month starting on the requested weekday
        assert_eq!(nth_weekday_of_month(2025, 9, Weekday::Mon, 1).unwrap(), ymd(2025, 9, 1));
        assert_eq!(nth_weekday_of_month(2024, 11, Weekday::Thu, 4).unwrap(), ymd(2024, 11, 28));
        assert_eq!(nth_weekday_of_month(2023, 11, Weekday::Thu, 4).unwrap(), ymd(2023, 11, 23));
    }

    #[test]
    fn test_last_weekday_of_month() {
        assert_eq!(last_weekday_of_month(2024, 5, Weekday::Mon).unwrap(), ymd(2024, 5, 27));
        // May 31st is itself a Monday
        assert_eq!(last_weekday_of_month(2021, 5, Weekday::Mon).unwrap(), ymd(2021, 5, 31));
        assert_eq!(last_weekday_of_month(2024, 2, Weekday::Thu).unwrap(), ymd(2024, 2, 29));
        assert_eq!(last_weekday_of_month(2024, 12, Weekday::Sun).unwrap(), ymd(2024, 12, 29));
    }

    #[test]
    fn test_rule_anchor_and_resolve() {
        let good_friday = DateRule::EasterOffset { offset: -2 };
        assert_eq!(good_friday.resolve(2021).unwrap(), Some(ymd(2021, 4, 2)));
        assert_eq!(good_friday.resolve(2022).unwrap(), Some(ymd(2022, 4, 15)));

        let july_4th = DateRule::ObservedFixed { month: 7, day: 4 };
        assert_eq!(july_4th.anchor(2026).unwrap(), ymd(2026, 7, 4));
        assert_eq!(july_4th.resolve(2026).unwrap(), Some(ymd(2026, 7, 3)));
    }

    #[test]
    fn test_early_close_date() {
        let rules = us_equity_rules();
        let candidates: Vec<_> = rules
            .iter()
            .filter_map(|rule| rule.early_close_date(2025).unwrap())
            .map(|(date, _)| date)
            .collect();
        assert_eq!(
            candidates,
            vec![ymd(2025, 7, 3), ymd(2025, 11, 28), ymd(2025, 12, 24)]
        );
        // derived from the literal date, not the observed one
        let independence = &rules[6];
        assert_eq!(
            independence.early_close_date(2026).unwrap(),
            Some((ymd(2026, 7, 3), "Day Before Independence Day (early close)"))
        );
        assert_eq!(rules[0].early_close_date(2026).unwrap(), None);
    }

    #[test]
    fn test_us_equity_rules() {
        let rules = us_equity_rules();
        assert_eq!(rules.len(), 10);
        assert_eq!(rules.iter().filter(|r| r.early_close.is_some()).count(), 3);
        let hours = MarketHours::default();
        assert_eq!(hours.regular_close, NaiveTime::from_hms_opt(16, 0, 0).unwrap());
        assert_eq!(hours.early_close, NaiveTime::from_hms_opt(13, 0, 0).unwrap());
    }

    #[test]
    /// Testing serialization and deserialization of rule definitions
    fn serialize_rule_definition() {
        let rules = vec![
            HolidayRule::new(
                "Labor Day",
                DateRule::MonthWeekday {
                    month: 9,
                    weekday: Weekday::Mon,
                    nth: NthWeek::First,
                },
            ),
            HolidayRule::new("Good Friday", DateRule::EasterOffset { offset: -2 }),
        ];
        let json = serde_json::to_string_pretty(&rules).unwrap();
        assert_eq!(
            json,
            r#"[
  {
    "name": "Labor Day",
    "date": {
      "MonthWeekday": {
        "month": 9,
        "weekday": "Mon",
        "nth": "First"
      }
    },
    "early_close": null
  },
  {
    "name": "Good Friday",
    "date": {
      "EasterOffset": {
        "offset": -2
      }
    },
    "early_close": null
  }
]"#
        );
        let rules2: Vec<HolidayRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, rules2);
    }
}
