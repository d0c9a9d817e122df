//! tdays - how many U.S. stock market trading days are left this year
//!
//! ```bash
//! # countdown from the current time in New York
//! tdays
//!
//! # countdown from a fixed instant, as JSON
//! tdays --json left --at 2024-12-24T15:30:00Z
//!
//! # full schedule of a year
//! tdays year 2026
//! ```

use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use tdays::clock::{parse_time_zone, to_market_local_time};
use tdays::{HolidayEvent, HolidayKind, TradingDayCounter, TradingDayReport, YearCalendar};

#[derive(Parser)]
#[command(name = "tdays")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "U.S. stock market trading days left in the year", long_about = None)]
struct Cli {
    /// Market time zone (IANA name)
    #[arg(long, global = true, env = "TDAYS_TZ", default_value = "America/New_York")]
    tz: String,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Trading days left and the remaining holidays (default)
    Left {
        /// Observation instant: RFC 3339, or a local `YYYY-MM-DD[THH:MM[:SS]]`
        #[arg(long)]
        at: Option<String>,
    },
    /// All closures and half days of a year
    Year {
        #[arg(value_name = "YEAR")]
        year: i32,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let tz = parse_time_zone(&cli.tz)?;

    match cli.command.unwrap_or(Commands::Left { at: None }) {
        Commands::Left { at } => {
            let counter = TradingDayCounter::default();
            let report = match at {
                None => counter.count_at(Utc::now(), |now| to_market_local_time(now, &tz))?,
                Some(at) => match DateTime::parse_from_rfc3339(&at) {
                    Ok(instant) => counter.count_at(instant.with_timezone(&Utc), |now| {
                        to_market_local_time(now, &tz)
                    })?,
                    Err(_) => counter.count(parse_local(&at)?)?,
                },
            };
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Commands::Year { year } => {
            let cal = YearCalendar::build(year)?;
            if cli.json {
                let events: Vec<&HolidayEvent> = cal.events().collect();
                println!("{}", serde_json::to_string_pretty(&events)?);
            } else {
                println!("U.S. stock market holidays {}:", year);
                for event in cal.events() {
                    print_event(event);
                }
            }
        }
    }
    Ok(())
}

/// A civil time already in the market's zone
fn parse_local(s: &str) -> anyhow::Result<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(at);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .with_context(|| format!("invalid date {}", s));
    }
    bail!("cannot parse {:?} as an instant", s)
}

fn print_report(report: &TradingDayReport) {
    println!(
        "Trading days left in {}: {:.1}",
        report.year, report.total_trading_days
    );
    println!(
        "  {} full days, {} half days",
        report.full_day_count, report.half_day_count
    );
    if report.upcoming_events.is_empty() {
        println!("No remaining holidays or half days this year.");
        return;
    }
    println!("Upcoming market holidays & half days:");
    for event in &report.upcoming_events {
        print_event(event);
    }
}

fn print_event(event: &HolidayEvent) {
    let when = event.date.as_naive().format("%a %b %e");
    match event.kind {
        HolidayKind::FullClosure => println!("  {}  {:<45} closed", when, event.name),
        HolidayKind::HalfDay { close_time } => println!(
            "  {}  {:<45} closes early at {}",
            when,
            event.name,
            close_time.format("%H:%M")
        ),
    }
}
