use tdays::YearCalendar;
/// example to show holidays as well as half trading days
use std::env::args;
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = args().collect();
    if args.len() < 2 {
        return Err(format!("Usage: {} first [last]", args[0]).into());
    }
    let first: i32 = args[1].parse()?;
    let last: i32 = match args.get(2) {
        Some(last) => last.parse()?,
        None => first,
    };
    for year in first..=last {
        let cal = YearCalendar::build(year)?;
        let holidays: Vec<String> = cal.full_closures().map(|e| e.date.key()).collect();
        let halfdays: Vec<String> = cal.half_days().map(|e| e.date.key()).collect();
        println!("{}", year);
        println!("holidays: {:?}", holidays);
        println!("half days: {:?}", halfdays);
    }
    Ok(())
}
