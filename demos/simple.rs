use tdays::clock::market_now;
fn main() {
    match tdays::compute_trading_day_report(market_now()) {
        Ok(report) => println!("{:#?}", report),
        Err(e) => eprintln!("{}", e),
    }
}
