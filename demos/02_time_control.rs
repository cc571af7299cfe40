/// time control - the recent-activity bucket follows the injected clock
use loan_eligibility_rs::chrono::{Duration, NaiveDate, TimeZone, Utc};
use loan_eligibility_rs::{
    CreditScorer, CustomerSnapshot, LoanHistoryEntry, Money, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 12, 31, 12, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    let scorer = CreditScorer::default();
    let customer = CustomerSnapshot::new(Money::from_major(1_000_000), Money::from_major(300_000));
    let history = vec![
        LoanHistoryEntry::new(12, 10, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
        LoanHistoryEntry::new(6, 2, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()),
    ];

    let before = scorer.score(&customer, &history, &time);
    println!("{}: score {}", time.now().format("%Y-%m-%d"), before);

    // cross the year boundary
    controller.advance(Duration::days(1));

    let after = scorer.score(&customer, &history, &time);
    println!("{}: score {}", time.now().format("%Y-%m-%d"), after);

    Ok(())
}
