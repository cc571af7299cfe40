/// quick start - score a customer and decide on a loan
use loan_eligibility_rs::chrono::NaiveDate;
use loan_eligibility_rs::{
    CustomerSnapshot, EligibilityEngine, LoanHistoryEntry, LoanRequest, Money, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let engine = EligibilityEngine::standard();

    // customer with 4 lakh of debt against a 10 lakh limit
    let customer = CustomerSnapshot::new(Money::from_major(1_000_000), Money::from_major(400_000));
    let history = vec![
        LoanHistoryEntry::new(12, 12, NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()),
        LoanHistoryEntry::new(24, 20, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
    ];

    // 3 lakh at 8% over two years
    let request = LoanRequest::new(Money::from_major(300_000), Rate::from_percentage(8), 24);

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let assessment = engine.assess_on(&customer, &history, &request, today)?;

    println!("score breakdown: {:?}", assessment.breakdown);
    println!("{}", assessment.decision.message());
    println!("applied rate: {}", assessment.decision.applied_rate);
    println!("monthly installment: {}", assessment.decision.monthly_installment);

    Ok(())
}
