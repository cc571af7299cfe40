/// loan book - register customers, check eligibility, book loans
use loan_eligibility_rs::serialization::{
    to_json_pretty, CustomerLoanView, EligibilityView, LoanCreationView, RegistrationView,
};
use loan_eligibility_rs::chrono::{TimeZone, Utc};
use loan_eligibility_rs::{
    Decimal, LoanApplication, LoanBook, Money, RegistrationRequest, SafeTimeProvider, TimeSource,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    ));
    let mut book = LoanBook::default();

    println!("=== registration ===\n");
    let customer = book.register_customer(
        RegistrationRequest {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            age: 30,
            monthly_income: Money::from_major(50_000),
            phone_number: "9999999999".to_string(),
        },
        &time,
    )?;
    println!("{}", to_json_pretty(&RegistrationView::from_customer(&customer))?);

    println!("\n=== eligibility ===\n");
    let application = LoanApplication::new(
        customer.customer_id,
        Money::from_major(300_000),
        Decimal::new(1050, 2),
        24,
    );
    let quote = book.check_eligibility(&application, &time)?;
    println!("{}", to_json_pretty(&EligibilityView::from_quote(&quote))?);

    println!("\n=== create loan ===\n");
    let creation = book.create_loan(&application, &time)?;
    println!("{}", to_json_pretty(&LoanCreationView::from_creation(&creation))?);

    println!("\n=== customer loans ===\n");
    let rows: Vec<_> = book
        .customer_loans(customer.customer_id)?
        .into_iter()
        .map(CustomerLoanView::from_loan)
        .collect();
    println!("{}", to_json_pretty(&rows)?);

    println!(
        "\ncurrent debt after booking: {}",
        book.customer(customer.customer_id)?.current_debt
    );
    println!("events emitted: {}", book.events.events().len());

    Ok(())
}
