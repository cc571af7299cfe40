/// serializable response views mirroring the lending API bodies
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::book::{EligibilityQuote, LoanCreation};
use crate::decimal::{Money, Rate};
use crate::state::{CustomerRecord, LoanRecord};
use crate::types::{CustomerId, LoanId};

/// amount as a 2-dp decimal, half-up
fn cents(amount: Money) -> Decimal {
    let mut rounded = amount.round_cents().as_decimal();
    rounded.rescale(2);
    rounded
}

fn percent(rate: Rate) -> Decimal {
    rate.as_quoted_percentage()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationView {
    pub customer_id: CustomerId,
    pub name: String,
    pub age: u32,
    pub monthly_income: Decimal,
    pub approved_limit: Decimal,
    pub phone_number: String,
}

impl RegistrationView {
    pub fn from_customer(customer: &CustomerRecord) -> Self {
        Self {
            customer_id: customer.customer_id,
            name: customer.full_name(),
            age: customer.age,
            monthly_income: cents(customer.monthly_salary),
            approved_limit: cents(customer.approved_limit),
            phone_number: customer.phone_number.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityView {
    pub customer_id: CustomerId,
    pub approval: bool,
    pub interest_rate: Decimal,
    pub corrected_interest_rate: Decimal,
    pub tenure: u32,
    pub monthly_installment: Decimal,
}

impl EligibilityView {
    pub fn from_quote(quote: &EligibilityQuote) -> Self {
        let decision = &quote.assessment.decision;
        Self {
            customer_id: quote.customer_id,
            approval: decision.approved,
            interest_rate: percent(decision.requested_rate),
            corrected_interest_rate: percent(decision.applied_rate),
            tenure: decision.tenure,
            monthly_installment: cents(decision.monthly_installment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCreationView {
    pub loan_id: Option<LoanId>,
    pub customer_id: CustomerId,
    pub loan_approved: bool,
    pub message: String,
    pub monthly_installment: Decimal,
}

impl LoanCreationView {
    pub fn from_creation(creation: &LoanCreation) -> Self {
        Self {
            loan_id: creation.loan_id,
            customer_id: creation.customer_id,
            loan_approved: creation.decision.approved,
            message: creation.decision.message(),
            monthly_installment: cents(creation.decision.monthly_installment),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerSummaryView {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub age: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanDetailView {
    pub loan_id: LoanId,
    pub customer: CustomerSummaryView,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_installment: Decimal,
    pub tenure: u32,
}

impl LoanDetailView {
    pub fn from_loan(loan: &LoanRecord, customer: &CustomerRecord) -> Self {
        Self {
            loan_id: loan.loan_id,
            customer: CustomerSummaryView {
                id: customer.customer_id,
                first_name: customer.first_name.clone(),
                last_name: customer.last_name.clone(),
                phone_number: customer.phone_number.clone(),
                age: customer.age,
            },
            loan_amount: cents(loan.loan_amount),
            interest_rate: percent(loan.interest_rate),
            monthly_installment: cents(loan.monthly_repayment),
            tenure: loan.tenure,
        }
    }
}

/// one row of a customer's loan list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLoanView {
    pub loan_id: LoanId,
    pub loan_amount: Decimal,
    pub interest_rate: Decimal,
    pub monthly_installment: Decimal,
    pub repayments_left: u32,
}

impl CustomerLoanView {
    pub fn from_loan(loan: &LoanRecord) -> Self {
        Self {
            loan_id: loan.loan_id,
            loan_amount: cents(loan.loan_amount),
            interest_rate: percent(loan.interest_rate),
            monthly_installment: cents(loan.monthly_repayment),
            repayments_left: loan.repayments_left(),
        }
    }
}

/// convert any view to pretty-printed json
pub fn to_json_pretty<T: Serialize>(view: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(view)
}
