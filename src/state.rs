use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::types::{CustomerId, CustomerSnapshot, LoanHistoryEntry, LoanId};

/// days per tenure month when projecting a loan's end date
pub const DAYS_PER_TENURE_MONTH: i64 = 30;

/// stored customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub phone_number: String,
    pub monthly_salary: Money,
    pub approved_limit: Money,
    pub current_debt: Money,
}

impl CustomerRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// debt position as seen by the scorer
    pub fn snapshot(&self) -> CustomerSnapshot {
        CustomerSnapshot::new(self.approved_limit, self.current_debt)
    }
}

/// stored loan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    pub tenure: u32,
    pub interest_rate: Rate,
    pub monthly_repayment: Money,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl LoanRecord {
    /// installments still owed, never negative
    pub fn repayments_left(&self) -> u32 {
        self.tenure.saturating_sub(self.emis_paid_on_time)
    }

    pub fn history_entry(&self) -> LoanHistoryEntry {
        LoanHistoryEntry::new(self.tenure, self.emis_paid_on_time, self.start_date)
    }
}

/// approximate end date: 30 days per month of tenure
pub fn projected_end_date(start_date: NaiveDate, tenure: u32) -> NaiveDate {
    start_date + Duration::days(i64::from(tenure) * DAYS_PER_TENURE_MONTH)
}
