use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::eligibility::ScoreBand;
use crate::scoring::CreditScore;
use crate::types::{CustomerId, LoanId};

/// all events emitted by the loan book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LendingEvent {
    CustomerRegistered {
        customer_id: CustomerId,
        approved_limit: Money,
        timestamp: DateTime<Utc>,
    },
    EligibilityAssessed {
        customer_id: CustomerId,
        score: CreditScore,
        band: ScoreBand,
        approved: bool,
        requested_rate: Rate,
        applied_rate: Rate,
        timestamp: DateTime<Utc>,
    },
    LoanOriginated {
        loan_id: LoanId,
        customer_id: CustomerId,
        amount: Money,
        interest_rate: Rate,
        monthly_installment: Money,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    LoanDeclined {
        customer_id: CustomerId,
        score: CreditScore,
        amount: Money,
        timestamp: DateTime<Utc>,
    },
    DebtIncreased {
        customer_id: CustomerId,
        old_debt: Money,
        new_debt: Money,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<LendingEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: LendingEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<LendingEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[LendingEvent] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
