use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RequestLimits;
use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};
use crate::types::{CustomerId, LoanRequest};

/// loan application as submitted by a customer, rate in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    pub interest_rate: Decimal,
    pub tenure: u32,
}

impl LoanApplication {
    pub fn new(customer_id: CustomerId, loan_amount: Money, interest_rate: Decimal, tenure: u32) -> Self {
        Self {
            customer_id,
            loan_amount,
            interest_rate,
            tenure,
        }
    }

    /// check field ranges and precision
    pub fn validate(&self, limits: &RequestLimits) -> Result<()> {
        if !self.loan_amount.is_positive() {
            return Err(LendingError::invalid("loan_amount", "must be greater than zero"));
        }
        if self.loan_amount >= limits.amount_ceiling {
            return Err(LendingError::invalid(
                "loan_amount",
                format!("must be below {}", limits.amount_ceiling),
            ));
        }
        if self.loan_amount.scale() > limits.max_fraction_digits {
            return Err(LendingError::invalid(
                "loan_amount",
                format!("at most {} decimal places", limits.max_fraction_digits),
            ));
        }

        if self.interest_rate < Decimal::ZERO {
            return Err(LendingError::invalid("interest_rate", "cannot be negative"));
        }
        if self.interest_rate >= limits.rate_ceiling_percent {
            return Err(LendingError::invalid(
                "interest_rate",
                format!("must be below {}", limits.rate_ceiling_percent),
            ));
        }
        if self.interest_rate.scale() > limits.max_fraction_digits {
            return Err(LendingError::invalid(
                "interest_rate",
                format!("at most {} decimal places", limits.max_fraction_digits),
            ));
        }

        if !(limits.min_tenure..=limits.max_tenure).contains(&self.tenure) {
            return Err(LendingError::invalid(
                "tenure",
                format!(
                    "must be between {} and {} months",
                    limits.min_tenure, limits.max_tenure
                ),
            ));
        }

        Ok(())
    }

    /// validated terms for the eligibility engine
    pub fn to_request(&self, limits: &RequestLimits) -> Result<LoanRequest> {
        self.validate(limits)?;
        Ok(LoanRequest::new(
            self.loan_amount,
            Rate::from_percent(self.interest_rate),
            self.tenure,
        ))
    }
}
