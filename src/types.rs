use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::{Money, Rate};

/// customer identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

/// loan identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for LoanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// debt position of a customer at scoring time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    pub approved_limit: Money,
    pub current_debt: Money,
}

impl CustomerSnapshot {
    pub fn new(approved_limit: Money, current_debt: Money) -> Self {
        Self {
            approved_limit,
            current_debt,
        }
    }

    /// debt strictly above the approved limit
    pub fn is_over_limit(&self) -> bool {
        self.current_debt > self.approved_limit
    }
}

/// one prior or active loan as seen by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanHistoryEntry {
    /// tenure in months
    pub tenure: u32,
    pub emis_paid_on_time: u32,
    pub start_date: NaiveDate,
}

impl LoanHistoryEntry {
    pub fn new(tenure: u32, emis_paid_on_time: u32, start_date: NaiveDate) -> Self {
        Self {
            tenure,
            emis_paid_on_time,
            start_date,
        }
    }
}

/// requested loan terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub principal: Money,
    pub interest_rate: Rate,
    /// tenure in months
    pub tenure: u32,
}

impl LoanRequest {
    pub fn new(principal: Money, interest_rate: Rate, tenure: u32) -> Self {
        Self {
            principal,
            interest_rate,
            tenure,
        }
    }
}
