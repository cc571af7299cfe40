use thiserror::Error;

use crate::types::{CustomerId, LoanId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LendingError {
    #[error("arithmetic error: {message}")]
    Arithmetic {
        message: String,
    },

    #[error("invalid {field}: {message}")]
    InvalidRequest {
        field: &'static str,
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("customer not found: {id}")]
    CustomerNotFound {
        id: CustomerId,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("duplicate customer id: {id}")]
    DuplicateCustomer {
        id: CustomerId,
    },

    #[error("duplicate loan id: {id}")]
    DuplicateLoan {
        id: LoanId,
    },
}

impl LendingError {
    pub(crate) fn arithmetic(message: impl Into<String>) -> Self {
        LendingError::Arithmetic {
            message: message.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        LendingError::InvalidRequest {
            field,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LendingError>;
