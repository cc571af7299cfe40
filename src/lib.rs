pub mod book;
pub mod config;
pub mod decimal;
pub mod eligibility;
pub mod errors;
pub mod events;
pub mod payments;
pub mod registration;
pub mod requests;
pub mod scoring;
pub mod serialization;
pub mod state;
pub mod types;

// re-export key types
pub use book::{EligibilityQuote, ImportSummary, LoanBook, LoanCreation};
pub use config::{BandPolicy, EligibilityConfig, RegistrationPolicy, RequestLimits, ScoringWeights};
pub use decimal::{Money, Rate};
pub use eligibility::{
    Assessment, DecisionPolicy, EligibilityDecision, EligibilityEngine, Outcome, RejectionReason,
    ScoreBand,
};
pub use errors::{LendingError, Result};
pub use events::{EventStore, LendingEvent};
pub use payments::compute_installment;
pub use registration::{approved_limit_for, round_to_nearest_lakh, RegistrationRequest};
pub use requests::LoanApplication;
pub use scoring::{CreditScore, CreditScorer, ScoreBreakdown};
pub use state::{CustomerRecord, LoanRecord};
pub use types::{CustomerId, CustomerSnapshot, LoanHistoryEntry, LoanId, LoanRequest};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
