pub mod policy;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::EligibilityConfig;
use crate::errors::Result;
use crate::scoring::{CreditScorer, ScoreBreakdown};
use crate::types::{CustomerSnapshot, LoanHistoryEntry, LoanRequest};

pub use policy::{DecisionPolicy, EligibilityDecision, Outcome, RejectionReason, ScoreBand};

/// score breakdown plus the decision it led to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub breakdown: ScoreBreakdown,
    pub decision: EligibilityDecision,
}

/// scorer and decision policy composed per request
///
/// Stateless: holds configuration only, so it can be shared across threads
/// and called repeatedly without memoization.
#[derive(Debug, Clone)]
pub struct EligibilityEngine {
    config: EligibilityConfig,
    scorer: CreditScorer,
    policy: DecisionPolicy,
}

impl EligibilityEngine {
    /// create engine from a validated configuration
    pub fn new(config: EligibilityConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            scorer: CreditScorer::new(config.scoring.clone()),
            policy: DecisionPolicy::new(config.bands),
            config,
        })
    }

    /// engine with the standard lending policy
    pub fn standard() -> Self {
        let config = EligibilityConfig::standard();
        Self {
            scorer: CreditScorer::new(config.scoring.clone()),
            policy: DecisionPolicy::new(config.bands),
            config,
        }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    pub fn scorer(&self) -> &CreditScorer {
        &self.scorer
    }

    pub fn policy(&self) -> &DecisionPolicy {
        &self.policy
    }

    /// assess a request as of the provider's current date
    pub fn assess(
        &self,
        customer: &CustomerSnapshot,
        history: &[LoanHistoryEntry],
        request: &LoanRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<Assessment> {
        self.assess_on(customer, history, request, time_provider.now().date_naive())
    }

    /// assess a request as of `today`
    pub fn assess_on(
        &self,
        customer: &CustomerSnapshot,
        history: &[LoanHistoryEntry],
        request: &LoanRequest,
        today: NaiveDate,
    ) -> Result<Assessment> {
        let breakdown = self.scorer.breakdown_on(customer, history, today);
        let decision = self.policy.decide(breakdown.total, request)?;

        debug!(
            "assessed score={} band={:?} approved={} requested={} applied={} installment={}",
            decision.score,
            decision.band,
            decision.approved,
            decision.requested_rate,
            decision.applied_rate,
            decision.monthly_installment
        );

        Ok(Assessment {
            breakdown,
            decision,
        })
    }
}

impl Default for EligibilityEngine {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use crate::scoring::CreditScore;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = EligibilityConfig::standard();
        config.bands.subprime_above = 40;
        assert!(EligibilityEngine::new(config).is_err());
    }

    #[test]
    fn test_over_limit_customer_is_rejected() {
        let engine = EligibilityEngine::standard();
        let customer = CustomerSnapshot::new(Money::from_major(100_000), Money::from_major(150_000));
        let history = vec![LoanHistoryEntry::new(12, 12, date(2024, 1, 1))];
        let request = LoanRequest::new(Money::from_major(50_000), Rate::from_percentage(10), 12);

        let assessment = engine
            .assess_on(&customer, &history, &request, date(2024, 6, 1))
            .unwrap();
        assert!(assessment.breakdown.over_limit);
        assert!(!assessment.decision.approved);
        assert_eq!(assessment.decision.monthly_installment, Money::ZERO);
    }

    #[test]
    fn test_good_customer_is_approved_at_requested_rate() {
        let engine = EligibilityEngine::standard();
        let customer = CustomerSnapshot::new(Money::from_major(1_000_000), Money::from_major(200_000));
        let history = vec![
            LoanHistoryEntry::new(12, 12, date(2023, 1, 1)),
            LoanHistoryEntry::new(12, 12, date(2024, 2, 1)),
        ];
        let request = LoanRequest::new(Money::from_major(100_000), Rate::from_percentage(10), 12);

        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        ));
        let assessment = engine.assess(&customer, &history, &request, &time).unwrap();

        // 35 + 4 + 5 + 25
        assert_eq!(assessment.decision.score, CreditScore::new(69));
        assert_eq!(assessment.decision.applied_rate, Rate::from_percent(dec!(10)));
        assert_eq!(
            assessment.decision.monthly_installment,
            Money::from_decimal(dec!(8791.59))
        );
    }
}
