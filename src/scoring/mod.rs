pub mod factors;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScoringWeights;
use crate::types::{CustomerSnapshot, LoanHistoryEntry};

pub use factors::{
    loan_count_points, payment_history_points, recent_activity_points, utilization_points,
};

/// internal 0-100 credit score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditScore(u32);

impl CreditScore {
    pub const ZERO: CreditScore = CreditScore(0);

    pub fn new(value: u32) -> Self {
        CreditScore(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CreditScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// points earned per bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// debt above the approved limit short-circuits every bucket to zero
    pub over_limit: bool,
    pub payment_history: u32,
    pub loan_count: u32,
    pub recent_activity: u32,
    pub utilization: u32,
    pub total: CreditScore,
}

impl ScoreBreakdown {
    fn over_limit() -> Self {
        Self {
            over_limit: true,
            payment_history: 0,
            loan_count: 0,
            recent_activity: 0,
            utilization: 0,
            total: CreditScore::ZERO,
        }
    }
}

/// credit scorer over a customer's debt position and loan history
///
/// Scoring is pure except for the recent-activity bucket, which counts loans
/// started in the current calendar year. "Current" is read from the injected
/// time provider (or passed explicitly to the `*_on` variants), so the same
/// history can score differently on either side of a year boundary.
#[derive(Debug, Clone)]
pub struct CreditScorer {
    weights: ScoringWeights,
}

impl CreditScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// score as of the provider's current date
    pub fn score(
        &self,
        customer: &CustomerSnapshot,
        history: &[LoanHistoryEntry],
        time_provider: &SafeTimeProvider,
    ) -> CreditScore {
        self.score_on(customer, history, time_provider.now().date_naive())
    }

    /// score as of `today`
    pub fn score_on(
        &self,
        customer: &CustomerSnapshot,
        history: &[LoanHistoryEntry],
        today: NaiveDate,
    ) -> CreditScore {
        self.breakdown_on(customer, history, today).total
    }

    /// per-bucket points as of `today`
    pub fn breakdown_on(
        &self,
        customer: &CustomerSnapshot,
        history: &[LoanHistoryEntry],
        today: NaiveDate,
    ) -> ScoreBreakdown {
        if customer.is_over_limit() {
            debug!(
                "debt {} exceeds approved limit {}, score forced to zero",
                customer.current_debt, customer.approved_limit
            );
            return ScoreBreakdown::over_limit();
        }

        let w = &self.weights;
        let payment_history = payment_history_points(history, w.payment_history_max);
        let loan_count = loan_count_points(history.len(), w.points_per_loan, w.loan_count_max);
        let recent_activity = recent_activity_points(
            history,
            today,
            w.points_per_current_year_loan,
            w.recent_activity_max,
        );
        let utilization = utilization_points(customer, &w.utilization_tiers);

        let sum = payment_history
            .saturating_add(loan_count)
            .saturating_add(recent_activity)
            .saturating_add(utilization);

        ScoreBreakdown {
            over_limit: false,
            payment_history,
            loan_count,
            recent_activity,
            utilization,
            total: CreditScore(sum.clamp(0, w.max_score)),
        }
    }
}

impl Default for CreditScorer {
    fn default() -> Self {
        Self::new(ScoringWeights::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UtilizationTier;
    use crate::decimal::Money;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn customer(limit: i64, debt: i64) -> CustomerSnapshot {
        CustomerSnapshot::new(Money::from_major(limit), Money::from_major(debt))
    }

    #[test]
    fn test_over_limit_scores_zero_regardless_of_history() {
        let scorer = CreditScorer::default();
        let history: Vec<_> = (0..10)
            .map(|_| LoanHistoryEntry::new(12, 12, date(2024, 1, 1)))
            .collect();

        let breakdown = scorer.breakdown_on(&customer(100_000, 150_000), &history, date(2024, 6, 1));
        assert!(breakdown.over_limit);
        assert_eq!(breakdown.total, CreditScore::ZERO);
    }

    #[test]
    fn test_debt_equal_to_limit_is_not_cutoff() {
        let scorer = CreditScorer::default();
        let breakdown = scorer.breakdown_on(&customer(100_000, 100_000), &[], date(2024, 6, 1));
        assert!(!breakdown.over_limit);
        assert_eq!(breakdown.utilization, 5);
        assert_eq!(breakdown.total, CreditScore::new(5));
    }

    #[test]
    fn test_new_customer_scores_only_utilization() {
        let scorer = CreditScorer::default();
        let score = scorer.score_on(&customer(1_800_000, 0), &[], date(2024, 6, 1));
        assert_eq!(score, CreditScore::new(25));
    }

    #[test]
    fn test_full_breakdown() {
        let scorer = CreditScorer::default();
        let history = vec![
            LoanHistoryEntry::new(12, 12, date(2023, 1, 1)),
            LoanHistoryEntry::new(24, 18, date(2024, 2, 1)),
            LoanHistoryEntry::new(12, 6, date(2024, 5, 1)),
        ];

        let breakdown = scorer.breakdown_on(&customer(1_000_000, 600_000), &history, date(2024, 6, 1));
        // 35 * 36 / 48 = 26.25
        assert_eq!(breakdown.payment_history, 26);
        assert_eq!(breakdown.loan_count, 6);
        assert_eq!(breakdown.recent_activity, 10);
        assert_eq!(breakdown.utilization, 15);
        assert_eq!(breakdown.total, CreditScore::new(57));
    }

    #[test]
    fn test_maximum_score_is_one_hundred() {
        let scorer = CreditScorer::default();
        let history: Vec<_> = (0..10)
            .map(|_| LoanHistoryEntry::new(12, 12, date(2024, 1, 1)))
            .collect();
        let score = scorer.score_on(&customer(1_000_000, 0), &history, date(2024, 6, 1));
        assert_eq!(score, CreditScore::new(100));
    }

    #[test]
    fn test_sum_is_clamped_when_caps_exceed_max() {
        let mut weights = ScoringWeights::standard();
        weights.utilization_tiers = vec![UtilizationTier { max_ratio: dec!(1.0), points: 90 }];
        let scorer = CreditScorer::new(weights);

        let history = vec![LoanHistoryEntry::new(12, 12, date(2024, 1, 1))];
        let score = scorer.score_on(&customer(1_000, 0), &history, date(2024, 6, 1));
        assert_eq!(score, CreditScore::new(100));
    }

    #[test]
    fn test_score_depends_on_injected_year() {
        let scorer = CreditScorer::default();
        let history = vec![LoanHistoryEntry::new(12, 6, date(2024, 11, 1))];
        let limit = customer(1_000_000, 0);

        let december = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 12, 31, 23, 0, 0).unwrap(),
        ));
        let january = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap(),
        ));

        let before = scorer.score(&limit, &history, &december);
        let after = scorer.score(&limit, &history, &january);
        assert_eq!(before.value() - after.value(), 5);
    }
}
