use serde::{Deserialize, Serialize};

use crate::config::BandPolicy;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::compute_installment;
use crate::scoring::CreditScore;
use crate::types::LoanRequest;

/// score band, each score maps to exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// approve at the requested rate
    Prime,
    /// approve, rate raised to the near-prime floor
    NearPrime,
    /// approve, rate raised to the subprime floor
    Subprime,
    /// reject
    Ineligible,
}

impl ScoreBand {
    /// lower band bounds are exclusive: a score equal to a threshold falls in the band below
    pub fn classify(score: CreditScore, policy: &BandPolicy) -> Self {
        let score = score.value();
        if score > policy.prime_above {
            ScoreBand::Prime
        } else if score > policy.near_prime_above {
            ScoreBand::NearPrime
        } else if score > policy.subprime_above {
            ScoreBand::Subprime
        } else {
            ScoreBand::Ineligible
        }
    }

    pub fn is_eligible(&self) -> bool {
        !matches!(self, ScoreBand::Ineligible)
    }
}

/// why a request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    LowCreditScore,
}

/// decision outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Approved,
    ApprovedWithCorrectedRate { corrected_rate: Rate },
    Rejected { reason: RejectionReason },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::Approved => "Loan approved".to_string(),
            Outcome::ApprovedWithCorrectedRate { corrected_rate } => format!(
                "Loan approved with corrected interest rate: {}%",
                corrected_rate.as_quoted_percentage()
            ),
            Outcome::Rejected {
                reason: RejectionReason::LowCreditScore,
            } => "Loan not approved due to low credit score".to_string(),
        }
    }
}

/// result of applying the band policy to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityDecision {
    pub score: CreditScore,
    pub band: ScoreBand,
    pub approved: bool,
    pub requested_rate: Rate,
    pub applied_rate: Rate,
    pub tenure: u32,
    /// `0.00` when rejected
    pub monthly_installment: Money,
    pub outcome: Outcome,
}

impl EligibilityDecision {
    pub fn message(&self) -> String {
        self.outcome.message()
    }

    pub fn rate_corrected(&self) -> bool {
        matches!(self.outcome, Outcome::ApprovedWithCorrectedRate { .. })
    }
}

/// maps a credit score and a request to a decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    bands: BandPolicy,
}

impl DecisionPolicy {
    pub fn new(bands: BandPolicy) -> Self {
        Self { bands }
    }

    pub fn bands(&self) -> &BandPolicy {
        &self.bands
    }

    /// decide approval, applied rate and installment
    ///
    /// Rejection is a regular decision. Errors only come from the installment
    /// arithmetic on an approved request.
    pub fn decide(&self, score: CreditScore, request: &LoanRequest) -> Result<EligibilityDecision> {
        let band = ScoreBand::classify(score, &self.bands);

        let (applied_rate, outcome) = match band {
            ScoreBand::Prime => (request.interest_rate, Outcome::Approved),
            ScoreBand::NearPrime => apply_floor(request.interest_rate, self.bands.near_prime_floor),
            ScoreBand::Subprime => apply_floor(request.interest_rate, self.bands.subprime_floor),
            ScoreBand::Ineligible => (
                request.interest_rate,
                Outcome::Rejected {
                    reason: RejectionReason::LowCreditScore,
                },
            ),
        };

        let monthly_installment = match outcome {
            Outcome::Rejected { .. } => Money::ZERO,
            _ => compute_installment(request.principal, applied_rate, request.tenure)?,
        };

        Ok(EligibilityDecision {
            score,
            band,
            approved: band.is_eligible(),
            requested_rate: request.interest_rate,
            applied_rate,
            tenure: request.tenure,
            monthly_installment,
            outcome,
        })
    }
}

fn apply_floor(requested: Rate, floor: Rate) -> (Rate, Outcome) {
    if requested >= floor {
        (requested, Outcome::Approved)
    } else {
        (
            floor,
            Outcome::ApprovedWithCorrectedRate {
                corrected_rate: floor,
            },
        )
    }
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(BandPolicy::standard())
    }
}
