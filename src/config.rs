use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};

/// eligibility engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub scoring: ScoringWeights,
    pub bands: BandPolicy,
    pub limits: RequestLimits,
    pub registration: RegistrationPolicy,
}

/// point buckets of the credit score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// points for a perfect on-time repayment record
    pub payment_history_max: u32,
    pub points_per_loan: u32,
    pub loan_count_max: u32,
    pub points_per_current_year_loan: u32,
    pub recent_activity_max: u32,
    /// checked in order, first tier whose `max_ratio` is not exceeded wins
    pub utilization_tiers: Vec<UtilizationTier>,
    pub max_score: u32,
}

/// utilization bucket, inclusive upper bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtilizationTier {
    pub max_ratio: Decimal,
    pub points: u32,
}

/// score thresholds and rate floors of the decision policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandPolicy {
    /// scores strictly above approve at the requested rate
    pub prime_above: u32,
    /// scores strictly above (and not prime) approve with `near_prime_floor`
    pub near_prime_above: u32,
    pub near_prime_floor: Rate,
    /// scores strictly above (and not near-prime) approve with `subprime_floor`
    pub subprime_above: u32,
    pub subprime_floor: Rate,
}

/// request field limits enforced before the engine runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequestLimits {
    pub min_tenure: u32,
    pub max_tenure: u32,
    /// exclusive upper bound on the loan amount
    pub amount_ceiling: Money,
    /// exclusive upper bound on the requested annual rate, in percent
    pub rate_ceiling_percent: Decimal,
    /// fractional digits allowed in amounts and rates
    pub max_fraction_digits: u32,
}

/// customer registration rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegistrationPolicy {
    pub min_age: u32,
    pub max_age: u32,
    /// approved limit = income x multiplier, rounded to the unit
    pub income_multiplier: u32,
    pub limit_rounding_unit: Money,
    pub max_name_length: usize,
    pub max_phone_length: usize,
}

impl EligibilityConfig {
    /// standard lending policy
    pub fn standard() -> Self {
        Self {
            scoring: ScoringWeights::standard(),
            bands: BandPolicy::standard(),
            limits: RequestLimits::standard(),
            registration: RegistrationPolicy::standard(),
        }
    }

    /// check internal consistency
    pub fn validate(&self) -> Result<()> {
        let bands = &self.bands;
        if !(bands.prime_above > bands.near_prime_above
            && bands.near_prime_above > bands.subprime_above)
        {
            return Err(LendingError::InvalidConfiguration {
                message: format!(
                    "band thresholds must be strictly decreasing: {} > {} > {}",
                    bands.prime_above, bands.near_prime_above, bands.subprime_above
                ),
            });
        }

        if bands.near_prime_floor.as_decimal().is_sign_negative()
            || bands.subprime_floor.as_decimal().is_sign_negative()
        {
            return Err(LendingError::InvalidConfiguration {
                message: "rate floors cannot be negative".to_string(),
            });
        }

        let increasing = self
            .scoring
            .utilization_tiers
            .windows(2)
            .all(|pair| pair[0].max_ratio < pair[1].max_ratio);
        if !increasing {
            return Err(LendingError::InvalidConfiguration {
                message: "utilization tiers must have increasing ratios".to_string(),
            });
        }

        if self.limits.min_tenure == 0 || self.limits.min_tenure > self.limits.max_tenure {
            return Err(LendingError::InvalidConfiguration {
                message: format!(
                    "tenure range {}..={} is empty or starts at zero",
                    self.limits.min_tenure, self.limits.max_tenure
                ),
            });
        }

        if !self.limits.amount_ceiling.is_positive() {
            return Err(LendingError::InvalidConfiguration {
                message: "loan amount ceiling must be positive".to_string(),
            });
        }

        let registration = &self.registration;
        if registration.min_age > registration.max_age {
            return Err(LendingError::InvalidConfiguration {
                message: format!(
                    "age range {}..={} is empty",
                    registration.min_age, registration.max_age
                ),
            });
        }

        if !registration.limit_rounding_unit.is_positive() {
            return Err(LendingError::InvalidConfiguration {
                message: "limit rounding unit must be positive".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScoringWeights {
    pub fn standard() -> Self {
        Self {
            payment_history_max: 35,
            points_per_loan: 2,
            loan_count_max: 20,
            points_per_current_year_loan: 5,
            recent_activity_max: 20,
            utilization_tiers: vec![
                UtilizationTier { max_ratio: dec!(0.5), points: 25 },
                UtilizationTier { max_ratio: dec!(0.75), points: 15 },
                UtilizationTier { max_ratio: dec!(1.0), points: 5 },
            ],
            max_score: 100,
        }
    }
}

impl BandPolicy {
    pub fn standard() -> Self {
        Self {
            prime_above: 50,
            near_prime_above: 30,
            near_prime_floor: Rate::from_percent(dec!(12.00)),
            subprime_above: 10,
            subprime_floor: Rate::from_percent(dec!(16.00)),
        }
    }
}

impl RequestLimits {
    pub fn standard() -> Self {
        Self {
            min_tenure: 1,
            max_tenure: 120,
            amount_ceiling: Money::from_major(10_000_000_000),
            rate_ceiling_percent: dec!(1000),
            max_fraction_digits: 2,
        }
    }
}

impl RegistrationPolicy {
    pub fn standard() -> Self {
        Self {
            min_age: 18,
            max_age: 100,
            income_multiplier: 36,
            limit_rounding_unit: Money::from_major(100_000),
            max_name_length: 50,
            max_phone_length: 15,
        }
    }
}
