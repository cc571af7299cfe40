use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::RegistrationPolicy;
use crate::decimal::Money;
use crate::errors::{LendingError, Result};

/// one lakh (100,000)
pub const LAKH: Money = Money::from_decimal(Decimal::from_parts(100_000, 0, 0, false, 0));

/// round half-up to the nearest multiple of `unit`
pub fn round_to_unit(amount: Money, unit: Money) -> Result<Money> {
    let units = amount
        .as_decimal()
        .checked_div(unit.as_decimal())
        .ok_or_else(|| LendingError::arithmetic(format!("cannot round {} to unit {}", amount, unit)))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    Ok(Money::from_decimal(units * unit.as_decimal()))
}

/// round half-up to the nearest lakh
pub fn round_to_nearest_lakh(amount: Money) -> Result<Money> {
    round_to_unit(amount, LAKH)
}

/// approved limit for a monthly income: income x multiplier, rounded to the policy unit
pub fn approved_limit_for(monthly_income: Money, policy: &RegistrationPolicy) -> Result<Money> {
    let gross = monthly_income
        .as_decimal()
        .checked_mul(Decimal::from(policy.income_multiplier))
        .ok_or_else(|| LendingError::arithmetic("approved limit overflowed"))?;
    round_to_unit(Money::from_decimal(gross), policy.limit_rounding_unit)
}

/// new customer registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub monthly_income: Money,
    pub phone_number: String,
}

impl RegistrationRequest {
    pub fn validate(&self, policy: &RegistrationPolicy) -> Result<()> {
        check_text("first_name", &self.first_name, policy.max_name_length)?;
        check_text("last_name", &self.last_name, policy.max_name_length)?;
        check_text("phone_number", &self.phone_number, policy.max_phone_length)?;

        if !(policy.min_age..=policy.max_age).contains(&self.age) {
            return Err(LendingError::invalid(
                "age",
                format!("must be between {} and {}", policy.min_age, policy.max_age),
            ));
        }

        if self.monthly_income.is_negative() {
            return Err(LendingError::invalid("monthly_income", "cannot be negative"));
        }
        if self.monthly_income.scale() > 2 {
            return Err(LendingError::invalid(
                "monthly_income",
                "at most 2 decimal places",
            ));
        }

        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

fn check_text(field: &'static str, value: &str, max_length: usize) -> Result<()> {
    let length = value.trim().chars().count();
    if length == 0 {
        return Err(LendingError::invalid(field, "cannot be empty"));
    }
    if length > max_length {
        return Err(LendingError::invalid(
            field,
            format!("longer than {} characters", max_length),
        ));
    }
    Ok(())
}
