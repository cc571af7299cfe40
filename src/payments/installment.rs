use log::debug;
use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{LendingError, Result};

/// fixed monthly installment for an amortizing loan
///
/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1), with r = annual percent / 1200.
/// The result is rounded half-up to cents. At a zero rate the installment is
/// the exact quotient `P / n` and is deliberately left unrounded.
///
/// When `(1 + r)^n` leaves the decimal range the same installment is taken
/// from the discounted form P * r / (1 - v^n), v = 1 / (1 + r), whose power
/// stays within (0, 1].
///
/// Preconditions (positive principal, non-negative rate, tenure >= 1) belong to
/// the caller; the only failures are the degenerate cases that have no numeric
/// answer.
pub fn compute_installment(principal: Money, annual_rate: Rate, tenure_months: u32) -> Result<Money> {
    if tenure_months == 0 {
        return Err(LendingError::arithmetic("division by zero: tenure is zero months"));
    }

    let p = principal.as_decimal();

    if annual_rate.is_zero() {
        return p
            .checked_div(Decimal::from(tenure_months))
            .map(Money::from_decimal)
            .ok_or_else(|| LendingError::arithmetic("principal / tenure overflowed"));
    }

    let r = annual_rate.monthly_rate();
    let emi = match compounded(p, r, tenure_months) {
        Some(emi) => emi,
        None => {
            debug!(
                "(1 + {})^{} out of decimal range, using discounted form",
                r, tenure_months
            );
            discounted(p, r, tenure_months)?
        }
    };

    Ok(Money::from_decimal(emi).round_cents())
}

/// P * r * (1 + r)^n / ((1 + r)^n - 1), `None` once an intermediate overflows
fn compounded(p: Decimal, r: Decimal, n: u32) -> Option<Decimal> {
    let base = Decimal::ONE.checked_add(r)?;
    let mut compound = Decimal::ONE;
    for _ in 0..n {
        compound = compound.checked_mul(base)?;
    }
    p.checked_mul(r)?
        .checked_mul(compound)?
        .checked_div(compound - Decimal::ONE)
}

fn discounted(p: Decimal, r: Decimal, n: u32) -> Result<Decimal> {
    let v = Decimal::ONE
        .checked_add(r)
        .and_then(|base| Decimal::ONE.checked_div(base))
        .ok_or_else(|| LendingError::arithmetic(format!("1 / (1 + {}) out of range", r)))?;

    let mut discount = Decimal::ONE;
    for _ in 0..n {
        discount = discount
            .checked_mul(v)
            .ok_or_else(|| LendingError::arithmetic(format!("(1 / (1 + {}))^{} out of range", r, n)))?;
    }

    p.checked_mul(r)
        .and_then(|numerator| numerator.checked_div(Decimal::ONE - discount))
        .ok_or_else(|| {
            LendingError::arithmetic(format!(
                "degenerate discount factor {} for monthly rate {}",
                discount, r
            ))
        })
}
