use chrono::{Datelike, NaiveDate};

use crate::config::UtilizationTier;
use crate::types::{CustomerSnapshot, LoanHistoryEntry};

/// floor(max * paid / tenure) over the whole history, capped at `max`
///
/// An empty history (or one with zero total tenure) earns nothing.
pub fn payment_history_points(history: &[LoanHistoryEntry], max: u32) -> u32 {
    let (total_tenure, total_paid) = history.iter().fold((0u64, 0u64), |(tenure, paid), entry| {
        (
            tenure + u64::from(entry.tenure),
            paid + u64::from(entry.emis_paid_on_time),
        )
    });

    if total_tenure == 0 {
        return 0;
    }

    let points = u64::from(max) * total_paid / total_tenure;
    points.min(u64::from(max)) as u32
}

/// points per loan on record, capped
pub fn loan_count_points(loan_count: usize, per_loan: u32, max: u32) -> u32 {
    let count = u32::try_from(loan_count).unwrap_or(u32::MAX);
    count.saturating_mul(per_loan).min(max)
}

/// points per loan started in the calendar year of `today`, capped
pub fn recent_activity_points(
    history: &[LoanHistoryEntry],
    today: NaiveDate,
    per_loan: u32,
    max: u32,
) -> u32 {
    let current_year = history
        .iter()
        .filter(|entry| entry.start_date.year() == today.year())
        .count();
    loan_count_points(current_year, per_loan, max)
}

/// points for the first tier whose ratio bound covers debt / limit
///
/// A non-positive limit has no defined ratio and earns nothing.
pub fn utilization_points(customer: &CustomerSnapshot, tiers: &[UtilizationTier]) -> u32 {
    if !customer.approved_limit.is_positive() {
        return 0;
    }

    let Some(ratio) = customer.current_debt.ratio_to(customer.approved_limit) else {
        return 0;
    };

    tiers
        .iter()
        .find(|tier| ratio <= tier.max_ratio)
        .map(|tier| tier.points)
        .unwrap_or(0)
}
