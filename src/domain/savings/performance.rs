//! Derived dashboard values for a savings plan.
//!
//! A month is counted as 30 days throughout.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::foundation::Percentage;

use super::SavingsPlan;

/// Days counted as one plan month.
pub const DAYS_PER_MONTH: i64 = 30;

/// Read-model values computed from a plan and the current date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanPerformance {
    pub progress_percent: Percentage,
    pub days_active: i64,
    pub completed_months: u32,
    pub monthly_return: Decimal,
    pub accrued_yield: Decimal,
    pub projected_total_yield: Decimal,
    pub end_date: NaiveDate,
}

impl PlanPerformance {
    /// Computes the plan's performance as of `today`.
    ///
    /// Pending plans report zero progress and zero accrued yield. A start
    /// date in the future counts as zero elapsed days.
    pub fn compute(plan: &SavingsPlan, today: NaiveDate) -> Self {
        let monthly_return = plan.amount * plan.monthly_yield;
        let projected_total_yield = monthly_return * Decimal::from(plan.months_duration);
        let end_date = plan
            .start_date
            .checked_add_months(Months::new(plan.months_duration))
            .unwrap_or(plan.start_date);

        if !plan.status.is_earning() {
            return Self {
                progress_percent: Percentage::ZERO,
                days_active: 0,
                completed_months: 0,
                monthly_return,
                accrued_yield: Decimal::ZERO,
                projected_total_yield,
                end_date,
            };
        }

        let days_active = (today - plan.start_date).num_days().max(0);
        let total_days = i64::from(plan.months_duration) * DAYS_PER_MONTH;
        let completed_months =
            (days_active / DAYS_PER_MONTH).min(i64::from(plan.months_duration)) as u32;

        Self {
            progress_percent: Percentage::from_ratio(days_active, total_days),
            days_active,
            completed_months,
            monthly_return,
            accrued_yield: monthly_return * Decimal::from(completed_months),
            projected_total_yield,
            end_date,
        }
    }
}
