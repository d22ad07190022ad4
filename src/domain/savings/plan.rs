//! Savings plan aggregate.
//!
//! A plan belongs to exactly one user and is never deleted. It is created
//! `Pending` by a subscription request and becomes `Active` only when the
//! payment reconciler confirms its initial contribution.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, PlanId, StateMachine, Timestamp, UserId, ValidationError,
};

use super::{PlanStatus, PlanTier};

/// Default plan duration when a request omits it.
pub const DEFAULT_MONTHS_DURATION: u32 = 12;

/// Longest accepted plan duration.
pub const MAX_MONTHS_DURATION: u32 = 120;

/// Validated financial terms of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTerms {
    amount: Decimal,
    monthly_yield: Decimal,
    months_duration: u32,
}

impl PlanTerms {
    /// Validates and creates plan terms.
    ///
    /// # Errors
    ///
    /// - amount must be strictly positive
    /// - monthly_yield must lie strictly between 0 and 1
    /// - months_duration must be within 1..=120
    pub fn new(
        amount: Decimal,
        monthly_yield: Decimal,
        months_duration: u32,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::invalid_format("amount", "must be positive"));
        }
        if monthly_yield <= Decimal::ZERO || monthly_yield >= Decimal::ONE {
            return Err(ValidationError::out_of_range(
                "monthly_yield",
                "0 (exclusive)",
                "1 (exclusive)",
                monthly_yield,
            ));
        }
        if months_duration == 0 || months_duration > MAX_MONTHS_DURATION {
            return Err(ValidationError::out_of_range(
                "months_duration",
                1,
                MAX_MONTHS_DURATION,
                months_duration,
            ));
        }
        Ok(Self {
            amount,
            monthly_yield,
            months_duration,
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn monthly_yield(&self) -> Decimal {
        self.monthly_yield
    }

    pub fn months_duration(&self) -> u32 {
        self.months_duration
    }
}

/// Savings plan aggregate.
///
/// # Invariants
///
/// - `amount > 0`, `0 < monthly_yield < 1`, `1 <= months_duration <= 120`
/// - Status transitions follow [`PlanStatus`] rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsPlan {
    pub id: PlanId,
    pub user_id: UserId,
    pub plan_type: PlanTier,
    pub amount: Decimal,
    pub monthly_yield: Decimal,
    pub months_duration: u32,
    pub start_date: NaiveDate,
    pub status: PlanStatus,
    pub created_at: Timestamp,
}

impl SavingsPlan {
    /// Creates a new pending plan starting on `start_date`.
    pub fn create(
        id: PlanId,
        user_id: UserId,
        plan_type: PlanTier,
        terms: PlanTerms,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            user_id,
            plan_type,
            amount: terms.amount(),
            monthly_yield: terms.monthly_yield(),
            months_duration: terms.months_duration(),
            start_date,
            status: PlanStatus::Pending,
            created_at: Timestamp::now(),
        }
    }

    /// Activates the plan after its initial contribution is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` unless the plan is pending.
    pub fn activate(&mut self) -> Result<(), DomainError> {
        self.transition_to(PlanStatus::Active)
    }

    /// Marks the plan as completed.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        self.transition_to(PlanStatus::Completed)
    }

    /// Returns the plan's terms.
    pub fn terms(&self) -> PlanTerms {
        PlanTerms {
            amount: self.amount,
            monthly_yield: self.monthly_yield,
            months_duration: self.months_duration,
        }
    }

    fn transition_to(&mut self, target: PlanStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot transition plan from {:?} to {:?}",
                    self.status, target
                ),
            )
            .with_detail("plan_id", self.id.to_string())
        })?;
        Ok(())
    }
}
