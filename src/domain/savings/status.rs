//! Savings plan status state machine.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a savings plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Registered, initial contribution not yet confirmed.
    Pending,

    /// Initial contribution confirmed; yield accrues.
    Active,

    /// Term elapsed.
    Completed,
}

impl PlanStatus {
    /// Returns the storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::Active => "active",
            PlanStatus::Completed => "completed",
        }
    }

    /// Returns true if the plan is earning yield.
    pub fn is_earning(&self) -> bool {
        matches!(self, PlanStatus::Active | PlanStatus::Completed)
    }
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for PlanStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PlanStatus::*;
        matches!((self, target), (Pending, Active) | (Active, Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PlanStatus::*;
        match self {
            Pending => vec![Active],
            Active => vec![Completed],
            Completed => vec![],
        }
    }
}
