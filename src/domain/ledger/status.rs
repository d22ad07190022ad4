//! Ledger transaction status.

use crate::domain::foundation::StateMachine;
use serde::{Deserialize, Serialize};

/// Settlement status of a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Awaiting provider confirmation.
    Pending,
    /// Settled by the provider.
    Confirmed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl StateMachine for TransactionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (TransactionStatus::Pending, TransactionStatus::Confirmed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            TransactionStatus::Pending => vec![TransactionStatus::Confirmed],
            TransactionStatus::Confirmed => vec![],
        }
    }
}

/// Kind of contribution a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// First payment registered together with a plan.
    InitialContribution,
    /// Any other settled payment, including ones with no registered order.
    Contribution,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::InitialContribution => "initial_contribution",
            PaymentType::Contribution => "contribution",
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_confirms_once() {
        assert_eq!(
            TransactionStatus::Pending.transition_to(TransactionStatus::Confirmed),
            Ok(TransactionStatus::Confirmed)
        );
        assert!(TransactionStatus::Confirmed.is_terminal());
    }

    #[test]
    fn confirmed_cannot_reconfirm() {
        assert!(TransactionStatus::Confirmed
            .transition_to(TransactionStatus::Confirmed)
            .is_err());
    }

    #[test]
    fn payment_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentType::InitialContribution).unwrap(),
            "\"initial_contribution\""
        );
        assert_eq!(PaymentType::Contribution.as_str(), "contribution");
    }
}
