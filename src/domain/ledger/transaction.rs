//! Ledger transaction entity.
//!
//! The order id is the idempotency key: the ledger holds at most one
//! transaction per order id and at most one of them reaches `Confirmed`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, PlanId, StateMachine, Timestamp, TransactionId,
};

use super::{PaymentType, TransactionStatus};

/// Provider-supplied settlement details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_payment_id: Option<String>,
}

/// A ledger entry, optionally linked to a savings plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub plan_id: Option<PlanId>,
    pub payment_type: PaymentType,
    pub amount: Decimal,
    pub order_id: OrderId,
    pub status: TransactionStatus,
    pub payment_date: Option<Timestamp>,
    pub details: Option<PaymentDetails>,
    pub created_at: Timestamp,
}

impl Transaction {
    /// Creates the pending initial contribution for a freshly registered plan.
    pub fn initial_contribution(
        id: TransactionId,
        plan_id: PlanId,
        amount: Decimal,
        order_id: OrderId,
    ) -> Self {
        Self {
            id,
            plan_id: Some(plan_id),
            payment_type: PaymentType::InitialContribution,
            amount,
            order_id,
            status: TransactionStatus::Pending,
            payment_date: None,
            details: None,
            created_at: Timestamp::now(),
        }
    }

    /// Records a settled payment whose order id was never registered.
    ///
    /// The entry is created already confirmed and is not linked to a plan.
    pub fn unmatched_settlement(
        id: TransactionId,
        order_id: OrderId,
        amount: Decimal,
        details: PaymentDetails,
        paid_at: Timestamp,
    ) -> Self {
        Self {
            id,
            plan_id: None,
            payment_type: PaymentType::Contribution,
            amount,
            order_id,
            status: TransactionStatus::Confirmed,
            payment_date: Some(paid_at),
            details: Some(details),
            created_at: paid_at,
        }
    }

    /// Returns true once the provider has settled this transaction.
    pub fn is_confirmed(&self) -> bool {
        self.status == TransactionStatus::Confirmed
    }

    /// Confirms a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStateTransition` if already confirmed.
    pub fn confirm(&mut self, details: PaymentDetails, paid_at: Timestamp) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(TransactionStatus::Confirmed)
            .map_err(|_| {
                DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Transaction is already confirmed",
                )
                .with_detail("order_id", self.order_id.as_str())
            })?;
        self.payment_date = Some(paid_at);
        self.details = Some(details);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> PaymentDetails {
        PaymentDetails {
            currency: "USD".to_string(),
            payer_address: Some("TXyz123".to_string()),
            provider_payment_id: None,
        }
    }

    fn pending() -> Transaction {
        Transaction::initial_contribution(
            TransactionId::new(),
            PlanId::new(),
            Decimal::from(300),
            OrderId::new("hd-42-1000").unwrap(),
        )
    }

    #[test]
    fn initial_contribution_is_pending_and_linked() {
        let tx = pending();
        assert_eq!(tx.status, TransactionStatus::Pending);
        assert_eq!(tx.payment_type, PaymentType::InitialContribution);
        assert!(tx.plan_id.is_some());
        assert!(tx.payment_date.is_none());
    }

    #[test]
    fn confirm_sets_payment_date_and_details() {
        let mut tx = pending();
        let at = Timestamp::now();
        tx.confirm(details(), at).unwrap();

        assert!(tx.is_confirmed());
        assert_eq!(tx.payment_date, Some(at));
        assert_eq!(tx.details, Some(details()));
    }

    #[test]
    fn confirm_twice_fails_with_order_detail() {
        let mut tx = pending();
        tx.confirm(details(), Timestamp::now()).unwrap();
        let err = tx.confirm(details(), Timestamp::now()).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.details.get("order_id"), Some(&"hd-42-1000".to_string()));
    }

    #[test]
    fn unmatched_settlement_is_confirmed_contribution_without_plan() {
        let tx = Transaction::unmatched_settlement(
            TransactionId::new(),
            OrderId::new("hd-42-1000").unwrap(),
            Decimal::from(300),
            details(),
            Timestamp::now(),
        );
        assert!(tx.is_confirmed());
        assert!(tx.plan_id.is_none());
        assert_eq!(tx.payment_type, PaymentType::Contribution);
        assert_eq!(tx.amount, Decimal::from(300));
    }

    #[test]
    fn details_omit_absent_fields_in_json() {
        let json = serde_json::to_value(details()).unwrap();
        assert_eq!(json["currency"], "USD");
        assert!(json.get("provider_payment_id").is_none());
    }
}
