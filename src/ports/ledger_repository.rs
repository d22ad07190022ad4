//! Ledger repository port.
//!
//! The ledger enforces at most one transaction per order id. Implementations
//! must use the data store's uniqueness constraint rather than
//! check-then-insert, and must apply a confirmation together with the plan
//! activation and wallet write as one unit.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, OrderId, Timestamp, TransactionId, UserId};
use crate::domain::ledger::{PaymentDetails, Transaction};
use crate::domain::user::WalletAddress;

/// Result of inserting a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveResult {
    /// Row inserted.
    Inserted,
    /// A transaction with this order id already exists.
    AlreadyExists,
}

/// Confirmation of a pending transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPayment {
    pub order_id: OrderId,
    pub details: PaymentDetails,
    pub paid_at: Timestamp,
    /// Recorded on the plan owner only if they have no wallet yet.
    pub payer_wallet: Option<WalletAddress>,
}

/// Outcome of [`LedgerRepository::confirm_payment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// This call moved the transaction from pending to confirmed.
    Confirmed {
        transaction_id: TransactionId,
        plan_activated: bool,
        wallet_recorded: bool,
    },
    /// Already confirmed, nothing changed.
    AlreadyConfirmed { transaction_id: TransactionId },
    /// No transaction with this order id.
    NotFound,
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Insert a transaction.
    ///
    /// Returns `AlreadyExists` instead of an error when the order id is taken.
    async fn save(&self, transaction: &Transaction) -> Result<SaveResult, DomainError>;

    /// Find a transaction by provider order id.
    async fn find_by_order_id(&self, order_id: &OrderId)
        -> Result<Option<Transaction>, DomainError>;

    /// Atomically confirm a pending transaction, activate its plan if the plan
    /// is pending, and record the payer wallet on the plan owner if unset.
    ///
    /// Only the caller that wins the pending to confirmed change sees
    /// `Confirmed`; every other caller sees `AlreadyConfirmed`.
    async fn confirm_payment(&self, request: ConfirmPayment)
        -> Result<ConfirmOutcome, DomainError>;

    /// List transactions on a user's plans, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError>;
}
