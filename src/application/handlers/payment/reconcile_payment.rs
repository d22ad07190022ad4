//! ReconcilePaymentHandler - Command handler for gateway payment webhooks.
//!
//! Verifies the delivery signature over the raw body, parses the payload and
//! reconciles it against the ledger. Redelivery of a settled order is a no-op
//! that still reports success.

use std::sync::Arc;

use secrecy::SecretString;

use crate::domain::foundation::{Timestamp, TransactionId};
use crate::domain::ledger::Transaction;
use crate::domain::payment::{SettledPayment, WebhookError, WebhookPayload, WebhookSignatureVerifier};
use crate::ports::{ConfirmOutcome, ConfirmPayment, LedgerRepository, SaveResult};

/// Command to handle a webhook delivery.
#[derive(Debug, Clone)]
pub struct ReconcilePaymentCommand {
    /// Raw request body, exactly as received.
    pub raw_body: Vec<u8>,
    /// Value of the `sign` header.
    pub signature: Option<String>,
}

/// Result of reconciling a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileResult {
    /// A pending transaction was confirmed by this delivery.
    Confirmed {
        transaction_id: TransactionId,
        plan_activated: bool,
        wallet_recorded: bool,
    },
    /// Settlement for an unknown order was recorded as a new confirmed entry.
    RecordedUnmatched { transaction_id: TransactionId },
    /// The order was already confirmed; nothing changed.
    AlreadyConfirmed { transaction_id: TransactionId },
    /// Status is not a settlement; nothing changed.
    Ignored { status: String },
}

impl ReconcileResult {
    /// Returns true if the delivery was acknowledged without processing.
    pub fn is_ignored(&self) -> bool {
        matches!(self, ReconcileResult::Ignored { .. })
    }
}

/// Handler for payment webhook deliveries.
pub struct ReconcilePaymentHandler {
    verifier: WebhookSignatureVerifier,
    ledger: Arc<dyn LedgerRepository>,
}

impl ReconcilePaymentHandler {
    pub fn new(webhook_secret: SecretString, ledger: Arc<dyn LedgerRepository>) -> Self {
        Self {
            verifier: WebhookSignatureVerifier::new(webhook_secret),
            ledger,
        }
    }

    /// Verifies, parses and reconciles a delivery.
    pub async fn handle(&self, cmd: ReconcilePaymentCommand) -> Result<ReconcileResult, WebhookError> {
        let payload = match self
            .verifier
            .verify_and_parse(&cmd.raw_body, cmd.signature.as_deref())
        {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, body_len = cmd.raw_body.len(), "Rejected webhook delivery");
                return Err(e);
            }
        };

        let order_id = payload.order_id().map(str::to_string);
        let status = payload.status().to_string();

        self.reconcile(payload).await.map_err(|e| {
            tracing::error!(
                order_id = ?order_id,
                status = %status,
                error = %e,
                retryable = e.is_retryable(),
                "Webhook reconciliation failed"
            );
            e
        })
    }

    /// Reconciles an already verified payload.
    pub async fn reconcile(&self, payload: WebhookPayload) -> Result<ReconcileResult, WebhookError> {
        match payload {
            WebhookPayload::Unsettled { status, order_id } => {
                tracing::info!(
                    status = %status,
                    order_id = ?order_id,
                    "Acknowledged webhook with non-settlement status"
                );
                Ok(ReconcileResult::Ignored { status })
            }
            WebhookPayload::Settled(payment) => self.settle(payment).await,
        }
    }

    async fn settle(&self, payment: SettledPayment) -> Result<ReconcileResult, WebhookError> {
        match self.ledger.find_by_order_id(&payment.order_id).await? {
            Some(existing) if existing.is_confirmed() => {
                tracing::info!(
                    order_id = %payment.order_id,
                    transaction_id = %existing.id,
                    "Order already confirmed, skipping redelivery"
                );
                Ok(ReconcileResult::AlreadyConfirmed {
                    transaction_id: existing.id,
                })
            }
            Some(existing) => {
                if existing.amount != payment.amount {
                    tracing::warn!(
                        order_id = %payment.order_id,
                        expected = %existing.amount,
                        received = %payment.amount,
                        "Settled amount differs from registered amount"
                    );
                }
                let outcome = self.confirm(&payment).await?;
                match Self::from_outcome(&payment, outcome) {
                    Some(result) => Ok(result),
                    None => self.record_unmatched(&payment).await,
                }
            }
            None => self.record_unmatched(&payment).await,
        }
    }

    async fn confirm(&self, payment: &SettledPayment) -> Result<ConfirmOutcome, WebhookError> {
        let outcome = self
            .ledger
            .confirm_payment(ConfirmPayment {
                order_id: payment.order_id.clone(),
                details: payment.details(),
                paid_at: Timestamp::now(),
                payer_wallet: payment.payer_address.clone(),
            })
            .await?;
        Ok(outcome)
    }

    async fn record_unmatched(&self, payment: &SettledPayment) -> Result<ReconcileResult, WebhookError> {
        let transaction = Transaction::unmatched_settlement(
            TransactionId::new(),
            payment.order_id.clone(),
            payment.amount,
            payment.details(),
            Timestamp::now(),
        );

        match self.ledger.save(&transaction).await? {
            SaveResult::Inserted => {
                tracing::warn!(
                    order_id = %payment.order_id,
                    transaction_id = %transaction.id,
                    amount = %payment.amount,
                    currency = %payment.currency,
                    "Recorded settlement for unregistered order"
                );
                Ok(ReconcileResult::RecordedUnmatched {
                    transaction_id: transaction.id,
                })
            }
            SaveResult::AlreadyExists => {
                // Lost the insert race; the row now exists.
                let outcome = self.confirm(payment).await?;
                Self::from_outcome(payment, outcome).ok_or_else(|| {
                    WebhookError::Database(format!(
                        "order {} reported as existing but not found",
                        payment.order_id
                    ))
                })
            }
        }
    }

    fn from_outcome(payment: &SettledPayment, outcome: ConfirmOutcome) -> Option<ReconcileResult> {
        let result = match outcome {
            ConfirmOutcome::Confirmed {
                transaction_id,
                plan_activated,
                wallet_recorded,
            } => {
                tracing::info!(
                    order_id = %payment.order_id,
                    transaction_id = %transaction_id,
                    status = %payment.status,
                    plan_activated,
                    wallet_recorded,
                    "Payment confirmed"
                );
                ReconcileResult::Confirmed {
                    transaction_id,
                    plan_activated,
                    wallet_recorded,
                }
            }
            ConfirmOutcome::AlreadyConfirmed { transaction_id } => {
                tracing::info!(
                    order_id = %payment.order_id,
                    transaction_id = %transaction_id,
                    "Order confirmed concurrently, skipping"
                );
                ReconcileResult::AlreadyConfirmed { transaction_id }
            }
            ConfirmOutcome::NotFound => return None,
        };
        Some(result)
    }
}
