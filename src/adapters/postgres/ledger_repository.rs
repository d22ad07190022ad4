//! PostgreSQL implementation of LedgerRepository.
//!
//! `confirm_payment` runs transaction confirmation, plan activation and the
//! first-wallet write inside one database transaction. The conditional
//! `WHERE status = 'pending'` update takes the row lock, so concurrent
//! deliveries of the same order serialize and exactly one sees a row back.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, PlanId, Timestamp, TransactionId, UserId,
};
use crate::domain::ledger::{PaymentDetails, PaymentType, Transaction, TransactionStatus};
use crate::ports::{ConfirmOutcome, ConfirmPayment, LedgerRepository, SaveResult};

use super::{corrupt_row, db_error, violated_constraint};

/// PostgreSQL implementation of the LedgerRepository port.
pub struct PostgresLedgerRepository {
    pool: PgPool,
}

impl PostgresLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a ledger transaction.
#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: Uuid,
    plan_id: Option<Uuid>,
    payment_type: String,
    amount: Decimal,
    order_id: String,
    status: String,
    payment_date: Option<DateTime<Utc>>,
    details: Option<Json<PaymentDetails>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = DomainError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        Ok(Transaction {
            id: TransactionId::from_uuid(row.id),
            plan_id: row.plan_id.map(PlanId::from_uuid),
            payment_type: parse_payment_type(&row.payment_type)?,
            amount: row.amount,
            order_id: OrderId::new(row.order_id).map_err(|e| corrupt_row("order_id", e))?,
            status: parse_status(&row.status)?,
            payment_date: row.payment_date.map(Timestamp::from_datetime),
            details: row.details.map(|Json(details)| details),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_status(s: &str) -> Result<TransactionStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(TransactionStatus::Pending),
        "confirmed" => Ok(TransactionStatus::Confirmed),
        _ => Err(corrupt_row("status", s)),
    }
}

fn parse_payment_type(s: &str) -> Result<PaymentType, DomainError> {
    match s.to_lowercase().as_str() {
        "initial_contribution" => Ok(PaymentType::InitialContribution),
        "contribution" => Ok(PaymentType::Contribution),
        _ => Err(corrupt_row("payment_type", s)),
    }
}

const SELECT_TRANSACTION: &str = r#"
    SELECT t.id, t.plan_id, t.payment_type, t.amount, t.order_id, t.status,
           t.payment_date, t.details, t.created_at
    FROM transactions t
"#;

#[async_trait]
impl LedgerRepository for PostgresLedgerRepository {
    async fn save(&self, transaction: &Transaction) -> Result<SaveResult, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                id, plan_id, payment_type, amount, order_id, status,
                payment_date, details, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (order_id) DO NOTHING
            "#,
        )
        .bind(transaction.id.as_uuid())
        .bind(transaction.plan_id.map(|id| *id.as_uuid()))
        .bind(transaction.payment_type.as_str())
        .bind(transaction.amount)
        .bind(transaction.order_id.as_str())
        .bind(transaction.status.as_str())
        .bind(transaction.payment_date.map(|ts| *ts.as_datetime()))
        .bind(transaction.details.as_ref().map(Json))
        .bind(transaction.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some("transactions_plan_id_fkey") {
                return DomainError::new(ErrorCode::PlanNotFound, "Linked plan does not exist")
                    .with_detail("order_id", transaction.order_id.as_str());
            }
            db_error("Failed to save transaction", e)
        })?;

        if result.rows_affected() == 0 {
            Ok(SaveResult::AlreadyExists)
        } else {
            Ok(SaveResult::Inserted)
        }
    }

    async fn find_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<Transaction>, DomainError> {
        let row: Option<TransactionRow> =
            sqlx::query_as(&format!("{} WHERE t.order_id = $1", SELECT_TRANSACTION))
                .bind(order_id.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to find transaction", e))?;

        row.map(Transaction::try_from).transpose()
    }

    async fn confirm_payment(
        &self,
        request: ConfirmPayment,
    ) -> Result<ConfirmOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        let confirmed: Option<(Uuid, Option<Uuid>)> = sqlx::query_as(
            r#"
            UPDATE transactions
            SET status = 'confirmed', payment_date = $2, details = $3
            WHERE order_id = $1 AND status = 'pending'
            RETURNING id, plan_id
            "#,
        )
        .bind(request.order_id.as_str())
        .bind(request.paid_at.as_datetime())
        .bind(Json(&request.details))
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to confirm transaction", e))?;

        let Some((transaction_id, plan_id)) = confirmed else {
            let existing: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM transactions WHERE order_id = $1")
                    .bind(request.order_id.as_str())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to look up transaction", e))?;
            tx.rollback()
                .await
                .map_err(|e| db_error("Failed to roll back", e))?;

            return Ok(match existing {
                Some((id,)) => ConfirmOutcome::AlreadyConfirmed {
                    transaction_id: TransactionId::from_uuid(id),
                },
                None => ConfirmOutcome::NotFound,
            });
        };

        let mut plan_activated = false;
        let mut wallet_recorded = false;

        if let Some(plan_id) = plan_id {
            plan_activated = sqlx::query(
                "UPDATE savings_plans SET status = 'active' WHERE id = $1 AND status = 'pending'",
            )
            .bind(plan_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to activate plan", e))?
            .rows_affected()
                > 0;

            if let Some(wallet) = &request.payer_wallet {
                wallet_recorded = sqlx::query(
                    r#"
                    UPDATE users SET wallet_address = $1
                    WHERE id = (SELECT user_id FROM savings_plans WHERE id = $2)
                      AND wallet_address IS NULL
                    "#,
                )
                .bind(wallet.as_str())
                .bind(plan_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to record wallet", e))?
                .rows_affected()
                    > 0;
            }
        }

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit settlement", e))?;

        Ok(ConfirmOutcome::Confirmed {
            transaction_id: TransactionId::from_uuid(transaction_id),
            plan_activated,
            wallet_recorded,
        })
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Transaction>, DomainError> {
        let rows: Vec<TransactionRow> = sqlx::query_as(&format!(
            r#"{}
            JOIN savings_plans p ON p.id = t.plan_id
            WHERE p.user_id = $1
            ORDER BY t.created_at DESC"#,
            SELECT_TRANSACTION
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list transactions", e))?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
