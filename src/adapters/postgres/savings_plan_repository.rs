//! PostgreSQL implementation of SavingsPlanRepository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp, UserId};
use crate::domain::savings::{PlanStatus, PlanTier, SavingsPlan};
use crate::ports::SavingsPlanRepository;

use super::{corrupt_row, db_error, violated_constraint};

/// PostgreSQL implementation of the SavingsPlanRepository port.
pub struct PostgresSavingsPlanRepository {
    pool: PgPool,
}

impl PostgresSavingsPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a savings plan.
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    user_id: Uuid,
    plan_type: String,
    amount: Decimal,
    monthly_yield: Decimal,
    months_duration: i32,
    start_date: NaiveDate,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PlanRow> for SavingsPlan {
    type Error = DomainError;

    fn try_from(row: PlanRow) -> Result<Self, Self::Error> {
        let plan_type: PlanTier = row
            .plan_type
            .parse()
            .map_err(|e| corrupt_row("plan_type", e))?;
        let months_duration =
            u32::try_from(row.months_duration).map_err(|e| corrupt_row("months_duration", e))?;

        Ok(SavingsPlan {
            id: PlanId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            plan_type,
            amount: row.amount,
            monthly_yield: row.monthly_yield,
            months_duration,
            start_date: row.start_date,
            status: parse_status(&row.status)?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

fn parse_status(s: &str) -> Result<PlanStatus, DomainError> {
    match s.to_lowercase().as_str() {
        "pending" => Ok(PlanStatus::Pending),
        "active" => Ok(PlanStatus::Active),
        "completed" => Ok(PlanStatus::Completed),
        _ => Err(corrupt_row("status", s)),
    }
}

const SELECT_PLAN: &str = r#"
    SELECT id, user_id, plan_type, amount, monthly_yield, months_duration,
           start_date, status, created_at
    FROM savings_plans
"#;

#[async_trait]
impl SavingsPlanRepository for PostgresSavingsPlanRepository {
    async fn save(&self, plan: &SavingsPlan) -> Result<(), DomainError> {
        let months = i32::try_from(plan.months_duration)
            .map_err(|e| DomainError::validation("months_duration", e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO savings_plans (
                id, user_id, plan_type, amount, monthly_yield, months_duration,
                start_date, status, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (id) DO UPDATE SET status = EXCLUDED.status
            "#,
        )
        .bind(plan.id.as_uuid())
        .bind(plan.user_id.as_uuid())
        .bind(plan.plan_type.as_str())
        .bind(plan.amount)
        .bind(plan.monthly_yield)
        .bind(months)
        .bind(plan.start_date)
        .bind(plan.status.as_str())
        .bind(plan.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if violated_constraint(&e) == Some("savings_plans_user_id_fkey") {
                return DomainError::new(ErrorCode::UserNotFound, "Plan owner does not exist")
                    .with_detail("user_id", plan.user_id.to_string());
            }
            db_error("Failed to save savings plan", e)
        })?;

        Ok(())
    }

    async fn find_by_id(&self, id: &PlanId) -> Result<Option<SavingsPlan>, DomainError> {
        let row: Option<PlanRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_PLAN))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find savings plan", e))?;

        row.map(SavingsPlan::try_from).transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SavingsPlan>, DomainError> {
        let rows: Vec<PlanRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 ORDER BY created_at DESC",
            SELECT_PLAN
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list savings plans", e))?;

        rows.into_iter().map(SavingsPlan::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(plan_type: &str, status: &str, months: i32) -> PlanRow {
        PlanRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_type: plan_type.to_string(),
            amount: Decimal::from(300),
            monthly_yield: Decimal::new(4, 2),
            months_duration: months,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: status.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn parse_status_works_for_all_values() {
        assert_eq!(parse_status("pending").unwrap(), PlanStatus::Pending);
        assert_eq!(parse_status("active").unwrap(), PlanStatus::Active);
        assert_eq!(parse_status("completed").unwrap(), PlanStatus::Completed);
        assert_eq!(parse_status("ACTIVE").unwrap(), PlanStatus::Active);
    }

    #[test]
    fn parse_status_rejects_invalid_values() {
        assert!(parse_status("cancelled").is_err());
        assert!(parse_status("").is_err());
    }

    #[test]
    fn row_converts_to_plan() {
        let plan = SavingsPlan::try_from(row("advanced", "active", 12)).unwrap();
        assert_eq!(plan.plan_type, PlanTier::Advanced);
        assert_eq!(plan.status, PlanStatus::Active);
        assert_eq!(plan.months_duration, 12);
    }

    #[test]
    fn row_with_unknown_tier_is_rejected() {
        let err = SavingsPlan::try_from(row("platinum", "active", 12)).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn row_with_negative_duration_is_rejected() {
        assert!(SavingsPlan::try_from(row("basic", "pending", -1)).is_err());
    }
}
