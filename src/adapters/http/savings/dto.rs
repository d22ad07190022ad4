//! Request and response DTOs for savings endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::PlanSummary;
use crate::domain::foundation::{OrderId, PlanId, TransactionId, UserId};
use crate::domain::ledger::Transaction;
use crate::domain::savings::{PlanPerformance, SavingsPlan, TierOffer};

/// Request to register a savings subscription.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSubscriptionRequest {
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub plan_type: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub monthly_yield: Option<Decimal>,
    #[serde(default)]
    pub months_duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSubscriptionResponse {
    pub success: bool,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub transaction_id: TransactionId,
    pub order_id: OrderId,
}

/// Optional `?as_of=YYYY-MM-DD` for dashboard reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlansQueryParams {
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// A plan with its dashboard values side by side.
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: SavingsPlan,
    pub performance: PlanPerformance,
}

impl From<PlanSummary> for PlanView {
    fn from(summary: PlanSummary) -> Self {
        Self {
            plan: summary.plan,
            performance: summary.performance,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPlansResponse {
    pub email: String,
    pub plans: Vec<PlanView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentHistoryResponse {
    pub email: String,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub plans: &'static [TierOffer],
}
