//! GetUserPlansHandler - Query handler for a saver's dashboard.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::Timestamp;
use crate::domain::savings::{PlanPerformance, SavingsError, SavingsPlan};
use crate::domain::user::Email;
use crate::ports::{SavingsPlanRepository, UserRepository};

/// Query for a user's plans.
#[derive(Debug, Clone)]
pub struct GetUserPlansQuery {
    pub email: String,
    /// Evaluation date; today (UTC) when `None`.
    pub as_of: Option<NaiveDate>,
}

/// A plan together with its derived values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub plan: SavingsPlan,
    pub performance: PlanPerformance,
}

pub struct GetUserPlansHandler {
    users: Arc<dyn UserRepository>,
    plans: Arc<dyn SavingsPlanRepository>,
}

impl GetUserPlansHandler {
    pub fn new(users: Arc<dyn UserRepository>, plans: Arc<dyn SavingsPlanRepository>) -> Self {
        Self { users, plans }
    }

    /// Returns the user's plans newest first. Unknown emails yield an empty list.
    pub async fn handle(&self, query: GetUserPlansQuery) -> Result<Vec<PlanSummary>, SavingsError> {
        let email = Email::new(&query.email)?;
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Ok(Vec::new());
        };

        let today = query.as_of.unwrap_or_else(|| Timestamp::now().date());
        let plans = self.plans.list_for_user(&user.id).await?;

        Ok(plans
            .into_iter()
            .map(|plan| PlanSummary {
                performance: PlanPerformance::compute(&plan, today),
                plan,
            })
            .collect())
    }
}
