//! Savings plan repository port.
//!
//! Plans are only written here at registration time. Activation happens
//! inside [`LedgerRepository::confirm_payment`](super::LedgerRepository::confirm_payment)
//! so it commits together with the transaction confirmation.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PlanId, UserId};
use crate::domain::savings::SavingsPlan;

#[async_trait]
pub trait SavingsPlanRepository: Send + Sync {
    /// Save a new plan.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the owning user does not exist
    /// - `DatabaseError` on persistence failure
    async fn save(&self, plan: &SavingsPlan) -> Result<(), DomainError>;

    /// Find a plan by its ID.
    async fn find_by_id(&self, id: &PlanId) -> Result<Option<SavingsPlan>, DomainError>;

    /// List a user's plans, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<SavingsPlan>, DomainError>;
}
