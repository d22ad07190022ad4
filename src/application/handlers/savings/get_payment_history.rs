//! GetPaymentHistoryHandler - Query handler for a saver's transactions.

use std::sync::Arc;

use crate::domain::ledger::Transaction;
use crate::domain::savings::SavingsError;
use crate::domain::user::Email;
use crate::ports::{LedgerRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetPaymentHistoryQuery {
    pub email: String,
}

pub struct GetPaymentHistoryHandler {
    users: Arc<dyn UserRepository>,
    ledger: Arc<dyn LedgerRepository>,
}

impl GetPaymentHistoryHandler {
    pub fn new(users: Arc<dyn UserRepository>, ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { users, ledger }
    }

    /// Returns transactions on the user's plans, newest first.
    pub async fn handle(
        &self,
        query: GetPaymentHistoryQuery,
    ) -> Result<Vec<Transaction>, SavingsError> {
        let email = Email::new(&query.email)?;
        match self.users.find_by_email(&email).await? {
            Some(user) => Ok(self.ledger.list_for_user(&user.id).await?),
            None => Ok(Vec::new()),
        }
    }
}
