//! Shared application state.

use std::sync::Arc;

use secrecy::SecretString;

use crate::application::{
    CreatePaymentHandler, CreateSubscriptionHandler, GetPaymentHistoryHandler,
    GetUserPlansHandler, ReconcilePaymentHandler,
};
use crate::ports::{LedgerRepository, PaymentGateway, SavingsPlanRepository, UserRepository};

use super::health::EnvCheck;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub plans: Arc<dyn SavingsPlanRepository>,
    pub ledger: Arc<dyn LedgerRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub webhook_secret: SecretString,
    pub env_check: EnvCheck,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn reconcile_handler(&self) -> ReconcilePaymentHandler {
        ReconcilePaymentHandler::new(self.webhook_secret.clone(), self.ledger.clone())
    }

    pub fn create_payment_handler(&self) -> CreatePaymentHandler {
        CreatePaymentHandler::new(self.gateway.clone())
    }

    pub fn create_subscription_handler(&self) -> CreateSubscriptionHandler {
        CreateSubscriptionHandler::new(self.users.clone(), self.plans.clone(), self.ledger.clone())
    }

    pub fn user_plans_handler(&self) -> GetUserPlansHandler {
        GetUserPlansHandler::new(self.users.clone(), self.plans.clone())
    }

    pub fn payment_history_handler(&self) -> GetPaymentHistoryHandler {
        GetPaymentHistoryHandler::new(self.users.clone(), self.ledger.clone())
    }
}
