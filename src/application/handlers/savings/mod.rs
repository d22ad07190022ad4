//! Savings handlers.
//!
//! ## Commands
//! - Registering a subscription (user, pending plan, pending contribution)
//!
//! ## Queries
//! - A user's plans with dashboard values
//! - A user's payment history

mod create_subscription;
mod get_payment_history;
mod get_user_plans;

// Commands
pub use create_subscription::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
};

// Queries
pub use get_payment_history::{GetPaymentHistoryHandler, GetPaymentHistoryQuery};
pub use get_user_plans::{GetUserPlansHandler, GetUserPlansQuery, PlanSummary};
