//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod payment;
pub mod savings;

pub use payment::{
    CreatePaymentCommand, CreatePaymentHandler, ReconcilePaymentCommand,
    ReconcilePaymentHandler, ReconcileResult,
};
pub use savings::{
    CreateSubscriptionCommand, CreateSubscriptionHandler, CreateSubscriptionResult,
    GetPaymentHistoryHandler, GetPaymentHistoryQuery, GetUserPlansHandler, GetUserPlansQuery,
    PlanSummary,
};
