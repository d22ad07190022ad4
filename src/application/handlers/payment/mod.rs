//! Payment handlers.
//!
//! ## Commands
//! - Creating hosted payment sessions
//! - Reconciling gateway webhook deliveries

mod create_payment;
mod reconcile_payment;

pub use create_payment::{CreatePaymentCommand, CreatePaymentHandler};
pub use reconcile_payment::{ReconcilePaymentCommand, ReconcilePaymentHandler, ReconcileResult};
