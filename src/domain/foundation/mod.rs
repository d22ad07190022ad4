//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, percentages, the state machine trait and error
//! types shared by the savings, ledger, user and payment domains.

mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OrderId, PlanId, TransactionId, UserId};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
