//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `UserRepository` - Savers keyed by email
//! - `SavingsPlanRepository` - Plan registration and reads
//! - `LedgerRepository` - Transactions keyed by order id, atomic confirmation
//!
//! ## Gateway Ports
//!
//! - `PaymentGateway` - Hosted payment session creation

mod ledger_repository;
mod payment_gateway;
mod savings_plan_repository;
mod user_repository;

pub use ledger_repository::{ConfirmOutcome, ConfirmPayment, LedgerRepository, SaveResult};
pub use payment_gateway::{
    CreatePaymentRequest, HostedPayment, PaymentError, PaymentErrorCode, PaymentGateway,
};
pub use savings_plan_repository::SavingsPlanRepository;
pub use user_repository::UserRepository;
