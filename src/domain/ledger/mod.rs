//! Ledger domain module.
//!
//! Contribution transactions keyed by provider order id.

mod status;
mod transaction;

pub use status::{PaymentType, TransactionStatus};
pub use transaction::{PaymentDetails, Transaction};
