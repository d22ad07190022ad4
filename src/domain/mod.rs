//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, state machine, errors)
//! - `savings` - Savings plans, tiers and dashboard calculations
//! - `ledger` - Contribution transactions keyed by provider order id
//! - `user` - Savers, email identity and wallet address
//! - `payment` - Gateway signatures and webhook payloads

pub mod foundation;
pub mod ledger;
pub mod payment;
pub mod savings;
pub mod user;
