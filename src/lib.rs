//! Savings Gateway - savings plan subscriptions settled through a hosted
//! crypto payment gateway.
//!
//! Savers register a plan, pay through the gateway's hosted page, and the
//! gateway's signed webhook confirms the contribution. Reconciliation is
//! idempotent per provider order id.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
