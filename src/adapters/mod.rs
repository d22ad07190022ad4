//! Adapters - Implementations of port interfaces.
//!
//! - `cryptomus` - Payment gateway over the Cryptomus merchant API
//! - `http` - Axum REST surface
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories

pub mod cryptomus;
pub mod http;
pub mod memory;
pub mod postgres;

pub use cryptomus::{CryptomusConfig, CryptomusPaymentAdapter};
pub use memory::InMemoryStore;
