//! Cryptomus payment gateway adapter.

mod cryptomus_adapter;
mod types;

pub use cryptomus_adapter::{
    CryptomusConfig, CryptomusPaymentAdapter, DEFAULT_API_BASE_URL, DEFAULT_LIFETIME_SECS,
};
pub use types::{CreatePaymentBody, CryptomusPayment, CryptomusResponse};
