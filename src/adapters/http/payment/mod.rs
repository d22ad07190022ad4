//! HTTP adapter for payment endpoints.
//!
//! - `POST /create-payment` - Open a hosted payment page
//! - `POST /webhook/provider` (alias `/webhook/cryptomus`) - Reconcile deliveries

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::SIGNATURE_HEADER;
pub use routes::payment_routes;
