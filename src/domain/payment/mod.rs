//! Payment gateway domain module.
//!
//! Signature schemes, webhook payload validation and webhook errors.

mod errors;
mod signature;
mod webhook;

pub use errors::WebhookError;
pub use signature::{request_signature, verify, webhook_signature, WebhookSignatureVerifier};
pub use webhook::{SettledPayment, WebhookPayload, DEFAULT_CURRENCY, SETTLED_STATUSES};
