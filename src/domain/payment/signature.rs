//! Payment gateway signature schemes.
//!
//! The gateway signs with MD5 hex digests and uses two schemes that must not
//! be mixed up:
//!
//! - inbound webhook: `md5(raw_body ++ webhook_secret)`
//! - outbound request: `md5(base64(json_body) ++ api_key)`
//!
//! The raw body bytes as received are canonical. Never re-serialize a parsed
//! body before verifying it.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use super::errors::WebhookError;
use super::webhook::WebhookPayload;

/// Length of a hex-encoded MD5 digest.
const DIGEST_HEX_LEN: usize = 32;

/// Computes the signature the gateway attaches to a webhook body.
pub fn webhook_signature(raw_body: &[u8], secret: &str) -> String {
    hex::encode(webhook_digest(raw_body, secret))
}

/// Computes the `sign` header for an outbound API request.
///
/// `json_body` must be exactly the bytes sent as the request body.
pub fn request_signature(json_body: &[u8], api_key: &str) -> String {
    let encoded = BASE64.encode(json_body);
    let mut hasher = Md5::new();
    hasher.update(encoded.as_bytes());
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Returns true iff `provided` is the webhook signature of `raw_body` under
/// `secret`.
///
/// `provided` must be the exact lowercase hex digest; it is compared byte for
/// byte in constant time with no trimming or case folding. Malformed input
/// (empty secret, wrong length, anything else) yields false.
pub fn verify(raw_body: &[u8], provided: &str, secret: &str) -> bool {
    if secret.is_empty() || provided.len() != DIGEST_HEX_LEN {
        return false;
    }
    let expected = webhook_signature(raw_body, secret);
    constant_time_compare(expected.as_bytes(), provided.as_bytes())
}

fn webhook_digest(raw_body: &[u8], secret: &str) -> Vec<u8> {
    let mut hasher = Md5::new();
    hasher.update(raw_body);
    hasher.update(secret.as_bytes());
    hasher.finalize().to_vec()
}

/// Compares two byte slices in constant time.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Verifier for inbound webhook deliveries.
pub struct WebhookSignatureVerifier {
    secret: SecretString,
}

impl WebhookSignatureVerifier {
    /// Creates a verifier for the shared webhook secret.
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Returns true if the signature matches the raw body.
    pub fn verify(&self, raw_body: &[u8], provided: &str) -> bool {
        verify(raw_body, provided, self.secret.expose_secret())
    }

    /// Verifies the signature and parses the payload.
    ///
    /// # Errors
    ///
    /// - `MissingSignature` - no or blank `sign` header
    /// - `InvalidSignature` - signature mismatch
    /// - payload errors from [`WebhookPayload::parse`]
    pub fn verify_and_parse(
        &self,
        raw_body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookPayload, WebhookError> {
        let signature = signature
            .filter(|s| !s.trim().is_empty())
            .ok_or(WebhookError::MissingSignature)?;

        if !self.verify(raw_body, signature) {
            return Err(WebhookError::InvalidSignature);
        }

        WebhookPayload::parse(raw_body)
    }
}

#[cfg(test)]
pub fn compute_test_signature(secret: &str, payload: &str) -> String {
    webhook_signature(payload.as_bytes(), secret)
}
