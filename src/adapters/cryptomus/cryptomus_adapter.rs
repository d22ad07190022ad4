//! Cryptomus payment gateway adapter.
//!
//! Implements `PaymentGateway` against the Cryptomus merchant API.
//!
//! # Security
//!
//! - Requests carry `merchant` and `sign` headers, where
//!   `sign = md5(base64(body) ++ api_key)` over the exact body bytes sent
//! - API key held as `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = CryptomusConfig::new(merchant_id, api_key, "https://app.example");
//! let adapter = CryptomusPaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::request_signature;
use crate::ports::{CreatePaymentRequest, HostedPayment, PaymentError, PaymentGateway};

use super::types::{CreatePaymentBody, CryptomusResponse};

/// Default Cryptomus API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.cryptomus.com";

/// Default hosted page lifetime (1 hour).
pub const DEFAULT_LIFETIME_SECS: u32 = 3600;

/// Cryptomus API configuration.
#[derive(Clone)]
pub struct CryptomusConfig {
    merchant_id: String,
    api_key: SecretString,
    /// Base URL for the Cryptomus API.
    api_base_url: String,
    /// Public URL of this service, used for callback and return links.
    public_base_url: String,
    lifetime_secs: u32,
}

impl CryptomusConfig {
    /// Create a new configuration.
    pub fn new(
        merchant_id: impl Into<String>,
        api_key: SecretString,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            api_key,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            public_base_url: public_base_url.into(),
            lifetime_secs: DEFAULT_LIFETIME_SECS,
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Set the hosted page lifetime.
    pub fn with_lifetime_secs(mut self, secs: u32) -> Self {
        self.lifetime_secs = secs;
        self
    }

    fn is_configured(&self) -> bool {
        !self.merchant_id.trim().is_empty() && !self.api_key.expose_secret().trim().is_empty()
    }
}

/// Cryptomus payment gateway adapter.
pub struct CryptomusPaymentAdapter {
    config: CryptomusConfig,
    http_client: reqwest::Client,
}

impl CryptomusPaymentAdapter {
    /// Create a new adapter with a default HTTP client.
    pub fn new(config: CryptomusConfig) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    /// Create a new adapter with an explicitly constructed HTTP client.
    pub fn with_client(config: CryptomusConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Builds the request body for a payment.
    pub fn build_body(&self, request: &CreatePaymentRequest) -> CreatePaymentBody {
        let base = self.config.public_base_url.trim_end_matches('/');
        CreatePaymentBody {
            amount: request.amount.normalize().to_string(),
            currency: request.currency.clone(),
            order_id: request.order_id.as_str().to_string(),
            url_callback: format!("{}/webhook/cryptomus", base),
            url_return: format!("{}/dashboard", base),
            is_payment_multiple: false,
            lifetime: self.config.lifetime_secs,
        }
    }
}

#[async_trait]
impl PaymentGateway for CryptomusPaymentAdapter {
    async fn create_payment(
        &self,
        request: CreatePaymentRequest,
    ) -> Result<HostedPayment, PaymentError> {
        if !self.config.is_configured() {
            return Err(PaymentError::not_configured(
                "Cryptomus merchant id or API key is not configured",
            ));
        }

        let body = serde_json::to_vec(&self.build_body(&request)).map_err(|e| {
            PaymentError::new(
                crate::ports::PaymentErrorCode::InvalidRequest,
                format!("Failed to encode payment request: {}", e),
            )
        })?;
        let sign = request_signature(&body, self.config.api_key.expose_secret());
        let url = format!(
            "{}/v1/payment",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .http_client
            .post(&url)
            .header("merchant", &self.config.merchant_id)
            .header("sign", sign)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(order_id = %request.order_id, error = %e, "Cryptomus request failed");
                PaymentError::network(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;
        let details: serde_json::Value =
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(PaymentError::authentication("Cryptomus rejected merchant credentials")
                .with_provider_code(status.as_u16().to_string())
                .with_details(details));
        }

        let reply: CryptomusResponse = match serde_json::from_value(details.clone()) {
            Ok(reply) => reply,
            Err(e) if status.is_success() => {
                return Err(PaymentError::invalid_response(format!(
                    "Failed to parse Cryptomus response: {}",
                    e
                ))
                .with_details(details))
            }
            Err(_) => {
                return Err(PaymentError::rejected(format!(
                    "Cryptomus API error (HTTP {})",
                    status.as_u16()
                ))
                .with_provider_code(status.as_u16().to_string())
                .with_details(details))
            }
        };

        match reply.result {
            Some(payment) if status.is_success() && reply.state == 0 => Ok(HostedPayment {
                payment_url: payment.url,
                payment_id: payment.uuid,
            }),
            _ => {
                tracing::warn!(
                    order_id = %request.order_id,
                    http_status = status.as_u16(),
                    state = reply.state,
                    message = ?reply.message,
                    "Cryptomus declined payment creation"
                );
                Err(PaymentError::rejected(
                    reply
                        .message
                        .unwrap_or_else(|| "Payment creation failed".to_string()),
                )
                .with_provider_code(reply.state.to_string())
                .with_details(details))
            }
        }
    }
}
