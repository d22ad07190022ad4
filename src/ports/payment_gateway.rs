//! Payment gateway port for hosted payment sessions.
//!
//! One provider, one operation: create a hosted payment page for an order.
//! Settlement arrives later through the webhook.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, OrderId};

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted payment session.
    ///
    /// No automatic retry: the caller decides whether to try again.
    async fn create_payment(&self, request: CreatePaymentRequest)
        -> Result<HostedPayment, PaymentError>;
}

/// Request to open a hosted payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub amount: Decimal,
    pub currency: String,
    pub order_id: OrderId,
}

/// Hosted payment page returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedPayment {
    pub payment_url: String,
    pub payment_id: String,
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Provider response body or error detail, passed through to callers.
    pub details: Option<serde_json::Value>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            details: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Attach provider detail.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }

    /// Create a provider rejection error.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::ProviderRejected, message)
    }

    /// Create a not configured error.
    pub fn not_configured(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NotConfigured, message)
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::InvalidResponse, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

impl From<PaymentError> for DomainError {
    fn from(err: PaymentError) -> Self {
        let mut domain = DomainError::new(ErrorCode::ExternalServiceError, err.message);
        if let Some(code) = err.provider_code {
            domain = domain.with_detail("provider_code", code);
        }
        domain
    }
}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Transport failure reaching the provider.
    NetworkError,
    /// Merchant credentials rejected.
    AuthenticationError,
    /// Provider answered with a non-success state.
    ProviderRejected,
    /// Provider reply could not be understood.
    InvalidResponse,
    /// Request could not be built.
    InvalidRequest,
    /// Merchant credentials not configured.
    NotConfigured,
}

impl PaymentErrorCode {
    /// Returns true if a later attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PaymentErrorCode::NetworkError)
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::ProviderRejected => "provider_rejected",
            PaymentErrorCode::InvalidResponse => "invalid_response",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::NotConfigured => "not_configured",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(PaymentError::network("timeout").retryable);
        assert!(!PaymentError::rejected("state 1").retryable);
        assert!(!PaymentError::authentication("bad sign").retryable);
    }

    #[test]
    fn display_includes_code() {
        let err = PaymentError::rejected("Payment creation failed");
        assert_eq!(err.to_string(), "provider_rejected: Payment creation failed");
    }

    #[test]
    fn converts_to_external_service_domain_error() {
        let err: DomainError = PaymentError::invalid_response("missing result")
            .with_provider_code("1")
            .into();
        assert_eq!(err.code, ErrorCode::ExternalServiceError);
        assert_eq!(err.details.get("provider_code"), Some(&"1".to_string()));
    }
}
