//! Webhook error types.
//!
//! Each error maps to an HTTP status that drives the provider's redelivery:
//! 4xx are terminal, 5xx are redelivered.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors that occur during webhook ingestion and reconciliation.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The `sign` header was absent or empty.
    #[error("Missing signature")]
    MissingSignature,

    /// Signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body was not valid JSON of the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Required field missing from the payload.
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Field present but unusable.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// Stored state rejected the change.
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    /// Storage failure.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the provider should redeliver.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::Database(_) | WebhookError::InvalidTransition(_)
        )
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }

            WebhookError::ParseError(_)
            | WebhookError::MissingField(_)
            | WebhookError::InvalidField { .. } => StatusCode::BAD_REQUEST,

            WebhookError::InvalidTransition(_) | WebhookError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code used in response envelopes.
    pub fn code(&self) -> ErrorCode {
        match self {
            WebhookError::MissingSignature | WebhookError::InvalidSignature => {
                ErrorCode::Unauthorized
            }
            WebhookError::ParseError(_) => ErrorCode::InvalidFormat,
            WebhookError::MissingField(_) => ErrorCode::EmptyField,
            WebhookError::InvalidField { .. } => ErrorCode::ValidationFailed,
            WebhookError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            WebhookError::Database(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for WebhookError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => WebhookError::InvalidTransition(err.message),
            _ => WebhookError::Database(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn invalid_signature_displays_correctly() {
        assert_eq!(WebhookError::InvalidSignature.to_string(), "Invalid signature");
    }

    #[test]
    fn missing_field_displays_field_name() {
        let err = WebhookError::MissingField("order_id");
        assert_eq!(err.to_string(), "Missing field: order_id");
    }

    #[test]
    fn invalid_field_displays_reason() {
        let err = WebhookError::InvalidField {
            field: "amount",
            reason: "must be positive".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid field 'amount': must be positive");
    }

    // ══════════════════════════════════════════════════════════════
    // Retryability and status codes
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn database_error_is_retryable_5xx() {
        let err = WebhookError::Database("connection refused".to_string());
        assert!(err.is_retryable());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn signature_errors_are_terminal_401() {
        for err in [WebhookError::InvalidSignature, WebhookError::MissingSignature] {
            assert!(!err.is_retryable());
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(err.code(), ErrorCode::Unauthorized);
        }
    }

    #[test]
    fn payload_errors_are_terminal_400() {
        let errs = [
            WebhookError::ParseError("bad json".to_string()),
            WebhookError::MissingField("status"),
            WebhookError::InvalidField {
                field: "amount",
                reason: "not a number".to_string(),
            },
        ];
        for err in errs {
            assert!(!err.is_retryable());
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn from_domain_error_maps_by_code() {
        let err: WebhookError = DomainError::database("timeout").into();
        assert!(matches!(err, WebhookError::Database(_)));

        let err: WebhookError =
            DomainError::new(ErrorCode::InvalidStateTransition, "already active").into();
        assert!(matches!(err, WebhookError::InvalidTransition(_)));
    }
}
