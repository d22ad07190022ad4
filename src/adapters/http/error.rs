//! Error envelope shared by every endpoint.
//!
//! Body shape: `{ "error": <message>, "error_code": <CODE>, "details"?: <json> }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::payment::WebhookError;
use crate::domain::savings::SavingsError;
use crate::ports::{PaymentError, PaymentErrorCode};

/// Error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Additional details (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            error_code: error_code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts layer errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// 400 with the `VALIDATION_FAILED` code.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message),
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        Self::new(
            err.status_code(),
            ErrorResponse::new(err.code().to_string(), err.to_string()),
        )
    }
}

impl From<SavingsError> for ApiError {
    fn from(err: SavingsError) -> Self {
        let status = match &err {
            SavingsError::ValidationFailed { .. } | SavingsError::InvalidTier(_) => {
                StatusCode::BAD_REQUEST
            }
            SavingsError::PlanNotFound(_) => StatusCode::NOT_FOUND,
            SavingsError::InvalidState { .. } => StatusCode::CONFLICT,
            SavingsError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, ErrorResponse::new(err.code().to_string(), err.message()))
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        let status = match err.code {
            PaymentErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let mut body = ErrorResponse::new(
            ErrorCode::ExternalServiceError.to_string(),
            format!("Payment gateway error: {}", err.message),
        );
        body.details = Some(serde_json::json!({
            "code": err.code,
            "provider_code": err.provider_code,
            "provider_response": err.details,
        }));
        Self::new(status, body)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), err.to_string())
                .with_details(serde_json::json!({ "field": err.field() })),
        )
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
