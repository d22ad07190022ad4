//! Savings-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | ValidationFailed | 400 |
//! | InvalidTier | 400 |
//! | PlanNotFound | 404 |
//! | InvalidState | 409 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, PlanId, ValidationError};

/// Errors raised by subscription registration and dashboard reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavingsError {
    /// A request field is missing or invalid.
    ValidationFailed { field: String, message: String },

    /// Unknown plan tier.
    InvalidTier(String),

    /// Plan does not exist.
    PlanNotFound(PlanId),

    /// Plan status does not allow the operation.
    InvalidState { current: String, attempted: String },

    /// Storage failure.
    Infrastructure(String),
}

impl SavingsError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SavingsError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invalid_tier(tier: impl Into<String>) -> Self {
        SavingsError::InvalidTier(tier.into())
    }

    pub fn plan_not_found(id: PlanId) -> Self {
        SavingsError::PlanNotFound(id)
    }

    pub fn invalid_state(current: impl Into<String>, attempted: impl Into<String>) -> Self {
        SavingsError::InvalidState {
            current: current.into(),
            attempted: attempted.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SavingsError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SavingsError::ValidationFailed { .. } | SavingsError::InvalidTier(_) => {
                ErrorCode::ValidationFailed
            }
            SavingsError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            SavingsError::InvalidState { .. } => ErrorCode::InvalidStateTransition,
            SavingsError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        match self {
            SavingsError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SavingsError::InvalidTier(tier) => format!("Invalid plan type: {}", tier),
            SavingsError::PlanNotFound(id) => format!("Savings plan not found: {}", id),
            SavingsError::InvalidState { current, attempted } => {
                format!("Cannot {} plan in {} state", attempted, current)
            }
            SavingsError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }

    /// Returns true if the caller may retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SavingsError::Infrastructure(_))
    }
}

impl std::fmt::Display for SavingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SavingsError {}

impl From<ValidationError> for SavingsError {
    fn from(err: ValidationError) -> Self {
        SavingsError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SavingsError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => SavingsError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::InvalidStateTransition => SavingsError::InvalidState {
                current: "unknown".to_string(),
                attempted: err.message,
            },
            _ => SavingsError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SavingsError> for DomainError {
    fn from(err: SavingsError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_validation_code() {
        let err = SavingsError::validation("amount", "must be positive");
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.message(), "Validation failed for 'amount': must be positive");
        assert!(!err.is_retryable());
    }

    #[test]
    fn infrastructure_is_retryable() {
        let err = SavingsError::infrastructure("pool timed out");
        assert!(err.is_retryable());
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn from_validation_error_keeps_field() {
        let err: SavingsError = ValidationError::empty_field("user_email").into();
        match err {
            SavingsError::ValidationFailed { field, .. } => assert_eq!(field, "user_email"),
            other => panic!("Expected ValidationFailed, got {:?}", other),
        }
    }

    #[test]
    fn from_domain_database_error_is_infrastructure() {
        let err: SavingsError = DomainError::database("connection reset").into();
        assert!(matches!(err, SavingsError::Infrastructure(_)));
    }

    #[test]
    fn from_domain_validation_error_reads_field_detail() {
        let err: SavingsError = DomainError::validation("months_duration", "too long").into();
        assert_eq!(err, SavingsError::validation("months_duration", "too long"));
    }
}
