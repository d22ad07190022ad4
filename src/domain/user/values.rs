//! User value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

const MAX_EMAIL_LEN: usize = 254;
const MAX_WALLET_LEN: usize = 256;

/// Normalized email address (trimmed, lower-cased).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parses and normalizes an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let email = raw.as_ref().trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("user_email"));
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(ValidationError::invalid_format(
                "user_email",
                format!("must be at most {} characters", MAX_EMAIL_LEN),
            ));
        }
        match email.split_once('@') {
            Some((local, domain))
                if !local.is_empty()
                    && !domain.is_empty()
                    && !domain.contains('@')
                    && !email.chars().any(char::is_whitespace) => {}
            _ => {
                return Err(ValidationError::invalid_format(
                    "user_email",
                    "must look like name@domain",
                ))
            }
        }
        Ok(Self(email))
    }

    /// Returns the part before `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payer wallet address reported by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let address = raw.as_ref().trim();
        if address.is_empty() {
            return Err(ValidationError::empty_field("payer_address"));
        }
        if address.len() > MAX_WALLET_LEN {
            return Err(ValidationError::invalid_format(
                "payer_address",
                format!("must be at most {} characters", MAX_WALLET_LEN),
            ));
        }
        Ok(Self(address.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        let email = Email::new("  Ana.Silva@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana.silva@example.com");
        assert_eq!(email.local_part(), "ana.silva");
    }

    #[test]
    fn email_rejects_blank() {
        assert_eq!(
            Email::new("   ").unwrap_err(),
            ValidationError::empty_field("user_email")
        );
    }

    #[test]
    fn email_rejects_malformed() {
        for bad in ["no-at-sign", "@example.com", "ana@", "a@b@c", "a b@c.com"] {
            assert!(Email::new(bad).is_err(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn wallet_is_trimmed() {
        assert_eq!(WalletAddress::new(" TXyz ").unwrap().as_str(), "TXyz");
    }

    #[test]
    fn wallet_rejects_blank_and_oversized() {
        assert!(WalletAddress::new("").is_err());
        assert!(WalletAddress::new("x".repeat(MAX_WALLET_LEN + 1)).is_err());
    }
}
