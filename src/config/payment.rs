//! Payment configuration (Cryptomus)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Payment gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Merchant identifier sent in the `merchant` header
    #[serde(default)]
    pub merchant_id: String,

    /// API key used to sign outbound requests
    #[serde(default = "empty_secret")]
    pub api_key: SecretString,

    /// Secret used to verify webhook signatures
    #[serde(default = "empty_secret")]
    pub webhook_secret: SecretString,

    /// Public URL of this service, for callback and return links
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Hosted payment page lifetime in seconds
    #[serde(default = "default_payment_lifetime")]
    pub payment_lifetime_secs: u32,
}

impl PaymentConfig {
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    pub fn has_merchant_id(&self) -> bool {
        !self.merchant_id.trim().is_empty()
    }

    pub fn has_webhook_secret(&self) -> bool {
        !self.webhook_secret.expose_secret().trim().is_empty()
    }

    /// Names of secrets that are not set.
    pub fn missing_secrets(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.has_merchant_id() {
            missing.push("PAYMENT__MERCHANT_ID");
        }
        if !self.has_api_key() {
            missing.push("PAYMENT__API_KEY");
        }
        if !self.has_webhook_secret() {
            missing.push("PAYMENT__WEBHOOK_SECRET");
        }
        missing
    }

    /// Validate payment configuration
    ///
    /// Missing secrets are only an error in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if *environment == Environment::Production {
            if let Some(&first) = self.missing_secrets().first() {
                return Err(ValidationError::MissingRequired(first));
            }
        }
        if !is_http_url(&self.api_base_url) {
            return Err(ValidationError::InvalidUrl("PAYMENT__API_BASE_URL"));
        }
        if !is_http_url(&self.public_base_url) {
            return Err(ValidationError::InvalidUrl("PAYMENT__PUBLIC_BASE_URL"));
        }
        if !(300..=43_200).contains(&self.payment_lifetime_secs) {
            return Err(ValidationError::InvalidPaymentLifetime);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            merchant_id: String::new(),
            api_key: empty_secret(),
            webhook_secret: empty_secret(),
            public_base_url: default_public_base_url(),
            payment_lifetime_secs: default_payment_lifetime(),
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_api_base_url() -> String {
    "https://api.cryptomus.com".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_payment_lifetime() -> u32 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> PaymentConfig {
        PaymentConfig {
            merchant_id: "merchant-uuid".to_string(),
            api_key: SecretString::new("api-key".to_string()),
            webhook_secret: SecretString::new("whsec".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PaymentConfig::default();
        assert_eq!(config.api_base_url, "https://api.cryptomus.com");
        assert_eq!(config.public_base_url, "http://localhost:3000");
        assert_eq!(config.payment_lifetime_secs, 3600);
        assert_eq!(config.missing_secrets().len(), 3);
    }

    #[test]
    fn test_missing_secrets_are_fatal_in_production() {
        let config = PaymentConfig::default();
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::MissingRequired("PAYMENT__MERCHANT_ID"))
        );
    }

    #[test]
    fn test_missing_secrets_are_tolerated_in_development() {
        let config = PaymentConfig::default();
        assert!(config.validate(&Environment::Development).is_ok());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", configured());
        assert!(!rendered.contains("api-key"));
        assert!(!rendered.contains("whsec"));
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = PaymentConfig {
            public_base_url: "localhost:3000".to_string(),
            ..configured()
        };
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::InvalidUrl("PAYMENT__PUBLIC_BASE_URL"))
        );
    }

    #[test]
    fn test_validation_lifetime_range() {
        let config = PaymentConfig {
            payment_lifetime_secs: 60,
            ..configured()
        };
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::InvalidPaymentLifetime)
        );
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(configured().validate(&Environment::Production).is_ok());
    }
}
