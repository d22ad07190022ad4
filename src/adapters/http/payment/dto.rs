//! Request and response DTOs for payment endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to open a hosted payment page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePaymentResponse {
    pub success: bool,
    pub payment_url: String,
    pub payment_id: String,
}

/// Acknowledgement returned to the gateway.
///
/// `{"success": true}` when the delivery was processed (including no-op
/// redeliveries), `{"received": true}` when its status was ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookAck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received: Option<bool>,
}

impl WebhookAck {
    pub fn processed() -> Self {
        Self {
            success: Some(true),
            received: None,
        }
    }

    pub fn received() -> Self {
        Self {
            success: None,
            received: Some(true),
        }
    }
}
