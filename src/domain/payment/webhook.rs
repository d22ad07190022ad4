//! Webhook payload parsing and validation.
//!
//! Deliveries are parsed once at the boundary into a [`WebhookPayload`]; the
//! reconciler never sees raw JSON.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::domain::foundation::OrderId;
use crate::domain::ledger::PaymentDetails;
use crate::domain::user::WalletAddress;

use super::errors::WebhookError;

/// Provider statuses that mean the payment settled.
pub const SETTLED_STATUSES: [&str; 2] = ["paid", "confirm_check"];

/// Currency assumed when a delivery omits it.
pub const DEFAULT_CURRENCY: &str = "USD";

#[derive(Debug, Deserialize)]
struct RawWebhookBody {
    status: Option<String>,
    order_id: Option<String>,
    merchant_order_id: Option<String>,
    amount: Option<serde_json::Value>,
    currency: Option<String>,
    payer_address: Option<String>,
    uuid: Option<String>,
}

/// A settled payment reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledPayment {
    pub status: String,
    pub order_id: OrderId,
    pub amount: Decimal,
    pub currency: String,
    pub payer_address: Option<WalletAddress>,
    pub provider_payment_id: Option<String>,
}

impl SettledPayment {
    /// Details persisted alongside the ledger entry.
    pub fn details(&self) -> PaymentDetails {
        PaymentDetails {
            currency: self.currency.clone(),
            payer_address: self.payer_address.as_ref().map(|w| w.as_str().to_string()),
            provider_payment_id: self.provider_payment_id.clone(),
        }
    }
}

/// A validated webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookPayload {
    /// Status is one of [`SETTLED_STATUSES`].
    Settled(SettledPayment),
    /// Any other status. Acknowledged without state change.
    Unsettled {
        status: String,
        order_id: Option<String>,
    },
}

impl WebhookPayload {
    /// Parses a raw delivery body.
    ///
    /// # Errors
    ///
    /// - `ParseError` - body is not a JSON object
    /// - `MissingField("status")` - no status
    /// - `MissingField("order_id")` - settled without `order_id` or `merchant_order_id`
    /// - `MissingField("amount")` / `InvalidField` - settled without a positive amount
    pub fn parse(raw_body: &[u8]) -> Result<Self, WebhookError> {
        let raw: RawWebhookBody =
            serde_json::from_slice(raw_body).map_err(|e| WebhookError::ParseError(e.to_string()))?;

        let status = non_blank(raw.status).ok_or(WebhookError::MissingField("status"))?;
        let order_id = non_blank(raw.order_id).or_else(|| non_blank(raw.merchant_order_id));

        if !SETTLED_STATUSES.contains(&status.as_str()) {
            return Ok(WebhookPayload::Unsettled { status, order_id });
        }

        let order_id = order_id.ok_or(WebhookError::MissingField("order_id"))?;
        let order_id = OrderId::new(order_id).map_err(|e| WebhookError::InvalidField {
            field: "order_id",
            reason: e.to_string(),
        })?;
        let amount = parse_amount(raw.amount)?;
        let currency = non_blank(raw.currency)
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let payer_address = raw
            .payer_address
            .and_then(|addr| WalletAddress::new(addr).ok());

        Ok(WebhookPayload::Settled(SettledPayment {
            status,
            order_id,
            amount,
            currency,
            payer_address,
            provider_payment_id: non_blank(raw.uuid),
        }))
    }

    /// Returns the provider status string.
    pub fn status(&self) -> &str {
        match self {
            WebhookPayload::Settled(p) => &p.status,
            WebhookPayload::Unsettled { status, .. } => status,
        }
    }

    /// Returns the order id, if the delivery carried one.
    pub fn order_id(&self) -> Option<&str> {
        match self {
            WebhookPayload::Settled(p) => Some(p.order_id.as_str()),
            WebhookPayload::Unsettled { order_id, .. } => order_id.as_deref(),
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, WebhookPayload::Settled(_))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Accepts the amount as a JSON string or number.
fn parse_amount(value: Option<serde_json::Value>) -> Result<Decimal, WebhookError> {
    let text = match value {
        None | Some(serde_json::Value::Null) => return Err(WebhookError::MissingField("amount")),
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(other) => {
            return Err(WebhookError::InvalidField {
                field: "amount",
                reason: format!("expected string or number, got {}", other),
            })
        }
    };
    let amount = Decimal::from_str(&text).map_err(|_| WebhookError::InvalidField {
        field: "amount",
        reason: format!("'{}' is not a decimal number", text),
    })?;
    if amount <= Decimal::ZERO {
        return Err(WebhookError::InvalidField {
            field: "amount",
            reason: "must be positive".to_string(),
        });
    }
    Ok(amount)
}
