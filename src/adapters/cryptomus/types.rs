//! Cryptomus API wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST /v1/payment`.
///
/// Field order is the serialization order, which is what gets signed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatePaymentBody {
    pub amount: String,
    pub currency: String,
    pub order_id: String,
    pub url_callback: String,
    pub url_return: String,
    pub is_payment_multiple: bool,
    pub lifetime: u32,
}

/// Envelope of every Cryptomus API reply. `state == 0` means success.
#[derive(Debug, Clone, Deserialize)]
pub struct CryptomusResponse {
    pub state: i64,
    #[serde(default)]
    pub result: Option<CryptomusPayment>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Payment object inside a successful reply.
#[derive(Debug, Clone, Deserialize)]
pub struct CryptomusPayment {
    pub uuid: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_serializes_in_declared_order() {
        let body = CreatePaymentBody {
            amount: "300".to_string(),
            currency: "USD".to_string(),
            order_id: "hd-1".to_string(),
            url_callback: "https://app.example/webhook/cryptomus".to_string(),
            url_return: "https://app.example/dashboard".to_string(),
            is_payment_multiple: false,
            lifetime: 3600,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"amount":"300","currency":"USD","order_id":"hd-1","url_callback":"https://app.example/webhook/cryptomus","url_return":"https://app.example/dashboard","is_payment_multiple":false,"lifetime":3600}"#
        );
    }

    #[test]
    fn response_tolerates_missing_result() {
        let reply: CryptomusResponse =
            serde_json::from_str(r#"{"state":1,"message":"Invalid sign"}"#).unwrap();
        assert_eq!(reply.state, 1);
        assert!(reply.result.is_none());
        assert_eq!(reply.message.as_deref(), Some("Invalid sign"));
    }

    #[test]
    fn response_reads_payment_and_ignores_extra_fields() {
        let reply: CryptomusResponse = serde_json::from_str(
            r#"{"state":0,"result":{"uuid":"u-1","url":"https://pay.cryptomus.com/pay/u-1","order_id":"hd-1"}}"#,
        )
        .unwrap();
        let payment = reply.result.unwrap();
        assert_eq!(payment.uuid, "u-1");
        assert_eq!(payment.url, "https://pay.cryptomus.com/pay/u-1");
    }
}
