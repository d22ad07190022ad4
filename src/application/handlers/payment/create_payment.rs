//! CreatePaymentHandler - Command handler for opening a hosted payment page.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::foundation::{OrderId, ValidationError};
use crate::domain::payment::DEFAULT_CURRENCY;
use crate::ports::{CreatePaymentRequest, HostedPayment, PaymentError, PaymentGateway};

/// Command to create a hosted payment session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePaymentCommand {
    pub amount: Decimal,
    pub currency: String,
    pub order_id: OrderId,
}

impl CreatePaymentCommand {
    /// Validates raw request values.
    ///
    /// Currency defaults to USD when absent or blank.
    pub fn new(
        amount: Decimal,
        currency: Option<String>,
        order_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::invalid_format("amount", "must be positive"));
        }
        let currency = currency
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Ok(Self {
            amount,
            currency,
            order_id: OrderId::new(order_id)?,
        })
    }
}

/// Handler that forwards payment creation to the gateway.
pub struct CreatePaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreatePaymentHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: CreatePaymentCommand) -> Result<HostedPayment, PaymentError> {
        let order_id = cmd.order_id.clone();
        let result = self
            .gateway
            .create_payment(CreatePaymentRequest {
                amount: cmd.amount,
                currency: cmd.currency,
                order_id: cmd.order_id,
            })
            .await;

        match &result {
            Ok(payment) => tracing::info!(
                order_id = %order_id,
                payment_id = %payment.payment_id,
                "Hosted payment created"
            ),
            Err(e) => tracing::error!(
                order_id = %order_id,
                code = %e.code,
                error = %e.message,
                "Payment creation failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockGateway {
        requests: Mutex<Vec<CreatePaymentRequest>>,
        fail: bool,
    }

    impl MockGateway {
        fn new(fail: bool) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_payment(
            &self,
            request: CreatePaymentRequest,
        ) -> Result<HostedPayment, PaymentError> {
            self.requests.lock().unwrap().push(request);
            if self.fail {
                return Err(PaymentError::rejected("Payment creation failed")
                    .with_details(serde_json::json!({"state": 1})));
            }
            Ok(HostedPayment {
                payment_url: "https://pay.example/abc".to_string(),
                payment_id: "abc".to_string(),
            })
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn command_defaults_currency_to_usd() {
        let cmd = CreatePaymentCommand::new(Decimal::from(100), None, "hd-1").unwrap();
        assert_eq!(cmd.currency, "USD");

        let cmd = CreatePaymentCommand::new(Decimal::from(100), Some("usdt".into()), "hd-1").unwrap();
        assert_eq!(cmd.currency, "USDT");
    }

    #[test]
    fn command_rejects_bad_values() {
        let err = CreatePaymentCommand::new(Decimal::ZERO, None, "hd-1").unwrap_err();
        assert_eq!(err.field(), "amount");

        let err = CreatePaymentCommand::new(Decimal::ONE, None, "  ").unwrap_err();
        assert_eq!(err.field(), "order_id");
    }

    #[tokio::test]
    async fn forwards_request_to_gateway() {
        let gateway = Arc::new(MockGateway::new(false));
        let handler = CreatePaymentHandler::new(gateway.clone());
        let cmd = CreatePaymentCommand::new(Decimal::from(300), None, "hd-42-1000").unwrap();

        let payment = handler.handle(cmd).await.unwrap();

        assert_eq!(payment.payment_id, "abc");
        let requests = gateway.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].order_id.as_str(), "hd-42-1000");
        assert_eq!(requests[0].amount, Decimal::from(300));
    }

    #[tokio::test]
    async fn surfaces_gateway_failure() {
        let handler = CreatePaymentHandler::new(Arc::new(MockGateway::new(true)));
        let cmd = CreatePaymentCommand::new(Decimal::from(300), None, "hd-42-1000").unwrap();

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(!err.retryable);
        assert_eq!(err.details, Some(serde_json::json!({"state": 1})));
    }
}
