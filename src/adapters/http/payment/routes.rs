//! Axum router configuration for payment endpoints.

use axum::routing::post;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_payment, handle_provider_webhook};

/// Create the payment router.
///
/// # Routes
/// - `POST /create-payment` - Open a hosted payment page
///
/// ## Webhook Endpoints (no auth, signature verified)
/// - `POST /webhook/provider` - Gateway deliveries
/// - `POST /webhook/cryptomus` - Alias of the above
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-payment", post(create_payment))
        .route("/webhook/provider", post(handle_provider_webhook))
        .route("/webhook/cryptomus", post(handle_provider_webhook))
}
