//! Axum router configuration for savings endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::super::AppState;
use super::handlers::{create_subscription, get_catalog, get_payment_history, get_user_plans};

/// Create the savings router.
///
/// # Routes
/// - `POST /create-subscription` - Register a pending plan
/// - `GET /users/:email/plans` - Plans with dashboard values (`?as_of=YYYY-MM-DD`)
/// - `GET /users/:email/transactions` - Payment history
/// - `GET /plans/catalog` - Published tiers
pub fn savings_routes() -> Router<AppState> {
    Router::new()
        .route("/create-subscription", post(create_subscription))
        .route("/users/:email/plans", get(get_user_plans))
        .route("/users/:email/transactions", get(get_payment_history))
        .route("/plans/catalog", get(get_catalog))
}
