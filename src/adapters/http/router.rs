//! Application router and middleware stack.

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::health::health;
use super::{payment_routes, savings_routes, AppState};

/// Middleware settings taken from server configuration.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed CORS origins. Empty or `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Create the complete application router.
///
/// # Example
///
/// ```ignore
/// let app = with_middleware(app_router(state), &HttpSettings::default());
/// axum::serve(listener, app).await?;
/// ```
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(payment_routes())
        .merge(savings_routes())
        .with_state(state)
}

/// Wraps a router in tracing, CORS and request timeout layers.
pub fn with_middleware(router: Router, settings: &HttpSettings) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&settings.cors_origins))
            .layer(TimeoutLayer::new(settings.request_timeout)),
    )
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::EnvCheck;
    use crate::adapters::memory::InMemoryStore;
    use crate::domain::payment::webhook_signature;
    use crate::ports::{CreatePaymentRequest, HostedPayment, PaymentError, PaymentGateway};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use std::sync::{Arc, Mutex};
    use tower::ServiceExt;

    const SECRET: &str = "whsec_router";

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockGateway {
        fail: bool,
        requests: Mutex<Vec<CreatePaymentRequest>>,
    }

    impl MockGateway {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                requests: Mutex::new(Vec::new()),
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
                return Err(PaymentError::rejected("Payment is already exists")
                    .with_provider_code("1")
                    .with_details(serde_json::json!({"state": 1})));
            }
            Ok(HostedPayment {
                payment_url: "https://pay.example/u-1".to_string(),
                payment_id: "u-1".to_string(),
            })
        }
    }

    fn state_with(store: &InMemoryStore, gateway: Arc<MockGateway>) -> AppState {
        AppState {
            users: Arc::new(store.users()),
            plans: Arc::new(store.plans()),
            ledger: Arc::new(store.ledger()),
            gateway,
            webhook_secret: SecretString::new(SECRET.to_string()),
            env_check: EnvCheck {
                database_url: false,
                cryptomus_api_key: true,
                cryptomus_merchant_id: true,
                cryptomus_webhook_secret: true,
                api_base_url: "http://localhost:3000".to_string(),
            },
        }
    }

    fn app(store: &InMemoryStore) -> Router {
        app_router(state_with(store, Arc::new(MockGateway::new(false))))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn signed_webhook(body: &str, secret: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook/provider")
            .header("content-type", "application/json")
            .header("sign", webhook_signature(body.as_bytes(), secret))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Health
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn health_reports_env_check() {
        let response = app(&InMemoryStore::new()).oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["env_check"]["database_url"], false);
        assert_eq!(body["env_check"]["cryptomus_webhook_secret"], true);
        assert_eq!(body["env_check"]["api_base_url"], "http://localhost:3000");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn webhook_with_valid_signature_is_processed() {
        let store = InMemoryStore::new();
        let body = r#"{"status":"paid","order_id":"hd-42-1000","amount":"300"}"#;

        let response = app(&store).oneshot(signed_webhook(body, SECRET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"success": true}));
        assert_eq!(store.transaction_count().await, 1);
    }

    #[tokio::test]
    async fn webhook_alias_route_is_served() {
        let store = InMemoryStore::new();
        let body = r#"{"status":"paid","order_id":"hd-alias","amount":"10"}"#;
        let mut request = signed_webhook(body, SECRET);
        *request.uri_mut() = "/webhook/cryptomus".parse().unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn webhook_with_wrong_secret_is_unauthorized() {
        let store = InMemoryStore::new();
        let body = r#"{"status":"paid","order_id":"hd-42-1000","amount":"300"}"#;

        let response = app(&store)
            .oneshot(signed_webhook(body, "someone-else"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(json_body(response).await["error"].is_string());
        assert_eq!(store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn webhook_without_signature_is_unauthorized() {
        let body = serde_json::json!({"status": "paid", "order_id": "hd-1", "amount": "1"});
        let response = app(&InMemoryStore::new())
            .oneshot(post_json("/webhook/provider", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn webhook_with_ignored_status_is_received() {
        let store = InMemoryStore::new();
        let body = r#"{"status":"expired","order_id":"hd-42-1000","amount":"300"}"#;

        let response = app(&store).oneshot(signed_webhook(body, SECRET)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, serde_json::json!({"received": true}));
        assert_eq!(store.transaction_count().await, 0);
    }

    #[tokio::test]
    async fn webhook_with_malformed_body_is_bad_request() {
        let response = app(&InMemoryStore::new())
            .oneshot(signed_webhook("{not json", SECRET))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Create payment
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_payment_returns_hosted_page() {
        let gateway = Arc::new(MockGateway::new(false));
        let router = app_router(state_with(&InMemoryStore::new(), gateway.clone()));

        let response = router
            .oneshot(post_json(
                "/create-payment",
                serde_json::json!({"amount": "300", "order_id": "hd-1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["payment_url"], "https://pay.example/u-1");
        assert_eq!(body["payment_id"], "u-1");
        assert_eq!(gateway.requests.lock().unwrap()[0].currency, "USD");
    }

    #[tokio::test]
    async fn create_payment_requires_amount_and_order_id() {
        let response = app(&InMemoryStore::new())
            .oneshot(post_json("/create-payment", serde_json::json!({"amount": "300"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error_code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn create_payment_rejects_non_json_body() {
        let request = Request::builder()
            .method("POST")
            .uri("/create-payment")
            .header("content-type", "application/json")
            .body(Body::from("amount=300"))
            .unwrap();

        let response = app(&InMemoryStore::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_payment_surfaces_provider_failure() {
        let router = app_router(state_with(
            &InMemoryStore::new(),
            Arc::new(MockGateway::new(true)),
        ));

        let response = router
            .oneshot(post_json(
                "/create-payment",
                serde_json::json!({"amount": 300, "order_id": "hd-1"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert!(body["error"].is_string());
        assert_eq!(body["details"]["provider_response"]["state"], 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Savings
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn create_subscription_then_list_plans() {
        let store = InMemoryStore::new();
        let request = post_json(
            "/create-subscription",
            serde_json::json!({
                "user_email": "ana@example.com",
                "plan_type": "advanced",
                "amount": "300",
                "monthly_yield": "0.04"
            }),
        );

        let response = app(&store).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let created = json_body(response).await;
        assert_eq!(created["success"], true);
        assert!(created["order_id"].as_str().unwrap().starts_with("hd-"));

        let response = app(&store)
            .oneshot(get("/users/ana@example.com/plans"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let plans = body["plans"].as_array().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0]["id"], created["plan_id"]);
        assert_eq!(plans[0]["status"], "pending");
        assert_eq!(plans[0]["months_duration"], 12);
        assert_eq!(plans[0]["performance"]["days_active"], 0);

        let response = app(&store)
            .oneshot(get("/users/ana@example.com/transactions"))
            .await
            .unwrap();
        let body = json_body(response).await;
        assert_eq!(body["transactions"][0]["order_id"], created["order_id"]);
        assert_eq!(body["transactions"][0]["status"], "pending");
    }

    #[tokio::test]
    async fn create_subscription_requires_fields() {
        let response = app(&InMemoryStore::new())
            .oneshot(post_json(
                "/create-subscription",
                serde_json::json!({"user_email": "ana@example.com", "plan_type": "basic"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_subscription_rejects_unknown_tier() {
        let response = app(&InMemoryStore::new())
            .oneshot(post_json(
                "/create-subscription",
                serde_json::json!({
                    "user_email": "ana@example.com",
                    "plan_type": "platinum",
                    "amount": 100,
                    "monthly_yield": 0.02
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_email_has_no_plans() {
        let response = app(&InMemoryStore::new())
            .oneshot(get("/users/nobody@example.com/plans"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["plans"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn malformed_email_is_bad_request() {
        let response = app(&InMemoryStore::new())
            .oneshot(get("/users/not-an-email/transactions"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_lists_three_tiers() {
        let response = app(&InMemoryStore::new())
            .oneshot(get("/plans/catalog"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let plans = body["plans"].as_array().unwrap();
        assert_eq!(plans.len(), 3);
        assert_eq!(plans[0]["tier"], "basic");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn middleware_stack_still_serves_routes() {
        let settings = HttpSettings {
            request_timeout: Duration::from_secs(5),
            cors_origins: vec!["https://app.example".to_string()],
        };
        let router = with_middleware(app(&InMemoryStore::new()), &settings);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://app.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://app.example"
        );
    }
}
