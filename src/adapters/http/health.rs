//! `GET /health` - liveness plus a report of which secrets are configured.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::domain::foundation::Timestamp;

use super::AppState;

/// Presence of each required setting. Secret values are never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvCheck {
    pub database_url: bool,
    pub cryptomus_api_key: bool,
    pub cryptomus_merchant_id: bool,
    pub cryptomus_webhook_secret: bool,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: Timestamp,
    pub env_check: EnvCheck,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Timestamp::now(),
        env_check: state.env_check.clone(),
    })
}

impl EnvCheck {
    /// Reports which settings are present, without exposing their values.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            database_url: config.database.is_configured(),
            cryptomus_api_key: config.payment.has_api_key(),
            cryptomus_merchant_id: config.payment.has_merchant_id(),
            cryptomus_webhook_secret: config.payment.has_webhook_secret(),
            api_base_url: config.payment.public_base_url.clone(),
        }
    }
}
