//! HTTP handlers for payment endpoints.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::HeaderMap;

use crate::application::{CreatePaymentCommand, ReconcilePaymentCommand};

use super::super::{ApiError, AppState};
use super::dto::{CreatePaymentRequest, CreatePaymentResponse, WebhookAck};

/// Header carrying the gateway's webhook signature.
pub const SIGNATURE_HEADER: &str = "sign";

/// POST /webhook/provider - Reconcile a gateway delivery
///
/// The body is handed over as raw bytes; the signature covers exactly those bytes.
pub async fn handle_provider_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = ReconcilePaymentCommand {
        raw_body: body.to_vec(),
        signature,
    };
    let result = state.reconcile_handler().handle(cmd).await?;

    if result.is_ignored() {
        Ok(Json(WebhookAck::received()))
    } else {
        Ok(Json(WebhookAck::processed()))
    }
}

/// POST /create-payment - Open a hosted payment page
pub async fn create_payment(
    State(state): State<AppState>,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    let Json(request) = payload?;
    let (Some(amount), Some(order_id)) = (request.amount, request.order_id) else {
        return Err(ApiError::bad_request("amount and order_id are required"));
    };

    let cmd = CreatePaymentCommand::new(amount, request.currency, order_id)?;
    let payment = state.create_payment_handler().handle(cmd).await?;

    Ok(Json(CreatePaymentResponse {
        success: true,
        payment_url: payment.payment_url,
        payment_id: payment.payment_id,
    }))
}
