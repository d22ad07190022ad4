//! HTTP handlers for savings endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, Query, State};

use crate::application::{CreateSubscriptionCommand, GetPaymentHistoryQuery, GetUserPlansQuery};
use crate::domain::savings::catalog;

use super::super::{ApiError, AppState};
use super::dto::{
    CatalogResponse, CreateSubscriptionRequest, CreateSubscriptionResponse,
    PaymentHistoryResponse, PlanView, PlansQueryParams, UserPlansResponse,
};

/// POST /create-subscription - Register a user, a pending plan and its first contribution
pub async fn create_subscription(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubscriptionRequest>, JsonRejection>,
) -> Result<Json<CreateSubscriptionResponse>, ApiError> {
    let Json(request) = payload?;
    let (Some(user_email), Some(plan_type), Some(amount), Some(monthly_yield)) = (
        request.user_email,
        request.plan_type,
        request.amount,
        request.monthly_yield,
    ) else {
        return Err(ApiError::bad_request(
            "user_email, plan_type, amount and monthly_yield are required",
        ));
    };

    let cmd = CreateSubscriptionCommand {
        user_email,
        user_name: request.user_name,
        plan_type,
        amount,
        monthly_yield,
        months_duration: request.months_duration,
    };
    let result = state.create_subscription_handler().handle(cmd).await?;

    Ok(Json(CreateSubscriptionResponse {
        success: true,
        user_id: result.user_id,
        plan_id: result.plan_id,
        transaction_id: result.transaction_id,
        order_id: result.order_id,
    }))
}

/// GET /users/:email/plans - Plans with dashboard values
pub async fn get_user_plans(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(params): Query<PlansQueryParams>,
) -> Result<Json<UserPlansResponse>, ApiError> {
    let summaries = state
        .user_plans_handler()
        .handle(GetUserPlansQuery {
            email: email.clone(),
            as_of: params.as_of,
        })
        .await?;

    Ok(Json(UserPlansResponse {
        email,
        plans: summaries.into_iter().map(PlanView::from).collect(),
    }))
}

/// GET /users/:email/transactions - Payment history, newest first
pub async fn get_payment_history(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<PaymentHistoryResponse>, ApiError> {
    let transactions = state
        .payment_history_handler()
        .handle(GetPaymentHistoryQuery {
            email: email.clone(),
        })
        .await?;

    Ok(Json(PaymentHistoryResponse {
        email,
        transactions,
    }))
}

/// GET /plans/catalog - Published tiers
pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse { plans: catalog() })
}
