//! Order placement, listings and status changes.

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, AuthToken};
use super::state::AppState;
use crate::model::{Order, OrderId};
use crate::orders::{BulkOrderForm, BulkOrderReceipt, OrderForm};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: String,
}

/// Guests may order; a valid customer token attaches the order to the customer.
pub async fn place_order(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(form): ApiJson<OrderForm>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.workflow.place_order(token.as_deref(), form).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// 201 when every line was placed, 207 when only some were, 500 when none were.
pub async fn place_bulk_order(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(form): ApiJson<BulkOrderForm>,
) -> Result<(StatusCode, Json<BulkOrderReceipt>), ApiError> {
    let receipt = state.workflow.place_bulk_order(token.as_deref(), form).await?;
    let status = if receipt.is_complete() {
        StatusCode::CREATED
    } else if receipt.is_total_failure() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(receipt)))
}

pub async fn list_all_orders(State(state): State<AppState>, token: AuthToken) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.workflow.list_all_orders(token.as_deref()).await?))
}

pub async fn list_own_orders(State(state): State<AppState>, token: AuthToken) -> Result<Json<Vec<Order>>, ApiError> {
    Ok(Json(state.workflow.list_own_orders(token.as_deref()).await?))
}

pub async fn set_order_status(
    State(state): State<AppState>,
    token: AuthToken,
    ApiPath(id): ApiPath<OrderId>,
    ApiJson(change): ApiJson<StatusChange>,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.workflow.set_order_status(token.as_deref(), id, &change.status).await?))
}
