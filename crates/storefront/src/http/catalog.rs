//! Areas, products and schemes.

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath, AuthToken};
use super::state::AppState;
use crate::model::{Area, AreaCreate, AreaId, Product, ProductCreate, ProductId, Scheme, SchemeCreate, SchemeDetail, SchemeId, SchemeWithProduct};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

pub async fn list_areas(State(state): State<AppState>) -> Result<Json<Vec<Area>>, ApiError> {
    Ok(Json(state.resolver.list_areas().await?))
}

pub async fn create_area(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(params): ApiJson<AreaCreate>,
) -> Result<(StatusCode, Json<Area>), ApiError> {
    let area = state.resolver.create_area(token.as_deref(), params).await?;
    Ok((StatusCode::CREATED, Json(area)))
}

pub async fn delete_area(
    State(state): State<AppState>,
    token: AuthToken,
    ApiPath(id): ApiPath<AreaId>,
) -> Result<Json<Value>, ApiError> {
    state.resolver.delete_area(token.as_deref(), id).await?;
    Ok(Json(json!({ "message": "Area removed" })))
}

/// `token` is an area name or an area id.
pub async fn list_schemes_for_area(
    State(state): State<AppState>,
    ApiPath(token): ApiPath<String>,
) -> Result<Json<Vec<SchemeWithProduct>>, ApiError> {
    Ok(Json(state.resolver.list_schemes_for_area(&token).await?))
}

pub async fn list_all_schemes(State(state): State<AppState>, token: AuthToken) -> Result<Json<Vec<SchemeDetail>>, ApiError> {
    Ok(Json(state.resolver.list_all_schemes(token.as_deref()).await?))
}

pub async fn create_scheme(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(params): ApiJson<SchemeCreate>,
) -> Result<(StatusCode, Json<Scheme>), ApiError> {
    let scheme = state.resolver.create_scheme(token.as_deref(), params).await?;
    Ok((StatusCode::CREATED, Json(scheme)))
}

pub async fn delete_scheme(
    State(state): State<AppState>,
    token: AuthToken,
    ApiPath(id): ApiPath<SchemeId>,
) -> Result<Json<Value>, ApiError> {
    state.resolver.delete_scheme(token.as_deref(), id).await?;
    Ok(Json(json!({ "message": "Scheme removed" })))
}

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.resolver.list_products().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(params): ApiJson<ProductCreate>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let product = state.resolver.create_product(token.as_deref(), params).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn delete_product(
    State(state): State<AppState>,
    token: AuthToken,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Value>, ApiError> {
    state.resolver.delete_product(token.as_deref(), id).await?;
    Ok(Json(json!({ "message": "Product removed" })))
}
