//! Sign-in, registration and customer self-service.

use super::error::ApiError;
use super::extract::{ApiJson, AuthToken};
use super::state::AppState;
use crate::auth::{CustomerSession, ProfileUpdate, Registration, SignedClaim};
use crate::model::{AdminId, CustomerView};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CustomerCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenBody {
    pub token: SignedClaim,
}

#[derive(Debug, Serialize)]
pub struct AdminCreated {
    pub message: &'static str,
    pub id: AdminId,
}

#[derive(Debug, Serialize)]
pub struct CountBody {
    pub count: usize,
}

pub async fn admin_login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<AdminCredentials>,
) -> Result<Json<TokenBody>, ApiError> {
    let token = state
        .auth
        .issue_admin_session(&credentials.username, &credentials.password)
        .await?;
    Ok(Json(TokenBody { token }))
}

pub async fn create_admin(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(credentials): ApiJson<AdminCredentials>,
) -> Result<(StatusCode, Json<AdminCreated>), ApiError> {
    let id = state
        .auth
        .create_administrator(token.as_deref(), &credentials.username, &credentials.password)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminCreated {
            message: "Administrator created",
            id,
        }),
    ))
}

pub async fn register_customer(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<Registration>,
) -> Result<(StatusCode, Json<CustomerSession>), ApiError> {
    let session = state.auth.register_customer(form).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn customer_login(
    State(state): State<AppState>,
    ApiJson(credentials): ApiJson<CustomerCredentials>,
) -> Result<Json<CustomerSession>, ApiError> {
    let session = state
        .auth
        .issue_customer_session(&credentials.email, &credentials.password)
        .await?;
    Ok(Json(session))
}

pub async fn update_profile(
    State(state): State<AppState>,
    token: AuthToken,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<CustomerView>, ApiError> {
    Ok(Json(state.auth.update_profile(token.as_deref(), update).await?))
}

pub async fn customer_count(State(state): State<AppState>, token: AuthToken) -> Result<Json<CountBody>, ApiError> {
    let count = state.auth.customer_count(token.as_deref()).await?;
    Ok(Json(CountBody { count }))
}
