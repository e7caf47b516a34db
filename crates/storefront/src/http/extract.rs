//! Request extractors whose failures come back as [`ApiError`] bodies.

use super::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use std::convert::Infallible;

/// Header carrying the session token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// The session token sent with the request, if any. Whether it is valid is for the
/// Auth Gateway to decide.
#[derive(Debug, Clone, Default)]
pub struct AuthToken(pub Option<String>);

impl AuthToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &'static str| parts.headers.get(name).and_then(|v| v.to_str().ok());
        let token = header(TOKEN_HEADER)
            .or_else(|| header("authorization").and_then(|v| v.strip_prefix("Bearer ")))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        Ok(AuthToken(token))
    }
}

/// `axum::Json` with malformed bodies answered as 400 `ApiError`s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T> IntoResponse for ApiJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// `axum::extract::Path` with unparsable ids answered as 400 `ApiError`s.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
