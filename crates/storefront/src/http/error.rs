//! Maps service failures onto HTTP responses.
//!
//! Bodies are `{"code": "...", "message": "..."}`. Store failures answer a bare
//! "Server Error"; the detail only goes to the log.

use crate::error::{AuthError, ServiceError, StoreError, ValidationError};
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: &'static str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, code: &'static str) -> Self {
        Self {
            status,
            message: message.into(),
            code,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "BAD_REQUEST")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "SERVER_ERROR")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> &'static str {
        self.code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let message = e.to_string();
        match e {
            ServiceError::Auth(auth) => match auth {
                AuthError::MissingToken => Self::new(StatusCode::UNAUTHORIZED, message, "MISSING_TOKEN"),
                AuthError::InvalidToken => Self::new(StatusCode::BAD_REQUEST, message, "INVALID_TOKEN"),
                AuthError::InvalidCredentials => Self::new(StatusCode::BAD_REQUEST, message, "INVALID_CREDENTIALS"),
                AuthError::NotAuthorized => Self::new(StatusCode::FORBIDDEN, message, "FORBIDDEN"),
                AuthError::AlreadyExists(_) => Self::new(StatusCode::CONFLICT, message, "ALREADY_EXISTS"),
            },
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, message, "NOT_FOUND"),
            ServiceError::Validation(ValidationError::InvalidStatus(_)) => {
                Self::new(StatusCode::BAD_REQUEST, message, "INVALID_STATUS")
            }
            ServiceError::Validation(_) => Self::new(StatusCode::BAD_REQUEST, message, "VALIDATION_ERROR"),
            ServiceError::Store(store) => {
                tracing::error!(error = %store, "Store failure");
                Self::internal("Server Error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ServiceError::from(e).into()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ServiceError::from(e).into()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::bad_request(e.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, code = self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(status = %self.status, code = self.code, message = %self.message, "Request rejected");
        }
        let body = ErrorBody {
            code: self.code,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotFoundError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ServiceError::from(AuthError::MissingToken), StatusCode::UNAUTHORIZED),
            (AuthError::InvalidToken.into(), StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials.into(), StatusCode::BAD_REQUEST),
            (AuthError::NotAuthorized.into(), StatusCode::FORBIDDEN),
            (AuthError::AlreadyExists("Customer".into()).into(), StatusCode::CONFLICT),
            (NotFoundError::Order("order_9".into()).into(), StatusCode::NOT_FOUND),
            (ValidationError::InvalidStatus("Bogus".into()).into(), StatusCode::BAD_REQUEST),
            (ValidationError::MissingField("name").into(), StatusCode::BAD_REQUEST),
            (StoreError::Unavailable("actor closed".into()).into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status(), status);
        }
    }

    #[test]
    fn test_store_details_stay_out_of_the_body() {
        let error = ApiError::from(ServiceError::from(StoreError::Crypto("bcrypt exploded".into())));
        assert_eq!(error.message(), "Server Error");
        assert_eq!(error.code(), "SERVER_ERROR");
    }

    #[test]
    fn test_token_messages() {
        assert_eq!(
            ApiError::from(ServiceError::from(AuthError::MissingToken)).message(),
            "No token, authorization denied"
        );
        assert_eq!(ApiError::from(ServiceError::from(AuthError::InvalidToken)).message(), "Token is not valid");
    }
}
