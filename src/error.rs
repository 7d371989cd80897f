use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::error;

use crate::{store::StoreError, validation::ValidationError};

/// Every handler failure. Each variant maps to one status and one body key.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    BadBody(String),

    #[error("Username is already taken")]
    DuplicateUsername,

    /// Missing or stale session on a protected route.
    #[error("Unauthorized")]
    Unauthorized,

    /// Same condition as `Unauthorized`, reported under `message` by check_session.
    #[error("Unauthorized")]
    NoSession,

    #[error("Invalid Login Credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_and_key(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) | ApiError::BadBody(_) | ApiError::DuplicateUsername => {
                (StatusCode::UNPROCESSABLE_ENTITY, "error")
            }
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "error"),
            ApiError::NoSession | ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "message")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "error"),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateUsername(_) => ApiError::DuplicateUsername,
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, key) = self.status_and_key();
        let message = match &self {
            ApiError::Internal(e) => {
                error!(error = ?e, "request failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let mut body = Map::new();
        body.insert(key.to_string(), Value::String(message));
        (status, Json(Value::Object(body))).into_response()
    }
}
