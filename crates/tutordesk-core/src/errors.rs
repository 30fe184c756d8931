//! Error types shared by every layer of the application.
//!
//! [`CoreError`] is the domain taxonomy returned by the resolver, the
//! allocator and the student creator. [`AppError`] is the HTTP envelope the
//! axum handlers return; it renders as `{"error": "<message>"}`.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Message shown to clients for both unknown accounts and wrong secrets.
pub const GENERIC_AUTH_FAILURE: &str = "Invalid credentials";

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("No matching account")]
    NotFound,

    #[error("Secret does not match")]
    InvalidCredential,

    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Another writer claimed the same identifier first. Retriable.
    #[error("Student identifier already taken")]
    AllocationConflict,

    #[error("Credential store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn store<E: std::fmt::Display>(err: E) -> Self {
        Self::StoreUnavailable(err.to_string())
    }

    /// True for the two outcomes that must look identical to a client.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::NotFound | Self::InvalidCredential)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AllocationConflict => StatusCode::CONFLICT,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let status = err.status();
        if err.is_auth_failure() {
            tracing::debug!(reason = %err, "Authentication rejected");
            return Self::unauthorized(GENERIC_AUTH_FAILURE);
        }
        Self::new(status, err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}
