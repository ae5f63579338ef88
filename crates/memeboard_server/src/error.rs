//! Wire-level error envelope.
//!
//! # Responsibility
//! - Map repository errors to HTTP statuses and machine-readable kinds.
//! - Keep store-level failure detail out of responses.
//!
//! # Invariants
//! - Every error body is `{error: <kind>, message: <text>}`.
//! - A tombstoned record maps to the same `not_found` kind as a missing one.
//! - Store failures surface as an opaque `store_error`; detail goes to the
//!   log only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use memeboard_core::RepoError;
use serde::Serialize;

/// Machine-readable error kinds carried on the wire.
pub const KIND_VALIDATION: &str = "validation_error";
pub const KIND_DUPLICATE_NAME: &str = "duplicate_name";
pub const KIND_NOT_FOUND: &str = "not_found";
pub const KIND_STORE: &str = "store_error";

/// HTTP-facing error with a stable kind and human-readable message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: KIND_VALIDATION,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            kind: KIND_NOT_FOUND,
            message: message.into(),
        }
    }

    /// Opaque 500 for failures the caller cannot act on. The given context
    /// is logged, not returned.
    pub fn internal(context: impl AsRef<str>) -> Self {
        error!(
            "event=store_error module=http status=error error={}",
            context.as_ref()
        );
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: KIND_STORE,
            message: "internal storage error".to_string(),
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::validation(err.to_string()),
            RepoError::DuplicateName(name) => Self {
                status: StatusCode::CONFLICT,
                kind: KIND_DUPLICATE_NAME,
                message: format!("a memecoin named `{name}` already exists"),
            },
            RepoError::NotFound(_) => Self::not_found("memecoin not found"),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind,
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
