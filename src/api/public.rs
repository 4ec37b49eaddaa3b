//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::twin::TwinError;

// Errors

pub struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    pub fn new(status: StatusCode, error: anyhow::Error) -> Self {
        Self { status, error }
    }

    /// Busy with another submission.
    pub fn in_flight() -> Self {
        Self::new(
            StatusCode::CONFLICT,
            anyhow::anyhow!("A request is already being processed"),
        )
    }

    /// Form problems are the caller's fault, everything after dispatch
    /// is the upstream model's.
    pub fn from_twin(err: TwinError) -> Self {
        let status = if err.is_dispatch_failure() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        Self::new(status, anyhow::Error::new(err))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The message a user is allowed to see.
    pub fn message(&self) -> String {
        match self.error.downcast_ref::<TwinError>() {
            Some(err) => err.user_message(),
            None => format!("Something went wrong: {}", self.error),
        }
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.error);

        (self.status, Json(json!({"error": self.message()}))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.into())
    }
}

// Re-export public types from each route

pub mod twin {
    pub use crate::api::routes::twin::public::*;
}
