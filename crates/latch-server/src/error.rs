//! Error responses for the HTTP surface.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use latch_token::{ErrorCategory, TokenError};
use serde::Serialize;
use thiserror::Error;

/// Code reported for every internal failure; details stay in the server log.
pub const INTERNAL_ERROR_CODE: u16 = 5000;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Errors returned by handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Credential or token rejection, or a token-layer fault.
    #[error(transparent)]
    Token(#[from] TokenError),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// `{ "error": { "code": ..., "message": ... } }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Token(e) if e.category() == ErrorCategory::Authorization => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client. Internal failures are reported generically.
    pub fn body(&self) -> ErrorBody {
        let error = match self {
            ApiError::Token(e) if e.is_authorization() => ErrorDetail {
                code: e.code(),
                message: e.to_string(),
            },
            _ => ErrorDetail {
                code: INTERNAL_ERROR_CODE,
                message: INTERNAL_ERROR_MESSAGE.to_string(),
            },
        };
        ErrorBody { error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(self.body())).into_response()
    }
}
