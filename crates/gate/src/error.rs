// Gate error types
// Decision: Startup problems (patterns, keys) are GateError; per-request failures are DelegateError

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while assembling the gate at startup.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid session verification key: {0}")]
    InvalidKey(#[from] jsonwebtoken::errors::Error),
}

/// Session token verification failures.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session token rejected: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("no verification key configured")]
    NoKey,
}

/// Failure inside the delegate. The gate does not recover from it.
#[derive(Debug, Error)]
pub enum DelegateError {
    #[error("delegate failed: {0}")]
    Internal(String),
}

/// Standard JSON error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Pair with a status code as an axum response.
    pub fn with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}
