use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RelayError>;

/// Failures of a generate request, in the order they can be detected
///
/// The `Display` text is exactly what the caller sees in the `error` field.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller input failed a precondition; nothing was sent upstream
    #[error("{0}")]
    Validation(String),

    /// The provider answered with a non-success status
    #[error("OpenAI API error: {message}")]
    Upstream { status: u16, message: String },

    /// Transport failure, timeout or an unusable provider payload
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status returned to the caller
    ///
    /// Provider statuses are forwarded unchanged; one that is not a valid
    /// status code is reported as a bad gateway.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for this failure
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::Upstream { .. } => "upstream_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse { error: self.to_string() };

        (status, Json(body)).into_response()
    }
}
