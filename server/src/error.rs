//! Server error types and their HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use postforge_templates::TemplateError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Result type alias for handlers.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Ranking failed.
    #[error("suggestion error: {0}")]
    Suggest(#[from] TemplateError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            // The ranker is temporarily unusable; the service itself is fine.
            ServerError::Suggest(TemplateError::RankingUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::Suggest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServerError::Suggest(TemplateError::RankingUnavailable(_)) => "ranking_unavailable",
            ServerError::Suggest(_) => "internal_error",
            ServerError::Config(_) => "configuration_error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        error!(%status, "{self}");

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
