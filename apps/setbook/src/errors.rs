use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Construction failures for the show/set data model.
///
/// These are raised only while building records. Once a `Show` exists it is
/// guaranteed to hold at least one set and every set at least one song.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShowError {
    #[error("show has no sets")]
    NoSets,

    #[error("set '{label}' has no songs")]
    EmptySet { label: String },

    #[error("set label is empty")]
    EmptyLabel,

    #[error("invalid show date '{0}'")]
    InvalidDate(String),
}

/// Application-level error type.
/// Implements `IntoResponse` so preview handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed show: {0}")]
    MalformedShow(#[from] ShowError),

    #[error("Ingest error on line {line}: {reason}")]
    Ingest { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF engine error: {0}")]
    Pdf(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MalformedShow(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MALFORMED_SHOW",
                e.to_string(),
            ),
            AppError::Ingest { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INGEST_ERROR",
                self.to_string(),
            ),
            AppError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "IO_ERROR",
                    "A file system error occurred".to_string(),
                )
            }
            AppError::Json(e) => {
                tracing::error!("JSON error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "JSON_ERROR",
                    "A serialization error occurred".to_string(),
                )
            }
            AppError::Pdf(msg) => {
                tracing::error!("PDF engine error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_ERROR",
                    "The PDF engine failed".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_error_converts_to_malformed_show() {
        let err: AppError = ShowError::NoSets.into();
        assert!(matches!(err, AppError::MalformedShow(ShowError::NoSets)));
        assert_eq!(err.to_string(), "Malformed show: show has no sets");
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("1972/05/26".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_pdf_error_maps_to_500() {
        let response = AppError::Pdf("exit status 1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
