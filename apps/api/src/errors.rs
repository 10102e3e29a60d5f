use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant is terminal for the current attempt: nothing is retried and
/// no partial analysis result is kept.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File {0} is empty (0 bytes)")]
    EmptyFile(String),

    #[error("Upload limit exceeded: {0}")]
    UploadLimit(String),

    #[error("Scoring oracle error: {0}")]
    Oracle(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code carried in every error body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::EmptyFile(_) => "EMPTY_FILE",
            AppError::UploadLimit(_) => "UPLOAD_LIMIT_EXCEEDED",
            AppError::Oracle(_) => "ORACLE_ERROR",
            AppError::UnreadableDocument(_) => "UNREADABLE_DOCUMENT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::EmptyFile(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::UploadLimit(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::Oracle(msg) => {
                tracing::error!("Scoring oracle error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "An error occurred during analysis. Please try again.".to_string(),
                )
            }
            AppError::UnreadableDocument(msg) => {
                tracing::error!("Unreadable document: {msg}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Cannot read PDF file. Please ensure the file is not corrupted or password protected."
                        .to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
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
    fn test_status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::EmptyFile("a.pdf".into()), StatusCode::BAD_REQUEST),
            (AppError::UploadLimit("x".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::Oracle("x".into()), StatusCode::BAD_GATEWAY),
            (
                AppError::UnreadableDocument("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_empty_file_message_names_file() {
        let err = AppError::EmptyFile("slip.pdf".into());
        assert_eq!(err.to_string(), "File slip.pdf is empty (0 bytes)");
        assert_eq!(err.code(), "EMPTY_FILE");
    }
}
