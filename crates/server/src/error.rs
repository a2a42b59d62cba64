//! Application error handling

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use triage_core::{ErrorKind, ErrorResponse, TriageError};

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Input failed validation (HTTP 422)
    Validation(String),
    UnsupportedMediaType(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::invalid(&msg))
            }
            AppError::UnsupportedMediaType(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorResponse::new(ErrorKind::UnsupportedMediaType, msg),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::invalid(&msg)),
        };

        (status, Json(body)).into_response()
    }
}

impl From<TriageError> for AppError {
    fn from(err: TriageError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::Validation(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                AppError::UnsupportedMediaType(e.body_text())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}
