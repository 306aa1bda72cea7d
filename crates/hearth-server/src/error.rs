//! Application error types and Axum response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hearth_core::ModelError;
use serde::Serialize;

/// Request-level errors with HTTP status code mapping.
#[derive(Debug)]
pub enum AppError {
    /// Body is not parseable JSON.
    BadRequest(String),
    /// Body parsed but does not describe a valid house.
    Validation(String),
    UnsupportedMediaType(String),
    /// The model failed to produce a prediction.
    Inference(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AppError::Inference(detail) => format!("Prediction error: {detail}"),
            AppError::BadRequest(m) | AppError::Validation(m) | AppError::UnsupportedMediaType(m) => {
                m.clone()
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(e.body_text()),
            JsonRejection::JsonSyntaxError(e) => AppError::BadRequest(e.body_text()),
            JsonRejection::MissingJsonContentType(e) => {
                AppError::UnsupportedMediaType(e.body_text())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NonFinite(field) if field != "prediction" => {
                AppError::Validation(format!("{field} must be a finite number"))
            }
            other => AppError::Inference(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorResponse { error: self.message() })).into_response()
    }
}
