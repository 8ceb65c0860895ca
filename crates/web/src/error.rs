use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use storage::{
    dto::common::FailureResponse, error::StorageError, services::claiming::ClaimRejection,
};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Conflict(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Conflict(msg) => write!(f, "Conflict: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status_code, body) = match self {
            Self::Storage(e) => {
                if e.is_rate_limited() {
                    tracing::warn!("Sheets API quota exhausted: {}", e);
                } else if e.is_not_found() {
                    tracing::error!("Spreadsheet or sheet tab not found: {}", e);
                } else {
                    tracing::error!("Storage error: {:?}", e);
                }
                (StatusCode::INTERNAL_SERVER_ERROR, FailureResponse::opaque())
            }
            Self::Validation(errors) => {
                let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
                fields.sort_by_key(|(field, _)| *field);

                let message = fields
                    .iter()
                    .flat_map(|(_, errors)| errors.iter())
                    .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .unwrap_or_else(|| "Missing data".to_string());

                (StatusCode::BAD_REQUEST, FailureResponse::with_message(message))
            }
            Self::BadRequest(msg) | Self::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, FailureResponse::with_message(msg))
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<ClaimRejection> for WebError {
    fn from(rejection: ClaimRejection) -> Self {
        if rejection.is_conflict() {
            Self::Conflict(rejection.message().to_string())
        } else {
            Self::BadRequest(rejection.message().to_string())
        }
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::BadRequest("Invalid request body".to_string())
    }
}

pub type WebResult<T> = Result<T, WebError>;
