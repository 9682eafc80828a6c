//! HTTP-facing error type for the paddysense API.
//!
//! Every failure mode the handlers can hit maps to a distinct variant so
//! callers can tell a bad request apart from a backend outage. All error
//! responses share the `{"ok": false, "error": <message>}` body shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// ---

#[derive(Error, Debug)]
pub enum AppError {
    /// Ingest payload lacked one or more required keys; all are listed.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Present, non-null payload values that are not JSON numbers.
    #[error("Invalid numeric value for fields: {}", .0.join(", "))]
    InvalidFields(Vec<String>),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Reading store unreachable or failing; the reading was not persisted.
    #[error("storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),

    /// Classifier adapter failure (corrupt image, model unavailable).
    #[error("classification failed: {0}")]
    Classifier(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            AppError::MissingFields(_) | AppError::InvalidFields(_) | AppError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(e) => {
                tracing::error!("storage error: {e}");
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Classifier(msg) => {
                tracing::error!("classifier error: {msg}");
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({ "ok": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn missing_fields_message_lists_every_field() {
        // ---
        let err = AppError::MissingFields(vec!["ph".into(), "moisture".into()]);
        assert_eq!(err.to_string(), "Missing fields: ph, moisture");
    }

    #[test]
    fn storage_errors_map_to_service_unavailable() {
        // ---
        let response = AppError::Storage(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn classifier_errors_map_to_bad_gateway() {
        // ---
        let response = AppError::Classifier("corrupt image".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
