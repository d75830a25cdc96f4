use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::forms::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Nothing below swallows a failure: generation, extraction, and schema
/// errors all propagate here typed, so callers can tell "retry the
/// generation" apart from "the transport is down".
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation error: {0}")]
    Generation(#[from] LlmError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Generation(e) => {
                tracing::error!("Generation error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_ERROR",
                    "The generation service is unavailable. Try again.".to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::error!("Extraction error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UNPARSEABLE_RESPONSE",
                    "Could not parse the form from the model response. Try again.".to_string(),
                )
            }
            AppError::Schema(msg) => {
                tracing::error!("Schema violation: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCHEMA_VIOLATION",
                    "The model returned an invalid form structure. Try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
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
    fn test_validation_maps_to_400() {
        let response = AppError::Validation("message cannot be empty".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_generation_and_schema_failures_map_to_502() {
        let generation = AppError::Generation(LlmError::EmptyResponse).into_response();
        assert_eq!(generation.status(), StatusCode::BAD_GATEWAY);

        let schema = AppError::Schema("duplicate field name 'email'".to_string()).into_response();
        assert_eq!(schema.status(), StatusCode::BAD_GATEWAY);

        let extraction = AppError::Extraction(ExtractError::NoJson).into_response();
        assert_eq!(extraction.status(), StatusCode::BAD_GATEWAY);
    }
}
