//! Axum route handlers for the Forms API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::forms::pipeline::{analyze_form, fill_form};
use crate::models::form::FormAnalysis;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeFormRequest {
    pub form_markup: String,
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeFormResponse {
    pub analysis: FormAnalysis,
}

#[derive(Debug, Deserialize)]
pub struct FillFormRequest {
    pub analysis: FormAnalysis,
    #[serde(default)]
    pub user_data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct FillFormResponse {
    pub analysis: FormAnalysis,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/forms/analyze
///
/// Turns raw form markup plus résumé text into a validated `FormAnalysis`.
/// Failures are surfaced as explicit errors — there is no fallback on this
/// path; the UI shows a try-again state instead of a guessed analysis.
pub async fn handle_analyze_form(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeFormRequest>,
) -> Result<Json<AnalyzeFormResponse>, AppError> {
    if request.form_markup.trim().is_empty() {
        return Err(AppError::Validation(
            "form_markup cannot be empty".to_string(),
        ));
    }
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let analysis =
        analyze_form(state.llm.as_ref(), &request.form_markup, &request.resume_text).await?;

    Ok(Json(AnalyzeFormResponse { analysis }))
}

/// POST /api/v1/forms/fill
///
/// Re-fills a previously returned analysis with caller-supplied answers.
/// Same no-fallback policy as analyze.
pub async fn handle_fill_form(
    State(state): State<AppState>,
    Json(request): Json<FillFormRequest>,
) -> Result<Json<FillFormResponse>, AppError> {
    if request.analysis.fields.is_empty() {
        return Err(AppError::Validation(
            "analysis has no fields to fill".to_string(),
        ));
    }

    let analysis = fill_form(state.llm.as_ref(), &request.analysis, &request.user_data).await?;

    Ok(Json(FillFormResponse { analysis }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_request_deserializes_snake_case() {
        let json = r#"{"form_markup": "<form/>", "resume_text": "Jane Doe"}"#;
        let request: AnalyzeFormRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.form_markup, "<form/>");
        assert_eq!(request.resume_text, "Jane Doe");
    }

    #[test]
    fn test_fill_request_user_data_defaults_to_empty() {
        let json = r#"{"analysis": {"fields": [{"name": "email", "type": "email"}]}}"#;
        let request: FillFormRequest = serde_json::from_str(json).unwrap();
        assert!(request.user_data.is_empty());
        assert_eq!(request.analysis.fields.len(), 1);
    }

    #[test]
    fn test_analyze_response_embeds_camel_case_analysis() {
        let response = AnalyzeFormResponse {
            analysis: FormAnalysis {
                fields: vec![],
                company_name: Some("Acme Corp".to_string()),
                job_title: None,
                suggested_answers: BTreeMap::new(),
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["analysis"]["companyName"], "Acme Corp");
    }
}
