//! Form pipeline — orchestrates the analyze and fill operations.
//!
//! Flow per call: build prompt → generate → extract → validate.
//! Single-shot: one generation call, one extraction attempt, no internal
//! retry. Typed failures propagate upward — nothing here substitutes a
//! synthetic analysis for a real failure, since a fabricated analysis
//! could send a user's application off with wrong data.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{info, warn};

use crate::errors::AppError;
use crate::forms::extract::extract_json;
use crate::forms::prompts::{build_analysis_prompt, build_fill_prompt};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{ChatTurn, GenerationParams, TextGenerator};
use crate::models::form::{FieldKind, FormAnalysis};

const ANALYSIS_TEMPERATURE: f32 = 0.3;
const FILL_TEMPERATURE: f32 = 0.2;
const MAX_OUTPUT_TOKENS: u32 = 2048;

fn structured_params(temperature: f32) -> GenerationParams {
    GenerationParams {
        system_instruction: Some(JSON_ONLY_SYSTEM.to_string()),
        temperature,
        max_output_tokens: MAX_OUTPUT_TOKENS,
        top_p: None,
    }
}

/// Analyzes raw form markup against a résumé and returns a validated
/// `FormAnalysis`.
pub async fn analyze_form(
    llm: &dyn TextGenerator,
    form_markup: &str,
    resume_text: &str,
) -> Result<FormAnalysis, AppError> {
    let prompt = build_analysis_prompt(form_markup, resume_text);

    let raw = llm
        .generate(
            &[ChatTurn::user(prompt)],
            &structured_params(ANALYSIS_TEMPERATURE),
        )
        .await?;

    let analysis: FormAnalysis = extract_json(&raw)?;
    validate_analysis(&analysis)?;

    info!(
        "Analyzed form: {} fields, {} suggested answers",
        analysis.fields.len(),
        analysis.suggested_answers.len()
    );

    Ok(analysis)
}

/// Re-fills a previously analyzed form with caller-supplied answers and
/// returns a new `FormAnalysis` with `value`/`suggestedAnswers` populated.
/// The input analysis is not mutated.
pub async fn fill_form(
    llm: &dyn TextGenerator,
    analysis: &FormAnalysis,
    user_data: &BTreeMap<String, String>,
) -> Result<FormAnalysis, AppError> {
    let prompt = build_fill_prompt(analysis, user_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize fill prompt: {e}")))?;

    let raw = llm
        .generate(
            &[ChatTurn::user(prompt)],
            &structured_params(FILL_TEMPERATURE),
        )
        .await?;

    let filled: FormAnalysis = extract_json(&raw)?;
    validate_filled(analysis, &filled)?;

    info!("Filled form: {} fields", filled.fields.len());

    Ok(filled)
}

// ────────────────────────────────────────────────────────────────────────────
// Schema validation
// ────────────────────────────────────────────────────────────────────────────

/// Checks the field contract on an extracted analysis: non-empty unique
/// names, kinds from the closed set. An orphan `suggestedAnswers` key is
/// tolerated and logged, never an error.
fn validate_analysis(analysis: &FormAnalysis) -> Result<(), AppError> {
    let mut seen: HashSet<&str> = HashSet::new();

    for field in &analysis.fields {
        if field.name.trim().is_empty() {
            return Err(AppError::Schema(
                "analysis contains a field with an empty name".to_string(),
            ));
        }
        if FieldKind::parse(&field.kind).is_none() {
            return Err(AppError::Schema(format!(
                "field '{}' has unknown type '{}'",
                field.name, field.kind
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(AppError::Schema(format!(
                "duplicate field name '{}'",
                field.name
            )));
        }
    }

    for key in analysis.suggested_answers.keys() {
        if !seen.contains(key.as_str()) {
            warn!("Suggested answer for '{key}' matches no field in the analysis");
        }
    }

    Ok(())
}

/// A filled form must carry exactly the field names of the analysis it was
/// built from — no additions, no removals, no renames — and must still pass
/// per-field validation.
fn validate_filled(original: &FormAnalysis, filled: &FormAnalysis) -> Result<(), AppError> {
    validate_analysis(filled)?;

    let before: BTreeSet<&str> = original.field_names().collect();
    let after: BTreeSet<&str> = filled.field_names().collect();

    if before != after {
        let dropped: Vec<&str> = before.difference(&after).copied().collect();
        let added: Vec<&str> = after.difference(&before).copied().collect();
        return Err(AppError::Schema(format!(
            "fill changed the field set (dropped: [{}], added: [{}])",
            dropped.join(", "),
            added.join(", ")
        )));
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
