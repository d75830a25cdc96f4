// All LLM prompt constants and builders for the forms module.
// The JSON schema is spelled out field-by-field inside each prompt — with a
// free-text producer on the other end, the in-prompt schema plus the
// extractor is the whole contract-enforcement story.

use std::collections::BTreeMap;

use crate::models::form::FormAnalysis;

/// Analysis prompt template. Replace `{form_markup}` and `{resume_text}`
/// before sending.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"You are a job application form analyzer. Analyze the following job application form HTML and extract:
1. All form fields with their names and types
2. The company name if visible
3. The job title if visible
4. Suggested answers based on the resume provided

Form HTML:
{form_markup}

Resume:
{resume_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "fields": [
    {"name": "field_name", "type": "text|email|textarea|select|radio|checkbox", "required": true, "placeholder": "..."}
  ],
  "companyName": "...",
  "jobTitle": "...",
  "suggestedAnswers": {
    "field_name": "suggested_value"
  }
}

"type" MUST be one of: text, email, textarea, select, radio, checkbox.
Keys of "suggestedAnswers" MUST be field names from "fields".

IMPORTANT: Return ONLY valid JSON, no additional text."#;

/// Fill prompt template. Replace `{form_json}` and `{user_data_json}`
/// before sending.
pub const FILL_PROMPT_TEMPLATE: &str = r#"You are a job application form filler. Fill out the following form fields with the provided user data.

Form structure:
{form_json}

User data:
{user_data_json}

Fill each field intelligently with appropriate data from the user's information.

Return a JSON object of the same shape, with "value" set on each field and "suggestedAnswers" filled:
{
  "fields": [
    {"name": "field_name", "type": "text|email|textarea|select|radio|checkbox", "required": true, "value": "filled_value"}
  ],
  "companyName": "...",
  "jobTitle": "...",
  "suggestedAnswers": {
    "field_name": "filled_value"
  }
}

HARD RULES:
1. Keep every field "name" and "type" EXACTLY as given — do not rename, add, or drop fields
2. Preserve the field order from the form structure

IMPORTANT: Return ONLY valid JSON, no additional text."#;

/// Builds the analysis prompt. Inputs are interpolated verbatim — no
/// escaping beyond what the transport requires.
pub fn build_analysis_prompt(form_markup: &str, resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{form_markup}", form_markup)
        .replace("{resume_text}", resume_text)
}

/// Builds the fill prompt from a prior analysis and the caller-supplied
/// answer mapping, both serialized as pretty JSON.
pub fn build_fill_prompt(
    analysis: &FormAnalysis,
    user_data: &BTreeMap<String, String>,
) -> Result<String, serde_json::Error> {
    let form_json = serde_json::to_string_pretty(analysis)?;
    let user_data_json = serde_json::to_string_pretty(user_data)?;

    Ok(FILL_PROMPT_TEMPLATE
        .replace("{form_json}", &form_json)
        .replace("{user_data_json}", &user_data_json))
}
