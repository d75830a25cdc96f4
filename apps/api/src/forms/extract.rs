//! Structured response extraction — pulls a typed record out of free-form
//! model text.
//!
//! The model is instructed to return bare JSON but routinely prefaces or
//! trails it with prose. The rule here is greedy: take the span from the
//! first `{` to the last `}` and parse that. Two sibling top-level objects
//! therefore merge into one span that fails to parse — a known, accepted
//! failure mode; no multi-object recovery is attempted.

use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in model output")]
    NoJson,

    #[error("model output contained malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Locates the outermost `{`..`}` span in `raw` and parses it as `T`.
///
/// `NoJson` when no such span exists; `Malformed` when the span does not
/// parse into `T`. Schema-level checks (enumerated kinds, key consistency)
/// are the pipeline's job, not this function's.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<T, ExtractError> {
    let start = raw.find('{').ok_or(ExtractError::NoJson)?;
    let end = raw.rfind('}').ok_or(ExtractError::NoJson)?;
    if end < start {
        return Err(ExtractError::NoJson);
    }

    Ok(serde_json::from_str(&raw[start..=end])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::FormAnalysis;
    use serde_json::Value;

    #[test]
    fn test_bare_json_object_round_trips_losslessly() {
        let json = r#"{"fields":[{"name":"email","type":"email","required":true}],"suggestedAnswers":{"email":"jane@x.com"}}"#;
        let analysis: FormAnalysis = extract_json(json).unwrap();
        assert_eq!(serde_json::to_string(&analysis).unwrap(), json);
    }

    #[test]
    fn test_json_wrapped_in_prose_is_extracted() {
        let raw = "Sure, here is the analysis you asked for:\n{\"a\": 1}\nLet me know if you need anything else.";
        let value: Value = extract_json(raw).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_nested_braces_stay_inside_the_span() {
        let raw = "prefix {\"outer\": {\"inner\": [1, 2]}} suffix";
        let value: Value = extract_json(raw).unwrap();
        assert_eq!(value["outer"]["inner"][1], 2);
    }

    #[test]
    fn test_no_braces_is_no_json() {
        let result: Result<Value, _> = extract_json("I could not find a form in that page.");
        assert!(matches!(result, Err(ExtractError::NoJson)));
    }

    #[test]
    fn test_empty_input_is_no_json() {
        let result: Result<Value, _> = extract_json("");
        assert!(matches!(result, Err(ExtractError::NoJson)));
    }

    #[test]
    fn test_close_brace_before_open_brace_is_no_json() {
        let result: Result<Value, _> = extract_json("} and later a lone {");
        assert!(matches!(result, Err(ExtractError::NoJson)));
    }

    #[test]
    fn test_unparseable_span_is_malformed() {
        let result: Result<Value, _> = extract_json("{this is not json}");
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_truncated_object_is_malformed() {
        // Last '}' closes the inner object; the outer one never closes.
        let result: Result<Value, _> = extract_json(r#"{"fields": [{"name": "email"}"#);
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    // Regression guard: two sibling objects over-capture into a single
    // span ({"a":1} ... {"b":2}) which must fail as malformed, not
    // silently return the first object.
    #[test]
    fn test_two_sibling_objects_over_capture_and_fail() {
        let raw = r#"Sure! {"a":1} Hope that helps {"b":2}"#;
        let result: Result<Value, _> = extract_json(raw);
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }

    #[test]
    fn test_valid_json_that_misses_required_keys_is_malformed() {
        // Parses as a JSON object but not into FormAnalysis (no "fields").
        let result: Result<FormAnalysis, _> = extract_json(r#"{"companyName": "Acme"}"#);
        assert!(matches!(result, Err(ExtractError::Malformed(_))));
    }
}
