//! Form analysis data model — the unit of output of the form pipeline.
//!
//! Wire format is camelCase (`companyName`, `suggestedAnswers`, `type`)
//! because the same shape is embedded in the prompts the model is asked
//! to reproduce. Unknown extra keys in model output are ignored on
//! deserialization and never propagated.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of input kinds the analyzer may emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Email,
    Textarea,
    Select,
    Radio,
    Checkbox,
}

impl FieldKind {
    pub const ALL: [FieldKind; 6] = [
        FieldKind::Text,
        FieldKind::Email,
        FieldKind::Textarea,
        FieldKind::Select,
        FieldKind::Radio,
        FieldKind::Checkbox,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Textarea => "textarea",
            FieldKind::Select => "select",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
        }
    }

    /// Case-sensitive: the prompt schema spells the kinds in lowercase and
    /// anything else is a contract violation, not a spelling to repair.
    pub fn parse(s: &str) -> Option<FieldKind> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discovered input on a target form.
///
/// `kind` crosses the wire as a raw string; the pipeline checks it against
/// `FieldKind` after extraction so an unknown kind surfaces as a schema
/// violation rather than a JSON parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Absent after analysis, populated by fill.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// The form pipeline's unit of output. Field order is discovery order and
/// is preserved through fill round-trips. No component retains one of
/// these between calls — the caller owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysis {
    pub fields: Vec<FormField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    // BTreeMap keeps serialization deterministic, so identical analyses
    // produce identical fill prompts.
    #[serde(default)]
    pub suggested_answers: BTreeMap<String, String>,
}

impl FormAnalysis {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
