//! Paragraph analysis schema and its validator.
//!
//! The four fields of [`ParagraphAnalysis`] are declared once in
//! [`PARAGRAPH_FIELDS`]. The same table drives both the response schema sent
//! to the model ([`paragraph_analysis_schema`]) and the validation of the
//! model's reply ([`ParagraphAnalysis::from_value`]).
//!
//! Validation is strict: missing fields, wrong types and unknown keys are all
//! reported, and nothing is coerced.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

// =============================================================================
// FIELD TABLE
// =============================================================================

/// Value shape accepted for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A JSON string.
    String,
    /// A JSON array whose items are all strings.
    StringArray,
}

impl FieldKind {
    fn expected(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::StringArray => "array",
        }
    }
}

/// Declarative description of one output field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// The exact field set of a paragraph analysis, in output order.
pub const PARAGRAPH_FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        name: "paragraphType",
        kind: FieldKind::String,
        description:
            "Type of the paragraph: expository, narrative, descriptive, argumentative, etc.",
    },
    FieldSpec {
        name: "mainIdea",
        kind: FieldKind::String,
        description: "The main idea of the paragraph.",
    },
    FieldSpec {
        name: "keyPoints",
        kind: FieldKind::StringArray,
        description: "Key points extracted from the paragraph.",
    },
    FieldSpec {
        name: "tone",
        kind: FieldKind::String,
        description: "Tone of the paragraph: positive, negative, neutral, etc.",
    },
];

/// Build the response schema handed to the model for structured output.
///
/// Uses the OpenAPI subset understood by the Generative Language API.
pub fn paragraph_analysis_schema() -> Value {
    let mut properties = Map::new();
    for field in PARAGRAPH_FIELDS {
        let prop = match field.kind {
            FieldKind::String => json!({
                "type": "STRING",
                "description": field.description,
            }),
            FieldKind::StringArray => json!({
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": field.description,
            }),
        };
        properties.insert(field.name.to_string(), prop);
    }

    let names: Vec<&str> = PARAGRAPH_FIELDS.iter().map(|f| f.name).collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": names,
        "propertyOrdering": names,
    })
}

// =============================================================================
// ISSUES
// =============================================================================

/// Category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    InvalidType,
    MissingField,
    UnrecognizedKeys,
}

/// One step in the path to the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A single validation failure, serialized into the error `details` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaIssue {
    pub code: IssueCode,
    pub path: Vec<PathSegment>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

impl SchemaIssue {
    pub fn missing(field: &str) -> Self {
        Self {
            code: IssueCode::MissingField,
            path: vec![field.into()],
            message: "Required".to_string(),
            expected: None,
            received: Some("undefined".to_string()),
            keys: Vec::new(),
        }
    }

    pub fn invalid_type(path: Vec<PathSegment>, expected: &str, received: &str) -> Self {
        Self {
            code: IssueCode::InvalidType,
            path,
            message: format!("Expected {}, received {}", expected, received),
            expected: Some(expected.to_string()),
            received: Some(received.to_string()),
            keys: Vec::new(),
        }
    }

    pub fn unrecognized_keys(keys: Vec<String>) -> Self {
        let quoted: Vec<String> = keys.iter().map(|k| format!("'{}'", k)).collect();
        Self {
            code: IssueCode::UnrecognizedKeys,
            path: Vec::new(),
            message: format!("Unrecognized key(s) in object: {}", quoted.join(", ")),
            expected: None,
            received: None,
            keys,
        }
    }
}

/// JSON type name used in issue messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// PARAGRAPH ANALYSIS
// =============================================================================

/// Structured analysis of a paragraph, as returned by the structured endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ParagraphAnalysis {
    pub paragraph_type: String,
    pub main_idea: String,
    pub key_points: Vec<String>,
    pub tone: String,
}

impl ParagraphAnalysis {
    /// Validate an arbitrary JSON value against [`PARAGRAPH_FIELDS`].
    ///
    /// Returns every issue found, not only the first.
    pub fn from_value(value: &Value) -> std::result::Result<Self, Vec<SchemaIssue>> {
        let obj = match value {
            Value::Object(obj) => obj,
            other => {
                return Err(vec![SchemaIssue::invalid_type(
                    Vec::new(),
                    "object",
                    json_type_name(other),
                )])
            }
        };

        let mut issues = Vec::new();
        for field in PARAGRAPH_FIELDS {
            match obj.get(field.name) {
                None => issues.push(SchemaIssue::missing(field.name)),
                Some(v) => check_field(field, v, &mut issues),
            }
        }

        let extra: Vec<String> = obj
            .keys()
            .filter(|k| !PARAGRAPH_FIELDS.iter().any(|f| f.name == k.as_str()))
            .cloned()
            .collect();
        if !extra.is_empty() {
            issues.push(SchemaIssue::unrecognized_keys(extra));
        }

        if !issues.is_empty() {
            return Err(issues);
        }

        let text = |name: &str| {
            obj.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let key_points = obj
            .get("keyPoints")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            paragraph_type: text("paragraphType"),
            main_idea: text("mainIdea"),
            key_points,
            tone: text("tone"),
        })
    }
}

fn check_field(field: FieldSpec, value: &Value, issues: &mut Vec<SchemaIssue>) {
    match (field.kind, value) {
        (FieldKind::String, Value::String(_)) => {}
        (FieldKind::StringArray, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    issues.push(SchemaIssue::invalid_type(
                        vec![field.name.into(), i.into()],
                        "string",
                        json_type_name(item),
                    ));
                }
            }
        }
        (kind, other) => issues.push(SchemaIssue::invalid_type(
            vec![field.name.into()],
            kind.expected(),
            json_type_name(other),
        )),
    }
}

/// Parse raw model output into a validated [`ParagraphAnalysis`].
///
/// Invalid JSON yields [`Error::Parse`]; a shape mismatch yields
/// [`Error::SchemaValidation`].
pub fn parse_paragraph_analysis(raw: &str) -> Result<ParagraphAnalysis> {
    let value: Value = serde_json::from_str(raw).map_err(|e| Error::Parse(e.to_string()))?;
    ParagraphAnalysis::from_value(&value).map_err(Error::SchemaValidation)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Value {
        json!({
            "paragraphType": "expository",
            "mainIdea": "Rust guarantees memory safety without a garbage collector.",
            "keyPoints": ["ownership", "borrowing"],
            "tone": "neutral"
        })
    }

    #[test]
    fn test_valid_object_is_accepted() {
        let analysis = ParagraphAnalysis::from_value(&valid()).unwrap();
        assert_eq!(analysis.paragraph_type, "expository");
        assert_eq!(analysis.key_points, vec!["ownership", "borrowing"]);
        assert_eq!(analysis.tone, "neutral");
    }

    #[test]
    fn test_empty_key_points_is_valid() {
        let mut v = valid();
        v["keyPoints"] = json!([]);
        let analysis = ParagraphAnalysis::from_value(&v).unwrap();
        assert!(analysis.key_points.is_empty());
    }

    #[test]
    fn test_serializes_back_to_camel_case() {
        let analysis = ParagraphAnalysis::from_value(&valid()).unwrap();
        assert_eq!(serde_json::to_value(&analysis).unwrap(), valid());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let issues = ParagraphAnalysis::from_value(&json!(["a"])).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::InvalidType);
        assert_eq!(issues[0].expected.as_deref(), Some("object"));
        assert_eq!(issues[0].received.as_deref(), Some("array"));
    }

    #[test]
    fn test_missing_fields_are_all_reported() {
        let issues = ParagraphAnalysis::from_value(&json!({ "tone": "neutral" })).unwrap_err();
        let missing: Vec<_> = issues
            .iter()
            .filter(|i| i.code == IssueCode::MissingField)
            .map(|i| i.path.clone())
            .collect();
        assert_eq!(
            missing,
            vec![
                vec![PathSegment::from("paragraphType")],
                vec![PathSegment::from("mainIdea")],
                vec![PathSegment::from("keyPoints")],
            ]
        );
    }

    #[test]
    fn test_wrong_scalar_type() {
        let mut v = valid();
        v["mainIdea"] = json!(42);
        let issues = ParagraphAnalysis::from_value(&v).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Expected string, received number");
    }

    #[test]
    fn test_key_points_not_an_array() {
        let mut v = valid();
        v["keyPoints"] = json!("ownership, borrowing");
        let issues = ParagraphAnalysis::from_value(&v).unwrap_err();
        assert_eq!(issues[0].expected.as_deref(), Some("array"));
        assert_eq!(issues[0].received.as_deref(), Some("string"));
    }

    #[test]
    fn test_non_string_key_point_reports_index() {
        let mut v = valid();
        v["keyPoints"] = json!(["ok", null, 3]);
        let issues = ParagraphAnalysis::from_value(&v).unwrap_err();
        assert_eq!(issues.len(), 2);
        assert_eq!(
            issues[0].path,
            vec![PathSegment::from("keyPoints"), PathSegment::from(1)]
        );
        assert_eq!(issues[1].received.as_deref(), Some("number"));
    }

    #[test]
    fn test_extra_keys_are_rejected() {
        let mut v = valid();
        v["confidence"] = json!(0.9);
        let issues = ParagraphAnalysis::from_value(&v).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, IssueCode::UnrecognizedKeys);
        assert_eq!(issues[0].keys, vec!["confidence"]);
    }

    #[test]
    fn test_issue_serialization_shape() {
        let issue = SchemaIssue::invalid_type(
            vec!["keyPoints".into(), 0.into()],
            "string",
            "boolean",
        );
        let v = serde_json::to_value(&issue).unwrap();
        assert_eq!(v["code"], "invalid_type");
        assert_eq!(v["path"], json!(["keyPoints", 0]));
        assert!(v.get("keys").is_none());
    }

    #[test]
    fn test_parse_invalid_json_is_parse_error() {
        let err = parse_paragraph_analysis("Here is the analysis: {").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_parse_wrong_shape_is_schema_error() {
        let err = parse_paragraph_analysis(r#"{"tone": 1}"#).unwrap_err();
        match err {
            Error::SchemaValidation(issues) => assert_eq!(issues.len(), 4),
            other => panic!("Expected SchemaValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_schema_lists_all_fields_as_required() {
        let schema = paragraph_analysis_schema();
        assert_eq!(schema["type"], "OBJECT");
        assert_eq!(
            schema["required"],
            json!(["paragraphType", "mainIdea", "keyPoints", "tone"])
        );
        assert_eq!(schema["properties"]["keyPoints"]["items"]["type"], "STRING");
        assert_eq!(
            schema["properties"]["mainIdea"]["description"],
            "The main idea of the paragraph."
        );
    }
}
