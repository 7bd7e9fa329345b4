//! Request and response bodies shared by the HTTP front and its tests.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Body of `POST /api/ask`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub extractive_summary: Option<String>,
}

impl SummaryRequest {
    /// The extractive summary, or [`Error::InvalidInput`] if absent or empty.
    pub fn text(&self) -> Result<&str> {
        require_text("extractiveSummary", self.extractive_summary.as_deref())
    }
}

/// Body of `POST /api/structured-summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRequest {
    #[serde(default)]
    pub abstractive_summary: Option<String>,
}

impl StructuredRequest {
    /// The abstractive summary, or [`Error::InvalidInput`] if absent or empty.
    pub fn text(&self) -> Result<&str> {
        require_text("abstractiveSummary", self.abstractive_summary.as_deref())
    }
}

/// Success body of `POST /api/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// Existence check only: length and content are not inspected.
fn require_text<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(Error::InvalidInput(format!("{} is required", field))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_request_reads_camel_case() {
        let req: SummaryRequest =
            serde_json::from_str(r#"{"extractiveSummary": "Cats sleep."}"#).unwrap();
        assert_eq!(req.text().unwrap(), "Cats sleep.");
    }

    #[test]
    fn test_missing_field_is_invalid_input() {
        let req: SummaryRequest = serde_json::from_str("{}").unwrap();
        let err = req.text().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid input: extractiveSummary is required"
        );
    }

    #[test]
    fn test_null_and_empty_are_invalid() {
        for body in [r#"{"abstractiveSummary": null}"#, r#"{"abstractiveSummary": ""}"#] {
            let req: StructuredRequest = serde_json::from_str(body).unwrap();
            assert!(matches!(req.text(), Err(Error::InvalidInput(_))), "{}", body);
        }
    }

    #[test]
    fn test_whitespace_only_is_accepted() {
        let req = StructuredRequest {
            abstractive_summary: Some("   ".to_string()),
        };
        assert_eq!(req.text().unwrap(), "   ");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let req: SummaryRequest =
            serde_json::from_str(r#"{"extractiveSummary": "x", "lang": "en"}"#).unwrap();
        assert!(req.text().is_ok());
    }

    #[test]
    fn test_summary_response_shape() {
        let body = SummaryResponse {
            summary: "done".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "summary": "done" })
        );
    }
}
