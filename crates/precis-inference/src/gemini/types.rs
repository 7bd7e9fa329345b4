//! Generative Language API request and response types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// GENERATE CONTENT REQUEST
// =============================================================================

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn with one text part.
    pub fn user_text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: None,
        }
    }

    /// Constrain the reply to JSON matching `schema`.
    pub fn with_json_schema(mut self, schema: &Value) -> Self {
        self.generation_config = Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(schema.clone()),
        });
        self
    }
}

/// Output constraints for a generation request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

/// A conversation turn.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One piece of a turn. Only text parts are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

// =============================================================================
// GENERATE CONTENT RESPONSE
// =============================================================================

/// Response from `models/{model}:generateContent`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    ///
    /// `None` when any link of `candidates[0].content.parts[0].text` is
    /// missing.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }

    /// Why the reply carries no text, for error messages.
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt blocked: {}", reason);
        }
        match self.candidates.first() {
            None => "no candidates".to_string(),
            Some(c) => match c.finish_reason.as_deref() {
                Some(reason) => format!("finish reason {}", reason),
                None => "no text part".to_string(),
            },
        }
    }
}

/// Single generated candidate.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Feedback on the prompt itself (set when the prompt was blocked).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error envelope returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct GeminiErrorResponse {
    pub error: GeminiError,
}

/// Error detail.
#[derive(Debug, Deserialize)]
pub struct GeminiError {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_text_request_shape() {
        let req = GenerateContentRequest::user_text("hello");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_json_schema_request_shape() {
        let schema = json!({ "type": "OBJECT" });
        let req = GenerateContentRequest::user_text("hi").with_json_schema(&schema);
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(v["generationConfig"]["responseSchema"], schema);
    }

    #[test]
    fn test_first_text_present() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "A summary." }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(resp.first_text(), Some("A summary."));
    }

    #[test]
    fn test_first_text_absent_at_each_level() {
        let cases = [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{}] } }] }),
        ];
        for case in cases {
            let resp: GenerateContentResponse = serde_json::from_value(case.clone()).unwrap();
            assert!(resp.first_text().is_none(), "{}", case);
        }
    }

    #[test]
    fn test_empty_reason_prefers_block_reason() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert_eq!(resp.empty_reason(), "prompt blocked: SAFETY");
    }

    #[test]
    fn test_empty_reason_finish_reason() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "MAX_TOKENS" }]
        }))
        .unwrap();
        assert_eq!(resp.empty_reason(), "finish reason MAX_TOKENS");
    }

    #[test]
    fn test_error_envelope_parses() {
        let err: GeminiErrorResponse = serde_json::from_value(json!({
            "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
        }))
        .unwrap();
        assert_eq!(err.error.code, Some(400));
        assert_eq!(err.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
