//! Gemini `generateContent` client. Every oracle request in LoanVerify goes out
//! through `LlmClient`; nothing else builds Gemini URLs or headers.
//!
//! The model is pinned to gemini-2.5-flash, and the base URL can be overridden
//! for local mocks.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// The model used for all oracle calls.
pub const MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Base64 document payload with its resolved MIME type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    InlineData(InlineData),
    Text(String),
}

/// A fully-assembled multimodal request. Built by the analysis request builder.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Document parts first, instruction text last.
    pub parts: Vec<Part>,
    pub system_instruction: String,
    pub response_schema: Value,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiContent<'a>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GeminiResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// The single Gemini client. One attempt per call: failures surface
/// immediately and are never retried.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{MODEL}:generateContent", self.base_url)
    }

    /// Makes a raw `generateContent` call, returning the full response object.
    pub async fn call(&self, request: &GenerateRequest) -> Result<GeminiResponse, LlmError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user"),
                parts: request.parts.clone(),
            }],
            system_instruction: GeminiContent {
                role: None,
                parts: vec![Part::Text(request.system_instruction.clone())],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
                temperature: request.temperature,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GeminiResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }

    /// Calls the model and returns the JSON text of the first candidate.
    pub async fn call_json_text(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!("Gemini finish reason: {reason}");
        }
        response.text().ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn sample_request() -> GenerateRequest {
        GenerateRequest {
            parts: vec![
                Part::InlineData(InlineData {
                    mime_type: "application/pdf".to_string(),
                    data: "JVBERi0xLjQ=".to_string(),
                }),
                Part::Text("Analyze these loan documents".to_string()),
            ],
            system_instruction: "You are a credit analyst".to_string(),
            response_schema: json!({ "type": "OBJECT" }),
            temperature: 0.0,
        }
    }

    fn endpoint_path() -> String {
        format!("/v1beta/models/{MODEL}:generateContent")
    }

    #[test]
    fn test_part_wire_shape() {
        let inline = serde_json::to_value(Part::InlineData(InlineData {
            mime_type: "image/png".to_string(),
            data: "AAAA".to_string(),
        }))
        .unwrap();
        assert_eq!(
            inline,
            json!({ "inlineData": { "mimeType": "image/png", "data": "AAAA" } })
        );
        let text = serde_json::to_value(Part::Text("hi".to_string())).unwrap();
        assert_eq!(text, json!({ "text": "hi" }));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_call_sends_contract_and_returns_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "temperature": 0.0
                },
                "systemInstruction": { "parts": [{ "text": "You are a credit analyst" }] },
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "inlineData": { "mimeType": "application/pdf", "data": "JVBERi0xLjQ=" } },
                        { "text": "Analyze these loan documents" }
                    ]
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "{\"ok\":true}" }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 10, "candidatesTokenCount": 3 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("test-key".to_string(), server.uri()).unwrap();
        let text = client.call_json_text(&sample_request()).await.unwrap();
        assert_eq!(text, "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_empty_candidate_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        let err = client.call_json_text(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_api_error_message_extracted_and_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "The document has no pages.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        let err = client.call_json_text(&sample_request()).await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "The document has no pages.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_surfaces_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(endpoint_path()))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = LlmClient::new("k".to_string(), server.uri()).unwrap();
        let err = client.call_json_text(&sample_request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }
}
