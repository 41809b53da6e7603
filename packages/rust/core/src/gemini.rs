//! Gemini text-generation client.
//!
//! One POST to the `generateContent` endpoint, no streaming. The client is
//! constructed explicitly with its credential and passed down the pipeline,
//! never held as ambient global state, so tests can point it at a mock
//! server via [`GeminiClient::with_base_url`].

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use webaudit_shared::{GenerationConfig, Result, WebAuditError};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    api_key: String,
    model: String,
    generation: GenerationConfig,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    /// Create a client for `model` authenticated with `api_key`.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, generation: GenerationConfig) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            generation,
            http: reqwest::Client::new(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Override the API base URL (for tests against a mock server).
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// The model this client targets.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(&self.api_key)
                .map_err(|e| WebAuditError::Model(format!("invalid API key header: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Submit `prompt` and block until the complete response text arrives.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: WireGenerationConfig::from(&self.generation),
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Gemini generate request");

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&request)
            .send()
            .await
            .map_err(|e| WebAuditError::Model(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(WebAuditError::Model(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| WebAuditError::Model(format!("malformed response body: {e}")))?;

        generated
            .text()
            .ok_or_else(|| WebAuditError::Model("no candidates in response".into()))
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
}

impl From<&GenerationConfig> for WireGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .iter()
                .map(|p| p.text.as_str())
                .collect::<String>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn response_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [
                { "content": { "parts": [{ "text": text }], "role": "model" },
                  "finishReason": "STOP" }
            ]
        })
    }

    #[tokio::test]
    async fn sends_prompt_and_decoding_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "audit this" }] }],
                "generationConfig": { "temperature": 0.1, "topP": 0.8, "topK": 40 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body("📊 OVERALL SCORE: 88/100 ⚠️")))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new("test-key", "gemini-2.5-flash", GenerationConfig::default())
            .with_base_url(&server.uri());

        let text = client.generate("audit this").await.unwrap();
        assert_eq!(text, "📊 OVERALL SCORE: 88/100 ⚠️");
    }

    #[tokio::test]
    async fn concatenates_multiple_text_parts() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [
                    { "content": { "parts": [{ "text": "first " }, { "text": "second" }] } }
                ]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", "gemini-2.5-flash", GenerationConfig::default())
            .with_base_url(&server.uri());

        assert_eq!(client.generate("p").await.unwrap(), "first second");
    }

    #[tokio::test]
    async fn api_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_string(r#"{"error":{"message":"quota exceeded"}}"#),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", "gemini-2.5-flash", GenerationConfig::default())
            .with_base_url(&server.uri());

        let err = client.generate("p").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("429"));
        assert!(msg.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn empty_candidates_is_a_model_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = GeminiClient::new("k", "gemini-2.5-flash", GenerationConfig::default())
            .with_base_url(&server.uri());

        let err = client.generate("p").await.unwrap_err();
        assert!(matches!(err, WebAuditError::Model(_)));
    }
}
