//! Generative-text enrichment client
//!
//! One seam for the external text-generation call: a prompt goes out as a
//! single-turn exchange and sanitized free text comes back. No retries, no
//! caching, no rate limiting; identical prompts issued twice make two calls.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const USER_AGENT: &str = concat!("raga-web/", env!("CARGO_PKG_VERSION"));

// Generation parameters of the deployed service
const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 512;
const RESPONSE_MIME_TYPE: &str = "text/plain";

/// Enrichment call failure
///
/// Callers render the message in place of generated text rather than
/// failing the request.
#[derive(Debug, Error)]
pub enum EnrichmentFailure {
    /// Transport-level failure (DNS, connect, TLS, reset)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Service answered with a non-success status (auth, quota, server error)
    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    /// Response body was not the expected JSON shape
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Text generation seam
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate sanitized text for a prompt
    ///
    /// An empty or absent response is `Ok(String::new())`, not a failure.
    async fn generate(&self, prompt: &str) -> Result<String, EnrichmentFailure>;
}

/// Strip emphasis asterisks and surrounding whitespace.
///
/// Idempotent: `sanitize(&sanitize(s)) == sanitize(s)`.
pub fn sanitize(raw: &str) -> String {
    raw.replace('*', "").trim().to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate
    fn into_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Gemini `generateContent` REST client
pub struct GeminiClient {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a client for `model` under `base_url`
    /// (e.g. `https://generativelanguage.googleapis.com/v1beta`).
    ///
    /// Uses the transport's default timeout.
    pub fn new(api_key: String, model: &str, base_url: &str) -> Result<Self, EnrichmentFailure> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EnrichmentFailure::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, EnrichmentFailure> {
        let request = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: RESPONSE_MIME_TYPE,
            },
        };

        tracing::debug!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            "Requesting generated text"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| EnrichmentFailure::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Generative-text service returned error");
            return Err(EnrichmentFailure::ApiError(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EnrichmentFailure::ParseError(e.to_string()))?;

        Ok(sanitize(&body.into_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_asterisks_and_trims() {
        assert_eq!(sanitize("  **Yaman** is *serene*.\n"), "Yaman is serene.");
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["* leading", "a*b*c", "  plain  ", "***", "", "\n* bullet\n* two\n"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_sanitize_without_asterisks_only_trims() {
        assert_eq!(sanitize("\t Bhairav at dawn \n"), "Bhairav at dawn");
    }

    #[test]
    fn test_response_text_concatenates_first_candidate_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"role":"model","parts":[{"text":"Part one. "},{"text":"Part two."}]}},
                {"content":{"role":"model","parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.into_text(), "Part one. Part two.");
    }

    #[test]
    fn test_empty_response_is_empty_text() {
        let body: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_text(), "");

        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(body.into_text(), "");
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type: RESPONSE_MIME_TYPE,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 512);
        assert_eq!(json["generationConfig"]["responseMimeType"], "text/plain");
    }

    #[test]
    fn test_endpoint_built_from_model_and_base() {
        let client = GeminiClient::new(
            "key".to_string(),
            "gemini-2.0-flash",
            "https://example.test/v1beta/",
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
