//! Google Gemini `generateContent` backend.
//!
//! Sends one non-streaming request per analysis with the response schema in
//! `generationConfig`, and returns the text of the first candidate.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{GenerateFuture, GenerateRequest, InferenceBackend};
use crate::analysis::ResultSchema;
use crate::config::BackendConfig;
use crate::error::{Result, ScamShieldError};

/// Default Gemini REST endpoint.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini API client.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a backend with an explicit endpoint and request timeout.
    pub fn new(
        api_key: impl Into<String>,
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            ScamShieldError::Transport(format!("Failed to create HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a backend from configuration. Fails when no API key is set.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                ScamShieldError::Config(
                    "No API key configured (set GEMINI_API_KEY or API_KEY)".to_string(),
                )
            })?;

        Self::new(api_key, config.api_url.clone(), config.timeout())
    }

    /// `generateContent` URL for a model.
    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_url, model)
    }

    async fn generate_content(&self, request: &GenerateRequest) -> Result<Option<String>> {
        let body = GeminiRequest::from(request);
        let url = self.endpoint(&request.model);

        tracing::debug!(model = %request.model, "Calling Gemini generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(upstream_error(status, &text));
        }

        let parsed: GeminiResponse = serde_json::from_str(&text).map_err(|e| {
            ScamShieldError::Transport(format!("Unreadable Gemini response envelope: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(ScamShieldError::Upstream {
                status: error.code.unwrap_or(status.as_u16()),
                message: error.message,
            });
        }

        Ok(parsed.into_text())
    }
}

impl InferenceBackend for GeminiBackend {
    fn generate<'a>(&'a self, request: &'a GenerateRequest) -> GenerateFuture<'a> {
        Box::pin(self.generate_content(request))
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

fn upstream_error(status: StatusCode, body: &str) -> ScamShieldError {
    let message = serde_json::from_str::<GeminiErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });

    ScamShieldError::Upstream {
        status: status.as_u16(),
        message,
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    system_instruction: GeminiSystemInstruction<'a>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction<'a> {
    parts: Vec<GeminiTextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiTextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a ResultSchema,
}

impl<'a> From<&'a GenerateRequest> for GeminiRequest<'a> {
    fn from(request: &'a GenerateRequest) -> Self {
        Self {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiTextPart {
                    text: &request.prompt,
                }],
            }],
            system_instruction: GeminiSystemInstruction {
                parts: vec![GeminiTextPart {
                    text: &request.system_instruction,
                }],
            },
            generation_config: GeminiGenerationConfig {
                response_mime_type: "application/json",
                response_schema: request.response_schema,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    error: Option<GeminiError>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate; `None` when there is no text.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        if let Some(reason) = &candidate.finish_reason {
            tracing::debug!(finish_reason = %reason, "Gemini candidate finished");
        }

        let text: String = candidate
            .content?
            .parts
            .into_iter()
            .filter(|part| !part.thought)
            .filter_map(|part| part.text)
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorEnvelope {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    code: Option<u16>,
    message: String,
}
