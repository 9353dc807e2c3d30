//! Gemini adapter for schema-constrained location analysis.
//!
//! Calls the `generateContent` REST endpoint with `responseMimeType` and
//! `responseSchema` set, and returns the concatenated text parts.

use crate::domain::DomainError;
use crate::domain::prompt::{AnalysisPrompt, Schema};
use crate::ports::GenerativeModelPort;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Gemini `generateContent` adapter.
///
/// Works against the public Generative Language API or any proxy exposing the
/// same `/models/{model}:generateContent` route.
pub struct GeminiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiAdapter {
    /// Create a new Gemini adapter.
    ///
    /// # Arguments
    /// * `api_url` - Base URL (e.g., "https://generativelanguage.googleapis.com/v1beta")
    /// * `api_key` - API key, sent as `x-goog-api-key`
    /// * `model` - Model name (e.g., "gemini-2.5-flash")
    /// * `timeout` - Optional request timeout; `None` keeps the transport default
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Option<Duration>,
    ) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_url, self.model)
    }

    fn build_request(prompt: &AnalysisPrompt) -> GenerateRequest<'_> {
        GenerateRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.text.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: prompt.mime_type,
                response_schema: &prompt.schema,
            },
        }
    }

    /// Concatenate the text parts of the first candidate.
    ///
    /// A candidate without text yields an empty string (classified upstream as
    /// an empty response). No candidate at all is a transport-level failure.
    fn extract_text(response: GenerateResponse) -> Result<String, DomainError> {
        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "unknown".to_string());
            return Err(DomainError::Transport(format!(
                "no candidates returned (block reason: {})",
                reason
            )));
        };

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                warn!(finish_reason = reason, "model stopped early");
            }
        }

        Ok(candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default())
    }
}

/// `generateContent` request body.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Schema,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

/// `generateContent` response body (fields we use).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[async_trait::async_trait]
impl GenerativeModelPort for GeminiAdapter {
    async fn generate(&self, prompt: &AnalysisPrompt) -> Result<String, DomainError> {
        info!(
            model = %self.model,
            prompt_len = prompt.text.len(),
            "sending prompt to Gemini"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::build_request(prompt))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "Gemini API returned error");
            return Err(DomainError::Transport(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to parse API response: {}", e)))?;

        let text = Self::extract_text(body)?;
        debug!(raw_len = text.len(), "received Gemini response");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
