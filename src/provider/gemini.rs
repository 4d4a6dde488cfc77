//! Google Gemini `generateContent` backend.
//!
//! The analyze call requests a strict `responseSchema`, so a conforming
//! backend guarantees the six-field shape and the parse-error failure
//! mode disappears. Schema enforcement is a backend capability, not a
//! guarantee — the response text still goes through the fence-stripping
//! free parse as fallback.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::InferenceProvider;
use super::prompt::analysis_prompt;
use crate::config::MimicConfig;
use crate::error::MimicError;
use crate::extract::{extract_error_message, extract_generated_image, parse_json_from_text};
use crate::types::{
    AnalysisResult, ProductDetails, SourceAsset, analysis_response_schema, to_data_uri,
};

const PROVIDER_NAME: &str = "Gemini";

/// Provider speaking the Gemini `generateContent` protocol.
pub struct GeminiProvider {
    config: MimicConfig,
    http_client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: MimicConfig) -> Self {
        Self::with_http_client(config, reqwest::Client::new())
    }

    /// Use a shared HTTP client instead of constructing one.
    pub fn with_http_client(config: MimicConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Issue one `generateContent` call for `model` and return the parsed body.
    async fn post_generate_content(
        &self,
        model: &str,
        payload: Value,
    ) -> Result<Value, MimicError> {
        let api_key = self.config.require_api_key()?;
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);
        debug!(model, "sending generateContent request");

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            let message = extract_error_message(&body, PROVIDER_NAME);
            warn!(status = status.as_u16(), error = %message, "generateContent failed");
            return Err(MimicError::ApiError {
                code: status.as_u16(),
                message,
                details: Some(body),
            });
        }

        Ok(body)
    }
}

/// Concatenated text parts of the first candidate.
fn candidate_text(body: &Value) -> String {
    body.get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

/// First inline image payload across all candidates, as a data URI.
fn candidate_inline_image(body: &Value) -> Option<String> {
    let candidates = body.get("candidates").and_then(Value::as_array)?;
    for candidate in candidates {
        let Some(parts) = candidate
            .get("content")
            .and_then(|content| content.get("parts"))
            .and_then(Value::as_array)
        else {
            continue;
        };
        for part in parts {
            let Some(inline) = part.get("inlineData").or_else(|| part.get("inline_data")) else {
                continue;
            };
            if let Some(data) = inline
                .get("data")
                .and_then(Value::as_str)
                .filter(|d| !d.is_empty())
            {
                let mime = inline.get("mimeType").and_then(Value::as_str);
                return Some(to_data_uri(data, mime));
            }
        }
    }
    None
}

#[async_trait]
impl InferenceProvider for GeminiProvider {
    async fn analyze(
        &self,
        asset: &SourceAsset,
        details: &ProductDetails,
    ) -> Result<AnalysisResult, MimicError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": analysis_prompt(details)},
                    {"inlineData": {"mimeType": asset.mime_type, "data": asset.base64_data()}},
                ],
            }],
            "generationConfig": {
                "temperature": 0.2,
                "responseMimeType": "application/json",
                "responseSchema": analysis_response_schema(),
            },
        });

        let body = self
            .post_generate_content(&self.config.text_model, payload)
            .await?;
        let text = candidate_text(&body);

        if text.trim().is_empty() {
            return Err(MimicError::ContentError(format!(
                "No analysis content returned from {PROVIDER_NAME}."
            )));
        }

        let parsed = parse_json_from_text(&text)?;
        serde_json::from_value(parsed).map_err(|e| {
            MimicError::JsonError(format!("Analysis JSON did not match the expected shape: {e}"))
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, MimicError> {
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
            "generationConfig": {
                "responseModalities": ["TEXT", "IMAGE"],
            },
        });

        let body = self
            .post_generate_content(&self.config.image_model, payload)
            .await?;

        if let Some(image) = candidate_inline_image(&body) {
            return Ok(image);
        }

        // Some gateways wrap Gemini output in a chat-completion envelope.
        warn!("no inline image data; scanning response with chat-completion strategies");
        extract_generated_image(&body).ok_or_else(|| {
            MimicError::ContentError(
                "Image generation returned no usable image data. Verify the configured image model supports image output.".to_string(),
            )
        })
    }
}
