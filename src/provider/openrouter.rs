//! OpenAI-compatible chat-completions backend.
//!
//! Targets OpenRouter by default but speaks the generic gateway protocol:
//! bearer auth plus the `HTTP-Referer` / `X-Title` identification headers
//! on `POST {base_url}/chat/completions`. The analyze contract here is
//! free-parse: the model is instructed to emit bare JSON and the response
//! text goes through the fence-stripping parser.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use super::InferenceProvider;
use super::prompt::analysis_prompt;
use crate::config::MimicConfig;
use crate::error::MimicError;
use crate::extract::{
    extract_error_message, extract_generated_image, extract_text_content, parse_json_from_text,
};
use crate::types::{AnalysisResult, ProductDetails, SourceAsset};

const PROVIDER_NAME: &str = "OpenRouter";

/// Provider speaking the OpenAI-compatible `/chat/completions` protocol.
pub struct OpenRouterProvider {
    config: MimicConfig,
    http_client: reqwest::Client,
}

impl OpenRouterProvider {
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

    /// Issue one chat-completions call and return the parsed body.
    async fn post_chat(&self, payload: Value) -> Result<Value, MimicError> {
        let api_key = self.config.require_api_key()?;
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = ?payload.get("model"), "sending chat completion request");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.app_title)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        // An unreadable body still yields a useful status-based error.
        let body: Value = response.json().await.unwrap_or_else(|_| json!({}));

        if !status.is_success() {
            let message = extract_error_message(&body, PROVIDER_NAME);
            warn!(status = status.as_u16(), error = %message, "chat completion failed");
            return Err(MimicError::ApiError {
                code: status.as_u16(),
                message,
                details: Some(body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl InferenceProvider for OpenRouterProvider {
    async fn analyze(
        &self,
        asset: &SourceAsset,
        details: &ProductDetails,
    ) -> Result<AnalysisResult, MimicError> {
        let prompt = format!(
            "{}\nReturn ONLY valid JSON. No markdown, no extra text.",
            analysis_prompt(details)
        );
        let payload = json!({
            "model": self.config.text_model,
            "temperature": 0.2,
            "response_format": {"type": "json_object"},
            "messages": [{
                "role": "user",
                "content": [
                    {"type": "text", "text": prompt},
                    {"type": "image_url", "image_url": {"url": asset.to_data_uri()}},
                ],
            }],
        });

        let response = self.post_chat(payload).await?;
        let content = response
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .map(extract_text_content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(MimicError::ContentError(format!(
                "No analysis content returned from {PROVIDER_NAME}."
            )));
        }

        let parsed = parse_json_from_text(&content)?;
        serde_json::from_value(parsed).map_err(|e| {
            MimicError::JsonError(format!("Analysis JSON did not match the expected shape: {e}"))
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, MimicError> {
        let payload = json!({
            "model": self.config.image_model,
            "modalities": ["image"],
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self.post_chat(payload).await?;
        extract_generated_image(&response).ok_or_else(|| {
            MimicError::ContentError(
                "Image generation returned no usable image data. Verify the configured image model supports image output on chat completions.".to_string(),
            )
        })
    }
}
