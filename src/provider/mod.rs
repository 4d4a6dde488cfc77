//! Inference provider capability and concrete backends.
//!
//! Both backends implement the same two-operation contract; which one is
//! used is a configuration choice, not a source-level one. The providers
//! are stateless and reentrant — mutual exclusion between actions lives
//! in the session controller.

mod gemini;
mod openrouter;
mod prompt;

pub use gemini::GeminiProvider;
pub use openrouter::OpenRouterProvider;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{Backend, MimicConfig};
use crate::error::MimicError;
use crate::types::{AnalysisResult, ProductDetails, SourceAsset};

/// A remote service that deconstructs a competitor asset into a strategy
/// breakdown and renders marketing images from a prompt.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Analyze the competitor asset against the user's product details.
    ///
    /// Performs exactly one outbound call; no retries, no caching.
    async fn analyze(
        &self,
        asset: &SourceAsset,
        details: &ProductDetails,
    ) -> Result<AnalysisResult, MimicError>;

    /// Render a marketing image for the prompt, returning a displayable
    /// image reference (data URI or remote URL).
    async fn generate(&self, prompt: &str) -> Result<String, MimicError>;
}

/// Build the provider selected by the configuration.
pub fn provider_for(config: MimicConfig) -> Arc<dyn InferenceProvider> {
    match config.backend {
        Backend::OpenRouter => Arc::new(OpenRouterProvider::new(config)),
        Backend::Gemini => Arc::new(GeminiProvider::new(config)),
    }
}
