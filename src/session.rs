//! Session state controller for the analyze → generate workflow.
//!
//! The session owns every user-visible state slice: the selected source
//! asset, the product details, the current analysis, the generated-asset
//! gallery (newest first), the error slot, and one busy flag per action.
//! Each action checks its preconditions, runs exactly one provider call,
//! and commits either a full state update or none at all. Failures are
//! stored as a single user-visible string and never propagate as panics.

use std::sync::Arc;

use tracing::{debug, error};

use crate::config::MimicConfig;
use crate::error::MimicError;
use crate::provider::{InferenceProvider, provider_for};
use crate::types::{AnalysisResult, GeneratedAsset, ProductDetails, SourceAsset};

/// Drives the workflow against an [`InferenceProvider`].
///
/// The two busy flags are mutually non-blocking: new images can be
/// generated while an earlier analysis stands. Each action is
/// non-reentrant while its own flag is set.
pub struct MimicSession {
    provider: Arc<dyn InferenceProvider>,
    source: Option<SourceAsset>,
    product: ProductDetails,
    analysis: Option<AnalysisResult>,
    assets: Vec<GeneratedAsset>,
    error: Option<String>,
    analyzing: bool,
    generating: bool,
}

impl MimicSession {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self {
            provider,
            source: None,
            product: ProductDetails::default(),
            analysis: None,
            assets: Vec::new(),
            error: None,
            analyzing: false,
            generating: false,
        }
    }

    /// Build the provider from configuration and wrap it in a session.
    pub fn from_config(config: MimicConfig) -> Self {
        Self::new(provider_for(config))
    }

    pub fn source(&self) -> Option<&SourceAsset> {
        self.source.as_ref()
    }

    pub fn product(&self) -> &ProductDetails {
        &self.product
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Generated assets, newest first.
    pub fn assets(&self) -> &[GeneratedAsset] {
        &self.assets
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn set_source(&mut self, asset: SourceAsset) {
        self.source = Some(asset);
    }

    /// Clearing the source also discards the analysis derived from it.
    pub fn clear_source(&mut self) {
        self.source = None;
        self.analysis = None;
    }

    pub fn set_product(&mut self, product: ProductDetails) {
        self.product = product;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Run the analyze flow: precondition checks, then one provider call.
    ///
    /// On success the previous analysis is replaced; on failure the state
    /// slices are left untouched and the error slot holds the
    /// user-visible message. The busy flag is cleared on both paths.
    pub async fn analyze(&mut self) -> Result<(), MimicError> {
        if self.analyzing {
            return self.fail_precondition("Analysis is already in progress.");
        }
        if self.source.is_none() {
            return self.fail_precondition("Please upload a competitor file.");
        }
        if let Err(err) = self.product.validate_for_analysis() {
            self.error = Some(err.user_message());
            return Err(err);
        }

        self.error = None;
        self.analysis = None;
        self.analyzing = true;
        debug!(product = %self.product.name, "starting competitor asset analysis");

        let provider = Arc::clone(&self.provider);
        let result = match self.source.as_ref() {
            Some(source) => provider.analyze(source, &self.product).await,
            None => Err(MimicError::InvalidInput(
                "Please upload a competitor file.".to_string(),
            )),
        };
        self.analyzing = false;

        match result {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "analysis failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Run the generate flow against the current analysis.
    ///
    /// May be invoked repeatedly: each success prepends a new asset to
    /// the gallery. Requires a live analysis and the generate flag clear.
    pub async fn generate(&mut self) -> Result<(), MimicError> {
        if self.generating {
            return self.fail_precondition("Image generation is already in progress.");
        }
        let Some(prompt) = self
            .analysis
            .as_ref()
            .map(|analysis| analysis.suggested_prompt.clone())
        else {
            return self.fail_precondition("Analyze a competitor asset before generating.");
        };

        self.error = None;
        self.generating = true;
        debug!("starting marketing image generation");

        let provider = Arc::clone(&self.provider);
        let result = provider.generate(&prompt).await;
        self.generating = false;

        match result {
            Ok(image_url) => {
                self.assets.insert(0, GeneratedAsset::new(image_url, prompt));
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "image generation failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Store a precondition failure and return it without touching the
    /// provider.
    fn fail_precondition(&mut self, message: &str) -> Result<(), MimicError> {
        let err = MimicError::InvalidInput(message.to_string());
        self.error = Some(err.user_message());
        Err(err)
    }
}
