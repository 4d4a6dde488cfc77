//! # Mimic AI
//!
//! Competitor-asset analysis and marketing image generation engine.
//!
//! The workflow mirrors what a marketer does by hand: study a
//! competitor's best creative, work out why it sells, then shoot the
//! same idea for your own product. Here that is two inference calls —
//! a multimodal analyze call that returns a structured visual strategy
//! breakdown, and a text-to-image generate call that renders a new
//! marketing asset following that strategy.
//!
//! Two backends implement the same [`provider::InferenceProvider`]
//! contract: an OpenAI-compatible chat-completions gateway (OpenRouter)
//! and the Gemini `generateContent` API. Responses are normalized
//! defensively — see [`extract`] — so interchangeable backend models
//! keep working with no code changes beyond configuration.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use mimic_ai::{MimicConfig, MimicSession, ProductDetails, SourceAsset};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mimic_ai::MimicError> {
//!     let mut session = MimicSession::from_config(MimicConfig::from_env());
//!
//!     session.set_source(SourceAsset::from_path("competitor.jpg").await?);
//!     session.set_product(ProductDetails::new(
//!         "Bamboo Stand",
//!         "Ergonomic laptop riser",
//!         "Remote workers",
//!     ));
//!
//!     session.analyze().await?;
//!     session.generate().await?;
//!
//!     let asset = &session.assets()[0];
//!     asset.write_to_dir(".").await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod provider;
pub mod session;
pub mod types;

pub use config::{Backend, MimicConfig};
pub use error::MimicError;
pub use session::MimicSession;
pub use types::{AnalysisResult, AssetKind, GeneratedAsset, ProductDetails, SourceAsset};

/// Commonly used types, one import away.
pub mod prelude {
    pub use crate::config::{Backend, MimicConfig};
    pub use crate::error::MimicError;
    pub use crate::provider::{GeminiProvider, InferenceProvider, OpenRouterProvider};
    pub use crate::session::MimicSession;
    pub use crate::types::{
        AnalysisResult, AssetKind, GeneratedAsset, ProductDetails, SourceAsset,
    };
}
