//! Core data types for the analysis and generation workflow.

mod analysis;
mod asset;
mod media;
mod product;

pub use analysis::{AnalysisResult, analysis_response_schema};
pub use asset::GeneratedAsset;
pub use media::{AssetKind, SourceAsset};
pub use product::ProductDetails;

pub(crate) use media::to_data_uri;
