//! Product context supplied by the user.

use serde::{Deserialize, Serialize};

use crate::error::MimicError;

/// The user's own product, as entered in the product form.
///
/// All fields are free text. `name` and `description` must be filled in
/// before an analysis is allowed; the target audience is optional context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    pub name: String,
    pub description: String,
    pub target_audience: String,
}

impl ProductDetails {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        target_audience: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            target_audience: target_audience.into(),
        }
    }

    /// Check the fields required before an analyze call may start.
    pub fn validate_for_analysis(&self) -> Result<(), MimicError> {
        if self.name.trim().is_empty() || self.description.trim().is_empty() {
            return Err(MimicError::InvalidInput(
                "Please fill in your product details.".to_string(),
            ));
        }
        Ok(())
    }
}
