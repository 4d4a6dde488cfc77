//! The structured creative breakdown produced by the analyze operation.

use serde::{Deserialize, Serialize};

/// Visual strategy breakdown of a competitor asset, mapped onto the
/// user's product.
///
/// Field names serialize in camelCase to match the JSON contract the
/// model is instructed to emit. A result is produced once per successful
/// analyze call and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Overall visual style of the competitor asset
    pub visual_style: String,
    /// The key visual hook: why the asset sells
    pub selling_points: String,
    /// Framing and layout of the shot
    pub composition: String,
    /// Lighting setup and emotional tone
    pub lighting_and_mood: String,
    /// Image generation prompt applying the style to the user's product
    pub suggested_prompt: String,
    /// Short ad copy written for the user's product
    pub ad_copy: String,
}

/// JSON schema for the six-field breakdown, for backends that enforce
/// structured output server-side.
pub fn analysis_response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "visualStyle": {
                "type": "string",
                "description": "Overall visual style of the competitor asset"
            },
            "sellingPoints": {
                "type": "string",
                "description": "The key visual hook and why it sells"
            },
            "composition": {
                "type": "string",
                "description": "Framing and layout of the shot"
            },
            "lightingAndMood": {
                "type": "string",
                "description": "Lighting setup and emotional tone"
            },
            "suggestedPrompt": {
                "type": "string",
                "description": "Image generation prompt applying this style to the user's product"
            },
            "adCopy": {
                "type": "string",
                "description": "Short, punchy ad copy in English"
            }
        },
        "required": [
            "visualStyle",
            "sellingPoints",
            "composition",
            "lightingAndMood",
            "suggestedPrompt",
            "adCopy"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_fields() {
        let json = serde_json::json!({
            "visualStyle": "minimalist studio",
            "sellingPoints": "clean aspirational desk setup",
            "composition": "centered, eye level",
            "lightingAndMood": "soft warm key light",
            "suggestedPrompt": "studio product shot, warm lighting",
            "adCopy": "Work better. Sit taller."
        });
        let result: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(result.visual_style, "minimalist studio");
        assert_eq!(result.suggested_prompt, "studio product shot, warm lighting");
    }

    #[test]
    fn missing_field_is_a_deserialize_error() {
        let json = serde_json::json!({ "visualStyle": "minimalist studio" });
        assert!(serde_json::from_value::<AnalysisResult>(json).is_err());
    }

    #[test]
    fn schema_requires_all_six_fields() {
        let schema = analysis_response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 6);
        for key in required {
            assert!(schema["properties"].get(key.as_str().unwrap()).is_some());
        }
    }
}
