//! Prompt construction for the analyze operation.

use crate::types::ProductDetails;

/// Single-turn creative-director instructions embedding the product
/// context. Both backends send this text; the JSON-output instruction is
/// appended per backend since the enforcement mechanism differs.
pub(crate) fn analysis_prompt(details: &ProductDetails) -> String {
    format!(
        "You are a world-class e-commerce Creative Director specializing in cross-border trade.\n\
         \n\
         I have uploaded a competitor's asset (image or video).\n\
         My goal is to replicate the SUCCESS of this asset but for MY PRODUCT.\n\
         \n\
         MY PRODUCT DETAILS:\n\
         Name: {name}\n\
         Description: {description}\n\
         Target Audience: {audience}\n\
         \n\
         Please perform the following:\n\
         1. Deconstruct the competitor's visual strategy (lighting, angle, composition, mood).\n\
         2. Identify the key visual hook (why does it sell?).\n\
         3. Create a specialized image generation prompt that applies this successful style to MY PRODUCT.\n\
         4. Write a short, punchy ad copy (English) for my product based on this visual.\n\
         \n\
         Return the result strictly as JSON with the keys visualStyle, sellingPoints, composition, lightingAndMood, suggestedPrompt and adCopy.",
        name = details.name,
        description = details.description,
        audience = details.target_audience,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_product_context() {
        let details = ProductDetails::new("Bamboo Stand", "Ergonomic laptop riser", "Remote workers");
        let prompt = analysis_prompt(&details);
        assert!(prompt.contains("Name: Bamboo Stand"));
        assert!(prompt.contains("Description: Ergonomic laptop riser"));
        assert!(prompt.contains("Target Audience: Remote workers"));
        assert!(prompt.contains("suggestedPrompt"));
    }
}
