//! Defensive response normalization.
//!
//! Generative inference gateways are inconsistent about where they embed
//! generated images or structured text in a chat-completion envelope.
//! This module tries successive known shapes rather than assuming one
//! schema, so interchangeable backend models keep working with no code
//! changes beyond configuration.
//!
//! Image extraction is an ordered list of independent strategies, each a
//! pure function from the raw response to an optional image reference,
//! combined by first success. None of the functions here mutate their
//! input.

mod errors;
mod image;
mod text;

pub use errors::extract_error_message;
pub use image::{extract_generated_image, unwrap_image_like};
pub use text::{extract_text_content, parse_json_from_text};
