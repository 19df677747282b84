//! Generative fallback collaborators.
//!
//! When no scraped image matches, a text model writes an image prompt from the
//! product name ([`PromptGenerator`]) and a text-to-image service renders it
//! ([`ImageGenerator`]). Credentials are handed to the implementations at
//! construction time.

mod error;
pub mod gemini;
pub mod stability;

use std::path::Path;

pub use error::GenerationError;
pub use gemini::GeminiPromptGenerator;
pub use stability::StabilityImageGenerator;

/// Writes a text-to-image prompt describing a studio photo of a product.
pub trait PromptGenerator {
    fn image_prompt(&self, product_name: &str) -> Result<String, GenerationError>;
}

/// Renders a prompt and writes the resulting image to `dest`.
/// Returns the number of bytes written.
pub trait ImageGenerator {
    fn generate_image(&self, prompt: &str, dest: &Path) -> Result<u64, GenerationError>;
}
