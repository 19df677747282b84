//! Text-to-image generation through the Stability AI stable-image API.

use curl::easy::{Easy, Form, List};
use std::fs;
use std::path::Path;

use super::{GenerationError, ImageGenerator};
use crate::http::collect_body;

pub const DEFAULT_ENDPOINT: &str = "https://api.stability.ai/v2beta/stable-image/generate/ultra";
pub const DEFAULT_OUTPUT_FORMAT: &str = "png";

#[derive(Debug, Clone)]
pub struct StabilityImageGenerator {
    api_key: Option<String>,
    endpoint: String,
    output_format: String,
}

impl StabilityImageGenerator {
    pub fn new(
        api_key: Option<String>,
        endpoint: impl Into<String>,
        output_format: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: endpoint.into(),
            output_format: output_format.into(),
        }
    }
}

impl ImageGenerator for StabilityImageGenerator {
    /// POSTs `prompt` as multipart form data and writes the binary body of a
    /// 200 response verbatim to `dest`.
    fn generate_image(&self, prompt: &str, dest: &Path) -> Result<u64, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey("STABILITY_API_KEY"))?;

        let mut form = Form::new();
        form.part("prompt").contents(prompt.as_bytes()).add()?;
        form.part("output_format")
            .contents(self.output_format.as_bytes())
            .add()?;

        let mut headers = List::new();
        headers.append(&format!("authorization: Bearer {api_key}"))?;
        headers.append("accept: image/*")?;

        let mut easy = Easy::new();
        easy.url(&self.endpoint)?;
        easy.http_headers(headers)?;
        easy.httppost(form)?;

        tracing::debug!(endpoint = %self.endpoint, "requesting generated image");
        let body = collect_body(&mut easy)?;
        let status = easy.response_code()?;
        if status != 200 {
            return Err(GenerationError::Api {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        fs::write(dest, &body)?;
        tracing::info!(path = %dest.display(), bytes = body.len(), "generated image saved");
        Ok(body.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_before_network() {
        // Unroutable endpoint: reaching the network would surface as Transport.
        let g = StabilityImageGenerator::new(None, "http://127.0.0.1:9/none", "png");
        let dir = tempfile::tempdir().unwrap();
        let err = g
            .generate_image("a prompt", &dir.path().join("out.png"))
            .unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey("STABILITY_API_KEY")));
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let g = StabilityImageGenerator::new(Some("  ".into()), DEFAULT_ENDPOINT, "png");
        let dir = tempfile::tempdir().unwrap();
        let err = g.generate_image("p", &dir.path().join("x.png")).unwrap_err();
        assert!(matches!(err, GenerationError::MissingApiKey(_)));
    }
}
