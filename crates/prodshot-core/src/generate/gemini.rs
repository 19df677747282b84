//! Prompt generation through the Gemini `generateContent` REST endpoint.

use curl::easy::{Easy, List};
use serde::{Deserialize, Serialize};

use super::{GenerationError, PromptGenerator};
use crate::http::collect_body;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Asks Gemini to write a text-to-image prompt for a product photo.
#[derive(Debug, Clone)]
pub struct GeminiPromptGenerator {
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiPromptGenerator {
    /// A missing key is not an error here: the request goes out without one,
    /// the API rejects it and the caller sees an `Api` error.
    pub fn new(
        api_key: Option<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.unwrap_or_default(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }
}

impl PromptGenerator for GeminiPromptGenerator {
    fn image_prompt(&self, product_name: &str) -> Result<String, GenerationError> {
        let payload = serde_json::to_vec(&GenerateRequest::for_text(&instructions(product_name)))?;

        let mut headers = List::new();
        headers.append("content-type: application/json")?;
        if !self.api_key.is_empty() {
            headers.append(&format!("x-goog-api-key: {}", self.api_key))?;
        }

        let mut easy = Easy::new();
        easy.url(&self.endpoint())?;
        easy.post(true)?;
        easy.post_fields_copy(&payload)?;
        easy.http_headers(headers)?;

        tracing::debug!(model = %self.model, "requesting image prompt");
        let body = collect_body(&mut easy)?;
        let status = easy.response_code()?;
        if !(200..300).contains(&status) {
            return Err(GenerationError::Api {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        parse_prompt(&body)
    }
}

/// Instruction sent to the model for `product_name`.
pub fn instructions(product_name: &str) -> String {
    format!(
        "You write prompts for AI image generators.\n\
         Write one concise, visually descriptive prompt for a professional, \
         high-quality studio photograph of the product below, shown on a clean, \
         neutral background and suitable for an e-commerce listing.\n\
         Reply with the prompt text only.\n\n\
         Product name: \"{product_name}\"\n"
    )
}

/// Concatenated text of the first candidate, trimmed.
fn parse_prompt(body: &[u8]) -> Result<String, GenerationError> {
    let response: GenerateResponse = serde_json::from_slice(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .map(|c| c.content.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

impl GenerateRequest {
    fn for_text(text: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}
