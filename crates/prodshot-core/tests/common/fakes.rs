//! Recording stand-ins for the generative collaborators.

#![allow(dead_code)]

use prodshot_core::generate::{GenerationError, ImageGenerator, PromptGenerator};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake";

pub struct FakePrompts {
    reply: Option<String>,
    pub calls: RefCell<Vec<String>>,
}

impl FakePrompts {
    pub fn replying(prompt: &str) -> Self {
        Self {
            reply: Some(prompt.to_string()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Fails every call with an empty-response error.
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl PromptGenerator for FakePrompts {
    fn image_prompt(&self, product_name: &str) -> Result<String, GenerationError> {
        self.calls.borrow_mut().push(product_name.to_string());
        self.reply.clone().ok_or(GenerationError::EmptyResponse)
    }
}

pub struct FakeImages {
    fail: bool,
    pub calls: RefCell<Vec<(String, PathBuf)>>,
}

impl FakeImages {
    pub fn writing() -> Self {
        Self {
            fail: false,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Fails every call as if the API key were missing.
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl ImageGenerator for FakeImages {
    fn generate_image(&self, prompt: &str, dest: &Path) -> Result<u64, GenerationError> {
        self.calls
            .borrow_mut()
            .push((prompt.to_string(), dest.to_path_buf()));
        if self.fail {
            return Err(GenerationError::MissingApiKey("STABILITY_API_KEY"));
        }
        fs::write(dest, FAKE_PNG)?;
        Ok(FAKE_PNG.len() as u64)
    }
}
