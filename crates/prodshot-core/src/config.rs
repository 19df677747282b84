use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::generate::{gemini, stability};
use crate::http::{DOWNLOAD_USER_AGENT, PAGE_USER_AGENT};
use crate::select::DEFAULT_MATCH_THRESHOLD;

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const STABILITY_API_KEY_VAR: &str = "STABILITY_API_KEY";

/// Prompt-generation settings (`[gemini]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: gemini::DEFAULT_API_BASE.to_string(),
            model: gemini::DEFAULT_MODEL.to_string(),
        }
    }
}

/// Image-generation settings (`[stability]` section).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StabilityConfig {
    pub endpoint: String,
    pub output_format: String,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            endpoint: stability::DEFAULT_ENDPOINT.to_string(),
            output_format: stability::DEFAULT_OUTPUT_FORMAT.to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/prodshot/config.toml`.
/// Keys missing from the file take their default value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProdshotConfig {
    /// Similarity an image must exceed (alt or filename) to count as a match.
    pub match_threshold: f64,
    /// Directory for output files. None = current working directory.
    pub output_dir: Option<PathBuf>,
    /// File name for a scraped image.
    pub scraped_filename: String,
    /// File name for a generated image.
    pub generated_filename: String,
    /// User-Agent for the product page request.
    pub page_user_agent: String,
    /// User-Agent for the image download.
    pub download_user_agent: String,
    pub gemini: GeminiConfig,
    pub stability: StabilityConfig,
}

impl Default for ProdshotConfig {
    fn default() -> Self {
        Self {
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            output_dir: None,
            scraped_filename: "product.jpg".to_string(),
            generated_filename: "generated_image.png".to_string(),
            page_user_agent: PAGE_USER_AGENT.to_string(),
            download_user_agent: DOWNLOAD_USER_AGENT.to_string(),
            gemini: GeminiConfig::default(),
            stability: StabilityConfig::default(),
        }
    }
}

impl ProdshotConfig {
    /// Output directory, falling back to the current working directory.
    pub fn resolve_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }
}

/// API keys for the generative collaborators. Read once at the process
/// boundary and passed down; nothing below the CLI looks at the environment.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub gemini_api_key: Option<String>,
    pub stability_api_key: Option<String>,
}

impl Credentials {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: std::env::var(GEMINI_API_KEY_VAR).ok(),
            stability_api_key: std::env::var(STABILITY_API_KEY_VAR).ok(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("prodshot")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ProdshotConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit file.
pub fn load_or_init_at(path: &Path) -> Result<ProdshotConfig> {
    if !path.exists() {
        let default_cfg = ProdshotConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let cfg: ProdshotConfig =
        toml::from_str(&data).with_context(|| format!("parsing {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load_or_init`], but an unreadable or malformed file only costs a
/// warning: the run continues with defaults.
pub fn load_or_default() -> ProdshotConfig {
    match load_or_init() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("config unusable, using defaults: {:#}", e);
            ProdshotConfig::default()
        }
    }
}
