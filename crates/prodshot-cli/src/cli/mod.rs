//! CLI for prodshot.

mod input;
mod report;

use anyhow::Result;
use clap::Parser;
use prodshot_core::config::{self, Credentials};
use prodshot_core::generate::{GeminiPromptGenerator, StabilityImageGenerator};
use prodshot_core::pipeline::Pipeline;

/// Find a product photo for a shop URL, or generate one.
#[derive(Debug, Parser)]
#[command(name = "prodshot")]
#[command(
    about = "prodshot: fetch the product image from a shop page, or generate one",
    long_about = None
)]
pub struct Cli {
    /// Product page URL. Prompted for on stdin when omitted.
    pub url: Option<String>,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Credentials may live in a local .env file.
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env loaded: {}", e);
        }
        let cfg = config::load_or_default();
        tracing::debug!("loaded config: {:?}", cfg);
        let credentials = Credentials::from_env();

        let url = match cli.url {
            Some(url) => url,
            None => input::prompt_for_url()?,
        };

        let prompts = GeminiPromptGenerator::new(
            credentials.gemini_api_key,
            &cfg.gemini.api_base,
            &cfg.gemini.model,
        );
        let images = StabilityImageGenerator::new(
            credentials.stability_api_key,
            &cfg.stability.endpoint,
            &cfg.stability.output_format,
        );
        let output_dir = cfg.resolve_output_dir()?;
        let pipeline = Pipeline::from_config(&cfg, &output_dir, &prompts, &images);

        let outcome = pipeline.run(&url, &mut report::print_event)?;
        tracing::info!(?outcome, "run finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
