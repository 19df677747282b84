//! One run: name the product, look for a matching image on its page, and fall
//! back to generating one.
//!
//! Collaborator failures are handled where they happen and reported as
//! [`Event`]s, with one exception: a failure of the final image generation
//! step is returned to the caller.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

use crate::config::ProdshotConfig;
use crate::generate::{ImageGenerator, PromptGenerator};
use crate::http::HttpClient;
use crate::name::extract_product_name;
use crate::page::image_candidates;
use crate::select::{select_best, ScoreSource, ScoredImage};

/// Progress notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ProductName(String),
    FetchingPage(String),
    /// Page fetch or parse failed; the run continues with generation.
    FetchFailed(String),
    ImageFound {
        url: String,
        score: f64,
        source: ScoreSource,
    },
    NoMatch,
    Saved(PathBuf),
    SaveFailed(String),
    RequestingPrompt,
    PromptReady(String),
    PromptFailed(String),
    GeneratingImage,
    Generated(PathBuf),
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A scraped image was downloaded.
    Saved { url: String, path: PathBuf },
    /// A matching image was found but could not be downloaded.
    DownloadFailed { url: String },
    /// No match; an image was generated.
    Generated { path: PathBuf },
    /// No match and no prompt could be obtained; nothing was generated.
    NoPrompt,
}

/// Wires the heuristics to their collaborators for a single run.
pub struct Pipeline<'a> {
    http: HttpClient,
    prompts: &'a dyn PromptGenerator,
    images: &'a dyn ImageGenerator,
    threshold: f64,
    scraped_path: PathBuf,
    generated_path: PathBuf,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        http: HttpClient,
        prompts: &'a dyn PromptGenerator,
        images: &'a dyn ImageGenerator,
        threshold: f64,
        scraped_path: PathBuf,
        generated_path: PathBuf,
    ) -> Self {
        Self {
            http,
            prompts,
            images,
            threshold,
            scraped_path,
            generated_path,
        }
    }

    /// Pipeline writing into `output_dir` with names, agents and threshold from `cfg`.
    pub fn from_config(
        cfg: &ProdshotConfig,
        output_dir: &Path,
        prompts: &'a dyn PromptGenerator,
        images: &'a dyn ImageGenerator,
    ) -> Self {
        Self::new(
            HttpClient::new(&cfg.page_user_agent, &cfg.download_user_agent),
            prompts,
            images,
            cfg.match_threshold,
            output_dir.join(&cfg.scraped_filename),
            output_dir.join(&cfg.generated_filename),
        )
    }

    pub fn run(&self, page_url: &str, on_event: &mut dyn FnMut(&Event)) -> Result<Outcome> {
        let product_name = extract_product_name(page_url);
        tracing::info!(page_url, product_name = %product_name, "starting run");
        on_event(&Event::ProductName(product_name.clone()));
        on_event(&Event::FetchingPage(page_url.to_string()));

        match self.find_image(page_url, &product_name) {
            Ok(Some(best)) => return Ok(self.save(best, on_event)),
            Ok(None) => on_event(&Event::NoMatch),
            Err(e) => {
                tracing::warn!(page_url, error = %format!("{e:#}"), "scrape failed");
                on_event(&Event::FetchFailed(format!("{e:#}")));
            }
        }

        self.generate(&product_name, on_event)
    }

    /// Fetches the page and picks the best matching image, if any.
    pub fn find_image(&self, page_url: &str, product_name: &str) -> Result<Option<ScoredImage>> {
        let base = Url::parse(page_url).with_context(|| format!("invalid page URL {page_url:?}"))?;
        let html = self.http.fetch_page(page_url)?;
        let candidates = image_candidates(&html, &base);
        tracing::debug!(count = candidates.len(), "image candidates");
        Ok(select_best(product_name, candidates, self.threshold))
    }

    fn save(&self, best: ScoredImage, on_event: &mut dyn FnMut(&Event)) -> Outcome {
        let url = best.candidate.url;
        on_event(&Event::ImageFound {
            url: url.clone(),
            score: best.score,
            source: best.source,
        });
        match self.http.download_to_file(&url, &self.scraped_path) {
            Ok(_) => {
                on_event(&Event::Saved(self.scraped_path.clone()));
                Outcome::Saved {
                    url,
                    path: self.scraped_path.clone(),
                }
            }
            Err(e) => {
                tracing::warn!(url, error = %format!("{e:#}"), "download failed");
                on_event(&Event::SaveFailed(format!("{e:#}")));
                Outcome::DownloadFailed { url }
            }
        }
    }

    fn generate(&self, product_name: &str, on_event: &mut dyn FnMut(&Event)) -> Result<Outcome> {
        on_event(&Event::RequestingPrompt);
        let prompt = match self.prompts.image_prompt(product_name) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!(error = %e, "prompt generation failed");
                on_event(&Event::PromptFailed(e.to_string()));
                return Ok(Outcome::NoPrompt);
            }
        };
        on_event(&Event::PromptReady(prompt.clone()));

        on_event(&Event::GeneratingImage);
        self.images
            .generate_image(&prompt, &self.generated_path)
            .context("image generation failed")?;
        on_event(&Event::Generated(self.generated_path.clone()));
        Ok(Outcome::Generated {
            path: self.generated_path.clone(),
        })
    }
}
