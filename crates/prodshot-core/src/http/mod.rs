//! Blocking HTTP collaborators built on libcurl (via the `curl` crate).
//!
//! Page fetch and image download run on the current thread. Redirects are
//! followed; timeouts are left at libcurl defaults.
//!
//! Page bodies are decoded as UTF-8 regardless of the declared charset.
//! Invalid sequences (e.g. accented text on a Latin-1 page) become U+FFFD,
//! which lowers the alt-text score of such images.

mod download;

use anyhow::{Context, Result};
use curl::easy::Easy;

/// Browser-like User-Agent for product pages; many shops refuse obvious bots.
pub const PAGE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/96.0.4664.110 Safari/537.36";

/// Generic User-Agent for image downloads.
pub const DOWNLOAD_USER_AGENT: &str = "Mozilla/5.0";

/// Client for the page fetch and the scraped image download.
#[derive(Debug, Clone)]
pub struct HttpClient {
    page_user_agent: String,
    download_user_agent: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(PAGE_USER_AGENT, DOWNLOAD_USER_AGENT)
    }
}

impl HttpClient {
    pub fn new(page_user_agent: impl Into<String>, download_user_agent: impl Into<String>) -> Self {
        Self {
            page_user_agent: page_user_agent.into(),
            download_user_agent: download_user_agent.into(),
        }
    }

    /// GETs `url` and returns the body as (lossy UTF-8) text. Non-2xx is an error.
    pub fn fetch_page(&self, url: &str) -> Result<String> {
        let mut easy = Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.useragent(&self.page_user_agent)?;

        let body = collect_body(&mut easy).context("page GET failed")?;
        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }
        tracing::debug!(url, bytes = body.len(), "fetched page");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

/// Runs the transfer configured on `easy` and returns the whole response body.
pub(crate) fn collect_body(easy: &mut Easy) -> Result<Vec<u8>, curl::Error> {
    let mut body = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()?;
    }
    Ok(body)
}
