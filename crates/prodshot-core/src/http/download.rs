//! Streamed image download to a local file.

use anyhow::{Context, Result};
use curl::easy::Easy;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::HttpClient;

/// Receive buffer size requested from libcurl; the body reaches disk in
/// chunks of at most this many bytes.
const CHUNK_SIZE: usize = 16 * 1024;

/// Temporary file suffix used until the transfer succeeds.
pub const TEMP_SUFFIX: &str = ".part";

/// `product.jpg` -> `product.jpg.part`.
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

impl HttpClient {
    /// Streams `url` into `dest`. The body goes to `dest.part` first and is
    /// renamed into place only on a 2xx response, so a failed download never
    /// leaves a truncated or HTML error page behind under the final name.
    /// Returns the number of bytes written.
    pub fn download_to_file(&self, url: &str, dest: &Path) -> Result<u64> {
        let temp_path = temp_path_for(dest);
        let result = self.download_to_temp(url, &temp_path);
        match result {
            Ok(written) => {
                fs::rename(&temp_path, dest).with_context(|| {
                    format!("rename {} -> {}", temp_path.display(), dest.display())
                })?;
                tracing::info!(url, path = %dest.display(), bytes = written, "image saved");
                Ok(written)
            }
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                Err(e)
            }
        }
    }

    fn download_to_temp(&self, url: &str, temp_path: &Path) -> Result<u64> {
        let mut file = File::create(temp_path)
            .with_context(|| format!("create {}", temp_path.display()))?;
        let mut written: u64 = 0;
        let mut write_error: Option<std::io::Error> = None;

        let mut easy = Easy::new();
        easy.url(url).context("invalid URL")?;
        easy.follow_location(true)?;
        easy.useragent(&self.download_user_agent)?;
        easy.buffer_size(CHUNK_SIZE)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_error = Some(e);
                    // Short count makes libcurl abort with a write error.
                    Ok(0)
                }
            })?;
            if let Err(e) = transfer.perform() {
                drop(transfer);
                if e.is_write_error() {
                    if let Some(io_err) = write_error.take() {
                        return Err(io_err)
                            .with_context(|| format!("write {}", temp_path.display()));
                    }
                }
                return Err(e).context("image GET failed");
            }
        }

        let code = easy.response_code().context("no response code")?;
        if !(200..300).contains(&code) {
            anyhow::bail!("GET {} returned HTTP {}", url, code);
        }
        file.flush()?;
        Ok(written)
    }
}
