//! Interactive URL prompt.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter the product URL: ";

/// Asks for the product URL on stdin.
pub fn prompt_for_url() -> Result<String> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    read_url(&mut stdin.lock(), &mut stdout.lock())
}

/// Writes the prompt to `output` and reads one line from `input`.
pub fn read_url(input: &mut impl BufRead, output: &mut impl Write) -> Result<String> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("reading URL from stdin")?;
    let url = line.trim();
    if url.is_empty() {
        anyhow::bail!("no URL given");
    }
    Ok(url.to_string())
}
