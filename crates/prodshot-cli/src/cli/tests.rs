//! CLI parse tests.

use super::Cli;
use clap::Parser;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).unwrap()
}

#[test]
fn cli_parse_url() {
    let cli = parse(&["prodshot", "https://store.example.com/red-running-shoes-42.html"]);
    assert_eq!(
        cli.url.as_deref(),
        Some("https://store.example.com/red-running-shoes-42.html")
    );
}

#[test]
fn cli_parse_no_url_prompts() {
    assert!(parse(&["prodshot"]).url.is_none());
}

#[test]
fn cli_rejects_extra_args() {
    assert!(Cli::try_parse_from(["prodshot", "a", "b"]).is_err());
    assert!(Cli::try_parse_from(["prodshot", "--jobs", "4"]).is_err());
}
