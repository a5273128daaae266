//! Structural checks over markdown text.

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

const FENCE: &str = "```";
const ALLOWED_LINK_PREFIXES: [&str; 3] = ["http", "#", "./"];

/// Returns human-readable issues, link problems in document order first and
/// the code fence check last. An empty list means nothing was found.
pub fn validate_markdown(content: &str) -> Vec<String> {
    let mut issues: Vec<String> = LINK
        .captures_iter(content)
        .filter_map(|caps| caps.get(2))
        .map(|url| url.as_str())
        .filter(|url| !ALLOWED_LINK_PREFIXES.iter().any(|p| url.starts_with(p)))
        .map(|url| format!("Invalid link URL: {url}"))
        .collect();

    if content.matches(FENCE).count() % 2 != 0 {
        issues.push("Unclosed code block detected".to_string());
    }

    debug!("Validation found {} issue(s)", issues.len());
    issues
}
