//! Heuristic documentation score for a README.
//!
//! Every check is independent and evaluated exactly once; the score is the
//! sum of the points earned, capped at 100. Failed checks add an entry to
//! [`AnalyzerResult::improvements`].

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Sections every README is expected to have, in reporting order.
pub const ESSENTIAL_SECTIONS: [&str; 5] =
    ["installation", "usage", "features", "contributing", "license"];

const MAX_SCORE: u32 = 100;
const SECTION_POINTS: u32 = 10;
const CODE_POINTS: u32 = 15;
const IMAGE_POINTS: u32 = 10;
const BADGE_POINTS: u32 = 5;
const LENGTH_POINTS: u32 = 10;
const API_POINTS: u32 = 10;
const CONTRIBUTION_POINTS: u32 = 10;
const MIN_LINES: usize = 50;

static SECTION_HEADINGS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ESSENTIAL_SECTIONS
        .iter()
        .map(|name| {
            let pattern = format!(r"(?i)##\s+{name}");
            (*name, Regex::new(&pattern).expect("section pattern is valid"))
        })
        .collect()
});
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)```.*?```").expect("code block pattern is valid"));
static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)!\[.*?\]\(.*?\)").expect("image pattern is valid"));
static SHIELDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https://img\.shields\.io").expect("shields pattern is valid"));
// Alternation binds loosest: a heading mentioning api, or endpoint/route anywhere.
static API_DOCS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)##.*api|endpoint|route").expect("api pattern is valid"));

/// Outcome of [`analyze_readme`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerResult {
    /// 0..=100.
    pub score: u32,
    pub suggestions: Vec<String>,
    pub improvements: Vec<Improvement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Improvement {
    pub category: String,
    pub items: Vec<String>,
}

impl Improvement {
    fn new(category: &str, items: Vec<String>) -> Self {
        Self {
            category: category.to_string(),
            items,
        }
    }

    fn single(category: &str, item: &str) -> Self {
        Self::new(category, vec![item.to_string()])
    }
}

/// Scores markdown text. Pure: the same input always yields the same result.
pub fn analyze_readme(content: &str) -> AnalyzerResult {
    let mut score = 0;
    let mut improvements = Vec::new();

    let mut missing = Vec::new();
    let mut has_contributing = false;
    for (name, pattern) in SECTION_HEADINGS.iter() {
        if pattern.is_match(content) {
            score += SECTION_POINTS;
            has_contributing |= *name == "contributing";
        } else {
            missing.push(format!(
                "Add a {} section to improve documentation completeness",
                capitalize(name)
            ));
        }
    }
    if !missing.is_empty() {
        improvements.push(Improvement::new("Missing Sections", missing));
    }

    if CODE_BLOCK.is_match(content) {
        score += CODE_POINTS;
    } else {
        improvements.push(Improvement::single(
            "Code Examples",
            "Add code examples to demonstrate usage",
        ));
    }

    if IMAGE.is_match(content) {
        score += IMAGE_POINTS;
    } else {
        improvements.push(Improvement::single(
            "Visual Content",
            "Add screenshots or diagrams to better illustrate your project",
        ));
    }

    if SHIELDS.is_match(content) {
        score += BADGE_POINTS;
    } else {
        improvements.push(Improvement::single(
            "Project Status",
            "Add status badges to show project health and metrics",
        ));
    }

    if content.split('\n').count() >= MIN_LINES {
        score += LENGTH_POINTS;
    } else {
        improvements.push(Improvement::single(
            "Content Length",
            "Expand documentation with more detailed explanations",
        ));
    }

    // Without the literal word "api" there is neither a bonus nor a hint.
    if API_DOCS.is_match(content) {
        score += API_POINTS;
    } else if content.contains("api") {
        improvements.push(Improvement::single(
            "API Documentation",
            "Add detailed API documentation with endpoints and examples",
        ));
    }

    let detailed_contribution = content.contains("fork") && content.contains("pull request");
    if detailed_contribution {
        score += CONTRIBUTION_POINTS;
    } else if has_contributing {
        improvements.push(Improvement::single(
            "Contributing Guidelines",
            "Expand contribution guidelines with step-by-step instructions",
        ));
    }

    let score = score.min(MAX_SCORE);
    debug!(
        "Analysis scored {score} with {} improvement area(s)",
        improvements.len()
    );

    AnalyzerResult {
        score,
        suggestions: vec![assessment(score).to_string()],
        improvements,
    }
}

/// Overall verdict for a score.
pub fn assessment(score: u32) -> &'static str {
    match score {
        0..30 => {
            "Your README needs significant improvement. Focus on adding essential sections and more detailed content."
        }
        30..60 => {
            "Your README is on the right track but could benefit from more comprehensive documentation."
        }
        60..80 => {
            "Good README! Consider implementing the suggested improvements to make it even better."
        }
        _ => "Excellent README! Keep maintaining this high quality of documentation.",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
