//! Assemble, then validate and analyze the same text.

use crate::analyzer::{AnalyzerResult, analyze_readme};
use crate::generator::generate_readme;
use crate::model::ProjectConfig;
use crate::validator::validate_markdown;

/// Everything the shell shows for one config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub markdown: String,
    pub issues: Vec<String>,
    pub analysis: AnalyzerResult,
}

impl Rendered {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs the whole pipeline for a config. Cheap enough to call after every edit.
pub fn render(config: &ProjectConfig) -> Rendered {
    let markdown = generate_readme(config);
    let issues = validate_markdown(&markdown);
    let analysis = analyze_readme(&markdown);
    Rendered {
        markdown,
        issues,
        analysis,
    }
}
