//! # readmegen Library
//!
//! Turns project metadata into a formatted README and scores the result.
//!
//! The pipeline is a handful of pure functions:
//!
//! - [`generate_readme`]: config → markdown (badges, sections, license, author, footer)
//! - [`format_markdown`]: consistent blank-line spacing
//! - [`validate_markdown`]: suspicious links and unclosed code fences
//! - [`analyze_readme`]: heuristic 0–100 documentation score with improvement hints
//!
//! [`Session`] wraps them for interactive use: it owns the config, persists
//! every edit through a [`KeyValueStore`] and re-renders after each change.
//!
//! ## Usage
//!
//! ```rust
//! use readmegen::{ProjectConfig, Section, analyze_readme, generate_readme, validate_markdown};
//!
//! let config = ProjectConfig {
//!     name: "Foo".to_string(),
//!     description: "Bar".to_string(),
//!     sections: vec![Section::required("s1", "Usage", "Run it")],
//!     ..ProjectConfig::default()
//! };
//!
//! let readme = generate_readme(&config);
//! assert!(readme.starts_with("# Foo"));
//! assert!(validate_markdown(&readme).is_empty());
//! println!("score: {}", analyze_readme(&readme).score);
//! ```

pub mod analyzer;
pub mod badge;
pub mod cli;
pub mod formatter;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod storage;
pub mod validator;

pub use analyzer::{AnalyzerResult, Improvement, analyze_readme};
pub use badge::{render_badge, render_badges};
pub use formatter::format_markdown;
pub use generator::generate_readme;
pub use model::{Badge, BadgeKind, ProjectConfig, Section, Theme};
pub use pipeline::{Rendered, render};
pub use session::{Field, Session};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence};
pub use validator::validate_markdown;

use anyhow::{Context, Result};
use log::info;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Default file name of the generated document.
pub const DEFAULT_OUTPUT: &str = "README.md";

/// Writes a generated document to `path`, or to stdout when `path` is `-`.
pub async fn write_readme(path: &Path, markdown: &str) -> Result<()> {
    if path == Path::new("-") {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(markdown.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        return stdout.flush().await.context("Failed to flush stdout");
    }

    let file = File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(markdown.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writer.write_all(b"\n").await?;
    writer.flush().await.context("Failed to flush output")?;

    info!("Wrote {} ({} bytes)", path.display(), markdown.len() + 1);
    Ok(())
}
