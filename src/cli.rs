use crate::analyzer::{AnalyzerResult, analyze_readme};
use crate::formatter::format_markdown;
use crate::model::{Badge, BadgeKind, ProjectConfig, SUPPORTED_LICENSES, themes};
use crate::pipeline::render;
use crate::session::{Field, Session};
use crate::storage::{CONFIG_KEY, FileStore, KeyValueStore, MemoryStore, Persistence};
use crate::validator::validate_markdown;
use crate::{DEFAULT_OUTPUT, write_readme};
use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::fs;

#[derive(Debug, Parser)]
#[command(
    name = "readmegen",
    version,
    about = "Builds a README.md from project metadata and scores its documentation quality"
)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the stored config and theme
    #[arg(long, value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Keep edits in memory only
    #[arg(long, global = true, conflicts_with = "store")]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the default config
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Print the stored config as JSON
    Show,
    /// Replace the stored config with a JSON file
    Import { file: PathBuf },
    /// Write the stored config to a JSON file
    Export { file: PathBuf },
    /// Set a config field
    Set {
        #[arg(value_enum)]
        field: FieldArg,
        value: String,
    },
    /// Edit sections
    #[command(subcommand)]
    Section(SectionCommand),
    /// Edit badges
    #[command(subcommand)]
    Badge(BadgeCommand),
    /// List themes, or select one
    Theme { id: Option<String> },
    /// Write the README
    Generate(GenerateArgs),
    /// Check a markdown file (or the generated README) for broken links and fences
    Validate { file: Option<PathBuf> },
    /// Score a markdown file (or the generated README)
    Analyze {
        file: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Normalize blank-line spacing of a markdown file
    Format {
        file: PathBuf,
        /// Rewrite the file instead of printing
        #[arg(long)]
        write: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SectionCommand {
    /// Append an empty optional section
    Add {
        /// Title for the new section
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove an optional section
    Remove { id: String },
    /// Rename a section
    Title { id: String, title: String },
    /// Replace a section's content
    Content {
        id: String,
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        text: Option<String>,
        /// Read the content from a file
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Move a section one place up
    Up { id: String },
    /// Move a section to where another one is
    Move { id: String, target: String },
    /// List sections in render order
    List,
}

#[derive(Debug, Subcommand)]
pub enum BadgeCommand {
    /// Append a badge
    Add {
        text: String,
        color: String,
        #[arg(long, value_enum, default_value_t = KindArg::Custom)]
        kind: KindArg,
    },
    /// Remove the badge at INDEX (0-based)
    Remove { index: usize },
}

/// Config fields `set` can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    Name,
    Description,
    RepoUrl,
    Author,
    License,
    DemoImage,
}

impl From<FieldArg> for Field {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Name => Field::Name,
            FieldArg::Description => Field::Description,
            FieldArg::RepoUrl => Field::RepoUrl,
            FieldArg::Author => Field::Author,
            FieldArg::License => Field::License,
            FieldArg::DemoImage => Field::DemoImage,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// npm version badge for the project name
    Version,
    /// License badge for the configured license
    License,
    /// Badge built from TEXT and COLOR
    Custom,
}

impl From<KindArg> for BadgeKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Version => BadgeKind::Version,
            KindArg::License => BadgeKind::License,
            KindArg::Custom => BadgeKind::Custom,
        }
    }
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Output file, `-` for stdout
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Generate from this JSON config instead of the stored one
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Log filter for the `-v` count; `RUST_LOG` still wins.
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Runs one command against the configured store.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let store: Box<dyn KeyValueStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let dir = cli.store.clone().unwrap_or_else(FileStore::default_dir);
        info!("Using store at {}", dir.display());
        Box::new(FileStore::new(dir))
    };
    let mut session = Session::open(Persistence::new(store));
    match cli.command {
        Command::Init { force } => {
            if has_stored_config(&session) && !force {
                bail!("A config is already stored, use --force to overwrite it");
            }
            session.reset();
            println!("Stored default config");
        }
        Command::Show => println!("{}", to_json(session.config())?),
        Command::Import { file } => {
            let config = read_config(&file).await?;
            session.replace(config);
            println!("Imported {}", file.display());
        }
        Command::Export { file } => {
            fs::write(&file, to_json(session.config())?)
                .await
                .with_context(|| format!("Failed to write {}", file.display()))?;
            println!("Exported to {}", file.display());
        }
        Command::Set { field, value } => {
            let field = Field::from(field);
            if field == Field::License && !SUPPORTED_LICENSES.contains(&value.as_str()) {
                bail!(
                    "Unsupported license '{value}', expected one of: {}",
                    SUPPORTED_LICENSES.join(", ")
                );
            }
            session.set_field(field, value);
        }
        Command::Section(command) => section(&mut session, command).await?,
        Command::Badge(BadgeCommand::Add { text, color, kind }) => {
            session.add_badge(Badge::new(text, color, kind.into()));
        }
        Command::Badge(BadgeCommand::Remove { index }) => {
            let badge = session.remove_badge(index)?;
            println!("Removed badge '{}'", badge.text);
        }
        Command::Theme { id: Some(id) } => session.set_theme(&id)?,
        Command::Theme { id: None } => {
            for theme in themes() {
                let marker = if theme.id == session.theme().id { "*" } else { " " };
                println!("{marker} {:<10} {}", theme.id, theme.name);
            }
        }
        Command::Generate(args) => return generate(&session, args).await,
        Command::Validate { file } => {
            let markdown = markdown_for(&session, file.as_deref()).await?;
            let issues = validate_markdown(&markdown);
            if issues.is_empty() {
                println!("No issues found");
                return Ok(ExitCode::SUCCESS);
            }
            for issue in &issues {
                println!("- {issue}");
            }
            return Ok(ExitCode::FAILURE);
        }
        Command::Analyze { file, json } => {
            let markdown = markdown_for(&session, file.as_deref()).await?;
            let result = analyze_readme(&markdown);
            if json {
                println!("{}", to_json(&result)?);
            } else {
                print_analysis(&result);
            }
        }
        Command::Format { file, write } => {
            let raw = fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let formatted = format_markdown(&raw);
            if write {
                write_readme(&file, &formatted).await?;
            } else {
                println!("{formatted}");
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Whether `init` would overwrite something. An unreadable store counts as
/// empty, the same way loading falls back to the default config.
fn has_stored_config<S: KeyValueStore>(session: &Session<S>) -> bool {
    match session.persistence().store().get_item(CONFIG_KEY) {
        Ok(raw) => raw.is_some(),
        Err(err) => {
            warn!("Could not check the stored config: {err:#}");
            false
        }
    }
}

async fn section<S: KeyValueStore>(
    session: &mut Session<S>,
    command: SectionCommand,
) -> Result<()> {
    match command {
        SectionCommand::Add { title } => {
            let id = session.add_section();
            if let Some(title) = title {
                session.set_section_title(&id, title)?;
            }
            println!("{id}");
        }
        SectionCommand::Remove { id } => {
            if !session.remove_section(&id) {
                bail!("Section '{id}' does not exist or is not optional");
            }
        }
        SectionCommand::Title { id, title } => session.set_section_title(&id, title)?,
        SectionCommand::Content { id, text, file } => {
            let content = match file {
                Some(path) => fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => text.unwrap_or_default(),
            };
            session.set_section_content(&id, content)?;
        }
        SectionCommand::Up { id } => session.move_section_up(&id)?,
        SectionCommand::Move { id, target } => session.move_section(&id, &target)?,
        SectionCommand::List => {
            for s in &session.config().sections {
                let flag = if s.is_optional { "optional" } else { "required" };
                let state = if s.is_rendered() { "" } else { " (empty, skipped)" };
                println!("{:<14} {:<9} {}{state}", s.id, flag, s.title);
            }
        }
    }
    Ok(())
}

async fn generate<S: KeyValueStore>(session: &Session<S>, args: GenerateArgs) -> Result<ExitCode> {
    let rendered = match &args.config {
        Some(path) => render(&read_config(path).await?),
        None => session.rendered(),
    };

    for issue in &rendered.issues {
        warn!("{issue}");
    }
    write_readme(&args.output, &rendered.markdown).await?;
    if args.output != Path::new("-") {
        eprintln!(
            "Wrote {} (score {}%)",
            args.output.display(),
            rendered.analysis.score
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn markdown_for<S: KeyValueStore>(
    session: &Session<S>,
    file: Option<&Path>,
) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => Ok(session.rendered().markdown),
    }
}

async fn read_config(path: &Path) -> Result<ProjectConfig> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid config JSON in {}", path.display()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
}

fn print_analysis(result: &AnalyzerResult) {
    println!("Documentation score: {}%", result.score);
    for suggestion in &result.suggestions {
        println!("{suggestion}");
    }
    for improvement in &result.improvements {
        println!();
        println!("{}:", improvement.category);
        for item in &improvement.items {
            println!("  - {item}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_value_args_map_to_model() {
        assert_eq!(Field::from(FieldArg::DemoImage), Field::DemoImage);
        assert_eq!(BadgeKind::from(KindArg::License), BadgeKind::License);
        let cli = Cli::try_parse_from(["readmegen", "badge", "add", "ci", "green"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Badge(BadgeCommand::Add { kind: KindArg::Custom, .. })
        ));
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(4), "debug");
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from([
            "readmegen",
            "--ephemeral",
            "section",
            "move",
            "contributing",
            "usage",
        ])
        .unwrap();
        assert!(cli.ephemeral);
        assert!(matches!(
            cli.command,
            Command::Section(SectionCommand::Move { ref id, ref target })
                if id == "contributing" && target == "usage"
        ));
    }

    #[test]
    fn test_generate_defaults_to_readme() {
        let cli = Cli::try_parse_from(["readmegen", "generate"]).unwrap();
        match cli.command {
            Command::Generate(args) => assert_eq!(args.output, PathBuf::from("README.md")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_set_accepts_kebab_case_fields() {
        let cli = Cli::try_parse_from(["readmegen", "set", "repo-url", "https://x.dev"]).unwrap();
        assert!(matches!(cli.command, Command::Set { field: FieldArg::RepoUrl, .. }));
    }
}
