//! CLI interface for the resume extractor

use crate::config::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Extensions accepted for resume documents
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown"];

/// Extensions accepted for rendered resume page images
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Parser)]
#[command(name = "resume-extractor")]
#[command(about = "Extract skills, technologies, experience and hobbies from resumes")]
#[command(long_about = "Locate resume sections by header, split them into items, normalize the items \
and rank resumes against required skills")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the four categories from one resume
    Parse {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show full items and report metadata
        #[arg(short, long)]
        detailed: bool,
    },

    /// Rank resumes by how many required skills they list
    Rank {
        /// Comma-separated required skills, e.g. "Python, AWS, React"
        #[arg(short, long)]
        skills: String,

        /// Resume files to rank
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Process at most this many resumes (overrides ranking.max_cvs)
        #[arg(short, long)]
        max: Option<usize>,
    },

    /// Print the request body that would be sent to the AI evaluation service
    Prompt {
        /// Path to resume file (PDF, TXT, MD); required for score and improve
        #[arg(short, long, required_unless_present = "image")]
        resume: Option<PathBuf>,

        /// Job requirements file (TXT, MD); required for scoring prompts
        #[arg(short = 'j', long)]
        requirements: Option<PathBuf>,

        /// Rendered resume page (PNG, JPG); required for format
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Which prompt to build
        #[arg(short, long, value_enum, default_value_t = PromptKind::Score)]
        kind: PromptKind,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    /// Score the candidate against job requirements
    Score,
    /// Suggest improvements to the resume content
    Improve,
    /// Review the visual layout of a rendered resume page
    Format,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank_command() {
        let cli = Cli::try_parse_from([
            "resume-extractor",
            "rank",
            "--skills",
            "Python, AWS",
            "a.pdf",
            "b.txt",
            "--max",
            "1",
        ])
        .unwrap();

        match cli.command {
            Commands::Rank { skills, files, max, .. } => {
                assert_eq!(skills, "Python, AWS");
                assert_eq!(files.len(), 2);
                assert_eq!(max, Some(1));
            }
            _ => panic!("expected rank command"),
        }
    }

    #[test]
    fn test_prompt_kind_defaults_to_score() {
        let cli = Cli::try_parse_from(["resume-extractor", "prompt", "-r", "cv.md"]).unwrap();
        assert!(matches!(cli.command, Commands::Prompt { kind: PromptKind::Score, .. }));
    }

    #[test]
    fn test_prompt_format_takes_image_without_resume() {
        let cli = Cli::try_parse_from([
            "resume-extractor",
            "prompt",
            "--kind",
            "format",
            "--image",
            "page.png",
        ])
        .unwrap();

        match cli.command {
            Commands::Prompt { resume, image, kind, .. } => {
                assert_eq!(kind, PromptKind::Format);
                assert!(resume.is_none());
                assert_eq!(image, Some(PathBuf::from("page.png")));
            }
            _ => panic!("expected prompt command"),
        }

        assert!(Cli::try_parse_from(["resume-extractor", "prompt", "--kind", "format"]).is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.PDF"), RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.docx"), RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), RESUME_EXTENSIONS).is_err());
    }
}
