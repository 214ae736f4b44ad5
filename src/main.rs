//! Resume extractor: section extraction, normalization and skill ranking for resumes

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_extractor::cli::{self, Cli, Commands, ConfigAction, PromptKind};
use resume_extractor::config::{Config, OutputFormat};
use resume_extractor::error::{Result, ResumeExtractorError};
use resume_extractor::input::InputManager;
use resume_extractor::llm::{image_mime_type, PromptTemplates};
use resume_extractor::output::{save_report_to_file, suggest_filename, Report, ReportGenerator};
use resume_extractor::ranking::rank_resumes;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Parse {
            resume,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| ResumeExtractorError::InvalidInput(format!("Resume file: {}", e)))?;
            let format = resolve_format(output.as_deref(), &config)?;

            let builder = config.extraction.record_builder()?;
            let mut input_manager = InputManager::new();
            let record = input_manager.parse_resume(&resume, &builder).await?;

            if record.is_empty() {
                info!("No known sections found in {}", resume.display());
            }

            let report = Report::from_record(resume.display().to_string(), &record);
            emit_report(&report, format, save.as_deref(), detailed, &config, &resume.to_string_lossy())?;
        }

        Commands::Rank {
            skills,
            files,
            output,
            save,
            max,
        } => {
            let format = resolve_format(output.as_deref(), &config)?;
            let max_cvs = max.unwrap_or(config.ranking.max_cvs);
            if max_cvs == 0 {
                return Err(ResumeExtractorError::InvalidInput(
                    "--max must be at least 1".to_string(),
                ));
            }

            let builder = config.extraction.record_builder()?;
            let mut input_manager = InputManager::new();

            let progress = ProgressBar::new(files.len().min(max_cvs) as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ResumeExtractorError::OutputFormatting(e.to_string()))?
                    .progress_chars("=> "),
            );

            let ranking = rank_resumes(
                &files,
                &skills,
                &builder,
                &mut input_manager,
                max_cvs,
                |path| {
                    progress.set_message(path.display().to_string());
                    progress.inc(1);
                },
            )
            .await?;
            progress.finish_and_clear();

            emit_report(
                &Report::from_ranking(ranking),
                format,
                save.as_deref(),
                false,
                &config,
                "ranking",
            )?;
        }

        Commands::Prompt {
            resume,
            requirements,
            image,
            kind,
        } => {
            let templates = PromptTemplates::default();

            let request = match kind {
                PromptKind::Format => {
                    let image = image.ok_or_else(|| {
                        ResumeExtractorError::InvalidInput(
                            "--image is needed for formatting prompts".to_string(),
                        )
                    })?;
                    cli::validate_file_extension(&image, cli::IMAGE_EXTENSIONS)
                        .map_err(|e| ResumeExtractorError::InvalidInput(format!("Image file: {}", e)))?;

                    let mime = image
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .and_then(image_mime_type)
                        .unwrap_or("image/jpeg");
                    let bytes = tokio::fs::read(&image).await?;
                    templates.render_formatting(&bytes, mime, &config.llm)?
                }
                PromptKind::Score | PromptKind::Improve => {
                    let resume = resume.ok_or_else(|| {
                        ResumeExtractorError::InvalidInput(
                            "--resume is needed for score and improve prompts".to_string(),
                        )
                    })?;
                    cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                        .map_err(|e| ResumeExtractorError::InvalidInput(format!("Resume file: {}", e)))?;

                    let builder = config.extraction.record_builder()?;
                    let mut input_manager = InputManager::new();
                    let record = input_manager.parse_resume(&resume, &builder).await?;

                    if kind == PromptKind::Improve {
                        templates.render_improvement(&record, &config.llm)?
                    } else {
                        let requirements = requirements.ok_or_else(|| {
                            ResumeExtractorError::InvalidInput(
                                "--requirements is needed for scoring prompts".to_string(),
                            )
                        })?;
                        cli::validate_file_extension(&requirements, &["txt", "md"]).map_err(|e| {
                            ResumeExtractorError::InvalidInput(format!("Requirements file: {}", e))
                        })?;
                        let requirements_text = input_manager.extract_text(&requirements).await?;
                        templates.render_scoring(&record, &requirements_text, &config.llm)?
                    }
                }
            };

            println!("{}", serde_json::to_string_pretty(&request)?);
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                let content = toml::to_string_pretty(&config).map_err(|e| {
                    ResumeExtractorError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                println!("{}", content);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(ResumeExtractorError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn emit_report(
    report: &Report,
    format: OutputFormat,
    save: Option<&Path>,
    detailed: bool,
    config: &Config,
    source_name: &str,
) -> Result<()> {
    // Saved console reports are plain text
    let use_colors = config.output.color_output && save.is_none();
    let generator = ReportGenerator::with_options(use_colors, detailed, config.output.pretty_json, true);
    let content = generator.generate_report(report, format)?;

    match save {
        Some(path) => {
            let path = if path.is_dir() {
                path.join(suggest_filename(format, source_name, true))
            } else {
                path.to_path_buf()
            };
            save_report_to_file(&content, &path)?;
            println!("📁 Report saved to {}", path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}
