//! Configuration management for the resume extractor

use crate::error::{Result, ResumeExtractorError};
use crate::processing::{
    CanonicalTable, HeaderTables, ItemSplitter, Normalizer, ResumeRecordBuilder, SplitOptions,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub ranking: RankingConfig,
    pub llm: LlmConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub headers: HeaderTables,
    pub split: SplitOptions,
    /// Extra canonical forms, merged over the built-in table
    pub canonical_forms: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub max_cvs: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub scoring_model: String,
    pub scoring_temperature: f64,
    pub improvement_model: String,
    pub improvement_temperature: f64,
    /// Vision-capable model for layout review of a rendered page
    pub formatting_model: String,
    pub formatting_max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { max_cvs: 10 }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            scoring_model: "gpt-4-turbo".to_string(),
            scoring_temperature: 0.2,
            improvement_model: "gpt-4".to_string(),
            improvement_temperature: 0.7,
            formatting_model: "gpt-4-turbo".to_string(),
            formatting_max_tokens: 300,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl ExtractionConfig {
    pub fn canonical_table(&self) -> CanonicalTable {
        CanonicalTable::default().with_overrides(&self.canonical_forms)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.canonical_table())
    }

    pub fn record_builder(&self) -> Result<ResumeRecordBuilder> {
        ResumeRecordBuilder::with_parts(
            &self.headers,
            ItemSplitter::new(self.split.clone()),
            self.normalizer(),
        )
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`.
    ///
    /// A missing file at the default location is created with default values.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => {
                let config_path = Self::config_path();
                if config_path.exists() {
                    Self::load_from(&config_path)
                } else {
                    let config = Self::default();
                    config.save_to(&config_path)?;
                    Ok(config)
                }
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResumeExtractorError::Configuration(format!(
                "Failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ResumeExtractorError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeExtractorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-extractor")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.ranking.max_cvs == 0 {
            return Err(ResumeExtractorError::Configuration(
                "ranking.max_cvs must be at least 1".to_string(),
            ));
        }

        if self.llm.formatting_max_tokens == 0 {
            return Err(ResumeExtractorError::Configuration(
                "llm.formatting_max_tokens must be at least 1".to_string(),
            ));
        }

        for (name, temperature) in [
            ("llm.scoring_temperature", self.llm.scoring_temperature),
            ("llm.improvement_temperature", self.llm.improvement_temperature),
        ] {
            if !(0.0..=2.0).contains(&temperature) {
                return Err(ResumeExtractorError::Configuration(format!(
                    "{} must be between 0.0 and 2.0, got {}",
                    name, temperature
                )));
            }
        }

        Ok(())
    }
}
