//! Input manager: turns resume files into text and records

use crate::error::{Result, ResumeExtractorError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use crate::processing::{ResumeRecord, ResumeRecordBuilder};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    markdown: MarkdownExtractor,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
            markdown: MarkdownExtractor::new(),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Full text of the document at `path`.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeExtractorError::DocumentUnreadable(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                self.markdown.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeExtractorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract the document's text and parse it into a record.
    ///
    /// An unreadable document fails the whole record; missing sections do not.
    pub async fn parse_resume(
        &mut self,
        path: &Path,
        builder: &ResumeRecordBuilder,
    ) -> Result<ResumeRecord> {
        let text = self.extract_text(path).await?;
        let record = builder.build(text);

        info!(
            "Parsed {}: {} skills, {} technologies, {} experience entries, {} hobbies",
            path.display(),
            record.skills().len(),
            record.technologies().len(),
            record.experience().len(),
            record.hobbies().len()
        );

        Ok(record)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        FileType::from_path(path).ok_or_else(|| {
            ResumeExtractorError::DocumentUnreadable(format!("File has no extension: {}", path.display()))
        })
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
