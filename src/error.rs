//! Error handling for the resume extractor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeExtractorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Document not readable: {0}")]
    DocumentUnreadable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid section pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("AI evaluation failed: {0}")]
    Evaluation(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeExtractorError {
    /// True when the error means the source document could not be turned into text.
    pub fn is_unreadable_document(&self) -> bool {
        matches!(
            self,
            ResumeExtractorError::Io(_)
                | ResumeExtractorError::PdfExtraction(_)
                | ResumeExtractorError::UnsupportedFormat(_)
                | ResumeExtractorError::DocumentUnreadable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeExtractorError>;

/// Errors coming back from the external evaluation service are opaque
impl From<anyhow::Error> for ResumeExtractorError {
    fn from(err: anyhow::Error) -> Self {
        ResumeExtractorError::Evaluation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_failures_are_unreadable() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");

        assert!(ResumeExtractorError::Io(io).is_unreadable_document());
        assert!(ResumeExtractorError::PdfExtraction("no text".into()).is_unreadable_document());
        assert!(ResumeExtractorError::UnsupportedFormat("cv.xyz".into()).is_unreadable_document());
        assert!(ResumeExtractorError::DocumentUnreadable("cv.txt".into()).is_unreadable_document());
    }

    #[test]
    fn test_setup_failures_are_not_unreadable() {
        assert!(!ResumeExtractorError::Configuration("blank header".into()).is_unreadable_document());
        assert!(!ResumeExtractorError::InvalidInput("bad --output".into()).is_unreadable_document());
        assert!(!ResumeExtractorError::Evaluation("timeout".into()).is_unreadable_document());
    }
}
