//! Labeled section detection in raw resume text

use crate::error::{Result, ResumeExtractorError};
use log::debug;
use regex::{Regex, RegexBuilder};
use std::sync::Arc;

/// A labeled block of resume text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Header text as it appears in the document
    pub header: String,
    /// Body following the header, whitespace-trimmed
    pub body: String,
}

/// Decides where a section body ends.
pub trait SectionBoundary: Send + Sync {
    /// Byte offset into `text` at which the section stops. `text` starts
    /// right after the header. An offset past the end or off a char boundary
    /// is treated as end of text.
    fn section_end(&self, text: &str) -> usize;
}

/// Ends a section at a blank line or at the next `Capitalized:` header line.
pub struct BlankLineOrHeader {
    blank_line: Regex,
    next_header: Regex,
}

impl Default for BlankLineOrHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl BlankLineOrHeader {
    pub fn new() -> Self {
        let blank_line = Regex::new(r"\r?\n(?:\r?\n)+")
            .expect("Invalid blank line regex");

        let next_header = Regex::new(r"\r?\n[A-Z][a-zA-Z]+:")
            .expect("Invalid header line regex");

        Self {
            blank_line,
            next_header,
        }
    }
}

impl SectionBoundary for BlankLineOrHeader {
    fn section_end(&self, text: &str) -> usize {
        [self.blank_line.find(text), self.next_header.find(text)]
            .into_iter()
            .flatten()
            .map(|m| m.start())
            .min()
            .unwrap_or(text.len())
    }
}

/// Finds the first section introduced by one of an ordered list of header names.
pub struct SectionLocator {
    candidates: Vec<(String, Regex)>,
    boundary: Arc<dyn SectionBoundary>,
}

impl SectionLocator {
    /// Build a locator using the default blank-line/next-header boundary.
    pub fn new<S: AsRef<str>>(header_names: &[S]) -> Result<Self> {
        Self::with_boundary(header_names, Arc::new(BlankLineOrHeader::new()))
    }

    pub fn with_boundary<S: AsRef<str>>(
        header_names: &[S],
        boundary: Arc<dyn SectionBoundary>,
    ) -> Result<Self> {
        let mut candidates = Vec::with_capacity(header_names.len());

        for name in header_names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(ResumeExtractorError::Configuration(
                    "Section header names must not be blank".to_string(),
                ));
            }
            candidates.push((name.to_string(), Self::header_pattern(name)?));
        }

        Ok(Self {
            candidates,
            boundary,
        })
    }

    /// Header name, the rest of its line up to an optional colon, then whitespace.
    fn header_pattern(name: &str) -> Result<Regex> {
        let pattern = format!(r"({})[^:\n]*:?\s*", regex::escape(name));
        Ok(RegexBuilder::new(&pattern).case_insensitive(true).build()?)
    }

    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(|(name, _)| name.as_str())
    }

    /// Return the body of the first matching candidate, if any.
    ///
    /// Candidates are tried in order; the first one present in `text` wins and
    /// only its first occurrence is considered.
    pub fn locate(&self, text: &str) -> Option<Section> {
        for (name, pattern) in &self.candidates {
            let Some(captures) = pattern.captures(text) else {
                continue;
            };
            let (Some(whole), Some(header)) = (captures.get(0), captures.get(1)) else {
                continue;
            };

            let rest = &text[whole.end()..];
            let end = self.boundary.section_end(rest);
            let body = rest.get(..end).unwrap_or(rest).trim().to_string();

            let header_text = header.as_str().to_string();
            debug!(
                "Matched '{}' as section header '{}' ({} chars of body)",
                name,
                header_text,
                body.len()
            );

            return Some(Section {
                header: header_text,
                body,
            });
        }

        None
    }
}

/// One-shot lookup with the default boundary.
pub fn locate_section<S: AsRef<str>>(text: &str, header_names: &[S]) -> Result<Option<Section>> {
    Ok(SectionLocator::new(header_names)?.locate(text))
}
