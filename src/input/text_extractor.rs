//! Text extraction from the supported resume formats

use crate::error::{Result, ResumeExtractorError};
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeExtractorError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;

        if text.trim().is_empty() {
            return Err(ResumeExtractorError::PdfExtraction(format!(
                "No text layer found in PDF '{}'",
                path.display()
            )));
        }

        Ok(text)
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path).await?)
    }
}

/// Renders Markdown to HTML, then strips the tags while keeping blank lines
/// between blocks so section boundaries survive.
pub struct MarkdownExtractor {
    tag: Regex,
}

impl Default for MarkdownExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownExtractor {
    pub fn new() -> Self {
        Self {
            tag: Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"),
        }
    }

    pub fn markdown_to_text(&self, markdown: &str) -> String {
        let parser = Parser::new(markdown);
        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        self.html_to_text(&html_output)
    }

    /// pulldown-cmark writes one block element per line, so blocks are handled
    /// line by line: top-level paragraphs and lists end with a blank line and
    /// headings start after one.
    fn html_to_text(&self, html: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut list_depth = 0usize;

        for raw in html.lines() {
            let raw = raw.trim();
            let is_heading = raw.len() > 2
                && raw.starts_with("<h")
                && raw.as_bytes()[2].is_ascii_digit();

            if raw.starts_with("<ul") || raw.starts_with("<ol") {
                list_depth += 1;
            }

            if is_heading && lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }

            let text = self.decode_entities(&self.tag.replace_all(raw, ""));
            let text = text.trim();
            if !text.is_empty() {
                lines.push(text.to_string());
            }

            let closes_list = raw == "</ul>" || raw == "</ol>";
            if closes_list {
                list_depth = list_depth.saturating_sub(1);
            }

            // Paragraphs inside list items (loose lists) do not end the list
            let ends_block = list_depth == 0 && (raw.ends_with("</p>") || closes_list);
            if ends_block && lines.last().is_some_and(|l| !l.is_empty()) {
                lines.push(String::new());
            }
        }

        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        lines.join("\n")
    }

    fn decode_entities(&self, text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&amp;", "&")
    }
}

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(self.markdown_to_text(&markdown_content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_text_keeps_sections_apart() {
        let extractor = MarkdownExtractor::new();
        let markdown = "# Jane Smith\n\n## Skills\n\n- **Rust**\n- Go\n\n## Hobbies\n\nChess & Go";

        let text = extractor.markdown_to_text(markdown);

        assert_eq!(text, "Jane Smith\n\nSkills\nRust\nGo\n\nHobbies\nChess & Go");
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }

    #[test]
    fn test_loose_list_stays_one_block() {
        let extractor = MarkdownExtractor::new();
        let markdown = "## Skills\n\n- Python\n\n- React\n\n- AWS\n\n## Hobbies\n\n- Chess\n";

        let text = extractor.markdown_to_text(markdown);

        assert_eq!(text, "Skills\nPython\nReact\nAWS\n\nHobbies\nChess");
    }

    #[test]
    fn test_loose_list_items_all_reach_the_record() {
        let extractor = MarkdownExtractor::new();
        let text = extractor.markdown_to_text("## Skills\n\n- Python\n\n- React\n\n- AWS\n");

        let record = crate::processing::ResumeRecordBuilder::new().unwrap().build(text);
        assert_eq!(record.skills(), ["Python", "React", "AWS"]);
    }

    #[test]
    fn test_nested_list_closes_only_at_outer_level() {
        let extractor = MarkdownExtractor::new();
        let markdown = "- Backend\n  - Rust\n  - Go\n- Frontend\n\nAfter";

        let text = extractor.markdown_to_text(markdown);

        assert_eq!(text, "Backend\nRust\nGo\nFrontend\n\nAfter");
    }
}
