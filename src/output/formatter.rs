//! Output formatters for extracted records and rankings

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::*;
use crate::processing::Category;
use crate::ranking::SkillMatch;
use colored::{Color, Colorize};
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;

/// Longest item shown by the console formatter outside detailed mode
const CONSOLE_ITEM_WIDTH: usize = 80;

pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_match_badge(&self, percent: u8) -> String {
        let (badge, color) = match percent {
            80..=100 => ("STRONG", Color::Green),
            50..=79 => ("PARTIAL", Color::Yellow),
            1..=49 => ("WEAK", Color::Red),
            _ => ("NONE", Color::BrightRed),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_item(&self, item: &str) -> String {
        if self.detailed {
            item.to_string()
        } else {
            truncate_text(item, CONSOLE_ITEM_WIDTH)
        }
    }

    fn format_record(&self, report: &RecordReport) -> String {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME EXTRACTION", 1));
        output.push_str(&format!("📄 Source: {}\n", report.source));

        for category in Category::ALL {
            let items = report.items(category);
            output.push_str(&self.format_header(
                &format!("{} ({})", category, items.len()),
                2,
            ));

            if items.is_empty() {
                output.push_str(&format!("  {}\n", self.colorize("Not found", Color::BrightBlack)));
                continue;
            }

            for item in items {
                output.push_str(&format!("  • {}\n", self.format_item(item)));
            }
        }

        if self.detailed {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize(&format!("Generated at {}", report.metadata.generated_at), Color::BrightBlack)
            ));
        }

        output
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let ranking = &report.ranking;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING", 1));
        output.push_str(&format!("🎯 Required skills: {}\n", ranking.required.join(", ")));

        output.push_str(&self.format_header("Results", 2));
        if ranking.results.is_empty() {
            output.push_str("  No resumes processed\n");
        }

        for (rank, entry) in ranking.results.iter().enumerate() {
            output.push_str(&self.format_ranking_entry(rank + 1, entry, ranking.required.len()));
        }

        if !ranking.skipped.is_empty() {
            output.push_str(&self.format_header("Skipped (over limit)", 3));
            for file in &ranking.skipped {
                output.push_str(&format!("  • {}\n", file));
            }
        }

        output
    }

    fn format_ranking_entry(&self, rank: usize, entry: &SkillMatch, required: usize) -> String {
        let mut line = format!(
            "  {}. {} {} {}/{} ({}%)\n",
            rank,
            self.colorize(&entry.file, Color::Cyan),
            self.format_match_badge(entry.match_percent),
            entry.score,
            required,
            entry.match_percent
        );

        if let Some(error) = &entry.error {
            line.push_str(&format!("     {}\n", self.colorize(&format!("⚠️  {}", error), Color::Red)));
        } else if self.detailed && !entry.matched.is_empty() {
            line.push_str(&format!("     Matched: {}\n", entry.matched.join(", ")));
        }

        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Record(record) => self.format_record(record),
            Report::Ranking(ranking) => self.format_ranking(ranking),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn format_record(&self, report: &RecordReport) -> String {
        let mut md = String::new();

        md.push_str("# Resume Extraction\n\n");
        md.push_str(&format!("**Source:** `{}`\n", report.source));

        for category in Category::ALL {
            md.push_str(&format!("\n## {}\n\n", category));

            let items = report.items(category);
            if items.is_empty() {
                md.push_str("_Not found_\n");
            }
            for item in items {
                md.push_str(&format!("- {}\n", item));
            }
        }

        md
    }

    fn format_ranking(&self, report: &RankingReport) -> String {
        let ranking = &report.ranking;
        let mut md = String::new();

        md.push_str("# Resume Ranking\n\n");
        md.push_str(&format!("**Required skills:** {}\n\n", ranking.required.join(", ")));
        md.push_str("| Rank | File | Score | Match | Matched skills |\n");
        md.push_str("|------|------|-------|-------|----------------|\n");

        for (rank, entry) in ranking.results.iter().enumerate() {
            let matched = match &entry.error {
                Some(error) => format!("⚠️ {}", error),
                None => entry.matched.join(", "),
            };
            md.push_str(&format!(
                "| {} | `{}` | {}/{} | {}% | {} |\n",
                rank + 1,
                entry.file,
                entry.score,
                ranking.required.len(),
                entry.match_percent,
                matched.replace('|', "\\|")
            ));
        }

        if !ranking.skipped.is_empty() {
            md.push_str("\n## Skipped\n\n");
            for file in &ranking.skipped {
                md.push_str(&format!("- `{}`\n", file));
            }
        }

        md
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut md = match report {
            Report::Record(record) => self.format_record(record),
            Report::Ranking(ranking) => self.format_ranking(ranking),
        };

        if self.include_metadata {
            let metadata = report.metadata();
            md.push_str(&format!(
                "\n---\n\n_Generated by resume-extractor v{} at {}_\n",
                metadata.tool_version, metadata.generated_at
            ));
        }

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_extraction{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_extraction{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_extraction{}.md", base_name, timestamp_suffix),
    }
}

/// Truncate to `max_graphemes`, cutting back to the last space when there is one.
pub fn truncate_text(text: &str, max_graphemes: usize) -> String {
    let mut graphemes = text.grapheme_indices(true);
    let Some((cut, _)) = graphemes.nth(max_graphemes) else {
        return text.to_string();
    };

    let truncated = &text[..cut];
    let end = truncated.rfind(' ').filter(|&i| i > 0).unwrap_or(cut);
    format!("{}...", truncated[..end].trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ResumeRecordBuilder;
    use crate::ranking::SkillRanking;

    fn record_report() -> Report {
        let record = ResumeRecordBuilder::new()
            .unwrap()
            .build("Skills: Python, JS\n\nHobbies: Chess");
        Report::from_record("resumes/jane.txt", &record)
    }

    fn ranking_report() -> Report {
        Report::from_ranking(SkillRanking {
            required: vec!["Python".to_string(), "AWS".to_string()],
            results: vec![
                SkillMatch {
                    file: "a.txt".to_string(),
                    score: 2,
                    matched: vec!["Python".to_string(), "AWS".to_string()],
                    match_percent: 100,
                    error: None,
                },
                SkillMatch {
                    file: "b.pdf".to_string(),
                    score: 0,
                    matched: vec![],
                    match_percent: 0,
                    error: Some("PDF extraction error: no text".to_string()),
                },
            ],
            skipped: vec!["c.txt".to_string()],
        })
    }

    #[test]
    fn test_console_record_without_colors() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&record_report())
            .unwrap();

        assert!(output.contains("█ RESUME EXTRACTION"));
        assert!(output.contains("▓ Skills (2)"));
        assert!(output.contains("  • JavaScript\n"));
        assert!(output.contains("▓ Experience (0)\n  Not found"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_console_ranking() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&ranking_report())
            .unwrap();

        assert!(output.contains("1. a.txt [STRONG] 2/2 (100%)"));
        assert!(output.contains("Matched: Python, AWS"));
        assert!(output.contains("2. b.pdf [NONE] 0/2 (0%)"));
        assert!(output.contains("PDF extraction error"));
        assert!(output.contains("▒ Skipped (over limit)"));
    }

    #[test]
    fn test_json_compact_and_pretty() {
        let report = record_report();
        let compact = JsonFormatter::new(false).format_report(&report).unwrap();
        let pretty = JsonFormatter::new(true).format_report(&report).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact).unwrap()["hobbies"][0],
            "Chess"
        );
    }

    #[test]
    fn test_markdown_ranking_table() {
        let output = MarkdownFormatter::new(false)
            .format_report(&ranking_report())
            .unwrap();

        assert!(output.contains("| 1 | `a.txt` | 2/2 | 100% | Python, AWS |"));
        assert!(output.contains("## Skipped\n\n- `c.txt`"));
        assert!(!output.contains("Generated by"));
    }

    #[test]
    fn test_markdown_record_with_metadata() {
        let output = MarkdownFormatter::new(true)
            .format_report(&record_report())
            .unwrap();

        assert!(output.starts_with("# Resume Extraction\n"));
        assert!(output.contains("## Technologies\n\n_Not found_"));
        assert!(output.contains("_Generated by resume-extractor v"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, false, false);
        let json = generator.generate_report(&record_report(), OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Json, "cvs/jane_doe.pdf", false),
            "jane_doe_extraction.json"
        );
        let stamped = suggest_filename(OutputFormat::Markdown, "jane.txt", true);
        assert!(stamped.starts_with("jane_extraction_"));
        assert!(stamped.ends_with(".md"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("senior engineer at acme", 12), "senior...");
        assert_eq!(truncate_text("héllo wörld", 7), "héllo...");
        assert_eq!(truncate_text("abcdefgh", 4), "abcd...");
    }

    #[test]
    fn test_save_report_creates_directories() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.md");

        save_report_to_file("# Report", &path).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report");
    }
}
