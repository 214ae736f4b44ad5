//! Report rendering

pub mod formatter;
pub mod report;

pub use formatter::{
    save_report_to_file, suggest_filename, truncate_text, ConsoleFormatter, JsonFormatter,
    MarkdownFormatter, OutputFormatter, ReportGenerator,
};
pub use report::{RankingReport, RecordReport, Report, ReportMetadata};
