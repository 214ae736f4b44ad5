//! Report payloads handed to the output formatters

use crate::processing::{Category, ResumeRecord};
use crate::ranking::SkillRanking;
use serde::{Deserialize, Serialize};

/// Extracted categories of a single resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    /// Path of the source document
    pub source: String,
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub experience: Vec<String>,
    pub hobbies: Vec<String>,
    pub metadata: ReportMetadata,
}

/// Resumes ranked against required skills
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    #[serde(flatten)]
    pub ranking: SkillRanking,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// RFC 3339, UTC
    pub generated_at: String,
    pub tool_version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Report {
    Record(RecordReport),
    Ranking(RankingReport),
}

impl ReportMetadata {
    pub fn now() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl RecordReport {
    pub fn items(&self, category: Category) -> &[String] {
        match category {
            Category::Skills => &self.skills,
            Category::Technologies => &self.technologies,
            Category::Experience => &self.experience,
            Category::Hobbies => &self.hobbies,
        }
    }
}

impl Report {
    /// The raw text stays out of reports.
    pub fn from_record(source: impl Into<String>, record: &ResumeRecord) -> Self {
        Report::Record(RecordReport {
            source: source.into(),
            skills: record.skills().to_vec(),
            technologies: record.technologies().to_vec(),
            experience: record.experience().to_vec(),
            hobbies: record.hobbies().to_vec(),
            metadata: ReportMetadata::now(),
        })
    }

    pub fn from_ranking(ranking: SkillRanking) -> Self {
        Report::Ranking(RankingReport {
            ranking,
            metadata: ReportMetadata::now(),
        })
    }

    pub fn metadata(&self) -> &ReportMetadata {
        match self {
            Report::Record(report) => &report.metadata,
            Report::Ranking(report) => &report.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::ResumeRecordBuilder;

    #[test]
    fn test_record_report_omits_raw_text() {
        let record = ResumeRecordBuilder::new()
            .unwrap()
            .build("Skills: Python\n\nconfidential note");
        let report = Report::from_record("cv.txt", &record);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["source"], "cv.txt");
        assert_eq!(json["skills"][0], "Python");
        assert!(json.get("raw_text").is_none());
        assert!(!json.to_string().contains("confidential"));
    }

    #[test]
    fn test_ranking_report_is_flat() {
        let ranking = SkillRanking {
            required: vec!["Python".to_string()],
            results: vec![],
            skipped: vec![],
        };
        let json = serde_json::to_value(Report::from_ranking(ranking)).unwrap();

        assert_eq!(json["required"][0], "Python");
        assert!(json["metadata"]["generated_at"].is_string());
    }
}
