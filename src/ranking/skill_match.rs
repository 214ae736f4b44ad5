//! Deterministic ranking of resumes against a list of required skills

use crate::error::Result;
use crate::input::InputManager;
use crate::processing::{Normalizer, ResumeRecord, ResumeRecordBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// How well one resume covers the required skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    pub file: String,
    /// Number of required skills found
    pub score: usize,
    /// Required skills found, in the order they were requested
    pub matched: Vec<String>,
    /// `score / required * 100`, rounded down
    pub match_percent: u8,
    /// Set when the document could not be read; the entry then scores zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRanking {
    pub required: Vec<String>,
    /// Sorted by score, best first
    pub results: Vec<SkillMatch>,
    /// Paths beyond the processing limit
    pub skipped: Vec<String>,
}

pub struct SkillMatcher {
    required: Vec<String>,
    required_keys: Vec<String>,
}

impl SkillMatcher {
    /// Parse a comma-separated skill list, normalizing each entry the same
    /// way resume items are normalized.
    pub fn new(required_skills: &str, normalizer: &Normalizer) -> Self {
        let mut seen = HashSet::new();
        let mut required = Vec::new();
        let mut required_keys = Vec::new();

        for skill in normalizer.normalize_all(required_skills.split(',')) {
            let key = skill.to_lowercase();
            if seen.insert(key.clone()) {
                required.push(skill);
                required_keys.push(key);
            }
        }

        Self {
            required,
            required_keys,
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn score(&self, file: &str, record: &ResumeRecord) -> SkillMatch {
        let candidate: HashSet<String> = record.skills().iter().map(|s| s.to_lowercase()).collect();

        let matched: Vec<String> = self
            .required
            .iter()
            .zip(&self.required_keys)
            .filter(|(_, key)| candidate.contains(*key))
            .map(|(skill, _)| skill.clone())
            .collect();

        let score = matched.len();
        SkillMatch {
            file: file.to_string(),
            score,
            matched,
            match_percent: self.match_percent(score),
            error: None,
        }
    }

    fn match_percent(&self, score: usize) -> u8 {
        if self.required.is_empty() {
            0
        } else {
            (score * 100 / self.required.len()).min(100) as u8
        }
    }

    fn failed(&self, file: &str, reason: String) -> SkillMatch {
        SkillMatch {
            file: file.to_string(),
            score: 0,
            matched: Vec::new(),
            match_percent: 0,
            error: Some(reason),
        }
    }
}

/// Sort best first; equal scores keep their input order.
pub fn sort_by_score(results: &mut [SkillMatch]) {
    results.sort_by(|a, b| b.score.cmp(&a.score));
}

/// Parse and score up to `max_cvs` resumes. Unreadable documents score zero
/// instead of aborting the batch.
pub async fn rank_resumes<F>(
    paths: &[PathBuf],
    required_skills: &str,
    builder: &ResumeRecordBuilder,
    input: &mut InputManager,
    max_cvs: usize,
    mut on_document: F,
) -> Result<SkillRanking>
where
    F: FnMut(&Path),
{
    let matcher = SkillMatcher::new(required_skills, builder.normalizer());

    let (to_process, skipped) = paths.split_at(paths.len().min(max_cvs));
    if !skipped.is_empty() {
        warn!(
            "Only processing the first {} of {} resumes",
            to_process.len(),
            paths.len()
        );
    }

    let mut results = Vec::with_capacity(to_process.len());
    for path in to_process {
        on_document(path);
        let file = path.display().to_string();

        match input.parse_resume(path, builder).await {
            Ok(record) => results.push(matcher.score(&file, &record)),
            Err(e) => {
                warn!("Skipping {} - Error: {}", file, e);
                results.push(matcher.failed(&file, e.to_string()));
            }
        }
    }

    sort_by_score(&mut results);
    info!("Ranked {} resumes against {} required skills", results.len(), matcher.required().len());

    Ok(SkillRanking {
        required: matcher.required().to_vec(),
        results,
        skipped: skipped.iter().map(|p| p.display().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str) -> ResumeRecord {
        ResumeRecordBuilder::new().unwrap().build(text)
    }

    #[test]
    fn test_required_skills_are_normalized() {
        let matcher = SkillMatcher::new("python, JS , , aws, Python", &Normalizer::default());

        assert_eq!(matcher.required(), ["Python", "JavaScript", "AWS"]);
    }

    #[test]
    fn test_score_counts_matches() {
        let matcher = SkillMatcher::new("Python, AWS, Docker, React", &Normalizer::default());
        let result = matcher.score("a.pdf", &record("Skills: python, js, aws\n\nHobbies: chess"));

        assert_eq!(result.score, 2);
        assert_eq!(result.matched, vec!["Python", "AWS"]);
        assert_eq!(result.match_percent, 50);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_match_percent_rounds_down() {
        let matcher = SkillMatcher::new("Rust, Go, Zig", &Normalizer::default());
        let result = matcher.score("a.txt", &record("Skills: Rust"));

        assert_eq!(result.match_percent, 33);
    }

    #[test]
    fn test_no_required_skills() {
        let matcher = SkillMatcher::new(" , ", &Normalizer::default());
        let result = matcher.score("a.txt", &record("Skills: Rust"));

        assert_eq!(result.score, 0);
        assert_eq!(result.match_percent, 0);
    }

    #[test]
    fn test_sort_is_stable() {
        let matcher = SkillMatcher::new("Rust, Go", &Normalizer::default());
        let mut results = vec![
            matcher.score("one", &record("Skills: Rust")),
            matcher.score("two", &record("Skills: Rust, Go")),
            matcher.score("three", &record("Skills: Go")),
        ];

        sort_by_score(&mut results);
        let order: Vec<&str> = results.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(order, vec!["two", "one", "three"]);
    }
}
