//! AI-backed candidate assessment through an external chat-completions service

use crate::config::LlmConfig;
use crate::error::{Result, ResumeExtractorError};
use crate::input::InputManager;
use crate::llm::prompts::{ChatRequest, PromptTemplates};
use crate::processing::{ResumeRecord, ResumeRecordBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The external service. Implementations send the request and return the
/// assistant message content.
pub trait Evaluator {
    fn complete(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<String>> + Send;
}

/// Scores returned by the service, each on a 0-10 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiAssessment {
    pub technical_fit: f32,
    pub culture_fit: f32,
    pub overall_score: f32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub fit_analysis: String,
}

impl AiAssessment {
    pub fn from_response(content: &str) -> Result<Self> {
        let assessment: AiAssessment = serde_json::from_str(strip_code_fence(content)).map_err(|e| {
            ResumeExtractorError::Evaluation(format!("Malformed assessment response: {}", e))
        })?;

        for (name, value) in [
            ("technical_fit", assessment.technical_fit),
            ("culture_fit", assessment.culture_fit),
            ("overall_score", assessment.overall_score),
        ] {
            if !(0.0..=10.0).contains(&value) {
                return Err(ResumeExtractorError::Evaluation(format!(
                    "{} out of range: {}",
                    name, value
                )));
            }
        }

        Ok(assessment)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImprovementSuggestions {
    pub skills_suggestions: String,
    pub technologies_suggestions: String,
    pub experience_suggestions: String,
    pub hobbies_suggestions: String,
    pub general_tips: String,
}

impl ImprovementSuggestions {
    pub fn from_response(content: &str) -> Result<Self> {
        serde_json::from_str(strip_code_fence(content)).map_err(|e| {
            ResumeExtractorError::Evaluation(format!("Malformed suggestions response: {}", e))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessedCandidate {
    pub file: String,
    #[serde(flatten)]
    pub assessment: AiAssessment,
    pub extracted_data: serde_json::Value,
}

/// Models often wrap JSON answers in a fenced block.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Sort best overall score first; ties keep their input order.
pub fn sort_by_overall_score(candidates: &mut [AssessedCandidate]) {
    candidates.sort_by(|a, b| {
        b.assessment
            .overall_score
            .total_cmp(&a.assessment.overall_score)
    });
}

pub struct AiReviewer<E> {
    evaluator: E,
    templates: PromptTemplates,
    llm: LlmConfig,
}

impl<E: Evaluator> AiReviewer<E> {
    pub fn new(evaluator: E, llm: LlmConfig) -> Self {
        Self {
            evaluator,
            templates: PromptTemplates::default(),
            llm,
        }
    }

    pub fn with_templates(mut self, templates: PromptTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub async fn assess(&self, record: &ResumeRecord, requirements: &str) -> Result<AiAssessment> {
        let request = self.templates.render_scoring(record, requirements, &self.llm)?;
        let content = self.evaluator.complete(&request).await?;
        AiAssessment::from_response(&content)
    }

    pub async fn suggest_improvements(&self, record: &ResumeRecord) -> Result<ImprovementSuggestions> {
        let request = self.templates.render_improvement(record, &self.llm)?;
        let content = self.evaluator.complete(&request).await?;
        ImprovementSuggestions::from_response(&content)
    }

    /// Free-text layout recommendations for a rendered resume page.
    pub async fn analyze_formatting(&self, image: &[u8], mime: &str) -> Result<String> {
        let request = self.templates.render_formatting(image, mime, &self.llm)?;
        let content = self.evaluator.complete(&request).await?;

        let feedback = content.trim();
        if feedback.is_empty() {
            return Err(ResumeExtractorError::Evaluation(
                "Empty formatting feedback".to_string(),
            ));
        }

        Ok(feedback.to_string())
    }

    /// Parse and assess up to `max_cvs` resumes. Documents that fail to parse
    /// or to evaluate are left out of the result.
    pub async fn evaluate_candidates(
        &self,
        paths: &[PathBuf],
        requirements: &str,
        builder: &ResumeRecordBuilder,
        input: &mut InputManager,
        max_cvs: usize,
    ) -> Result<Vec<AssessedCandidate>> {
        if paths.len() > max_cvs {
            warn!("Processing first {} of {} resumes", max_cvs, paths.len());
        }

        let mut candidates = Vec::new();
        for path in paths.iter().take(max_cvs) {
            let file = path.display().to_string();
            info!("Evaluating {}", file);

            let record = match input.parse_resume(path, builder).await {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to process {}: {}", file, e);
                    continue;
                }
            };

            match self.assess(&record, requirements).await {
                Ok(assessment) => candidates.push(AssessedCandidate {
                    file,
                    assessment,
                    extracted_data: record.categories_json(),
                }),
                Err(e) => warn!("Failed to evaluate {}: {}", file, e),
            }
        }

        sort_by_overall_score(&mut candidates);
        Ok(candidates)
    }
}
