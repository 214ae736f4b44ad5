//! Prompt templates and chat request bodies for the external evaluation service

use crate::config::LlmConfig;
use crate::error::{Result, ResumeExtractorError};
use crate::processing::ResumeRecord;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Message content: plain text, or typed parts for image input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Body of a chat-completions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl MessageContent {
    /// The text of the message; for multi-part content, the first text part.
    pub fn text(&self) -> &str {
        match self {
            MessageContent::Text(text) => text,
            MessageContent::Parts(parts) => parts
                .iter()
                .find_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .unwrap_or(""),
        }
    }
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub scoring_system: String,
    pub improvement_system: String,
    pub formatting_instructions: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            scoring_system: SCORING_SYSTEM_PROMPT.to_string(),
            improvement_system: IMPROVEMENT_SYSTEM_PROMPT.to_string(),
            formatting_instructions: FORMATTING_PROMPT.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Request asking the service to score a candidate against job requirements.
    pub fn render_scoring(
        &self,
        record: &ResumeRecord,
        requirements: &str,
        llm: &LlmConfig,
    ) -> Result<ChatRequest> {
        let candidate = serde_json::to_string_pretty(&record.categories_json())?;
        let user_prompt = scoring_user_prompt(requirements.trim(), &candidate);

        Ok(ChatRequest {
            model: llm.scoring_model.clone(),
            messages: vec![
                ChatMessage::system(self.scoring_system.clone()),
                ChatMessage::user(user_prompt),
            ],
            temperature: Some(llm.scoring_temperature),
            max_tokens: None,
            response_format: Some(ResponseFormat {
                kind: "json_object".to_string(),
            }),
        })
    }

    /// Request asking the service for content improvement suggestions.
    pub fn render_improvement(&self, record: &ResumeRecord, llm: &LlmConfig) -> Result<ChatRequest> {
        let resume_data = serde_json::to_string_pretty(&record.categories_json())?;

        Ok(ChatRequest {
            model: llm.improvement_model.clone(),
            messages: vec![
                ChatMessage::system(self.improvement_system.clone()),
                ChatMessage::user(format!("Here is the resume data:\n{}", resume_data)),
            ],
            temperature: Some(llm.improvement_temperature),
            max_tokens: None,
            response_format: None,
        })
    }

    /// Request asking the service to review the visual layout of a rendered
    /// resume page. The image travels inline as a base64 data URI.
    pub fn render_formatting(&self, image: &[u8], mime: &str, llm: &LlmConfig) -> Result<ChatRequest> {
        if image.is_empty() {
            return Err(ResumeExtractorError::InvalidInput(
                "Resume image is empty".to_string(),
            ));
        }

        let encoded = general_purpose::STANDARD.encode(image);

        Ok(ChatRequest {
            model: llm.formatting_model.clone(),
            messages: vec![ChatMessage {
                role: Role::User,
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: self.formatting_instructions.clone(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{};base64,{}", mime, encoded),
                        },
                    },
                ]),
            }],
            temperature: None,
            max_tokens: Some(llm.formatting_max_tokens),
            response_format: None,
        })
    }
}

/// MIME type for a resume page image, from its file extension.
pub fn image_mime_type(extension: &str) -> Option<&'static str> {
    match extension.to_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

const SCORING_SYSTEM_PROMPT: &str = r#"You are an expert HR analyst specializing in technical recruitment.
Evaluate CVs strictly against provided job requirements.

Output JSON format with these keys:
- technical_fit (0-10): Skills/technologies match
- culture_fit (0-10): Hobbies/experience alignment
- overall_score (0-10): Weighted average (70% technical, 30% culture)
- strengths: Top 3 positive aspects (bullet points)
- weaknesses: Top 3 improvement areas (bullet points)
- fit_analysis: 2-3 sentence explanation

Scoring Guidelines:
- 9-10: Exceptional match
- 7-8: Strong match with minor gaps
- 5-6: Partial match
- Below 5: Poor match"#;

fn scoring_user_prompt(requirements: &str, candidate: &str) -> String {
    format!(
        "JOB REQUIREMENTS:\n{}\n\nCANDIDATE DATA:\n{}\n\nAnalyze both technical qualifications and cultural fit.",
        requirements, candidate
    )
}

const IMPROVEMENT_SYSTEM_PROMPT: &str = r#"You are a helpful career consultant and resume improvement assistant.
You take structured data from a person's CV in JSON format (fields like skills, technologies, experience, hobbies)
and provide suggestions for improving the content.

Your suggestions should focus on enhancing clarity, specificity, impact, and professionalism.
For each section, point out if items could be more detailed, reworded, or grouped better.
Only suggest things that would help the candidate stand out in a job market.

Respond with structured JSON like:
{
"skills_suggestions": "...",
"technologies_suggestions": "...",
"experience_suggestions": "...",
"hobbies_suggestions": "...",
"general_tips": "..."
}"#;

const FORMATTING_PROMPT: &str = "Analyze this CV's visual formatting only. Provide specific recommendations on: \
1. Layout organization 2. Font choices 3. Color scheme 4. Section spacing \
5. Visual hierarchy 6. Professional appearance. \
DO NOT extract or mention any text content. \
Provide concise bullet points.";
