//! Integration with the external AI evaluation service

pub mod prompts;
pub mod evaluation;

pub use evaluation::{AiAssessment, AiReviewer, AssessedCandidate, Evaluator, ImprovementSuggestions};
pub use prompts::{image_mime_type, ChatMessage, ChatRequest, MessageContent, PromptTemplates};
