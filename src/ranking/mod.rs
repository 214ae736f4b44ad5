//! Candidate ranking

pub mod skill_match;

pub use skill_match::{rank_resumes, sort_by_score, SkillMatch, SkillMatcher, SkillRanking};
