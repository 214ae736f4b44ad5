//! Resume records: the four extracted category lists plus the source text

use crate::error::Result;
use crate::processing::locator::{SectionBoundary, SectionLocator};
use crate::processing::normalizer::{CanonicalTable, Normalizer};
use crate::processing::splitter::{ItemSplitter, SplitOptions};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skills,
    Technologies,
    Experience,
    Hobbies,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Skills,
        Category::Technologies,
        Category::Experience,
        Category::Hobbies,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Skills => "skills",
            Category::Technologies => "technologies",
            Category::Experience => "experience",
            Category::Hobbies => "hobbies",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Skills => write!(f, "Skills"),
            Category::Technologies => write!(f, "Technologies"),
            Category::Experience => write!(f, "Experience"),
            Category::Hobbies => write!(f, "Hobbies"),
        }
    }
}

/// Ordered header names tried for each category, most specific first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderTables {
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub experience: Vec<String>,
    pub hobbies: Vec<String>,
}

impl Default for HeaderTables {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            skills: names(&["skills & expertise", "technical skills", "skills", "technologies"]),
            technologies: names(&[
                "technologies learned",
                "programming languages",
                "technical skills",
                "technologies",
                "tools",
            ]),
            experience: names(&[
                "professional experience",
                "work experience",
                "employment history",
                "experience",
            ]),
            hobbies: names(&["personal interests", "hobbies", "interests", "activities"]),
        }
    }
}

impl HeaderTables {
    pub fn for_category(&self, category: Category) -> &[String] {
        match category {
            Category::Skills => &self.skills,
            Category::Technologies => &self.technologies,
            Category::Experience => &self.experience,
            Category::Hobbies => &self.hobbies,
        }
    }
}

/// Structured output of parsing one resume.
///
/// Every category is always present; a section that could not be found is
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    skills: Vec<String>,
    technologies: Vec<String>,
    experience: Vec<String>,
    hobbies: Vec<String>,
    raw_text: String,
}

impl ResumeRecord {
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    pub fn experience(&self) -> &[String] {
        &self.experience
    }

    pub fn hobbies(&self) -> &[String] {
        &self.hobbies
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn items(&self, category: Category) -> &[String] {
        match category {
            Category::Skills => &self.skills,
            Category::Technologies => &self.technologies,
            Category::Experience => &self.experience,
            Category::Hobbies => &self.hobbies,
        }
    }

    pub fn item_count(&self) -> usize {
        Category::ALL.iter().map(|c| self.items(*c).len()).sum()
    }

    /// True when no category produced any item.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// The category lists as a JSON object, without the raw text.
    pub fn categories_json(&self) -> serde_json::Value {
        serde_json::json!({
            "skills": self.skills,
            "technologies": self.technologies,
            "experience": self.experience,
            "hobbies": self.hobbies,
        })
    }
}

/// Runs locate, split and normalize for each category.
pub struct ResumeRecordBuilder {
    locators: Vec<(Category, SectionLocator)>,
    splitter: ItemSplitter,
    normalizer: Normalizer,
}

impl ResumeRecordBuilder {
    /// Builder with the default header lists, split options and canonical table.
    pub fn new() -> Result<Self> {
        Self::with_parts(
            &HeaderTables::default(),
            ItemSplitter::new(SplitOptions::default()),
            Normalizer::new(CanonicalTable::default()),
        )
    }

    pub fn with_parts(
        headers: &HeaderTables,
        splitter: ItemSplitter,
        normalizer: Normalizer,
    ) -> Result<Self> {
        let locators = Category::ALL
            .iter()
            .map(|&category| Ok((category, SectionLocator::new(headers.for_category(category))?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            locators,
            splitter,
            normalizer,
        })
    }

    /// Same as `with_parts` but every locator uses `boundary`.
    pub fn with_boundary(
        headers: &HeaderTables,
        splitter: ItemSplitter,
        normalizer: Normalizer,
        boundary: Arc<dyn SectionBoundary>,
    ) -> Result<Self> {
        let locators = Category::ALL
            .iter()
            .map(|&category| {
                let locator = SectionLocator::with_boundary(
                    headers.for_category(category),
                    Arc::clone(&boundary),
                )?;
                Ok((category, locator))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            locators,
            splitter,
            normalizer,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Items for one category; empty when its section is not found.
    pub fn extract_category(&self, text: &str, category: Category) -> Vec<String> {
        let Some((_, locator)) = self.locators.iter().find(|(c, _)| *c == category) else {
            return Vec::new();
        };

        match locator.locate(text) {
            Some(section) => {
                let items = self.normalizer.normalize_all(self.splitter.split(&section.body));
                debug!("{}: {} items under '{}'", category, items.len(), section.header);
                items
            }
            None => {
                debug!("{}: no section found", category);
                Vec::new()
            }
        }
    }

    /// Parse one document's text into a record.
    pub fn build(&self, text: impl Into<String>) -> ResumeRecord {
        let raw_text = text.into();

        ResumeRecord {
            skills: self.extract_category(&raw_text, Category::Skills),
            technologies: self.extract_category(&raw_text, Category::Technologies),
            experience: self.extract_category(&raw_text, Category::Experience),
            hobbies: self.extract_category(&raw_text, Category::Hobbies),
            raw_text,
        }
    }
}
