//! Splitting a section body into raw items

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitOptions {
    /// Strip stray punctuation and turn whitespace runs into commas before splitting
    pub collapse_punctuation: bool,
    /// Treat `+` as a delimiter (breaks items such as "C++")
    pub split_on_plus: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            collapse_punctuation: true,
            split_on_plus: false,
        }
    }
}

pub struct ItemSplitter {
    options: SplitOptions,
    stray_punctuation: Regex,
    delimiters: Regex,
}

impl Default for ItemSplitter {
    fn default() -> Self {
        Self::new(SplitOptions::default())
    }
}

impl ItemSplitter {
    pub fn new(options: SplitOptions) -> Self {
        // Group 1 marks whitespace runs, which become delimiters; anything else is dropped
        let stray_punctuation = Regex::new(r"[^\w\s,+.#/\-]|(\s{2,}|\t+)")
            .expect("Invalid punctuation regex");

        let delimiters = if options.split_on_plus {
            Regex::new(r"[\r\n•*,\-·‑/+]+")
        } else {
            Regex::new(r"[\r\n•*,\-·‑/]+")
        }
        .expect("Invalid delimiter regex");

        Self {
            options,
            stray_punctuation,
            delimiters,
        }
    }

    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Split a section body into raw fragments. Fragments may be blank.
    pub fn split(&self, body: &str) -> Vec<String> {
        let cleaned = if self.options.collapse_punctuation {
            self.collapse(body)
        } else {
            body.to_string()
        };

        self.delimiters
            .split(&cleaned)
            .map(str::to_string)
            .collect()
    }

    fn collapse(&self, body: &str) -> String {
        self.stray_punctuation
            .replace_all(body, |caps: &Captures| {
                if caps.get(1).is_some() {
                    ","
                } else {
                    ""
                }
            })
            .into_owned()
    }
}
