//! Item normalization against a canonical-form table

use std::collections::{BTreeMap, HashMap};

const DEFAULT_CANONICAL_FORMS: &[(&str, &str)] = &[
    ("aws", "AWS"),
    ("c#", "C#"),
    ("c++", "C++"),
    ("sql", "SQL"),
    ("js", "JavaScript"),
    ("ts", "TypeScript"),
    ("ts.", "TypeScript"),
    ("ai", "AI"),
    ("ml", "Machine Learning"),
    ("node", "Node.js"),
    ("nodejs", "Node.js"),
    ("next js", "Next.js"),
    ("expressjs", "Express"),
    ("express.js", "Express"),
    ("py", "Python"),
    ("mongo", "MongoDB"),
    ("c++ programming", "C++"),
    ("c programming", "C"),
];

/// Exact-match mapping from a case-folded item to its preferred display form.
///
/// Every canonical form is also reachable from its own case-folded spelling,
/// so normalizing an already canonical item returns it unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalTable {
    explicit: BTreeMap<String, String>,
    forms: HashMap<String, String>,
}

impl Default for CanonicalTable {
    fn default() -> Self {
        Self::new(DEFAULT_CANONICAL_FORMS.iter().copied())
    }
}

impl CanonicalTable {
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let explicit = entries
            .into_iter()
            .map(|(key, value)| (key.as_ref().trim().to_lowercase(), value.into()))
            .filter(|(key, _)| !key.is_empty())
            .collect();

        Self::from_explicit(explicit)
    }

    pub fn empty() -> Self {
        Self::from_explicit(BTreeMap::new())
    }

    fn from_explicit(explicit: BTreeMap<String, String>) -> Self {
        let mut forms: HashMap<String, String> = explicit.clone().into_iter().collect();

        for canonical in explicit.values() {
            forms
                .entry(canonical.to_lowercase())
                .or_insert_with(|| canonical.clone());
        }

        Self { explicit, forms }
    }

    /// A new table with `entries` added; entries win over existing keys.
    pub fn with_overrides<I, K, V>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut explicit = self.explicit.clone();
        for (key, value) in entries {
            let key = key.as_ref().trim().to_lowercase();
            if !key.is_empty() {
                explicit.insert(key, value.into());
            }
        }

        Self::from_explicit(explicit)
    }

    /// Look up an item; the key is case-folded before matching.
    pub fn lookup(&self, item: &str) -> Option<&str> {
        self.forms.get(&item.to_lowercase()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// The explicitly configured entries, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.explicit.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    table: CanonicalTable,
}

impl Normalizer {
    pub fn new(table: CanonicalTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CanonicalTable {
        &self.table
    }

    /// Canonical display form of a raw item, or `None` if it is blank.
    pub fn normalize(&self, raw: &str) -> Option<String> {
        let item = raw.trim();
        if item.is_empty() {
            return None;
        }

        match self.table.lookup(item) {
            Some(canonical) => Some(canonical.to_string()),
            None => Some(title_case(item)),
        }
    }

    /// Normalize every fragment, dropping blanks and keeping order.
    pub fn normalize_all<I, S>(&self, fragments: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        fragments
            .into_iter()
            .filter_map(|fragment| self.normalize(fragment.as_ref()))
            .collect()
    }
}

/// Upper-case the first letter of each whitespace-separated word.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if c.is_whitespace() {
            at_word_start = true;
            result.push(c);
        } else if at_word_start && c.is_alphabetic() {
            at_word_start = false;
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}
