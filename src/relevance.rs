// src/relevance.rs
//! Relevance gate: keeps an entry if any topic keyword occurs in its title or
//! description.
//!
//! Matching is plain case-insensitive substring containment. No tokenizing,
//! no word boundaries, no stemming: "gom" also matches "gomez". Recall over
//! precision.

/// Lowercased keyword vocabulary.
#[derive(Debug, Clone, Default)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    pub fn is_relevant(&self, title: &str, description: &str) -> bool {
        let text = format!("{} {}", title, description).to_lowercase();
        self.first_match(&text).is_some()
    }

    /// First keyword found in already-lowercased text.
    pub fn first_match(&self, lowered: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
