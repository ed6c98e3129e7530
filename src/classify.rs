// src/classify.rs
//! Category and source-type assignment.
//!
//! Both tables are ordered lists evaluated top to bottom; the first rule that
//! matches decides. Reordering a table changes results for any text that hits
//! more than one rule.

use serde::{Deserialize, Serialize};
use std::fmt;

type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// A category tag guarded by a predicate over lowercased article text.
pub struct CategoryRule {
    tag: String,
    predicate: Predicate,
}

impl CategoryRule {
    pub fn new<F>(tag: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            tag: tag.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Matches when any keyword is a substring of the text.
    pub fn any_keyword<S: AsRef<str>>(tag: &str, keywords: &[S]) -> Self {
        let kws: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self::new(tag, move |text| kws.iter().any(|k| text.contains(k.as_str())))
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn matches(&self, text: &str) -> bool {
        (self.predicate)(text)
    }
}

impl fmt::Debug for CategoryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoryRule")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    default_tag: String,
}

impl Classifier {
    pub fn new(rules: Vec<CategoryRule>, default_tag: &str) -> Self {
        Self {
            rules,
            default_tag: default_tag.to_string(),
        }
    }

    /// First matching tag, else the default. The text is lowercased here so
    /// callers may pass it as-is.
    pub fn classify(&self, text: &str) -> &str {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lowered))
            .map(CategoryRule::tag)
            .unwrap_or(self.default_tag.as_str())
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(CategoryRule::tag)
    }
}

/// Who publishes a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "Government Agency")]
    GovernmentAgency,
    #[serde(rename = "Major Operator")]
    MajorOperator,
    #[serde(rename = "Government Data")]
    GovernmentData,
    #[serde(rename = "Industry News")]
    IndustryNews,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::GovernmentAgency => "Government Agency",
            SourceType::MajorOperator => "Major Operator",
            SourceType::GovernmentData => "Government Data",
            SourceType::IndustryNews => "Industry News",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        [
            SourceType::GovernmentAgency,
            SourceType::MajorOperator,
            SourceType::GovernmentData,
            SourceType::IndustryNews,
        ]
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (source type, domain markers) list; unmatched domains are industry news.
#[derive(Debug, Clone, Default)]
pub struct SourceTypeRules {
    rules: Vec<(SourceType, Vec<String>)>,
}

impl SourceTypeRules {
    pub fn new(rules: Vec<(SourceType, Vec<String>)>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(kind, markers)| {
                let markers = markers
                    .into_iter()
                    .map(|m| m.trim().to_lowercase())
                    .filter(|m| !m.is_empty())
                    .collect();
                (kind, markers)
            })
            .collect();
        Self { rules }
    }

    pub fn source_type_for(&self, domain: &str) -> SourceType {
        let d = domain.to_lowercase();
        self.rules
            .iter()
            .find(|(_, markers)| markers.iter().any(|m| d.contains(m.as_str())))
            .map(|(kind, _)| *kind)
            .unwrap_or(SourceType::IndustryNews)
    }
}
