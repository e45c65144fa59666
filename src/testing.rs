//! Test fixtures shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::types::{FieldValue, Searchable};

/// A content item shaped like the corpus the engine was built for.
///
/// This is the canonical test corpus type used across all tests.
#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub title: String,
    pub summary: String,
    pub category: String,
    pub tags: Vec<String>,
    pub domains: Vec<String>,
}

impl Searchable for Article {
    fn default_fields() -> &'static [&'static str] {
        &["title", "summary", "category", "tags"]
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "title" => Some(self.title.as_str().into()),
            "summary" => Some(self.summary.as_str().into()),
            "category" => Some(self.category.as_str().into()),
            "tags" => Some(self.tags.clone().into()),
            "domains" => Some(self.domains.clone().into()),
            _ => None,
        }
    }
}

/// Create a minimal article with just a title.
pub fn make_article(title: &str) -> Article {
    Article {
        title: title.to_string(),
        summary: String::new(),
        category: String::new(),
        tags: vec![],
        domains: vec![],
    }
}

/// Create a fully populated article.
pub fn make_article_full(
    title: &str,
    summary: &str,
    category: &str,
    tags: &[&str],
    domains: &[&str],
) -> Article {
    Article {
        title: title.to_string(),
        summary: summary.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        domains: domains.iter().map(|d| (*d).to_string()).collect(),
    }
}

/// The two-article corpus most scenario tests run against.
pub fn sample_corpus() -> Vec<Article> {
    vec![
        make_article_full(
            "Cognitive Bias",
            "How cognitive biases affect our decisions",
            "Psychology",
            &["bias", "decision-making", "psychology"],
            &["Psychology", "Decision Science"],
        ),
        make_article_full(
            "Systems Thinking",
            "Understanding complex systems through holistic thinking",
            "Systems Theory",
            &["systems", "complexity", "thinking"],
            &["Systems Theory"],
        ),
    ]
}
