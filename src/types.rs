// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search call.
//!
//! Everything here is created fresh per search and discarded after the
//! caller consumes it - the engine holds no index and no cache, so a call
//! is a pure function of `(corpus, query, options, weights, context)`.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **SearchMatch**: `score ∈ [0, 1]`, and `indices` are half-open byte
//!   ranges into the field's search text. Spans may overlap as found;
//!   they are merged before any highlight markup is emitted.
//!
//! - **SearchResult**: `matches` is never empty. A result means at least
//!   one field cleared the threshold - "no match" is expressed by absence
//!   from the result list, never by a zero-score entry.
//!
//! - **SearchResult.score**: mean of the field match scores after the
//!   corpus scan, the weighted score after re-ranking. Callers must not
//!   assume which stage produced the value - the contract is "current
//!   best score, descending within a result set."
//!
//! - **FieldWeight**: `weight ∈ [0, 1]`, boosts `≥ 1`. Enforced at
//!   configuration load (see `config`), never at match time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// FIELD ACCESS
// =============================================================================

/// The value of one searchable field.
///
/// List fields (tags, domains) are joined with a single space to form the
/// search text, so a fuzzy match spanning a join boundary is possible and
/// counts as a real match. The joined text is the *only* representation -
/// match indices and highlights both refer to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

impl FieldValue {
    /// The string representation matches and highlights are computed on.
    pub fn search_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::List(items) => items.join(" "),
        }
    }

    /// True when there is nothing to score.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::List(items) => items.iter().all(|item| item.is_empty()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// Field access for arbitrary corpus types.
///
/// The engine never sees an item's concrete shape - it reads fields by
/// name through this trait. Unknown names return `None` and the field is
/// simply skipped, so a stale field list degrades the search rather than
/// aborting it.
pub trait Searchable {
    /// Fields scanned when [`SearchOptions::fields`] is unset.
    fn default_fields() -> &'static [&'static str];

    /// The value of the named field, if the item has one.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

// =============================================================================
// SEARCH RESULTS
// =============================================================================

/// One field's match evidence for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    pub field: String,
    /// Half-open byte ranges of literal query occurrences in the field's
    /// search text. Empty for matches found only through edit distance.
    pub indices: Vec<(usize, usize)>,
    pub score: f64,
}

/// A ranked item with its match evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<T> {
    pub item: T,
    pub score: f64,
    pub matches: Vec<SearchMatch>,
    /// Marked-up field texts, present only when highlights were requested.
    /// Consumers treat the key's presence as the feature flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<HashMap<String, String>>,
}

/// Knobs for a corpus search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchOptions {
    /// Minimum fuzzy score for a field to count as matched.
    pub fuzzy_threshold: f64,
    /// Result list cap, applied after sorting.
    pub max_results: usize,
    /// Subset (and order) of fields to scan. `None` means the item type's
    /// default field list.
    pub fields: Option<Vec<String>>,
    pub case_sensitive: bool,
    /// When false the `highlights` map is omitted entirely, not left empty.
    pub include_highlights: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            fuzzy_threshold: 0.3,
            max_results: 50,
            fields: None,
            case_sensitive: false,
            include_highlights: true,
        }
    }
}

// =============================================================================
// WEIGHTING
// =============================================================================

/// Per-field importance used during re-ranking.
///
/// Weights shape the second-pass score only - the corpus scan filters and
/// ranks unweighted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldWeight {
    pub field: String,
    /// Importance in `[0, 1]`.
    pub weight: f64,
    /// Multiplier for matches scoring `≥ 0.95`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_exact: Option<f64>,
    /// Multiplier for matches scoring `≥ 0.8` (skipped when the exact
    /// boost applies - the two are exclusive).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost_prefix: Option<f64>,
}

impl FieldWeight {
    pub fn new(field: &str, weight: f64) -> Self {
        FieldWeight {
            field: field.to_string(),
            weight,
            boost_exact: None,
            boost_prefix: None,
        }
    }

    pub fn with_boosts(field: &str, weight: f64, exact: f64, prefix: f64) -> Self {
        FieldWeight {
            field: field.to_string(),
            weight,
            boost_exact: Some(exact),
            boost_prefix: Some(prefix),
        }
    }
}

// =============================================================================
// SEARCH CONTEXT
// =============================================================================

/// Coarse time-of-day bucket for contextual boosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

/// Stated user affinities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub preferred_categories: Vec<String>,
    pub preferred_tags: Vec<String>,
    pub recent_searches: Vec<String>,
}

/// One recorded result click: which field the user selected for a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchClick {
    pub query: String,
    pub selected_field: String,
}

/// Observed in-session behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionData {
    pub most_viewed_fields: Vec<String>,
    pub search_history: Vec<SearchClick>,
}

/// Optional ranking context. Pure input: the engine never mutates or
/// persists it, and every boost it feeds is deliberately small so no
/// single signal can dominate text relevance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_preferences: Option<UserPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_data: Option<SessionData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<TimeOfDay>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_join() {
        let value = FieldValue::List(vec!["bias".to_string(), "decision-making".to_string()]);
        assert_eq!(value.search_text(), "bias decision-making");
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::from("x").is_empty());
    }

    #[test]
    fn test_options_defaults() {
        let options = SearchOptions::default();
        assert_eq!(options.fuzzy_threshold, 0.3);
        assert_eq!(options.max_results, 50);
        assert!(options.fields.is_none());
        assert!(!options.case_sensitive);
        assert!(options.include_highlights);
    }

    #[test]
    fn test_match_serializes_camel_case() {
        let m = SearchMatch {
            field: "title".to_string(),
            indices: vec![(0, 9)],
            score: 0.9,
        };
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, r#"{"field":"title","indices":[[0,9]],"score":0.9}"#);
    }

    #[test]
    fn test_result_omits_absent_highlights() {
        let result = SearchResult {
            item: "doc".to_string(),
            score: 1.0,
            matches: vec![],
            highlights: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("highlights"));
    }

    #[test]
    fn test_context_round_trips() {
        let context = SearchContext {
            user_preferences: Some(UserPreferences {
                preferred_categories: vec!["Psychology".to_string()],
                ..UserPreferences::default()
            }),
            session_data: None,
            time_of_day: Some(TimeOfDay::Morning),
        };
        let json = serde_json::to_string(&context).unwrap();
        assert!(json.contains(r#""timeOfDay":"morning""#));
        let back: SearchContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, context);
    }
}
