//! Query suggestions from recent searches.
//!
//! Independent of the corpus search: the suggestion engine only filters a
//! caller-supplied list of recent query strings against the partial query
//! in the search box. Recency ordering is the caller's responsibility -
//! the list is taken as given.

use crate::fuzzy::fuzzy_score;
use std::cmp::Ordering;

/// Default suggestion cap.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// Minimum fuzzy score (strict) for a recent search to qualify.
const SUGGESTION_THRESHOLD: f64 = 0.3;

/// Suggest recent searches matching a partial query.
///
/// An empty query returns the first `max` entries in their given order.
/// Otherwise each recent search is fuzzy-scored against the query; entries
/// scoring above 0.3 are returned best-first, capped at `max`. Ties keep
/// list order (stable sort).
pub fn suggest_queries(query: &str, recent: &[String], max: usize) -> Vec<String> {
    if query.trim().is_empty() {
        return recent.iter().take(max).cloned().collect();
    }

    let mut scored: Vec<(f64, &String)> = recent
        .iter()
        .filter_map(|search| {
            let score = fuzzy_score(query, search, false);
            if score > SUGGESTION_THRESHOLD {
                Some((score, search))
            } else {
                None
            }
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    scored
        .into_iter()
        .take(max)
        .map(|(_, search)| search.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recent() -> Vec<String> {
        [
            "cognitive bias",
            "systems thinking",
            "decision making",
            "complex systems",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    #[test]
    fn test_empty_query_returns_head_of_list() {
        let suggestions = suggest_queries("", &recent(), 3);
        assert_eq!(
            suggestions,
            vec!["cognitive bias", "systems thinking", "decision making"]
        );
    }

    #[test]
    fn test_filters_by_fuzzy_score() {
        let suggestions = suggest_queries("sys", &recent(), DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(suggestions, vec!["systems thinking", "complex systems"]);
    }

    #[test]
    fn test_best_match_first() {
        let suggestions = suggest_queries("cogn", &recent(), DEFAULT_MAX_SUGGESTIONS);
        assert_eq!(suggestions[0], "cognitive bias");
    }

    #[test]
    fn test_no_matches() {
        let suggestions = suggest_queries("quantum", &recent(), DEFAULT_MAX_SUGGESTIONS);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_respects_cap() {
        let suggestions = suggest_queries("s", &recent(), 1);
        assert!(suggestions.len() <= 1);
    }

    #[test]
    fn test_empty_recent_list() {
        assert!(suggest_queries("anything", &[], DEFAULT_MAX_SUGGESTIONS).is_empty());
        assert!(suggest_queries("", &[], DEFAULT_MAX_SUGGESTIONS).is_empty());
    }
}
