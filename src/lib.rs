//! Fuzzy multi-field search with weighted, context-aware re-ranking.
//!
//! This crate scans an in-memory corpus per query - no index, no cache -
//! and hands back ranked results with per-field match spans for
//! highlighting. Corpus sizes in the hundreds are the design point; the
//! substring and word tiers of the scorer short-circuit the O(nm)
//! edit-distance fallback for most fields.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  fuzzy.rs   │────▶│  fields.rs   │────▶│  search.rs   │
//! │ (fuzzy_score│     │(search_fields│     │(search_corpus│
//! │  indices)   │     │  highlights) │     │ multi_query) │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────┐                         ┌──────────────┐
//! │ suggest.rs  │                         │  weights.rs  │
//! │(recent-query│                         │(apply_weights│
//! │ filtering)  │                         │   re_rank)   │
//! └─────────────┘                         └──────────────┘
//! ```
//!
//! Every call is a pure function of `(corpus, query, options, weights,
//! context)`. No state survives between calls, so independent searches
//! can run on separate threads without locking; the `parallel` feature
//! additionally fans the per-item scoring map across rayon.
//!
//! # Usage
//!
//! ```ignore
//! use mustela::{search_corpus, re_rank, SearchOptions, WeightConfig};
//!
//! let results = search_corpus(&articles, "cognitive bias", &SearchOptions::default());
//! let config = WeightConfig::default();
//! let ranked = re_rank(results, config.profile("narrative").unwrap(), None);
//! ```

// Module declarations
mod config;
mod fields;
mod fuzzy;
mod highlight;
mod search;
mod suggest;
mod types;
mod weights;

#[doc(hidden)]
pub mod testing;

// Re-exports for public API
pub use config::{WeightConfig, WeightConfigError};
pub use fields::{build_highlights, search_fields};
pub use fuzzy::{find_match_indices, fuzzy_score, levenshtein_distance};
pub use highlight::{highlight_matches, merge_spans};
pub use search::{multi_query_search, search_corpus};
#[cfg(feature = "parallel")]
pub use search::search_corpus_parallel;
pub use suggest::{suggest_queries, DEFAULT_MAX_SUGGESTIONS};
pub use types::{
    FieldValue, FieldWeight, SearchClick, SearchContext, SearchMatch, SearchOptions, SearchResult,
    Searchable, SessionData, TimeOfDay, UserPreferences,
};
pub use weights::{
    apply_history_boost, apply_weights, create_custom_weights, normalize_weights, re_rank,
    relevance_score, update_weights_from_feedback, word_overlap_similarity, RelevanceFactors,
    DEFAULT_FEEDBACK_STEP, DEFAULT_HISTORY_BOOST, MIN_FIELD_WEIGHT,
};

#[cfg(test)]
mod tests {
    //! Property tests over the whole pipeline.
    //!
    //! These pin the contracts the unit tests spot-check: determinism,
    //! score bounds, no-match exclusion, highlight round-trips, and
    //! agreement of the in-house Levenshtein with an external oracle.

    use super::*;
    use crate::testing::{make_article_full, Article};
    use proptest::prelude::*;
    use proptest::string::string_regex;

    fn word_strategy() -> impl Strategy<Value = String> {
        string_regex("[a-z]{2,8}").unwrap()
    }

    fn title_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(word_strategy(), 1..4).prop_map(|words| words.join(" "))
    }

    fn corpus_strategy() -> impl Strategy<Value = Vec<Article>> {
        prop::collection::vec(
            (title_strategy(), prop::collection::vec(word_strategy(), 0..3)),
            1..8,
        )
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(title, tags)| {
                    let tag_refs: Vec<&str> = tags.iter().map(String::as_str).collect();
                    make_article_full(&title, "", "", &tag_refs, &[])
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn identical_inputs_yield_identical_results(
            corpus in corpus_strategy(),
            query in word_strategy(),
        ) {
            let options = SearchOptions::default();
            let first = search_corpus(&corpus, &query, &options);
            let second = search_corpus(&corpus, &query, &options);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn raw_scores_stay_in_unit_interval(
            corpus in corpus_strategy(),
            query in word_strategy(),
        ) {
            let options = SearchOptions::default();
            for result in search_corpus(&corpus, &query, &options) {
                prop_assert!(result.score >= 0.0 && result.score <= 1.0);
                prop_assert!(!result.matches.is_empty());
                for m in &result.matches {
                    prop_assert!(m.score >= options.fuzzy_threshold);
                    prop_assert!(m.score <= 1.0);
                }
            }
        }

        #[test]
        fn results_sorted_descending(
            corpus in corpus_strategy(),
            query in word_strategy(),
        ) {
            let results = search_corpus(&corpus, &query, &SearchOptions::default());
            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
            }
        }

        #[test]
        fn highlights_strip_back_to_search_text(
            corpus in corpus_strategy(),
            query in word_strategy(),
        ) {
            let results = search_corpus(&corpus, &query, &SearchOptions::default());
            for result in results {
                let highlights = result.highlights.expect("highlights requested by default");
                for (field, rendered) in &highlights {
                    let original = result.item.field(field).unwrap().search_text();
                    let stripped = rendered.replace("<mark>", "").replace("</mark>", "");
                    prop_assert_eq!(stripped, original);
                    prop_assert!(!rendered.contains("<mark><mark>"));
                }
            }
        }

        #[test]
        fn title_substring_query_finds_its_article(
            corpus in corpus_strategy(),
            pick in any::<prop::sample::Index>(),
        ) {
            let article = pick.get(&corpus);
            let title = article.title.clone();
            prop_assume!(title.len() >= 2);
            let query = &title[..title.len() / 2];
            prop_assume!(!query.trim().is_empty());

            let results = search_corpus(&corpus, query, &SearchOptions::default());
            prop_assert!(results.iter().any(|r| r.item.title == title));
        }

        #[test]
        fn levenshtein_agrees_with_oracle(
            a in string_regex("[a-zéü ]{0,12}").unwrap(),
            b in string_regex("[a-zéü ]{0,12}").unwrap(),
        ) {
            prop_assert_eq!(levenshtein_distance(&a, &b), strsim::levenshtein(&a, &b));
        }

        #[test]
        fn suggestions_come_from_the_recent_list(
            recent in prop::collection::vec(title_strategy(), 0..6),
            query in word_strategy(),
        ) {
            for suggestion in suggest_queries(&query, &recent, DEFAULT_MAX_SUGGESTIONS) {
                prop_assert!(recent.contains(&suggestion));
            }
        }

        #[test]
        fn feedback_conserves_weight_total_away_from_bounds(
            weights in prop::collection::vec(0.2f64..0.8, 2..6),
        ) {
            let table: Vec<FieldWeight> = weights
                .iter()
                .enumerate()
                .map(|(i, weight)| FieldWeight::new(&format!("field{}", i), *weight))
                .collect();

            let before: f64 = table.iter().map(|w| w.weight).sum();
            let updated = update_weights_from_feedback(&table, "field0", 0.05);
            let after: f64 = updated.iter().map(|w| w.weight).sum();

            // 0.2..0.8 with step 0.05 cannot hit the 1.0 cap or 0.1 floor
            prop_assert!((before - after).abs() < 1e-9);
        }
    }

    #[test]
    fn pipeline_search_then_re_rank() {
        let corpus = crate::testing::sample_corpus();
        let results = search_corpus(&corpus, "psychology", &SearchOptions::default());
        assert!(!results.is_empty());

        let config = WeightConfig::default();
        let ranked = re_rank(results, config.profile("narrative").unwrap(), None);
        assert!(!ranked.is_empty());
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}
