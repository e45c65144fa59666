//! Corpus search: scan, aggregate, rank, truncate.
//!
//! The corpus is re-scanned in full on every call - there is no index to
//! build or invalidate, which is the right trade for document counts in
//! the hundreds. The dominant cost is the Levenshtein fallback inside
//! [`fuzzy_score`](crate::fuzzy::fuzzy_score); the substring and word
//! tiers short-circuit it for most fields.
//!
//! Raw ranking is unweighted: an item's score is the arithmetic mean of
//! its field match scores. Weighting is a distinct, optional second stage
//! (see [`crate::weights`]).

use crate::fields::{build_highlights, search_fields};
use crate::types::{SearchOptions, SearchResult, Searchable};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The field list a search actually scans: the caller's override, or the
/// item type's defaults.
fn resolve_fields<'a, T: Searchable>(options: &'a SearchOptions) -> Vec<&'a str> {
    match &options.fields {
        Some(fields) => fields.iter().map(String::as_str).collect(),
        None => T::default_fields().to_vec(),
    }
}

/// Score one item; `None` when no field clears the threshold.
fn score_item<T: Searchable + Clone>(
    item: &T,
    query: &str,
    fields: &[&str],
    options: &SearchOptions,
) -> Option<SearchResult<T>> {
    let matches = search_fields(item, query, fields, options);
    if matches.is_empty() {
        return None;
    }

    let score = matches.iter().map(|m| m.score).sum::<f64>() / matches.len() as f64;
    let highlights = if options.include_highlights {
        Some(build_highlights(item, &matches))
    } else {
        None
    };

    Some(SearchResult {
        item: item.clone(),
        score,
        matches,
        highlights,
    })
}

/// Descending by score; the sort is stable so ties keep corpus order.
fn sort_descending<T>(results: &mut [SearchResult<T>]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Search a corpus with fuzzy multi-field matching.
///
/// A whitespace-only query returns no results - searching nothing is
/// explicitly "no results", not "everything". Items with zero matching
/// fields never appear, not even with score 0.
///
/// Results are sorted by score descending (ties keep corpus order) and
/// truncated to [`SearchOptions::max_results`].
pub fn search_corpus<T: Searchable + Clone>(
    items: &[T],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<T>> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let fields = resolve_fields::<T>(options);
    let mut results: Vec<SearchResult<T>> = items
        .iter()
        .filter_map(|item| score_item(item, query, &fields, options))
        .collect();

    sort_descending(&mut results);
    results.truncate(options.max_results);
    results
}

/// Search with AND semantics across several queries.
///
/// Runs the first query, then keeps only the items every subsequent query
/// also matches. Scores and highlights come from the first query. An empty
/// query list returns no results.
pub fn multi_query_search<T>(
    items: &[T],
    queries: &[&str],
    options: &SearchOptions,
) -> Vec<SearchResult<T>>
where
    T: Searchable + Clone + PartialEq,
{
    let first = match queries.first() {
        Some(first) => first,
        None => return Vec::new(),
    };

    let mut results = search_corpus(items, first, options);

    for query in &queries[1..] {
        if results.is_empty() {
            break;
        }
        let query_results = search_corpus(items, query, options);
        results.retain(|r| query_results.iter().any(|qr| qr.item == r.item));
    }

    results
}

/// Parallel variant of [`search_corpus`].
///
/// The per-item scoring map is embarrassingly parallel; this fans it out
/// across the rayon pool and then restores the sequential contract by
/// sorting on `(score descending, corpus position)`. Output is identical
/// to [`search_corpus`] for the same inputs.
#[cfg(feature = "parallel")]
pub fn search_corpus_parallel<T>(
    items: &[T],
    query: &str,
    options: &SearchOptions,
) -> Vec<SearchResult<T>>
where
    T: Searchable + Clone + Send + Sync,
{
    if query.trim().is_empty() {
        return Vec::new();
    }

    let fields = resolve_fields::<T>(options);
    let mut indexed: Vec<(usize, SearchResult<T>)> = items
        .par_iter()
        .enumerate()
        .filter_map(|(position, item)| {
            score_item(item, query, &fields, options).map(|result| (position, result))
        })
        .collect();

    indexed.sort_by(|a, b| {
        b.1.score
            .partial_cmp(&a.1.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    indexed.truncate(options.max_results);
    indexed.into_iter().map(|(_, result)| result).collect()
}
