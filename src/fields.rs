// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-item field scanning.
//!
//! For one item and one field list, produce zero or one [`SearchMatch`]
//! per field. A field participates when its fuzzy score clears the
//! threshold; missing fields and empty values are skipped silently, so a
//! sparse or partially corrupt item degrades to fewer matches instead of
//! failing the scan.

use crate::fuzzy::{find_match_indices, fuzzy_score};
use crate::highlight::highlight_matches;
use crate::types::{SearchMatch, SearchOptions, Searchable};
use std::collections::HashMap;

/// Scan the given fields of one item against the query.
///
/// Fields are visited in the order given, and each contributes at most one
/// match. List-valued fields are scored on their space-joined text, so a
/// match spanning a join boundary is accepted as real.
pub fn search_fields<T: Searchable>(
    item: &T,
    query: &str,
    fields: &[&str],
    options: &SearchOptions,
) -> Vec<SearchMatch> {
    let mut matches = Vec::new();

    for &field in fields {
        let value = match item.field(field) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };

        let text = value.search_text();
        let score = fuzzy_score(query, &text, options.case_sensitive);

        if score >= options.fuzzy_threshold {
            let indices = find_match_indices(query, &text, options.case_sensitive);
            matches.push(SearchMatch {
                field: field.to_string(),
                indices,
                score,
            });
        }
    }

    matches
}

/// Render the matched fields of an item with `<mark>` markup.
///
/// Highlights are computed on the same search text the matches were found
/// in, so stripping the markers always reproduces that text exactly.
/// Fields whose match came only through edit distance carry no spans and
/// render unmarked.
pub fn build_highlights<T: Searchable>(
    item: &T,
    matches: &[SearchMatch],
) -> HashMap<String, String> {
    let mut highlights = HashMap::new();

    for m in matches {
        if let Some(value) = item.field(&m.field) {
            let text = value.search_text();
            highlights.insert(m.field.clone(), highlight_matches(&text, &m.indices));
        }
    }

    highlights
}
