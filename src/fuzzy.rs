// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzzy scoring with cheap early exits.
//!
//! The scorer tries exact equality, substring containment, and word-boundary
//! matches before falling back to the O(nm) Levenshtein DP. On a typical
//! corpus the early tiers resolve most fields, so the expensive path only
//! runs for genuinely fuzzy pairs.
//!
//! Score tiers (first matching rule wins):
//!
//! | Rule                         | Score            |
//! |------------------------------|------------------|
//! | Exact match                  | 1.0              |
//! | Substring containment        | 0.9              |
//! | Whole-word match             | 0.85             |
//! | Word-prefix match            | 0.8              |
//! | Edit-distance similarity     | similarity * 0.7 |
//!
//! The similarity tier only fires above 0.5; anything below scores 0.
//! Changing any tier constant changes which queries match - ranking tests
//! pin all five.

/// Levenshtein edit distance over Unicode characters.
///
/// Classic unit-cost DP (insertion, deletion, substitution - no
/// transposition) with a rolling single row, so memory is O(len(b)).
/// Character counts, not byte lengths, so multi-byte UTF-8 compares
/// correctly.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_len = b.chars().count();
    if a.is_empty() {
        return b_len;
    }
    if b.is_empty() {
        return a.chars().count();
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
        }
    }

    dp[b_len]
}

/// Similarity between a query and a field value, in `[0, 1]`.
///
/// Tier order is a contract, not an optimization: a substring hit returns
/// 0.9 without ever computing edit distance, and a word-prefix hit returns
/// 0.8 even when the full-string similarity would score lower.
pub fn fuzzy_score(query: &str, text: &str, case_sensitive: bool) -> f64 {
    if query.is_empty() || text.is_empty() {
        return 0.0;
    }

    let (q, t) = if case_sensitive {
        (query.to_string(), text.to_string())
    } else {
        (query.to_lowercase(), text.to_lowercase())
    };

    if t == q {
        return 1.0;
    }

    if t.contains(q.as_str()) {
        return 0.9;
    }

    for word in t.split_whitespace() {
        if word == q {
            return 0.85;
        }
        if word.starts_with(q.as_str()) {
            return 0.8;
        }
    }

    let distance = levenshtein_distance(&q, &t);
    let max_len = q.chars().count().max(t.chars().count());
    let similarity = 1.0 - distance as f64 / max_len as f64;

    if similarity > 0.5 {
        similarity * 0.7
    } else {
        0.0
    }
}

/// Compare two characters, optionally ignoring case.
///
/// Case folding compares the full `to_lowercase` expansions, so characters
/// whose lowercase forms differ in length ('İ' vs 'i') compare unequal
/// rather than mis-aligning offsets.
fn chars_eq(a: char, b: char, case_sensitive: bool) -> bool {
    if a == b {
        return true;
    }
    if case_sensitive {
        return false;
    }
    a.to_lowercase().eq(b.to_lowercase())
}

/// Byte offset of the end of a match starting at `start`, if `text[start..]`
/// begins with `query` under the requested case rule.
fn match_end_at(query: &str, text: &str, start: usize, case_sensitive: bool) -> Option<usize> {
    let mut tail = text[start..].char_indices();

    for qc in query.chars() {
        let (_, tc) = tail.next()?;
        if !chars_eq(qc, tc, case_sensitive) {
            return None;
        }
    }

    Some(match tail.next() {
        Some((offset, _)) => start + offset,
        None => text.len(),
    })
}

/// Every occurrence of `query` as a literal substring of `text`.
///
/// Returns half-open byte ranges into `text` as stored - offsets stay valid
/// for slicing regardless of case rule. The scan restarts one character
/// past each match start, so self-overlapping patterns ("aa" in "aaa")
/// yield overlapping spans; [`crate::highlight::merge_spans`] coalesces
/// them before any markup is produced.
///
/// Only literal occurrences are reported. A field that matched through the
/// edit-distance tier gets no spans at all - highlighting below
/// substring-level is a known precision gap, kept deliberately.
pub fn find_match_indices(query: &str, text: &str, case_sensitive: bool) -> Vec<(usize, usize)> {
    let mut indices = Vec::new();
    if query.is_empty() {
        return indices;
    }

    let mut start = 0;
    while start < text.len() {
        if let Some(end) = match_end_at(query, text, start, case_sensitive) {
            indices.push((start, end));
        }
        // Advance one character, not one byte
        start += text[start..].chars().next().map_or(1, char::len_utf8);
    }

    indices
}
