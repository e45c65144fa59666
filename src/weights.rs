// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Weighted re-ranking: the optional second pass over raw search results.
//!
//! The corpus scan ranks by unweighted mean score. This module recomputes
//! each result's score as a weighted average over its field matches,
//! applying exact/prefix boosts and small contextual boosts, then re-sorts.
//!
//! # Scores above 1.0
//!
//! Boosted scores are NOT renormalized to `[0, 1]`. A weight table with
//! `boostExact: 2.0` can push a score to 1.92, and that is the documented
//! behavior: the weighted score is an ordering device, not a probability.
//! Clamping here would silently change ranking for boosted queries - if a
//! caller wants a hard cap they must add one themselves.
//!
//! # Unmapped fields
//!
//! A match whose field is absent from the weight table is skipped, not
//! zero-weighted: it contributes to neither the numerator nor the
//! denominator. A result with *no* mapped field collapses to score 0 - an
//! unweighted field cannot carry the result.

use crate::types::{FieldWeight, SearchClick, SearchContext, SearchResult, TimeOfDay};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Match score at or above which the exact boost applies.
const EXACT_BOOST_GATE: f64 = 0.95;
/// Match score at or above which the prefix boost applies (when the exact
/// boost did not).
const PREFIX_BOOST_GATE: f64 = 0.8;

/// Contextual boost increments. Additive to a 1.0 baseline and deliberately
/// small, so no single context signal can dominate text relevance.
const CATEGORY_AFFINITY_BOOST: f64 = 0.2;
const TAG_AFFINITY_BOOST: f64 = 0.15;
const MOST_VIEWED_BOOST: f64 = 0.1;
const MORNING_DESCRIPTION_BOOST: f64 = 0.05;

/// Default per-click adjustment for [`update_weights_from_feedback`].
pub const DEFAULT_FEEDBACK_STEP: f64 = 0.05;
/// Weights never drop below this floor during feedback redistribution.
pub const MIN_FIELD_WEIGHT: f64 = 0.1;
/// Default multiplier for [`apply_history_boost`].
pub const DEFAULT_HISTORY_BOOST: f64 = 1.2;

/// Contextual multiplier for one field.
fn contextual_boost(field: &str, context: &SearchContext) -> f64 {
    let mut boost = 1.0;

    if let Some(prefs) = &context.user_preferences {
        if field == "category" && !prefs.preferred_categories.is_empty() {
            boost += CATEGORY_AFFINITY_BOOST;
        }
        if field == "tags" && !prefs.preferred_tags.is_empty() {
            boost += TAG_AFFINITY_BOOST;
        }
    }

    if let Some(session) = &context.session_data {
        if session.most_viewed_fields.iter().any(|f| f == field) {
            boost += MOST_VIEWED_BOOST;
        }
    }

    if context.time_of_day == Some(TimeOfDay::Morning) && field == "description" {
        boost += MORNING_DESCRIPTION_BOOST;
    }

    boost
}

/// Recompute result scores as weighted averages. Order is untouched -
/// callers that want the new order use [`re_rank`].
///
/// Per match: the exact boost applies at score ≥ 0.95, otherwise the
/// prefix boost at ≥ 0.8 (never both), then the contextual boost when a
/// context is given.
pub fn apply_weights<T>(
    results: Vec<SearchResult<T>>,
    weights: &[FieldWeight],
    context: Option<&SearchContext>,
) -> Vec<SearchResult<T>> {
    let table: HashMap<&str, &FieldWeight> =
        weights.iter().map(|w| (w.field.as_str(), w)).collect();

    results
        .into_iter()
        .map(|mut result| {
            let mut weighted_sum = 0.0;
            let mut weight_sum = 0.0;

            for m in &result.matches {
                let field_weight = match table.get(m.field.as_str()) {
                    Some(field_weight) => *field_weight,
                    None => continue,
                };

                let mut match_score = m.score;

                if let Some(boost) = field_weight.boost_exact.filter(|_| m.score >= EXACT_BOOST_GATE)
                {
                    match_score *= boost;
                } else if let Some(boost) =
                    field_weight.boost_prefix.filter(|_| m.score >= PREFIX_BOOST_GATE)
                {
                    match_score *= boost;
                }

                if let Some(context) = context {
                    match_score *= contextual_boost(&m.field, context);
                }

                weighted_sum += match_score * field_weight.weight;
                weight_sum += field_weight.weight;
            }

            result.score = if weight_sum > 0.0 {
                weighted_sum / weight_sum
            } else {
                0.0
            };
            result
        })
        .collect()
}

/// [`apply_weights`] followed by a stable descending sort.
pub fn re_rank<T>(
    results: Vec<SearchResult<T>>,
    weights: &[FieldWeight],
    context: Option<&SearchContext>,
) -> Vec<SearchResult<T>> {
    let mut weighted = apply_weights(results, weights, context);
    weighted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    weighted
}

/// Shift weight toward a field the user clicked.
///
/// The clicked field gains `step` (capped at 1.0); every other field loses
/// `step / (n - 1)` (floored at [`MIN_FIELD_WEIGHT`]). Away from the cap
/// and floor the total weight is conserved. A single-entry table only
/// gets the increase - there is nothing to debit.
///
/// A deterministic online-adjustment rule, not gradient descent: each
/// click moves the table by a fixed amount.
pub fn update_weights_from_feedback(
    weights: &[FieldWeight],
    clicked_field: &str,
    step: f64,
) -> Vec<FieldWeight> {
    let others = weights.len().saturating_sub(1);

    weights
        .iter()
        .map(|w| {
            let mut updated = w.clone();
            if w.field == clicked_field {
                updated.weight = (w.weight + step).min(1.0);
            } else if others > 0 {
                updated.weight = (w.weight - step / others as f64).max(MIN_FIELD_WEIGHT);
            }
            updated
        })
        .collect()
}

/// Rescale weights proportionally so they sum to `target_sum`.
///
/// A zero-sum table is returned unchanged - there is no scale factor that
/// can rescue it.
pub fn normalize_weights(weights: &[FieldWeight], target_sum: f64) -> Vec<FieldWeight> {
    let current_sum: f64 = weights.iter().map(|w| w.weight).sum();
    if current_sum == 0.0 {
        return weights.to_vec();
    }

    let factor = target_sum / current_sum;
    weights
        .iter()
        .map(|w| {
            let mut updated = w.clone();
            updated.weight = w.weight * factor;
            updated
        })
        .collect()
}

/// Copy a weight table, replacing the weights named in `overrides`.
///
/// Boosts are kept; only the base weight changes. Override keys that name
/// no field in the table are ignored.
pub fn create_custom_weights(
    base: &[FieldWeight],
    overrides: &HashMap<String, f64>,
) -> Vec<FieldWeight> {
    base.iter()
        .map(|w| match overrides.get(&w.field) {
            Some(&weight) => {
                let mut updated = w.clone();
                updated.weight = weight;
                updated
            }
            None => w.clone(),
        })
        .collect()
}

// =============================================================================
// RELEVANCE FACTORS
// =============================================================================

/// Inputs for a combined relevance score outside the per-field pipeline.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelevanceFactors {
    /// How well the text matches, in `[0, 1]`.
    pub text_match: f64,
    /// Importance of the matched field, in `[0, 1]`.
    pub field_importance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_affinity: Option<f64>,
}

/// Blend relevance factors with fixed weights, capped at 1.0.
///
/// Text match dominates (0.5), then field importance (0.25); the optional
/// signals contribute 0.1 / 0.08 / 0.07 when present.
pub fn relevance_score(factors: &RelevanceFactors) -> f64 {
    let mut score = factors.text_match * 0.5 + factors.field_importance * 0.25;

    if let Some(recency) = factors.recency {
        score += recency * 0.1;
    }
    if let Some(popularity) = factors.popularity {
        score += popularity * 0.08;
    }
    if let Some(affinity) = factors.user_affinity {
        score += affinity * 0.07;
    }

    score.min(1.0)
}

/// Fraction of `content` words that appear in `query`.
///
/// Whitespace tokenization only, case-insensitive. A crude signal, but
/// cheap enough to run on every result.
pub fn word_overlap_similarity(query: &str, content: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let query_words: HashSet<&str> = query_lower.split_whitespace().collect();

    let content_lower = content.to_lowercase();
    let content_words: Vec<&str> = content_lower.split_whitespace().collect();
    if content_words.is_empty() {
        return 0.0;
    }

    let matched = content_words
        .iter()
        .filter(|word| query_words.contains(**word))
        .count();
    matched as f64 / content_words.len() as f64
}

/// Boost results whose matched fields the user clicks often.
///
/// Click history is reduced to per-field probabilities; a field clicked
/// with probability above 0.3 multiplies the result score by
/// `1 + p * (boost_factor - 1)` for each matching field. Empty history is
/// a no-op.
pub fn apply_history_boost<T>(
    results: Vec<SearchResult<T>>,
    history: &[SearchClick],
    boost_factor: f64,
) -> Vec<SearchResult<T>> {
    if history.is_empty() {
        return results;
    }

    let mut field_counts: HashMap<&str, usize> = HashMap::new();
    for click in history {
        *field_counts.entry(click.selected_field.as_str()).or_insert(0) += 1;
    }
    let total_clicks = history.len() as f64;

    results
        .into_iter()
        .map(|mut result| {
            let mut boost = 1.0;
            for m in &result.matches {
                let probability = field_counts
                    .get(m.field.as_str())
                    .map_or(0.0, |count| *count as f64 / total_clicks);
                if probability > 0.3 {
                    boost *= 1.0 + probability * (boost_factor - 1.0);
                }
            }
            result.score *= boost;
            result
        })
        .collect()
}
