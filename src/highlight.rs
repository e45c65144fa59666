//! Span merging and `<mark>` wrapping for result highlighting.
//!
//! Match spans arrive unsorted and possibly overlapping (the index scan
//! restarts one character past each match start). Merging first guarantees
//! the rendered string never nests markers.

/// Sort spans and coalesce any that overlap or touch.
///
/// Input spans are half-open byte ranges. Output spans are sorted,
/// non-overlapping, and non-adjacent.
pub fn merge_spans(spans: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let mut sorted = spans.to_vec();
    sorted.sort_by_key(|&(start, _)| start);

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
}

/// Wrap matched regions of `text` in `<mark>` tags.
///
/// Spans are merged before wrapping. Stripping the tags from the output
/// reproduces `text` byte-for-byte - the search layer relies on this when
/// it hands highlights to the rendering layer.
pub fn highlight_matches(text: &str, spans: &[(usize, usize)]) -> String {
    if spans.is_empty() {
        return text.to_string();
    }

    let merged = merge_spans(spans);
    let mut result = String::with_capacity(text.len() + merged.len() * 13);
    let mut last = 0;

    for (start, end) in merged {
        result.push_str(&text[last..start]);
        result.push_str("<mark>");
        result.push_str(&text[start..end]);
        result.push_str("</mark>");
        last = end;
    }

    result.push_str(&text[last..]);
    result
}
