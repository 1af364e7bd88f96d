//! Extraction of protected spans that must survive splitting intact.

use regex::Regex;
use tracing::warn;

use super::length::LengthCounter;

/// Find the non-overlapping protected spans of `text` as
/// `(start, content)` pairs in position order.
///
/// Candidate matches from all patterns are sorted by start ascending and
/// length descending, so at equal starts the longer match wins. The fold
/// then keeps a candidate only when it begins at or past the furthest
/// end seen so far; everything else is shadowed by an earlier, longer
/// match. Spans whose measured length reaches `chunk_size` are excluded
/// from protection — they could never fit a chunk — and left to ordinary
/// splitting.
pub(crate) fn extract_protected<'a>(
    text: &'a str,
    patterns: &[Regex],
    chunk_size: usize,
    length: &dyn LengthCounter,
) -> Vec<(usize, &'a str)> {
    let mut matches: Vec<(usize, usize)> = patterns
        .iter()
        .flat_map(|pattern| pattern.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    matches.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut spans = Vec::new();
    let mut furthest_end = 0usize;

    for (start, end) in matches {
        if start >= furthest_end {
            let content = &text[start..end];
            if length.measure(content) < chunk_size {
                spans.push((start, content));
            } else {
                warn!(start, end, "protected span exceeds chunk size, ignoring");
            }
        }
        furthest_end = furthest_end.max(end);
    }

    spans
}
