//! Greedy chunk packing with overlap and heading-context injection.

use std::collections::VecDeque;

use tracing::error;

use super::headers::HeaderTracker;
use super::length::LengthCounter;
use crate::types::{Span, SplitterConfig};

/// Pack the joined unit stream into chunks no larger than the configured
/// size, carrying original-text offsets.
///
/// Units accumulate until the next one (plus the current heading
/// context) would overflow the chunk. The chunk is then closed, the
/// buffer is shrunk from the front until it is within the overlap budget
/// and leaves room for the incoming unit, and — when a heading exists,
/// fits, and is not already present in the surviving buffer or the
/// incoming unit — the heading is prepended as a synthetic leading unit.
pub(crate) fn merge_units(
    units: &[&str],
    config: &SplitterConfig,
    length: &dyn LengthCounter,
    tracker: &mut dyn HeaderTracker,
) -> Vec<Span> {
    let mut chunks: Vec<Span> = Vec::new();

    // Pending buffer of (start, end, text); headings enter as synthetic
    // entries with best-effort offsets
    let mut buffer: VecDeque<(usize, usize, String)> = VecDeque::new();
    let mut buffer_len = 0usize;
    let mut cur_start = 0usize;

    for unit in units {
        let cur_end = cur_start + unit.len();
        let unit_len = length.measure(unit);

        // Should not happen after unit splitting, except for a single
        // oversized protected span
        if unit_len > config.chunk_size {
            error!(
                unit_len,
                chunk_size = config.chunk_size,
                "unit larger than chunk size"
            );
        }

        tracker.update(unit);
        let mut headers = tracker.get_headers();
        let mut headers_len = length.measure(&headers);
        if headers_len > config.chunk_size {
            error!(
                headers_len,
                chunk_size = config.chunk_size,
                "headers larger than chunk size, dropping"
            );
            headers.clear();
            headers_len = 0;
        }

        if buffer_len + unit_len + headers_len > config.chunk_size {
            if !buffer.is_empty() {
                chunks.push(flush(&buffer));
            }

            // Shrink the buffer from the front until it fits the overlap
            // budget and leaves room for the incoming unit
            while !buffer.is_empty()
                && (buffer_len > config.chunk_overlap
                    || buffer_len + unit_len + headers_len > config.chunk_size)
            {
                if let Some(first) = buffer.pop_front() {
                    buffer_len -= length.measure(&first.2);
                }
            }

            if !headers.is_empty() && unit_len + headers_len < config.chunk_size {
                let already_present = unit.contains(headers.as_str())
                    || buffer.iter().any(|b| b.2.contains(headers.as_str()));
                if !already_present {
                    let next_start = buffer.front().map(|b| b.0).unwrap_or(cur_start);
                    let header_start = next_start.saturating_sub(headers_len);
                    buffer.push_front((header_start, cur_end, headers.clone()));
                    buffer_len += headers_len;
                }
            }
        }

        buffer.push_back((cur_start, cur_end, unit.to_string()));
        buffer_len += unit_len;
        cur_start = cur_end;
    }

    // A non-empty unit stream always leaves a final buffer to flush
    debug_assert!(units.is_empty() || !buffer.is_empty());
    if !buffer.is_empty() {
        chunks.push(flush(&buffer));
    }

    chunks
}

fn flush(buffer: &VecDeque<(usize, usize, String)>) -> Span {
    let start = buffer.front().map(|b| b.0).unwrap_or(0);
    let end = buffer.back().map(|b| b.1).unwrap_or(start);
    let text: String = buffer.iter().map(|b| b.2.as_str()).collect();
    Span::new(start, end, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::headers::{MarkdownHeaderTracker, NoopHeaderTracker};
    use crate::splitter::length::CharCounter;
    use pretty_assertions::assert_eq;

    fn config(size: usize, overlap: usize) -> SplitterConfig {
        SplitterConfig::with_size(size).with_overlap(overlap)
    }

    fn merge(units: &[&str], size: usize, overlap: usize) -> Vec<Span> {
        merge_units(units, &config(size, overlap), &CharCounter, &mut NoopHeaderTracker)
    }

    #[test]
    fn test_all_units_fit_one_chunk() {
        let chunks = merge(&["abc ", "def ", "ghi"], 100, 0);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "abc def ghi");
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, 11);
    }

    #[test]
    fn test_chunks_close_at_size_bound() {
        let chunks = merge(&["aaaa", "bbbb", "cccc", "dddd"], 8, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "aaaabbbb");
        assert_eq!(chunks[1].text, "ccccdddd");
    }

    #[test]
    fn test_offsets_are_exact() {
        let chunks = merge(&["aaaa", "bbbb", "cccc"], 8, 0);
        assert_eq!(chunks[0].start, 0);
        assert_eq!(chunks[0].end, 8);
        assert_eq!(chunks[1].start, 8);
        assert_eq!(chunks[1].end, 12);
    }

    #[test]
    fn test_overlap_retains_trailing_units() {
        let chunks = merge(&["aaaa", "bbbb", "cccc"], 8, 4);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].text, "aaaabbbb");
        // "bbbb" is retained as overlap before "cccc"
        assert_eq!(chunks[1].text, "bbbbcccc");
        assert_eq!(chunks[1].start, 4);
    }

    #[test]
    fn test_retained_overlap_within_budget() {
        let chunks = merge(&["aa", "bb", "cc", "dd", "ee"], 6, 2);
        for pair in chunks.windows(2) {
            let prev = &pair[0].text;
            let next = &pair[1].text;
            // Overlapping prefix of the next chunk is at most the budget
            let overlap: usize = (0..=prev.len())
                .rev()
                .find(|n| next.starts_with(&prev[prev.len() - n..]))
                .unwrap_or(0);
            assert!(overlap <= 2, "overlap {} too large", overlap);
        }
    }

    #[test]
    fn test_heading_prepended_to_following_chunk() {
        let mut tracker = MarkdownHeaderTracker::new();
        let units = ["# Title\n", "aaaaaaaa", "bbbbbbbb"];
        let chunks = merge_units(&units, &config(20, 0), &CharCounter, &mut tracker);
        assert_eq!(chunks.len(), 3);
        // Chunks that lost the heading get it back as context
        assert_eq!(chunks[0].text, "# Title\n");
        assert_eq!(chunks[1].text, "# Title\naaaaaaaa");
        assert_eq!(chunks[2].text, "# Title\nbbbbbbbb");
    }

    #[test]
    fn test_heading_not_duplicated_when_already_present() {
        let mut tracker = MarkdownHeaderTracker::new();
        let units = ["# T\n", "aaaa"];
        let chunks = merge_units(&units, &config(100, 0), &CharCounter, &mut tracker);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "# T\naaaa");
    }

    #[test]
    fn test_empty_units_yield_no_chunks() {
        let chunks = merge(&[], 10, 0);
        assert!(chunks.is_empty());
    }
}
