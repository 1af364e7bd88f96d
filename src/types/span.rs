//! Position-tagged text segments.

use serde::{Deserialize, Serialize};

/// A segment of text with its position in the source document.
///
/// `start` and `end` are byte offsets into the source string, following
/// Rust's slicing convention. Spans are produced for emitted chunks,
/// protected regions, and detected paragraphs alike.
///
/// In legacy splitting mode the offsets are exact; in paragraph-aware
/// mode they are best-effort once overlap reshuffles sentence
/// boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset where this segment starts in the source text.
    pub start: usize,

    /// Byte offset where this segment ends (exclusive).
    pub end: usize,

    /// The segment text.
    pub text: String,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    /// Length of the segment text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the segment text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The byte range of this segment in the source document.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}
