//! Recursive unit splitting with a separator cascade.
//!
//! Breaks text into "units": substrings no longer than the chunk size
//! whose concatenation reproduces the input exactly. Separators are
//! retained at the end of the piece they terminate, which is what makes
//! the reconstruction guarantee hold.

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use super::length::LengthCounter;

/// Split `text` into units of at most `chunk_size` length units.
///
/// Tries each separator in priority order; the first one that produces
/// more than one piece wins, and oversized pieces go back on the
/// worklist for another pass. When no separator applies, the piece is
/// split into grapheme clusters. A piece that cannot be split at all is
/// emitted oversized rather than dropped.
pub(crate) fn split_units<'a>(
    text: &'a str,
    chunk_size: usize,
    separators: &[String],
    length: &dyn LengthCounter,
) -> Vec<&'a str> {
    let mut units = Vec::new();
    // Explicit worklist instead of recursion: pathological input (no
    // usable separator at any level) must not exhaust the stack.
    let mut pending = vec![text];

    while let Some(piece) = pending.pop() {
        if piece.is_empty() {
            continue;
        }
        if length.measure(piece) <= chunk_size {
            units.push(piece);
            continue;
        }

        let parts = split_once(piece, separators);
        if parts.len() <= 1 {
            warn!(
                piece_len = length.measure(piece),
                chunk_size, "piece cannot be split further, emitting oversized"
            );
            units.push(piece);
            continue;
        }
        for part in parts.into_iter().rev() {
            pending.push(part);
        }
    }

    units
}

/// Apply the first separator that splits the piece; grapheme clusters
/// are the last resort.
fn split_once<'a>(piece: &'a str, separators: &[String]) -> Vec<&'a str> {
    for sep in separators {
        if sep.is_empty() {
            continue;
        }
        let parts: Vec<&str> = piece.split_inclusive(sep.as_str()).collect();
        if parts.len() > 1 {
            return parts;
        }
    }
    piece.graphemes(true).collect()
}
