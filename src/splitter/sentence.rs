//! Language-aware sentence splitting.
//!
//! Sentences are cut only at sentence-ending punctuation — never at
//! commas or other intra-sentence marks. Chinese text splits directly on
//! full-width end marks; English requires the mark to be followed by
//! whitespace and a capital letter, which keeps abbreviations like
//! "Dr." and "e.g." intact in the common case.

use tracing::warn;

use super::length::LengthCounter;
use crate::SENTENCE_SEARCH_WINDOW;

/// Split Chinese text into sentences at sentence-ending punctuation
/// only, keeping the terminal mark with its sentence.
///
/// Sentences longer than `max_len` characters get a secondary split at
/// semicolons, then colons; with neither present they are returned
/// unsplit and handled later by whitespace hard-splitting. Empty or
/// whitespace-only input yields an empty list.
pub fn split_chinese_sentences(text: &str, end_marks: &[String], max_len: usize) -> Vec<String> {
    split_sentences_at_marks(text, end_marks, max_len, &['；'], &['：', ':'])
}

/// Split English text into sentences at `.!?;` followed by whitespace
/// and an upper-case letter.
///
/// The whitespace between sentences is consumed by the boundary. The
/// same oversized-sentence fallback as the Chinese splitter applies,
/// with ASCII semicolons and colons.
pub fn split_english_sentences(text: &str, end_marks: &[String], max_len: usize) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let marks: Vec<char> = end_marks.iter().filter_map(|m| m.chars().next()).collect();
    let chars: Vec<char> = text.chars().collect();

    let mut sentences = Vec::new();
    let mut sent_start = 0usize;
    let mut i = 0usize;

    while i < chars.len() {
        if marks.contains(&chars[i]) {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            // Boundary: mark, at least one whitespace, then a capital
            if j > i + 1 && j < chars.len() && chars[j].is_ascii_uppercase() {
                push_trimmed(chars[sent_start..=i].iter().collect(), &mut sentences);
                sent_start = j;
                i = j;
                continue;
            }
        }
        i += 1;
    }
    push_trimmed(chars[sent_start..].iter().collect(), &mut sentences);

    apply_length_fallback(sentences, max_len, &[';'], &[':'])
}

fn split_sentences_at_marks(
    text: &str,
    end_marks: &[String],
    max_len: usize,
    semicolons: &[char],
    colons: &[char],
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let marks: Vec<char> = end_marks.iter().filter_map(|m| m.chars().next()).collect();

    let mut sentences = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if marks.contains(&c) {
            // A bare mark with nothing before it carries no sentence
            if !current.is_empty() {
                current.push(c);
                push_trimmed(std::mem::take(&mut current), &mut sentences);
            }
        } else {
            current.push(c);
        }
    }
    push_trimmed(current, &mut sentences);

    apply_length_fallback(sentences, max_len, semicolons, colons)
}

/// Re-split sentences that exceed `max_len` characters at semicolons,
/// then colons, keeping the delimiter with the preceding clause.
fn apply_length_fallback(
    sentences: Vec<String>,
    max_len: usize,
    semicolons: &[char],
    colons: &[char],
) -> Vec<String> {
    let mut result = Vec::new();
    for sent in sentences {
        if sent.chars().count() <= max_len {
            result.push(sent);
        } else if sent.contains(semicolons) {
            result.extend(split_keeping_delimiter(&sent, semicolons));
        } else if sent.contains(colons) {
            result.extend(split_keeping_delimiter(&sent, colons));
        } else {
            // No usable delimiter; the caller hard-splits later
            result.push(sent);
        }
    }
    result
}

fn split_keeping_delimiter(text: &str, delimiters: &[char]) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        current.push(c);
        if delimiters.contains(&c) {
            push_trimmed(std::mem::take(&mut current), &mut parts);
        }
    }
    push_trimmed(current, &mut parts);
    parts
}

fn push_trimmed(piece: String, out: &mut Vec<String>) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

/// Find the byte offset of the whitespace character nearest to the
/// `target`-th character, searching backward first, then forward, within
/// `window` characters. Falls back to the exact target position.
pub fn split_at_nearest_space(text: &str, target: usize, window: usize) -> usize {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    if target >= chars.len() {
        return text.len();
    }

    let lower = target.saturating_sub(window);
    for i in (lower + 1..=target).rev() {
        if matches!(chars[i].1, ' ' | '\t' | '\n') {
            return chars[i].0;
        }
    }

    let upper = (target + window).min(chars.len());
    for i in target..upper {
        if matches!(chars[i].1, ' ' | '\t' | '\n') {
            return chars[i].0;
        }
    }

    chars[target].0
}

/// Hard-split a sentence that exceeds the chunk size, cutting at the
/// whitespace nearest each size boundary.
pub(crate) fn hard_split(
    sentence: &str,
    chunk_size: usize,
    length: &dyn LengthCounter,
) -> Vec<String> {
    warn!(
        sentence_len = length.measure(sentence),
        chunk_size, "sentence exceeds chunk size, applying hard split at whitespace"
    );

    let mut parts = Vec::new();
    let mut remaining = sentence.trim();
    while length.measure(remaining) > chunk_size {
        let pos = split_at_nearest_space(remaining, chunk_size, SENTENCE_SEARCH_WINDOW);
        let head = remaining[..pos].trim();
        if !head.is_empty() {
            parts.push(head.to_string());
        }
        remaining = remaining[pos..].trim();
        if remaining.is_empty() {
            break;
        }
    }
    if !remaining.is_empty() {
        parts.push(remaining.to_string());
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::length::CharCounter;
    use pretty_assertions::assert_eq;

    fn zh_marks() -> Vec<String> {
        ["。", "！", "？", "；"].iter().map(|s| s.to_string()).collect()
    }

    fn en_marks() -> Vec<String> {
        [".", "!", "?", ";"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_chinese_split() {
        let sentences = split_chinese_sentences("这是第一句话。这是第二句话！这是第三句话？", &zh_marks(), 10000);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "这是第一句话。");
        assert_eq!(sentences[1], "这是第二句话！");
        assert_eq!(sentences[2], "这是第三句话？");
    }

    #[test]
    fn test_chinese_no_split_at_comma() {
        let text = "这是一句话，包含逗号，还有更多内容，但不应该被分割。";
        let sentences = split_chinese_sentences(text, &zh_marks(), 10000);
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0], text);
    }

    #[test]
    fn test_chinese_trailing_text_without_mark() {
        let sentences = split_chinese_sentences("完整句子。没有结尾标点的尾巴", &zh_marks(), 10000);
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[1], "没有结尾标点的尾巴");
    }

    #[test]
    fn test_chinese_oversized_falls_back_to_semicolon() {
        // Marks exclude the semicolon, so the primary pass keeps the
        // whole text as one oversized sentence
        let marks: Vec<String> = vec!["。".to_string()];
        let text = "第一部分内容；第二部分内容；第三部分内容。";
        let sentences = split_chinese_sentences(text, &marks, 10);
        assert!(sentences.len() >= 2);
        assert!(sentences[0].ends_with('；'));
    }

    #[test]
    fn test_basic_english_split() {
        let text = "This is the first sentence. This is the second one! Is this the third?";
        let sentences = split_english_sentences(text, &en_marks(), 10000);
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0], "This is the first sentence.");
    }

    #[test]
    fn test_english_no_split_at_comma() {
        let text = "This is a sentence, with commas, but should remain intact.";
        let sentences = split_english_sentences(text, &en_marks(), 10000);
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_english_no_split_without_capital() {
        // Lower-case continuation after the period: not a boundary
        let text = "See fig. 3 for details.";
        let sentences = split_english_sentences(text, &en_marks(), 10000);
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_english_empty_input() {
        assert!(split_english_sentences("", &en_marks(), 100).is_empty());
        assert!(split_english_sentences("   \n ", &en_marks(), 100).is_empty());
    }

    #[test]
    fn test_split_at_nearest_space_backward_preferred() {
        //          0123456789
        let text = "word and tail";
        // Target char 6 ('n'); nearest space backward is at 4
        assert_eq!(split_at_nearest_space(text, 6, 10), 4);
    }

    #[test]
    fn test_split_at_nearest_space_forward_fallback() {
        let text = "abcdefgh ij";
        // No space behind char 4; the forward scan finds the one at 8
        assert_eq!(split_at_nearest_space(text, 4, 5), 8);
    }

    #[test]
    fn test_split_at_nearest_space_no_space_returns_target() {
        let text = "abcdefghij";
        assert_eq!(split_at_nearest_space(text, 4, 3), 4);
    }

    #[test]
    fn test_split_at_nearest_space_target_past_end() {
        let text = "short";
        assert_eq!(split_at_nearest_space(text, 50, 10), text.len());
    }

    #[test]
    fn test_hard_split_bounds_pieces() {
        let text = "aaa bbb ccc ddd eee fff ggg hhh";
        let parts = hard_split(text, 10, &CharCounter);
        assert!(parts.len() > 1);
        for part in &parts {
            assert!(part.chars().count() <= 10, "part too long: {:?}", part);
        }
        // No content is lost beyond collapsed whitespace
        let rejoined = parts.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_hard_split_without_whitespace_cuts_at_boundary() {
        let text = "一二三四五六七八九十一二三四五";
        let parts = hard_split(text, 5, &CharCounter);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].chars().count(), 5);
    }
}
