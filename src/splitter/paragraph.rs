//! Paragraph detection on blank-line boundaries.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Span;

lazy_static! {
    static ref PARAGRAPH_BREAK_RE: Regex = Regex::new(r"\n{2,}").unwrap();
}

/// Split text into paragraphs at runs of two or more newlines.
///
/// Line endings are normalized (`\r\n` and `\r` become `\n`) before
/// detection, so the returned offsets refer to the normalized text; for
/// input without carriage returns they are identical to input offsets.
/// Each span carries the trimmed paragraph text with offsets adjusted to
/// the trimmed content. Blank segments advance the cursor but emit
/// nothing; text without any blank line yields a single paragraph.
pub fn split_paragraphs(text: &str) -> Vec<Span> {
    if text.is_empty() {
        return Vec::new();
    }

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut paragraphs = Vec::new();
    let mut pos = 0usize;

    for brk in PARAGRAPH_BREAK_RE.find_iter(&normalized) {
        push_trimmed(&normalized, pos, brk.start(), &mut paragraphs);
        pos = brk.end();
    }
    push_trimmed(&normalized, pos, normalized.len(), &mut paragraphs);

    paragraphs
}

fn push_trimmed(text: &str, start: usize, end: usize, out: &mut Vec<Span>) {
    let segment = &text[start..end];
    let trimmed = segment.trim();
    if trimmed.is_empty() {
        return;
    }
    let leading = segment.len() - segment.trim_start().len();
    let trailing = segment.len() - segment.trim_end().len();
    out.push(Span::new(start + leading, end - trailing, trimmed));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_double_newline_split() {
        let text = "第一段内容。\n\n第二段内容。\n\n第三段内容。";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].text, "第一段内容。");
        assert_eq!(paragraphs[1].text, "第二段内容。");
        assert_eq!(paragraphs[2].text, "第三段内容。");
    }

    #[test]
    fn test_single_paragraph_without_breaks() {
        let text = "这是一段没有分段的文本。包含多个句子。但都在同一段。";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].text, text);
        assert_eq!(paragraphs[0].start, 0);
        assert_eq!(paragraphs[0].end, text.len());
    }

    #[test]
    fn test_offsets_slice_back_to_text() {
        let text = "one\n\ntwo\n\n\nthree";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        for para in &paragraphs {
            assert_eq!(&text[para.range()], para.text);
        }
    }

    #[test]
    fn test_blank_segments_skipped() {
        let text = "first\n\n   \n\nsecond";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].text, "first");
        assert_eq!(paragraphs[1].text, "second");
    }

    #[test]
    fn test_entirely_blank_input() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("  \n\n \n \t ").is_empty());
    }

    #[test]
    fn test_crlf_normalized() {
        let text = "first\r\n\r\nsecond\r\rthird";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs.len(), 3);
        assert_eq!(paragraphs[0].text, "first");
        assert_eq!(paragraphs[1].text, "second");
        assert_eq!(paragraphs[2].text, "third");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed_with_adjusted_offsets() {
        let text = "  padded  \n\nnext";
        let paragraphs = split_paragraphs(text);
        assert_eq!(paragraphs[0].text, "padded");
        assert_eq!(&text[paragraphs[0].range()], "padded");
    }
}
