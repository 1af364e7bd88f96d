//! Heading-context tracking for legacy-mode chunk merging.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HEADING_RE: Regex = Regex::new(r"^(#{1,6})\s+(.+)$").unwrap();
}

/// Tracks the Markdown heading context of the text fed through it.
///
/// The merger feeds every unit to [`update`](HeaderTracker::update) and
/// prepends [`get_headers`](HeaderTracker::get_headers) to chunks that
/// would otherwise lose their section context. One tracker instance is
/// scoped to one document; it must not be shared across concurrent
/// splits.
pub trait HeaderTracker {
    /// Feed a text fragment, updating the heading state on any heading
    /// markers it contains.
    fn update(&mut self, fragment: &str);

    /// The current contextual heading prefix, empty when no heading has
    /// been seen.
    fn get_headers(&self) -> String;
}

/// A tracker that never reports heading context.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHeaderTracker;

impl HeaderTracker for NoopHeaderTracker {
    fn update(&mut self, _fragment: &str) {}

    fn get_headers(&self) -> String {
        String::new()
    }
}

/// Markdown heading tracker.
///
/// Maintains a stack of headings: a level-N heading replaces the level-N
/// slot and clears everything deeper. Lines inside fenced code blocks
/// are ignored, so a `# comment` in code never becomes a heading.
///
/// Units may cut a line in two; detection is per complete line within a
/// fragment, so a heading split across fragments can be missed. This is
/// best-effort context, not structure parsing.
#[derive(Debug, Default)]
pub struct MarkdownHeaderTracker {
    /// Active headings as (level, heading line) pairs, outermost first
    stack: Vec<(usize, String)>,
    /// Whether the cursor is currently inside a fenced code block
    in_code_block: bool,
}

impl MarkdownHeaderTracker {
    /// Create a new tracker with no heading context.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HeaderTracker for MarkdownHeaderTracker {
    fn update(&mut self, fragment: &str) {
        for line in fragment.lines() {
            if line.trim_start().starts_with("```") {
                self.in_code_block = !self.in_code_block;
                continue;
            }
            if self.in_code_block {
                continue;
            }

            if let Some(caps) = HEADING_RE.captures(line.trim_end()) {
                let level = caps.get(1).map(|m| m.as_str().len()).unwrap_or(1);
                self.stack.retain(|(l, _)| *l < level);
                self.stack.push((level, line.trim_end().to_string()));
            }
        }
    }

    fn get_headers(&self) -> String {
        if self.stack.is_empty() {
            return String::new();
        }

        let mut headers = String::new();
        for (_, line) in &self.stack {
            headers.push_str(line);
            headers.push('\n');
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_tracker_has_no_headers() {
        let tracker = MarkdownHeaderTracker::new();
        assert_eq!(tracker.get_headers(), "");
    }

    #[test]
    fn test_single_heading() {
        let mut tracker = MarkdownHeaderTracker::new();
        tracker.update("# Title\n\nSome body text.\n");
        assert_eq!(tracker.get_headers(), "# Title\n");
    }

    #[test]
    fn test_nested_headings_stack() {
        let mut tracker = MarkdownHeaderTracker::new();
        tracker.update("# Title\n## Section\n### Detail\n");
        assert_eq!(tracker.get_headers(), "# Title\n## Section\n### Detail\n");
    }

    #[test]
    fn test_sibling_heading_replaces_deeper_levels() {
        let mut tracker = MarkdownHeaderTracker::new();
        tracker.update("# Title\n## First\n### Deep\n");
        tracker.update("## Second\n");
        assert_eq!(tracker.get_headers(), "# Title\n## Second\n");
    }

    #[test]
    fn test_headings_inside_code_fences_ignored() {
        let mut tracker = MarkdownHeaderTracker::new();
        tracker.update("# Real\n```bash\n# not a heading\n```\n");
        assert_eq!(tracker.get_headers(), "# Real\n");
    }

    #[test]
    fn test_noop_tracker() {
        let mut tracker = NoopHeaderTracker;
        tracker.update("# Title\n");
        assert_eq!(tracker.get_headers(), "");
    }
}
