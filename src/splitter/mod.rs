//! The text splitting engine.
//!
//! Two pipelines share one entry point. Legacy mode splits recursively
//! on a separator cascade, shields protected spans, and greedily merges
//! units into chunks with overlap and heading context — offsets are
//! exact and the pre-merge stream reconstructs the input byte for byte.
//! Paragraph-aware mode keeps short paragraphs whole and cuts long ones
//! at sentence boundaries only — offsets are best-effort once overlap
//! reshuffles sentence boundaries.

mod headers;
mod join;
mod length;
mod merge;
mod paragraph;
mod protected;
mod recursive;
pub mod sentence;

pub use headers::{HeaderTracker, MarkdownHeaderTracker, NoopHeaderTracker};
pub use length::{CharCounter, LengthCounter, TiktokenCounter};
pub use paragraph::split_paragraphs;
pub use sentence::{split_at_nearest_space, split_chinese_sentences, split_english_sentences};

use regex::Regex;
use tracing::debug;

use crate::types::{ConfigError, Language, Span, SplitterConfig};

/// Which pipeline to run for a given document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Recursive separator splitting with protected spans and heading
    /// context; exact offsets.
    Legacy,
    /// Paragraph- and sentence-boundary preserving splitting;
    /// best-effort offsets.
    ParagraphAware,
}

/// Splits document text into bounded-size, position-tagged chunks.
///
/// The splitter is stateless apart from its immutable configuration: a
/// single instance can serve concurrent `split_text` calls over
/// independent documents. Construction validates the configuration and
/// compiles the protected patterns; it is the only fallible operation.
///
/// ```
/// use docsplit::{SplitterConfig, TextSplitter};
///
/// let splitter = TextSplitter::new(SplitterConfig::with_size(200)).unwrap();
/// let chunks = splitter.split_text("第一段内容。\n\n第二段内容。");
/// assert_eq!(chunks.len(), 2);
/// ```
pub struct TextSplitter {
    config: SplitterConfig,
    protected: Vec<Regex>,
    length: Box<dyn LengthCounter>,
}

impl TextSplitter {
    /// Create a splitter with the default character-count length
    /// function.
    pub fn new(config: SplitterConfig) -> Result<Self, ConfigError> {
        Self::with_length_counter(config, Box::new(CharCounter))
    }

    /// Create a splitter with a custom length function (e.g. a token
    /// counter).
    pub fn with_length_counter(
        config: SplitterConfig,
        length: Box<dyn LengthCounter>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let protected = config
            .protected_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            config,
            protected,
            length,
        })
    }

    /// The splitter's configuration.
    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    /// Split text into chunks using the configured mode.
    ///
    /// Always returns a valid (possibly empty) chunk sequence; runtime
    /// anomalies degrade with a logged warning instead of failing.
    pub fn split_text(&self, text: &str) -> Vec<Span> {
        let mode = if self.config.paragraph_aware {
            SplitMode::ParagraphAware
        } else {
            SplitMode::Legacy
        };
        self.split_text_with_mode(text, mode)
    }

    /// Split text with an explicit mode, overriding the configuration.
    pub fn split_text_with_mode(&self, text: &str, mode: SplitMode) -> Vec<Span> {
        match mode {
            SplitMode::ParagraphAware => self.split_paragraph_aware(text),
            SplitMode::Legacy => {
                // Fresh tracker per call: heading state is scoped to one
                // document
                let mut tracker = MarkdownHeaderTracker::new();
                self.split_legacy(text, &mut tracker)
            }
        }
    }

    /// Legacy-mode split with a caller-supplied heading tracker.
    ///
    /// The tracker must be scoped to one document and not shared across
    /// concurrent calls. In paragraph-aware configurations this method
    /// ignores the tracker and behaves like [`split_text`](Self::split_text).
    pub fn split_text_with_tracker(
        &self,
        text: &str,
        tracker: &mut dyn HeaderTracker,
    ) -> Vec<Span> {
        if self.config.paragraph_aware {
            self.split_paragraph_aware(text)
        } else {
            self.split_legacy(text, tracker)
        }
    }

    fn split_legacy(&self, text: &str, tracker: &mut dyn HeaderTracker) -> Vec<Span> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let units = recursive::split_units(
            text,
            self.config.chunk_size,
            &self.config.separators,
            self.length.as_ref(),
        );
        let spans = protected::extract_protected(
            text,
            &self.protected,
            self.config.chunk_size,
            self.length.as_ref(),
        );
        let units = join::isolate_protected(units, &spans);

        // Joining must reproduce the input exactly; anything else is a
        // bug in the unit/span reconciliation above
        debug_assert_eq!(units.concat(), text);

        merge::merge_units(&units, &self.config, self.length.as_ref(), tracker)
    }

    fn split_paragraph_aware(&self, text: &str) -> Vec<Span> {
        if text.is_empty() {
            return Vec::new();
        }

        let paragraphs = split_paragraphs(text);
        debug!(paragraphs = paragraphs.len(), "split text into paragraphs");

        let mut chunks = Vec::new();
        for para in paragraphs {
            let para_len = self.length.measure(&para.text);
            if para_len <= self.config.chunk_size {
                chunks.push(para);
            } else {
                debug!(para_len, "paragraph too long, splitting into sentences");
                self.split_long_paragraph(&para, &mut chunks);
            }
        }
        chunks
    }

    /// Split one oversized paragraph at sentence boundaries, then merge
    /// sentences back into overlap-respecting chunks.
    fn split_long_paragraph(&self, para: &Span, out: &mut Vec<Span>) {
        // Give the sentence splitter headroom: its own fallback only
        // kicks in for sentences that dwarf the chunk size
        let max_len = self.config.chunk_size * 2;
        let sentences = match self.config.language {
            Language::Zh => sentence::split_chinese_sentences(
                &para.text,
                &self.config.sentence_end_marks,
                max_len,
            ),
            Language::En => {
                let marks: Vec<String> = self
                    .config
                    .sentence_end_marks
                    .iter()
                    .filter(|m| matches!(m.as_str(), "." | "!" | "?" | ";"))
                    .cloned()
                    .collect();
                sentence::split_english_sentences(&para.text, &marks, max_len)
            }
        };

        let mut processed = Vec::new();
        for sent in sentences {
            if self.length.measure(&sent) > self.config.chunk_size {
                processed.extend(sentence::hard_split(
                    &sent,
                    self.config.chunk_size,
                    self.length.as_ref(),
                ));
            } else {
                processed.push(sent);
            }
        }

        // Accumulate sentences into chunks; on flush, retain trailing
        // sentences within the overlap budget as the next chunk's start
        let mut merged: Vec<String> = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_len = 0usize;

        for sent in processed {
            let sent_len = self.length.measure(&sent);

            if current_len + sent_len > self.config.chunk_size && !current.is_empty() {
                merged.push(current.concat());

                if self.config.chunk_overlap > 0 {
                    let mut overlap: Vec<String> = Vec::new();
                    let mut overlap_len = 0usize;
                    for s in current.iter().rev() {
                        let s_len = self.length.measure(s);
                        if overlap_len + s_len > self.config.chunk_overlap {
                            break;
                        }
                        overlap.push(s.clone());
                        overlap_len += s_len;
                    }
                    overlap.reverse();
                    current = overlap;
                    current_len = overlap_len;
                } else {
                    current.clear();
                    current_len = 0;
                }
            }

            current_len += sent_len;
            current.push(sent);
        }
        if !current.is_empty() {
            merged.push(current.concat());
        }

        // Best-effort offsets: walk forward from the paragraph start,
        // advancing by chunk length minus overlap. Sentence re-merge can
        // shift true positions; only legacy mode guarantees exactness.
        let mut pos = para.start;
        for chunk in merged {
            let start = pos;
            let end = start + chunk.len();
            pos = if self.config.chunk_overlap > 0 {
                end.saturating_sub(self.config.chunk_overlap)
            } else {
                end
            };
            out.push(Span::new(start, end, chunk));
        }
    }
}
