//! Configuration types for the splitting engine.

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

/// Default separator cascade for recursive unit splitting, in priority
/// order: line breaks, Chinese full stops, spaces.
pub const DEFAULT_SEPARATORS: [&str; 3] = ["\n", "。", " "];

/// Default sentence-ending punctuation, covering both Chinese and
/// English marks.
pub const DEFAULT_SENTENCE_END_MARKS: [&str; 8] = ["。", "！", "？", "；", ".", "!", "?", ";"];

/// Default protected patterns: structural regions that must never be
/// fragmented across chunks.
pub const DEFAULT_PROTECTED_PATTERNS: [&str; 6] = [
    // math formula - LaTeX style formulas enclosed in $$
    r"\$\$[\s\S]*?\$\$",
    // image - Markdown image syntax ![alt](url)
    r"!\[.*?\]\(.*?\)",
    // link - Markdown link syntax [text](url)
    r"\[.*?\]\(.*?\)",
    // table header - Markdown table header with separator line
    r"(?:\|[^|\n]*)+\|[\r\n]+\s*(?:\|\s*:?-{3,}:?\s*)+\|[\r\n]+",
    // table body - Markdown table rows
    r"(?:\|[^|\n]*)+\|[\r\n]+",
    // code header - Code block start with language identifier
    r"```(?:\w+)[\r\n]+[^\r\n]*",
];

/// Primary language used for sentence-boundary detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Chinese: split on full-width sentence-ending marks only.
    Zh,
    /// English: split on `.!?;` followed by whitespace and a capital.
    En,
}

impl Default for Language {
    fn default() -> Self {
        Self::Zh
    }
}

impl Language {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zh" => Some(Self::Zh),
            "en" => Some(Self::En),
            _ => None,
        }
    }
}

/// Errors raised when a splitter is constructed from an invalid
/// configuration. Construction is the only fallible operation in the
/// engine; splitting itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Chunk overlap must not exceed chunk size.
    #[error("chunk overlap ({overlap}) is larger than chunk size ({size}), should be smaller")]
    OverlapExceedsSize {
        /// The configured chunk size.
        size: usize,
        /// The overlap that exceeded it.
        overlap: usize,
    },

    /// Chunk size must be positive.
    #[error("chunk size must be greater than zero")]
    ZeroChunkSize,

    /// A protected pattern failed to compile.
    #[error("invalid protected pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        source: regex::Error,
    },
}

/// Configuration for a [`TextSplitter`](crate::splitter::TextSplitter).
///
/// Invariants (`chunk_overlap <= chunk_size`, `chunk_size > 0`, valid
/// protected patterns) are enforced when the splitter is constructed,
/// not at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitterConfig {
    /// Maximum chunk length, in length-counter units.
    pub chunk_size: usize,

    /// Trailing content repeated at the start of the next chunk.
    pub chunk_overlap: usize,

    /// Separator cascade for recursive splitting, highest priority first.
    pub separators: Vec<String>,

    /// Regex patterns for content that must be kept intact.
    pub protected_patterns: Vec<String>,

    /// Preserve paragraph and sentence boundaries instead of raw
    /// separator splitting.
    pub paragraph_aware: bool,

    /// Primary language for sentence-boundary detection.
    pub language: Language,

    /// Punctuation marks that terminate a sentence.
    pub sentence_end_marks: Vec<String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            separators: DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect(),
            protected_patterns: DEFAULT_PROTECTED_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            paragraph_aware: true,
            language: Language::Zh,
            sentence_end_marks: DEFAULT_SENTENCE_END_MARKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SplitterConfig {
    /// Create a config with the given chunk size.
    pub fn with_size(size: usize) -> Self {
        Self {
            chunk_size: size,
            ..Default::default()
        }
    }

    /// Set the overlap.
    pub fn with_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }

    /// Set the separator cascade.
    pub fn with_separators(mut self, separators: Vec<String>) -> Self {
        self.separators = separators;
        self
    }

    /// Set the protected patterns.
    pub fn with_protected_patterns(mut self, patterns: Vec<String>) -> Self {
        self.protected_patterns = patterns;
        self
    }

    /// Enable or disable paragraph-aware mode.
    pub fn with_paragraph_aware(mut self, enabled: bool) -> Self {
        self.paragraph_aware = enabled;
        self
    }

    /// Set the language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Set the sentence-ending marks.
    pub fn with_sentence_end_marks(mut self, marks: Vec<String>) -> Self {
        self.sentence_end_marks = marks;
        self
    }

    /// Load configuration overrides from environment variables.
    ///
    /// Reads `CHUNK_SIZE`, `CHUNK_OVERLAP`, `PARAGRAPH_AWARE`, and
    /// `SPLIT_LANGUAGE`; anything unset or unparsable keeps its default.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            chunk_size: std::env::var("CHUNK_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_size),
            chunk_overlap: std::env::var("CHUNK_OVERLAP")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.chunk_overlap),
            paragraph_aware: std::env::var("PARAGRAPH_AWARE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.paragraph_aware),
            language: std::env::var("SPLIT_LANGUAGE")
                .ok()
                .and_then(|s| Language::parse(&s))
                .unwrap_or(defaults.language),
            ..defaults
        }
    }

    /// Check the size invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        if self.chunk_overlap > self.chunk_size {
            return Err(ConfigError::OverlapExceedsSize {
                size: self.chunk_size,
                overlap: self.chunk_overlap,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SplitterConfig::default().validate().is_ok());
    }

    #[test]
    fn test_overlap_larger_than_size_rejected() {
        let config = SplitterConfig::with_size(100).with_overlap(200);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OverlapExceedsSize {
                size: 100,
                overlap: 200
            })
        ));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = SplitterConfig::with_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroChunkSize)));
    }

    #[test]
    fn test_builder_chain() {
        let config = SplitterConfig::with_size(256)
            .with_overlap(32)
            .with_language(Language::En)
            .with_paragraph_aware(false);
        assert_eq!(config.chunk_size, 256);
        assert_eq!(config.chunk_overlap, 32);
        assert_eq!(config.language, Language::En);
        assert!(!config.paragraph_aware);
    }
}
