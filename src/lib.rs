//! Docsplit Library
//!
//! A language-aware text splitting engine for RAG document pipelines.
//! Splits arbitrarily long document text into bounded-size,
//! position-tagged chunks while protecting structural regions (tables,
//! code fences, math blocks, images and links) and respecting paragraph
//! and sentence boundaries in Chinese and English text.

pub mod splitter;
pub mod types;

pub use splitter::{
    CharCounter, HeaderTracker, LengthCounter, MarkdownHeaderTracker, NoopHeaderTracker,
    SplitMode, TextSplitter, TiktokenCounter,
};
pub use types::{Chunk, ChunkMetadata, ConfigError, Document, Language, Span, SplitterConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::splitter::{
        split_paragraphs, HeaderTracker, MarkdownHeaderTracker, SplitMode, TextSplitter,
    };
    pub use crate::types::*;
}

/// Default chunk size in length-counter units
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Default chunk overlap in length-counter units
pub const DEFAULT_CHUNK_OVERLAP: usize = 100;

/// Search window, in characters, for whitespace hard-splitting of
/// oversized sentences
pub const SENTENCE_SEARCH_WINDOW: usize = 100;
