//! Core types for the splitting engine.

mod chunk;
mod config;
mod document;
mod span;

pub use chunk::{Chunk, ChunkMetadata};
pub use config::{
    ConfigError, Language, SplitterConfig, DEFAULT_PROTECTED_PATTERNS,
    DEFAULT_SENTENCE_END_MARKS, DEFAULT_SEPARATORS,
};
pub use document::Document;
pub use span::Span;
