//! Chunk record definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Span;

/// A chunk of document text ready for embedding and retrieval.
///
/// Chunks are the fundamental unit of content that gets embedded and
/// indexed. Each chunk keeps its position in the source document for
/// traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique identifier for this chunk
    pub id: Uuid,

    /// Emission order of this chunk within its document (0-indexed)
    pub seq: usize,

    /// The actual text content of the chunk
    pub content: String,

    /// Starting byte offset in the source document
    pub start: usize,

    /// Ending byte offset in the source document
    pub end: usize,

    /// Additional metadata about this chunk
    pub metadata: ChunkMetadata,

    /// When this chunk was created
    pub created_at: DateTime<Utc>,
}

impl Chunk {
    /// Create a new chunk from an emitted span and its sequence number.
    pub fn from_span(seq: usize, span: Span) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq,
            content: span.text,
            start: span.start,
            end: span.end,
            metadata: ChunkMetadata::default(),
            created_at: Utc::now(),
        }
    }

    /// Attach metadata to the chunk.
    pub fn with_metadata(mut self, metadata: ChunkMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Get the length of the chunk content in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the chunk is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata associated with a chunk.
///
/// The paragraph fields are populated by
/// [`Document::chunk_with`](crate::types::Document::chunk_with) when the
/// splitter runs in paragraph-aware mode; otherwise they keep their
/// defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Language of the content ("zh", "en")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Section or heading this chunk belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,

    /// Index of the paragraph this chunk belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph_id: Option<usize>,

    /// Whether this chunk contains a complete paragraph
    pub is_full_paragraph: bool,

    /// Index of this chunk within its paragraph (0 if full paragraph)
    pub chunk_index_in_paragraph: usize,

    /// Start offset within the paragraph
    pub paragraph_offset_start: usize,

    /// End offset within the paragraph
    pub paragraph_offset_end: usize,

    /// Additional arbitrary metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl Default for ChunkMetadata {
    fn default() -> Self {
        Self {
            language: None,
            section: None,
            paragraph_id: None,
            is_full_paragraph: true,
            chunk_index_in_paragraph: 0,
            paragraph_offset_start: 0,
            paragraph_offset_end: 0,
            extra: None,
        }
    }
}

impl ChunkMetadata {
    /// Create metadata for a chunk cut out of a paragraph.
    pub fn for_paragraph(
        paragraph_id: usize,
        is_full_paragraph: bool,
        chunk_index_in_paragraph: usize,
        offset_start: usize,
        offset_end: usize,
    ) -> Self {
        Self {
            paragraph_id: Some(paragraph_id),
            is_full_paragraph,
            chunk_index_in_paragraph,
            paragraph_offset_start: offset_start,
            paragraph_offset_end: offset_end,
            ..Default::default()
        }
    }

    /// Set the language.
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    /// Set the section heading.
    pub fn with_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }
}
