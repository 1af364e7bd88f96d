//! Document wrapper tying chunk records to their source text.

use serde::{Deserialize, Serialize};

use crate::splitter::{split_paragraphs, TextSplitter};
use crate::types::{Chunk, ChunkMetadata, Language, Span};

/// A document and the chunks extracted from it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document text content
    pub content: String,

    /// Chunks extracted from the content
    #[serde(default)]
    pub chunks: Vec<Chunk>,

    /// Document-level metadata
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl Document {
    /// Create a document from its extracted text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Whether the document has any content.
    pub fn is_valid(&self) -> bool {
        !self.content.is_empty()
    }

    /// Run the splitter over the content and wrap the emitted spans into
    /// sequenced chunk records.
    ///
    /// In paragraph-aware mode each chunk is mapped back onto its
    /// detected paragraph to populate the paragraph enrichment fields;
    /// the mapping is best-effort, like the offsets it is derived from.
    pub fn chunk_with(&mut self, splitter: &TextSplitter) -> &[Chunk] {
        let spans = splitter.split_text(&self.content);
        let language = match splitter.config().language {
            Language::Zh => "zh",
            Language::En => "en",
        };

        if splitter.config().paragraph_aware {
            let paragraphs = split_paragraphs(&self.content);
            let mut last_paragraph: Option<usize> = None;
            let mut index_in_paragraph = 0usize;

            self.chunks = spans
                .into_iter()
                .enumerate()
                .map(|(seq, span)| {
                    let metadata = match containing_paragraph(&paragraphs, span.start) {
                        Some((pid, para)) => {
                            if last_paragraph == Some(pid) {
                                index_in_paragraph += 1;
                            } else {
                                index_in_paragraph = 0;
                                last_paragraph = Some(pid);
                            }
                            let is_full = span.text == para.text;
                            ChunkMetadata::for_paragraph(
                                pid,
                                is_full,
                                index_in_paragraph,
                                span.start.saturating_sub(para.start),
                                span.end.saturating_sub(para.start),
                            )
                            .with_language(language)
                        }
                        None => ChunkMetadata::default().with_language(language),
                    };
                    Chunk::from_span(seq, span).with_metadata(metadata)
                })
                .collect();
        } else {
            self.chunks = spans
                .into_iter()
                .enumerate()
                .map(|(seq, span)| {
                    Chunk::from_span(seq, span)
                        .with_metadata(ChunkMetadata::default().with_language(language))
                })
                .collect();
        }

        &self.chunks
    }
}

/// The last paragraph starting at or before `pos`.
fn containing_paragraph(paragraphs: &[Span], pos: usize) -> Option<(usize, &Span)> {
    let idx = paragraphs.partition_point(|p| p.start <= pos);
    idx.checked_sub(1).map(|i| (i, &paragraphs[i]))
}
