//! Pluggable length measurement for chunk sizing.

use anyhow::Result;

/// Measures the length of a piece of text in the unit the size bound is
/// expressed in.
///
/// The engine treats length as opaque: `chunk_size` and `chunk_overlap`
/// are compared against whatever this trait reports. The default is
/// character count; a token counter can be plugged in when chunks must
/// fit a model context window.
pub trait LengthCounter: Send + Sync {
    /// Measure the given text.
    fn measure(&self, text: &str) -> usize;
}

/// Character-count length function (the default).
#[derive(Debug, Default, Clone, Copy)]
pub struct CharCounter;

impl LengthCounter for CharCounter {
    fn measure(&self, text: &str) -> usize {
        text.chars().count()
    }
}

/// Token counter using tiktoken (cl100k_base encoding).
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Create a new token counter with the cl100k_base encoding
    /// (GPT-4/ChatGPT).
    pub fn new() -> Self {
        // cl100k_base is used by GPT-4, ChatGPT, and text-embedding-ada-002
        let bpe = tiktoken_rs::cl100k_base().expect("Failed to load cl100k_base encoding");
        Self { bpe }
    }

    /// Create a token counter with a specific encoding.
    pub fn with_encoding(encoding_name: &str) -> Result<Self> {
        let bpe = match encoding_name {
            "cl100k_base" => tiktoken_rs::cl100k_base(),
            "p50k_base" => tiktoken_rs::p50k_base(),
            "p50k_edit" => tiktoken_rs::p50k_edit(),
            "r50k_base" => tiktoken_rs::r50k_base(),
            _ => tiktoken_rs::cl100k_base(),
        }?;
        Ok(Self { bpe })
    }
}

impl Default for TiktokenCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LengthCounter for TiktokenCounter {
    fn measure(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }
}
