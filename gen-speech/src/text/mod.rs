//! Text processing module for TTS: sentence splitting and chunking.

pub mod chunker;

pub use chunker::{INPUT_LIMIT, split_sentences};

/// A chunk of text ready for TTS processing.
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    /// Position of this chunk in the document
    pub index: usize,
    /// The text content
    pub text: String,
}

impl TextChunk {
    /// Create a new text chunk.
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    /// Length in characters, as the speech endpoint counts them.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Split a document into indexed chunks of at most `limit` characters.
pub fn process_text(text: &str, limit: usize) -> Vec<TextChunk> {
    chunker::chunk_text(text, limit)
        .into_iter()
        .enumerate()
        .map(|(index, text)| TextChunk::new(index, text))
        .collect()
}
