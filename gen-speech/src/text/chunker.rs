//! Sentence-aligned text chunking for the speech endpoint.

use regex::Regex;
use std::sync::OnceLock;

/// Maximum characters the speech endpoint accepts per request.
pub const INPUT_LIMIT: usize = 4096;

/// Terminal punctuation followed (after optional whitespace) by a capital.
static BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn boundary() -> &'static Regex {
    BOUNDARY.get_or_init(|| {
        Regex::new(r"[.?!]\s*[A-Z]").expect("sentence boundary pattern is valid")
    })
}

/// Split text into sentences.
///
/// A boundary sits right after a `.`, `?` or `!` that is followed by an
/// uppercase ASCII letter. The whitespace between the two is dropped; the
/// punctuation stays with the sentence it ends. Text without a boundary,
/// including empty text, is a single sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in boundary().find_iter(text) {
        // Both the punctuation and the capital are single-byte ASCII.
        sentences.push(&text[start..m.start() + 1]);
        start = m.end() - 1;
    }
    sentences.push(&text[start..]);
    sentences
}

/// Greedily pack sentences into chunks shorter than `limit` characters.
///
/// Each sentence is followed by one separator space. A sentence too long to
/// fit even an empty chunk is emitted alone, as is, without a separator.
pub fn pack_sentences(sentences: &[&str], limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut remaining = sentences.iter().peekable();

    while remaining.peek().is_some() {
        let mut chunk = String::new();
        let mut chunk_len = 0;

        while let Some(sentence) = remaining.peek() {
            let sentence_len = sentence.chars().count();
            if chunk_len + sentence_len + 1 >= limit {
                break;
            }
            chunk.push_str(sentence);
            chunk.push(' ');
            chunk_len += sentence_len + 1;
            remaining.next();
        }

        if chunk.is_empty() {
            if let Some(sentence) = remaining.next() {
                chunk.push_str(sentence);
            }
        }

        chunks.push(chunk);
    }

    chunks
}

/// Split text into chunks for synthesis.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    pack_sentences(&split_sentences(text), limit)
}
