//! Shared tokenize/normalize/stem/stop-word pipeline.
//!
//! An explicit value constructed once and threaded through both the indexer
//! and the query parser, rather than process-wide state initialized at
//! module load, so indexing-time and query-time normalization always agree.
//!
//! Normalization order: split into alphanumeric runs, lowercase, drop
//! tokens that are entirely ASCII digits, stem, then drop the result if it
//! is empty or a stop word.

use std::collections::HashSet;

use stop_words::{LANGUAGE, get};

#[derive(Clone)]
pub struct TextPipeline {
    stop_words: HashSet<String>,
}

impl TextPipeline {
    pub fn new() -> Self {
        let stop_words = get(LANGUAGE::English).into_iter().collect();
        Self { stop_words }
    }

    /// Splits raw text into normalized terms suitable for indexing. Terms
    /// that become empty or are stop words are dropped; order is preserved
    /// but duplicates within the document are not removed (the in-memory
    /// dictionary's posting set dedups on insertion).
    pub fn tokenize_document(&self, text: &str) -> Vec<String> {
        split_words(text)
            .into_iter()
            .filter_map(|word| self.normalize_token(word))
            .collect()
    }

    /// Normalizes a single query term through the identical pipeline used
    /// for documents. Returns `None` if the term is dropped (empty after
    /// stripping, purely numeric, or a stop word).
    pub fn normalize_term(&self, token: &str) -> Option<String> {
        self.normalize_token(token)
    }

    fn normalize_token(&self, word: &str) -> Option<String> {
        let lowered = word.to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if lowered.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let stemmed = porter_stemmer::stem(&lowered);
        if stemmed.is_empty() || self.stop_words.contains(&stemmed) {
            return None;
        }
        Some(stemmed)
    }
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits text into maximal runs of alphanumeric characters, discarding
/// everything else (punctuation, whitespace).
fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start: Option<usize> = None;
    let mut last_end = 0;
    for (idx, ch) in text.char_indices() {
        if ch.is_alphanumeric() {
            if start.is_none() {
                start = Some(idx);
            }
            last_end = idx + ch.len_utf8();
        } else if let Some(s) = start.take() {
            words.push(&text[s..last_end]);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..last_end]);
    }
    words
}
