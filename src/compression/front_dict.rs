//! Global front-coding: every term stores `(prefixLen, suffix)` against the
//! immediately preceding term across the whole sorted list (no blocking).
//! Reconstruction walks forward iteratively from index 0, the single
//! global anchor, rather than recursing.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compression::DictCompressor;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontCodingCompressor {
    compressed_terms: Vec<(usize, String)>,
    term_to_index: HashMap<String, usize>,
}

impl FrontCodingCompressor {
    /// Reconstructs the term at `index` by replaying prefix/suffix pairs
    /// forward from index 0, the single global anchor.
    pub fn decompress(&self, index: usize) -> Option<String> {
        if index >= self.compressed_terms.len() {
            return None;
        }
        let mut current = String::new();
        for (prefix_len, suffix) in &self.compressed_terms[..=index] {
            current = format!("{}{}", &current[..*prefix_len], suffix);
        }
        Some(current)
    }
}

impl DictCompressor for FrontCodingCompressor {
    fn build(terms: &[String]) -> Self {
        let mut sorted: Vec<String> = terms.to_vec();
        sorted.sort();

        let mut compressed_terms = Vec::with_capacity(sorted.len());
        let mut term_to_index = HashMap::new();

        let mut prev = String::new();
        for (i, term) in sorted.iter().enumerate() {
            let prefix_len = if i == 0 {
                0
            } else {
                super::common_prefix_len(&prev, term)
            };
            compressed_terms.push((prefix_len, term[prefix_len..].to_string()));
            term_to_index.insert(term.clone(), i);
            prev = term.clone();
        }

        Self {
            compressed_terms,
            term_to_index,
        }
    }

    fn lookup(&self, term: &str) -> Option<String> {
        let index = *self.term_to_index.get(term)?;
        self.decompress(index)
    }

    fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(file, self)?;
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let compressor = serde_json::from_reader(file)?;
        Ok(compressor)
    }
}
