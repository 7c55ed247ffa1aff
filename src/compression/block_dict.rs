//! Blocking (front-coding within fixed-size blocks).
//!
//! Terms are sorted, then partitioned into blocks of `block_size` (default
//! 8); each block stores its first term verbatim and every subsequent term
//! as `(prefixLen, suffix)` against the previous term in the block.
//! Reconstruction walks forward iteratively from the block head.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compression::DictCompressor;
use crate::error::Result;

pub const DEFAULT_BLOCK_SIZE: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BlockEntry {
    Head(String),
    Suffix { prefix_len: usize, suffix: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockingCompressor {
    block_size: usize,
    compressed_blocks: Vec<Vec<BlockEntry>>,
    term_to_block: HashMap<String, (usize, usize)>,
}

impl BlockingCompressor {
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: block_size.max(1),
            compressed_blocks: Vec::new(),
            term_to_block: HashMap::new(),
        }
    }

    /// Reconstructs the term at `(block_idx, term_idx)` by walking forward
    /// from the block head.
    pub fn decompress(&self, block_idx: usize, term_idx: usize) -> Option<String> {
        let block = self.compressed_blocks.get(block_idx)?;
        if term_idx >= block.len() {
            return None;
        }

        let mut current = match &block[0] {
            BlockEntry::Head(term) => term.clone(),
            BlockEntry::Suffix { .. } => return None,
        };
        for entry in block.iter().take(term_idx + 1).skip(1) {
            let BlockEntry::Suffix { prefix_len, suffix } = entry else {
                return None;
            };
            current = format!("{}{}", &current[..*prefix_len], suffix);
        }
        Some(current)
    }
}

impl DictCompressor for BlockingCompressor {
    fn build(terms: &[String]) -> Self {
        let mut compressor = Self::with_block_size(DEFAULT_BLOCK_SIZE);
        let mut sorted: Vec<String> = terms.to_vec();
        sorted.sort();

        for block_terms in sorted.chunks(compressor.block_size) {
            if block_terms.is_empty() {
                continue;
            }
            let mut block = vec![BlockEntry::Head(block_terms[0].clone())];
            for pair in block_terms.windows(2) {
                let (prev, curr) = (&pair[0], &pair[1]);
                let prefix_len = super::common_prefix_len(prev, curr);
                block.push(BlockEntry::Suffix {
                    prefix_len,
                    suffix: curr[prefix_len..].to_string(),
                });
            }
            compressor.compressed_blocks.push(block);
            let block_idx = compressor.compressed_blocks.len() - 1;
            for (j, term) in block_terms.iter().enumerate() {
                compressor.term_to_block.insert(term.clone(), (block_idx, j));
            }
        }
        compressor
    }

    fn lookup(&self, term: &str) -> Option<String> {
        let (block_idx, term_idx) = *self.term_to_block.get(term)?;
        self.decompress(block_idx, term_idx)
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn terms(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn round_trip_lookup_within_a_single_block() {
        let compressor = BlockingCompressor::build(&terms(&[
            "auto",
            "automata",
            "automobile",
            "autonomy",
            "banana",
        ]));
        assert_eq!(compressor.lookup("automobile"), Some("automobile".to_string()));
        assert_eq!(compressor.lookup("banana"), Some("banana".to_string()));
    }

    #[test]
    fn reconstructs_every_term_in_order_across_blocks() {
        let words = vec![
            "a", "ab", "abc", "abcd", "abcde", "abcdef", "abcdefg", "abcdefgh", "abcdefghi",
        ];
        let compressor = BlockingCompressor::build(&terms(&words));
        for w in &words {
            assert_eq!(compressor.lookup(w), Some(w.to_string()));
        }
    }

    #[test]
    fn unbuilt_term_returns_none() {
        let compressor = BlockingCompressor::build(&terms(&["apple"]));
        assert_eq!(compressor.lookup("durian"), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.block_dict");
        let compressor = BlockingCompressor::build(&terms(&["auto", "automata", "banana"]));
        compressor.save(&path).unwrap();

        let reloaded = BlockingCompressor::load(&path).unwrap();
        assert_eq!(reloaded.lookup("automata"), Some("automata".to_string()));
    }
}
