//! Dictionary-as-a-string: all terms concatenated into one buffer, with an
//! offset table for lookup.
//!
//! `lookup` slices the dictionary string using the *query* term's own byte
//! length rather than a length recorded at build time, so it only produces
//! the correct substring when the query term's length matches whatever was
//! actually stored at that offset.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::compression::DictCompressor;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryAsAStringCompressor {
    dictionary_string: String,
    term_offsets: HashMap<String, usize>,
}

impl DictCompressor for DictionaryAsAStringCompressor {
    fn build(terms: &[String]) -> Self {
        let mut sorted: Vec<&String> = terms.iter().collect();
        sorted.sort();

        let mut dictionary_string = String::new();
        let mut term_offsets = HashMap::new();
        let mut offset = 0usize;
        for term in sorted {
            term_offsets.insert(term.clone(), offset);
            dictionary_string.push_str(term);
            offset += term.len();
        }

        Self {
            dictionary_string,
            term_offsets,
        }
    }

    /// Slices `[offset, offset + term.len())` out of the concatenated
    /// string using the query term's own byte length, not a length
    /// recorded at build time (see module docs).
    fn lookup(&self, term: &str) -> Option<String> {
        let offset = *self.term_offsets.get(term)?;
        let end = offset + term.len();
        self.dictionary_string.get(offset..end).map(str::to_string)
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
    fn round_trip_lookup_for_built_terms() {
        let compressor = DictionaryAsAStringCompressor::build(&terms(&["banana", "apple", "cherry"]));
        assert_eq!(compressor.lookup("apple"), Some("apple".to_string()));
        assert_eq!(compressor.lookup("banana"), Some("banana".to_string()));
        assert_eq!(compressor.lookup("cherry"), Some("cherry".to_string()));
    }

    #[test]
    fn unbuilt_term_returns_none() {
        let compressor = DictionaryAsAStringCompressor::build(&terms(&["apple"]));
        assert_eq!(compressor.lookup("durian"), None);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dict.string_dict");
        let compressor = DictionaryAsAStringCompressor::build(&terms(&["auto", "automata"]));
        compressor.save(&path).unwrap();

        let reloaded = DictionaryAsAStringCompressor::load(&path).unwrap();
        assert_eq!(reloaded.lookup("auto"), Some("auto".to_string()));
        assert_eq!(reloaded.lookup("automata"), Some("automata".to_string()));
    }
}
