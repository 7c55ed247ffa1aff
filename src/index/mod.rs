//! Materializes a final index file into an in-memory `Term -> PostingSet` map.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{info, warn};

use crate::doc::DocId;
use crate::error::{IndexError, Result};
use crate::paths::skip_sidecar_path;
use crate::posting::PostingSet;
use crate::spimi::block_store::parse_line;

/// The loaded index: every term mapped to its posting set, plus the set of
/// all document ids seen (the "Universe" used to evaluate `NOT`).
pub struct Index {
    terms: HashMap<String, PostingSet>,
    skip_size: usize,
}

impl Index {
    /// Reads `path` line by line and builds a `PostingSet` per term. When
    /// `skip_size > 0` and a `.skips` sidecar exists next to `path`, the
    /// pre-materialized skip-indexed posting lists are loaded from it
    /// instead of being rebuilt; otherwise they are built in memory and,
    /// when `skip_size > 0`, persisted for subsequent loads.
    pub fn load(path: &Path, skip_size: usize) -> Result<Self> {
        if !path.exists() {
            return Err(IndexError::IndexFileNotFound(path.to_path_buf()));
        }

        let sidecar = skip_sidecar_path(path);
        if skip_size > 0 {
            if let Some(index) = Self::load_sidecar(&sidecar, skip_size)? {
                info!(path = %sidecar.display(), "loaded skip sidecar");
                return Ok(index);
            }
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut terms = HashMap::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let Some((term, ids)) = parse_line(&line) else {
                return Err(IndexError::CorruptBlock {
                    path: path.to_path_buf(),
                    reason: format!("unparsable line: {line:?}"),
                });
            };
            terms.insert(term, PostingSet::new(ids, skip_size));
        }

        let index = Self { terms, skip_size };
        if skip_size > 0 {
            if let Err(e) = index.save_sidecar(&sidecar) {
                warn!(error = %e, "failed to persist skip sidecar");
            }
        }
        Ok(index)
    }

    fn load_sidecar(sidecar: &Path, skip_size: usize) -> Result<Option<Self>> {
        if !sidecar.exists() {
            return Ok(None);
        }
        let file = File::open(sidecar)?;
        let stored: HashMap<String, crate::posting::PostingList> = serde_json::from_reader(file)?;
        let terms = stored
            .into_iter()
            .map(|(term, list)| (term, PostingSet::Skipped(list)))
            .collect();
        Ok(Some(Self { terms, skip_size }))
    }

    fn save_sidecar(&self, sidecar: &Path) -> Result<()> {
        let skipped: HashMap<&String, &crate::posting::PostingList> = self
            .terms
            .iter()
            .filter_map(|(term, set)| match set {
                PostingSet::Skipped(list) => Some((term, list)),
                PostingSet::Plain(_) => None,
            })
            .collect();
        let file = File::create(sidecar)?;
        serde_json::to_writer(file, &skipped)?;
        Ok(())
    }

    pub fn skip_size(&self) -> usize {
        self.skip_size
    }

    pub fn get(&self, term: &str) -> Option<&PostingSet> {
        self.terms.get(term)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.terms.keys()
    }

    /// The union of every posting set in the index, used to evaluate `NOT`.
    pub fn universe(&self) -> std::collections::HashSet<DocId> {
        let mut all = std::collections::HashSet::new();
        for set in self.terms.values() {
            all.extend(set.to_set());
        }
        all
    }
}
