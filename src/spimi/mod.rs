//! Single-pass in-memory indexing: buffer tokens, flush sorted blocks once a
//! size budget is hit, then merge the blocks into one final index file.
//!
//! The in-memory buffer is a plain `BTreeMap<String, HashSet<DocId>>`,
//! sorted for free on flush.

pub mod block_store;
pub mod merger;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use tracing::debug;

use crate::doc::DocId;
use crate::error::Result;
use crate::paths::{TEMP_BLOCKS_DIRNAME, temp_blocks_dir};

/// One `(term, doc_id)` observation pulled off the token stream.
#[derive(Debug, Clone)]
pub struct TermOccurrence {
    pub term: String,
    pub doc_id: DocId,
}

/// Accumulates postings in memory up to a budget, flushing sorted blocks to
/// `blocks_dir` and finally merging them into a single index file.
///
/// The budget counts every `add` call, not unique terms or postings.
pub struct SpimiBuilder {
    blocks_dir: PathBuf,
    output_path: PathBuf,
    block_size: usize,
    buffer: BTreeMap<String, HashSet<DocId>>,
    token_count: usize,
    next_block_index: usize,
}

impl SpimiBuilder {
    pub fn new(output_path: &Path, block_size: usize) -> Result<Self> {
        let blocks_dir = temp_blocks_dir(output_path);
        std::fs::create_dir_all(&blocks_dir)?;
        Ok(Self {
            blocks_dir,
            output_path: output_path.to_path_buf(),
            block_size: block_size.max(1),
            buffer: BTreeMap::new(),
            token_count: 0,
            next_block_index: 0,
        })
    }

    /// Adds one occurrence, flushing the buffer first if the budget was
    /// already reached by the previous call.
    pub fn add(&mut self, term: String, doc_id: DocId) -> Result<()> {
        if self.token_count >= self.block_size {
            self.flush()?;
        }
        self.buffer.entry(term).or_default().insert(doc_id);
        self.token_count += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.token_count = 0;
        if self.buffer.is_empty() {
            return Ok(());
        }
        let path = self
            .blocks_dir
            .join(format!("block_{}.txt", self.next_block_index));
        let entries: BTreeMap<String, Vec<DocId>> = std::mem::take(&mut self.buffer)
            .into_iter()
            .map(|(term, ids)| {
                let mut ids: Vec<DocId> = ids.into_iter().collect();
                ids.sort();
                (term, ids)
            })
            .collect();
        debug!(path = %path.display(), terms = entries.len(), "flushing block");
        block_store::write_block(&path, &entries)?;
        self.next_block_index += 1;
        Ok(())
    }

    /// Flushes any remaining buffered terms and k-way merges every block into
    /// the final index file, cleaning up the block directory.
    pub fn finalize(mut self) -> Result<PathBuf> {
        self.flush()?;
        merger::merge_blocks(&self.blocks_dir, &self.output_path)?;
        Ok(self.output_path)
    }
}

/// Drives a `SpimiBuilder` from a channel of occurrences: a producer thread
/// sends `TermOccurrence`s, this loop consumes them until the channel
/// closes.
pub fn build_from_channel(
    rx: Receiver<TermOccurrence>,
    output_path: &Path,
    max_terms_per_block: usize,
) -> Result<PathBuf> {
    let mut builder = SpimiBuilder::new(output_path, max_terms_per_block)?;
    while let Ok(occurrence) = rx.recv() {
        builder.add(occurrence.term, occurrence.doc_id)?;
    }
    builder.finalize()
}

pub const BLOCK_DIRNAME: &str = TEMP_BLOCKS_DIRNAME;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::tempdir;

    #[test]
    fn flushes_on_budget_and_merges_on_finalize() {
        let root = tempdir().unwrap();
        let out = root.path().join("indices/final.idx");
        let mut builder = SpimiBuilder::new(&out, 2).unwrap();

        builder.add("apple".into(), DocId::new("D1")).unwrap();
        builder.add("banana".into(), DocId::new("D1")).unwrap();
        // The third call crosses the budget of 2 and flushes apple+banana first.
        builder.add("cherry".into(), DocId::new("D1")).unwrap();
        builder.add("apple".into(), DocId::new("D2")).unwrap();

        let final_path = builder.finalize().unwrap();
        let content = std::fs::read_to_string(&final_path).unwrap();
        assert_eq!(content, "apple\tD1,D2\nbanana\tD1\ncherry\tD1\n");
    }

    #[test]
    fn build_from_channel_consumes_until_closed() {
        let root = tempdir().unwrap();
        let out = root.path().join("final.idx");
        let (tx, rx) = mpsc::channel();
        tx.send(TermOccurrence {
            term: "apple".into(),
            doc_id: DocId::new("D1"),
        })
        .unwrap();
        tx.send(TermOccurrence {
            term: "apple".into(),
            doc_id: DocId::new("D2"),
        })
        .unwrap();
        drop(tx);

        let final_path = build_from_channel(rx, &out, 10).unwrap();
        let content = std::fs::read_to_string(&final_path).unwrap();
        assert_eq!(content, "apple\tD1,D2\n");
    }
}
