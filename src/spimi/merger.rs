//! K-way merge of sorted blocks into the final index file.
//!
//! A `BinaryHeap` (via `Reverse`) keyed on the current term of each block
//! cursor drives the merge: pop the lexicographically smallest term,
//! accumulate postings from every cursor currently sitting on that term,
//! advance each of them, and push their new current term back onto the
//! heap.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::doc::DocId;
use crate::error::Result;
use crate::spimi::block_store::{BlockCursor, write_line};

struct HeapEntry {
    term: String,
    block_index: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term
    }
}
impl Eq for HeapEntry {}
impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.term.cmp(&other.term)
    }
}

/// Merges every block file found directly under `blocks_dir` (matched by the
/// `.txt` extension the `SpimiBuilder` writes) into `output_path`, a single
/// sorted, de-duplicated index file. Deletes the merged block files and the
/// block directory afterward; failure to remove either is logged, not fatal.
pub fn merge_blocks(blocks_dir: &Path, output_path: &Path) -> Result<()> {
    let mut block_paths: Vec<PathBuf> = fs::read_dir(blocks_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("txt"))
        .collect();
    block_paths.sort();

    let mut cursors: Vec<BlockCursor> = block_paths
        .iter()
        .map(|path| BlockCursor::open(path))
        .collect::<Result<_>>()?;

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let out_file = fs::File::create(output_path)?;
    let mut writer = std::io::BufWriter::new(out_file);

    let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::new();
    for (i, cursor) in cursors.iter().enumerate() {
        if let Some((term, _)) = &cursor.current {
            heap.push(Reverse(HeapEntry {
                term: term.clone(),
                block_index: i,
            }));
        }
    }

    let mut current_term: Option<String> = None;
    let mut current_postings: BTreeSet<DocId> = BTreeSet::new();
    let mut terms_written = 0usize;

    while let Some(Reverse(entry)) = heap.pop() {
        let block_index = entry.block_index;
        let (term, postings) = cursors[block_index].current.clone().expect("heap entry implies current line");

        match &current_term {
            Some(t) if *t == term => {
                current_postings.extend(postings);
            }
            Some(t) => {
                let sorted: Vec<DocId> = current_postings.iter().cloned().collect();
                write_line(&mut writer, t, &sorted)?;
                terms_written += 1;
                current_term = Some(term.clone());
                current_postings = postings.into_iter().collect();
            }
            None => {
                current_term = Some(term.clone());
                current_postings = postings.into_iter().collect();
            }
        }

        cursors[block_index].advance()?;
        if let Some((next_term, _)) = &cursors[block_index].current {
            heap.push(Reverse(HeapEntry {
                term: next_term.clone(),
                block_index,
            }));
        }
    }

    if let Some(t) = current_term {
        let sorted: Vec<DocId> = current_postings.into_iter().collect();
        write_line(&mut writer, &t, &sorted)?;
        terms_written += 1;
    }
    writer.flush()?;

    info!(terms_written, blocks = block_paths.len(), "merged blocks into final index");

    for path in &block_paths {
        if let Err(e) = fs::remove_file(path) {
            warn!(?path, error = %e, "failed to remove merged block file");
        }
    }
    if let Err(e) = fs::remove_dir(blocks_dir) {
        warn!(?blocks_dir, error = %e, "failed to remove temp block directory");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spimi::block_store::write_block;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn block(dir: &Path, name: &str, entries: &[(&str, &[&str])]) {
        let mut map = BTreeMap::new();
        for (term, ids) in entries {
            map.insert(
                term.to_string(),
                ids.iter().map(|s| DocId::new(*s)).collect(),
            );
        }
        write_block(&dir.join(name), &map).unwrap();
    }

    #[test]
    fn merges_and_dedups_across_blocks() {
        let root = tempdir().unwrap();
        let blocks = root.path().join("temp_blocks");
        fs::create_dir_all(&blocks).unwrap();
        block(&blocks, "block_0.txt", &[("apple", &["D1"]), ("cherry", &["D3"])]);
        block(&blocks, "block_1.txt", &[("apple", &["D2"]), ("banana", &["D1", "D2"])]);

        let out = root.path().join("final.idx");
        merge_blocks(&blocks, &out).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "apple\tD1,D2\nbanana\tD1,D2\ncherry\tD3\n"
        );
        assert!(!blocks.exists());
    }

    #[test]
    fn merge_is_order_independent_of_block_file_order() {
        let root = tempdir().unwrap();
        let blocks = root.path().join("temp_blocks");
        fs::create_dir_all(&blocks).unwrap();
        block(&blocks, "block_0.txt", &[("zebra", &["D9"])]);
        block(&blocks, "block_1.txt", &[("apple", &["D1"])]);
        block(&blocks, "block_2.txt", &[("mango", &["D5"])]);

        let out = root.path().join("final.idx");
        merge_blocks(&blocks, &out).unwrap();
        let content = fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["apple\tD1", "mango\tD5", "zebra\tD9"]);
    }
}
