//! Reads and writes sorted `(term, postings)` block files on disk.
//!
//! Block files and the final index file share one format:
//! `⟨term⟩\t⟨d1⟩,⟨d2⟩,…\n`, terms strictly increasing, postings per line
//! strictly increasing, no trailing comma.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::doc::DocId;
use crate::error::{IndexError, Result};

/// Writes one line per term, terms already sorted ascending by the caller
/// (a `BTreeMap` iterates in key order) and postings sorted within the line.
pub fn write_block(path: &Path, entries: &BTreeMap<String, Vec<DocId>>) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    for (term, postings) in entries {
        write_line(&mut writer, term, postings)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_line<W: Write>(writer: &mut W, term: &str, postings: &[DocId]) -> Result<()> {
    write!(writer, "{term}\t")?;
    for (i, id) in postings.iter().enumerate() {
        if i > 0 {
            write!(writer, ",")?;
        }
        write!(writer, "{}", id.as_str())?;
    }
    writeln!(writer)?;
    Ok(())
}

pub fn parse_line(line: &str) -> Option<(String, Vec<DocId>)> {
    let mut parts = line.splitn(2, '\t');
    let term = parts.next()?.to_string();
    let postings_str = parts.next().unwrap_or("");
    if term.is_empty() {
        return None;
    }
    let postings = if postings_str.is_empty() {
        Vec::new()
    } else {
        postings_str.split(',').map(DocId::new).collect()
    };
    Some((term, postings))
}

/// A forward-only cursor over a single sorted block file, used as one leg of
/// the k-way merge: opening it primes the first line, and `advance` pulls
/// the next.
pub struct BlockCursor {
    path: std::path::PathBuf,
    lines: std::io::Lines<BufReader<File>>,
    pub current: Option<(String, Vec<DocId>)>,
}

impl BlockCursor {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut cursor = BlockCursor {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            current: None,
        };
        cursor.advance()?;
        Ok(cursor)
    }

    pub fn advance(&mut self) -> Result<()> {
        loop {
            match self.lines.next() {
                None => {
                    self.current = None;
                    return Ok(());
                }
                Some(line) => {
                    let line = line?;
                    if line.is_empty() {
                        continue;
                    }
                    match parse_line(&line) {
                        Some(parsed) => {
                            self.current = Some(parsed);
                            return Ok(());
                        }
                        None => {
                            return Err(IndexError::CorruptBlock {
                                path: self.path.clone(),
                                reason: format!("unparsable line: {line:?}"),
                            });
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_block_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block_0.txt");
        let mut entries = BTreeMap::new();
        entries.insert(
            "apple".to_string(),
            vec![DocId::new("D1"), DocId::new("D2")],
        );
        entries.insert("banana".to_string(), vec![DocId::new("D2")]);
        write_block(&path, &entries).unwrap();

        let mut cursor = BlockCursor::open(&path).unwrap();
        let (term, postings) = cursor.current.clone().unwrap();
        assert_eq!(term, "apple");
        assert_eq!(postings, vec![DocId::new("D1"), DocId::new("D2")]);

        cursor.advance().unwrap();
        let (term, postings) = cursor.current.clone().unwrap();
        assert_eq!(term, "banana");
        assert_eq!(postings, vec![DocId::new("D2")]);

        cursor.advance().unwrap();
        assert!(cursor.current.is_none());
    }

    #[test]
    fn parse_line_handles_single_posting() {
        let (term, postings) = parse_line("apple\tD1").unwrap();
        assert_eq!(term, "apple");
        assert_eq!(postings, vec![DocId::new("D1")]);
    }
}
