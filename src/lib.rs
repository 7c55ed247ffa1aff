pub mod cli;
pub mod compression;
pub mod doc;
pub mod error;
pub mod index;
pub mod paths;
pub mod posting;
pub mod query;
pub mod spimi;
pub mod text;

use std::fs;
use std::path::Path;

use tracing::info;

use crate::compression::DictCompressor;
use crate::doc::DocId;
use crate::error::{IndexError, Result};
use crate::text::TextPipeline;

/// Walks `input_dir` recursively, tokenizes every file whose extension is in
/// `extensions` (all files if empty) through `pipeline`, and feeds each
/// `(term, doc_id)` occurrence to a `SpimiBuilder`, finally merging into
/// `output_file`.
pub fn build_index(
    input_dir: &Path,
    block_size: usize,
    output_file: &Path,
    extensions: &[String],
    pipeline: &TextPipeline,
) -> Result<()> {
    if !input_dir.is_dir() {
        return Err(IndexError::InputDirNotFound(input_dir.to_path_buf()));
    }

    let mut builder = spimi::SpimiBuilder::new(output_file, block_size)?;
    let mut files_indexed = 0usize;
    for entry in walk_files(input_dir)? {
        if !extensions.is_empty() {
            let matches = entry
                .extension()
                .map(|ext| extensions.iter().any(|e| e.trim_start_matches('.') == ext))
                .unwrap_or(false);
            if !matches {
                continue;
            }
        }

        let text = read_text_lossy(&entry)?;
        let doc_id = DocId::from_relative_path(input_dir, &entry);
        for token in pipeline.tokenize_document(&text) {
            builder.add(token, doc_id.clone())?;
        }
        files_indexed += 1;
    }

    info!(files_indexed, "indexed corpus");
    builder.finalize()?;
    Ok(())
}

fn walk_files(dir: &Path) -> Result<Vec<std::path::PathBuf>> {
    let mut files = Vec::new();
    let mut stack = vec![dir.to_path_buf()];
    while let Some(current) = stack.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Reads `path` as UTF-8, falling back to Latin-1 on decode failure; the
/// fallback is never surfaced to callers.
fn read_text_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes.clone()) {
        Ok(text) => Ok(text),
        Err(_) => Ok(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Builds the requested compressed-dictionary sidecar next to `index_file`,
/// deriving the term list from the loaded index. Cleanup/IO failures here
/// are the only failure mode; compression itself is total over any term
/// list.
pub fn build_compressed_dictionary(
    index_file: &Path,
    scheme: cli::CompressionScheme,
) -> Result<()> {
    let loaded = index::Index::load(index_file, 0)?;
    let terms: Vec<String> = loaded.terms().cloned().collect();

    match scheme {
        cli::CompressionScheme::String => {
            let compressor = compression::string_dict::DictionaryAsAStringCompressor::build(&terms);
            compressor.save(&paths::string_dict_sidecar_path(index_file))
        }
        cli::CompressionScheme::Block => {
            let compressor = compression::block_dict::BlockingCompressor::build(&terms);
            compressor.save(&paths::block_dict_sidecar_path(index_file))
        }
        cli::CompressionScheme::Front => {
            let compressor = compression::front_dict::FrontCodingCompressor::build(&terms);
            compressor.save(&paths::front_dict_sidecar_path(index_file))
        }
    }
}

/// Loads an index and evaluates `query_str` against it, the operation
/// backing the CLI's `search` subcommand.
pub fn run_search(
    query_str: &str,
    index_file: &Path,
    skips: usize,
    pipeline: &TextPipeline,
) -> Result<std::collections::HashSet<DocId>> {
    let loaded = index::Index::load(index_file, skips)?;
    Ok(query::search(query_str, &loaded, pipeline))
}
