//! Path resolution for the CLI's external interface.
//!
//! A path starting with `data/` resolves relative to the working directory;
//! an absolute path resolves as-is; otherwise it resolves relative to a
//! component default directory, unless it already starts with that default.

use std::path::{Path, PathBuf};

pub const DEFAULT_CORPUS_DIR: &str = "corpus";
pub const DEFAULT_INDICES_DIR: &str = "indices";
pub const TEMP_BLOCKS_DIRNAME: &str = "temp_blocks";

pub fn resolve_path(path: &str, default_dir: &str) -> PathBuf {
    let candidate = Path::new(path);
    if path.starts_with("data/") {
        return std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(candidate);
    }
    if candidate.is_absolute() {
        return candidate.to_path_buf();
    }
    if path.starts_with(default_dir) {
        return candidate.to_path_buf();
    }
    Path::new(default_dir).join(candidate)
}

pub fn skip_sidecar_path(index_file: &Path) -> PathBuf {
    append_suffix(index_file, ".skips")
}

pub fn block_dict_sidecar_path(index_file: &Path) -> PathBuf {
    append_suffix(index_file, ".block_dict")
}

pub fn front_dict_sidecar_path(index_file: &Path) -> PathBuf {
    append_suffix(index_file, ".front_dict")
}

pub fn string_dict_sidecar_path(index_file: &Path) -> PathBuf {
    append_suffix(index_file, ".string_dict")
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

pub fn temp_blocks_dir(output_file: &Path) -> PathBuf {
    output_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(TEMP_BLOCKS_DIRNAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_data_prefixed_paths_relative_to_cwd() {
        let resolved = resolve_path("data/corpus/x.txt", DEFAULT_CORPUS_DIR);
        assert!(resolved.ends_with("data/corpus/x.txt"));
    }

    #[test]
    fn resolves_absolute_paths_as_is() {
        let resolved = resolve_path("/tmp/foo", DEFAULT_CORPUS_DIR);
        assert_eq!(resolved, PathBuf::from("/tmp/foo"));
    }

    #[test]
    fn resolves_relative_paths_under_default_dir() {
        let resolved = resolve_path("mycorpus", DEFAULT_CORPUS_DIR);
        assert_eq!(resolved, PathBuf::from("corpus/mycorpus"));
    }

    #[test]
    fn does_not_double_prefix_paths_already_under_default() {
        let resolved = resolve_path("corpus/mycorpus", DEFAULT_CORPUS_DIR);
        assert_eq!(resolved, PathBuf::from("corpus/mycorpus"));
    }

    #[test]
    fn sidecar_paths_append_suffix() {
        let index = PathBuf::from("indices/final.idx");
        assert_eq!(
            skip_sidecar_path(&index),
            PathBuf::from("indices/final.idx.skips")
        );
        assert_eq!(
            block_dict_sidecar_path(&index),
            PathBuf::from("indices/final.idx.block_dict")
        );
    }
}
