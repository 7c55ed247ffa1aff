//! Three alternative on-disk term-dictionary encodings: a concatenated
//! string with an offset table, fixed-size front-coded blocks, and global
//! front-coding over the whole sorted term list.

pub mod block_dict;
pub mod front_dict;
pub mod string_dict;

use crate::error::Result;
use std::path::Path;

/// Common surface for the three dictionary encodings: all sort the term
/// list ascending before building, and all round-trip through their own
/// `save`/`load`.
pub trait DictCompressor: Sized {
    fn build(terms: &[String]) -> Self;
    fn lookup(&self, term: &str) -> Option<String>;
    fn save(&self, path: &Path) -> Result<()>;
    fn load(path: &Path) -> Result<Self>;
}

/// Byte length of the longest common prefix of `a` and `b`, measured in
/// whole characters so the result always lands on a UTF-8 char boundary
/// (a pure byte-for-byte comparison can stop mid-character when the two
/// strings first differ inside a multibyte sequence).
pub(crate) fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .take_while(|((_, ca), cb)| ca == cb)
        .map(|((i, ca), _)| i + ca.len_utf8())
        .last()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_prefix() {
        assert_eq!(common_prefix_len("automata", "automobile"), 4);
        assert_eq!(common_prefix_len("apple", "banana"), 0);
    }

    #[test]
    fn multibyte_terms_split_on_a_char_boundary() {
        // "café" and "cafè" share "caf" and then differ inside the accented
        // character, which is two bytes in UTF-8.
        let a = "café";
        let b = "cafè";
        let prefix_len = common_prefix_len(a, b);
        assert_eq!(prefix_len, 3);
        assert!(a.is_char_boundary(prefix_len));
        assert!(b.is_char_boundary(prefix_len));
        assert_eq!(&a[..prefix_len], "caf");
    }

    #[test]
    fn identical_terms_share_full_length() {
        assert_eq!(common_prefix_len("café", "café"), "café".len());
    }
}
