//! Sorted doc-id containers with set-algebra and skip-pointer acceleration.
//!
//! A posting list is just a sorted, deduplicated sequence of `DocId`s, with
//! optional skip pointers that let intersection jump past runs instead of
//! stepping through them one at a time.

use std::collections::HashSet;

use crate::doc::DocId;

/// A pair `(startIndex, endIndex)` with `endIndex > startIndex`, such that
/// `list[endIndex] >= list[startIndex]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SkipPointer {
    pub start: usize,
    pub end: usize,
}

/// A strictly increasing sequence of `DocId`s with optional skip pointers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PostingList {
    ids: Vec<DocId>,
    skip_size: usize,
    skips: Vec<SkipPointer>,
}

impl PostingList {
    /// Copies `list`, sorts, deduplicates, and builds skip pointers unless
    /// `skip_size` is `0`. When `skip_size` is `None` it defaults to
    /// `max(1, floor(sqrt(len)))`.
    pub fn new(list: &[DocId], skip_size: Option<usize>) -> Self {
        let mut ids = list.to_vec();
        ids.sort();
        ids.dedup();

        let skip_size = match skip_size {
            Some(0) => 0,
            Some(n) => n,
            None => (ids.len() as f64).sqrt().floor().max(1.0) as usize,
        };

        let skips = if skip_size == 0 {
            Vec::new()
        } else {
            build_skip_pointers(ids.len(), skip_size)
        };

        Self {
            ids,
            skip_size,
            skips,
        }
    }

    pub fn from_sorted_unique(ids: Vec<DocId>, skip_size: Option<usize>) -> Self {
        Self::new(&ids, skip_size)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[DocId] {
        &self.ids
    }

    pub fn skip_size(&self) -> usize {
        self.skip_size
    }

    pub fn to_set(&self) -> HashSet<DocId> {
        self.ids.iter().cloned().collect()
    }

    /// Finds a skip pointer that starts exactly at `i`, if any.
    fn skip_from(&self, i: usize) -> Option<&SkipPointer> {
        self.skips.iter().find(|s| s.start == i)
    }

    pub fn intersect(&self, other: &PostingList) -> HashSet<DocId> {
        let mut result = HashSet::new();
        let (a, b) = (&self.ids, &other.ids);
        let (mut i, mut j) = (0usize, 0usize);

        while i < a.len() && j < b.len() {
            if a[i] == b[j] {
                result.insert(a[i].clone());
                i += 1;
                j += 1;
            } else if a[i] < b[j] {
                i = self.advance(i, &b[j]);
            } else {
                j = other.advance(j, &a[i]);
            }
        }
        result
    }

    /// Advances index `i` within this list past `target`, using a skip
    /// pointer when one starts at `i` and is strictly beneficial
    /// (`ids[end] <= target`); otherwise advances by one.
    fn advance(&self, i: usize, target: &DocId) -> usize {
        if let Some(skip) = self.skip_from(i) {
            if self.ids[skip.end] <= *target {
                return skip.end;
            }
        }
        i + 1
    }

    pub fn union(&self, other: &PostingList) -> HashSet<DocId> {
        let mut result = self.to_set();
        result.extend(other.ids.iter().cloned());
        result
    }

    pub fn difference(&self, other: &PostingList) -> HashSet<DocId> {
        let other_set = other.to_set();
        self.ids
            .iter()
            .filter(|id| !other_set.contains(*id))
            .cloned()
            .collect()
    }
}

fn build_skip_pointers(n: usize, skip_size: usize) -> Vec<SkipPointer> {
    let mut skips = Vec::new();
    let mut i = 0;
    while i < n {
        let end = (i + skip_size).min(n - 1);
        if i != end {
            skips.push(SkipPointer { start: i, end });
        }
        i += skip_size;
    }
    skips
}

/// A posting container that is either a plain sorted list (no skip table) or
/// a skip-indexed `PostingList`, exposing the same set-algebra surface so
/// the query evaluator never branches on which variant it holds.
#[derive(Debug, Clone)]
pub enum PostingSet {
    Plain(Vec<DocId>),
    Skipped(PostingList),
}

impl PostingSet {
    pub fn new(ids: Vec<DocId>, skip_size: usize) -> Self {
        if skip_size == 0 {
            let mut ids = ids;
            ids.sort();
            ids.dedup();
            PostingSet::Plain(ids)
        } else {
            PostingSet::Skipped(PostingList::new(&ids, Some(skip_size)))
        }
    }

    pub fn empty() -> Self {
        PostingSet::Plain(Vec::new())
    }

    pub fn to_set(&self) -> HashSet<DocId> {
        match self {
            PostingSet::Plain(ids) => ids.iter().cloned().collect(),
            PostingSet::Skipped(list) => list.to_set(),
        }
    }

    pub fn intersect(&self, other: &PostingSet) -> HashSet<DocId> {
        match (self, other) {
            (PostingSet::Skipped(a), PostingSet::Skipped(b)) => a.intersect(b),
            _ => {
                let b = other.to_set();
                self.to_set().into_iter().filter(|id| b.contains(id)).collect()
            }
        }
    }

    pub fn union(&self, other: &PostingSet) -> HashSet<DocId> {
        let mut set = self.to_set();
        set.extend(other.to_set());
        set
    }

    pub fn difference(&self, other: &PostingSet) -> HashSet<DocId> {
        let other_set = other.to_set();
        self.to_set()
            .into_iter()
            .filter(|id| !other_set.contains(id))
            .collect()
    }

    pub fn from_set(set: HashSet<DocId>) -> Self {
        let mut ids: Vec<DocId> = set.into_iter().collect();
        ids.sort();
        PostingSet::Plain(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(vals: &[u32]) -> Vec<DocId> {
        vals.iter().map(|v| DocId::new(v.to_string())).collect()
    }

    fn set(vals: &[u32]) -> HashSet<DocId> {
        ids(vals).into_iter().collect()
    }

    #[test]
    fn sorts_and_dedups_on_construction() {
        let list = PostingList::new(&ids(&[3, 1, 2, 1]), None);
        assert_eq!(list.ids(), ids(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn intersect_matches_set_intersection_regardless_of_skip_size() {
        let a_ids = ids(&[1, 3, 5, 7, 9, 11, 13, 15]);
        let b_ids = ids(&[5, 7, 15]);
        for skip in [0usize, 1, 2, 3, 100] {
            let a = PostingList::new(&a_ids, Some(skip));
            let b = PostingList::new(&b_ids, Some(skip));
            assert_eq!(a.intersect(&b), set(&[5, 7, 15]), "skip_size={skip}");
        }
    }

    #[test]
    fn skip_correctness_scenario_s5() {
        let a = PostingList::new(&ids(&[1, 3, 5, 7, 9, 11, 13, 15]), Some(3));
        let b = PostingList::new(&ids(&[5, 7, 15]), Some(3));
        assert_eq!(a.intersect(&b), set(&[5, 7, 15]));
    }

    #[test]
    fn union_is_set_union() {
        let a = PostingList::new(&ids(&[1, 2]), None);
        let b = PostingList::new(&ids(&[2, 3]), None);
        assert_eq!(a.union(&b), set(&[1, 2, 3]));
    }

    #[test]
    fn difference_is_self_minus_other() {
        let a = PostingList::new(&ids(&[1, 2, 3]), None);
        let b = PostingList::new(&ids(&[2]), None);
        assert_eq!(a.difference(&b), set(&[1, 3]));
    }

    #[test]
    fn empty_inputs_produce_set_algebra_identities() {
        let empty = PostingList::new(&[], None);
        let a = PostingList::new(&ids(&[1, 2]), None);
        assert_eq!(empty.intersect(&a), HashSet::new());
        assert_eq!(empty.union(&a), a.to_set());
        assert_eq!(empty.difference(&a), HashSet::new());
        assert_eq!(a.difference(&empty), a.to_set());
    }

    #[test]
    fn posting_set_plain_and_skipped_agree() {
        let a_ids = ids(&[1, 2, 3, 4, 5]);
        let b_ids = ids(&[3, 4, 5, 6]);
        let plain_a = PostingSet::new(a_ids.clone(), 0);
        let plain_b = PostingSet::new(b_ids.clone(), 0);
        let skip_a = PostingSet::new(a_ids, 2);
        let skip_b = PostingSet::new(b_ids, 2);
        assert_eq!(plain_a.intersect(&plain_b), skip_a.intersect(&skip_b));
    }
}
