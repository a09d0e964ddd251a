//! FILENAME: core/engine/src/split.rs
//! PURPOSE: Generic, order-preserving sequence splitting and concatenation.
//! CONTEXT: Report tables mark group boundaries with sentinel entries
//! (`None` rows). Everything that works "per group" splits on those
//! sentinels, transforms each segment, and joins the segments back with a
//! sentinel between them. These helpers are the generic half of that; the
//! row-specific wrappers live in `table.rs`.
//!
//! All functions are eager and return owned segments.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Splits on every element equal to `sentinel`. Consecutive sentinels
/// collapse and leading/trailing sentinels produce no empty segment.
pub fn split_by_occurrence<T, I>(items: I, sentinel: &T) -> Vec<Vec<T>>
where
    T: PartialEq,
    I: IntoIterator<Item = T>,
{
    split_by_predicate(items, |item| item == sentinel)
}

/// Splits wherever `is_sentinel` holds. Same semantics as `split_by_occurrence`.
pub fn split_by_predicate<T, I, F>(items: I, mut is_sentinel: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> bool,
{
    let mut segments = Vec::new();
    let mut current = Vec::new();

    for item in items {
        if is_sentinel(&item) {
            if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        } else {
            current.push(item);
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

/// Starts a new segment whenever the key of an element differs from the key
/// of the previous non-sentinel element. `key` returns None for sentinels,
/// which stay in the segment being built. A sequence of only sentinels
/// yields no segments.
pub fn split_by_key_change<T, I, K, F>(items: I, mut key: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: PartialEq,
    F: FnMut(&T) -> Option<K>,
{
    let mut segments = Vec::new();
    let mut current = Vec::new();
    let mut previous: Option<K> = None;

    for item in items {
        if let Some(k) = key(&item) {
            if previous.as_ref().is_some_and(|p| *p != k) {
                segments.push(std::mem::take(&mut current));
            }
            previous = Some(k);
        }
        current.push(item);
    }

    if previous.is_some() {
        segments.push(current);
    }
    segments
}

/// Stable group-by. Groups appear in order of first occurrence and keep the
/// relative order of their members.
pub fn split_by_group<T, I, K, F>(items: I, mut key: F) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut index: FxHashMap<K, usize> = FxHashMap::default();
    let mut groups: Vec<Vec<T>> = Vec::new();

    for item in items {
        let k = key(&item);
        let slot = *index.entry(k).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(item);
    }
    groups
}

/// Flattens the segments.
pub fn concat<T, I>(segments: I) -> Vec<T>
where
    I: IntoIterator<Item = Vec<T>>,
{
    segments.into_iter().flatten().collect()
}

/// Flattens the segments with a sentinel between consecutive ones.
/// No sentinel is added after the last segment.
pub fn concat_by<T, I, F>(segments: I, mut sentinel: F) -> Vec<T>
where
    I: IntoIterator<Item = Vec<T>>,
    F: FnMut() -> T,
{
    let mut out = Vec::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push(sentinel());
        }
        out.extend(segment);
    }
    out
}
