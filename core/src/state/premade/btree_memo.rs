use alloc::collections::BTreeMap;

use crate::{
    context::MemoKey,
    state::{MemoEntry, MemoTable},
};


/// A [`MemoTable`](../trait.MemoTable.html) that uses a `BTreeMap` keyed by
/// `(MemoKey, position)`.
///
/// This only needs the `alloc` library.  The full crate provides a hashing
/// one, which is usually faster for large inputs.
#[derive(Clone, Default, Debug)]
pub struct BTreeMemoTable {
    /// The entries.  May be inspected, or pre-populated, between parses.
    pub map: BTreeMap<(MemoKey, usize), MemoEntry>,
}

impl BTreeMemoTable {
    /// Make a new empty one.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl MemoTable for BTreeMemoTable {
    #[inline]
    fn entry(&self, key: MemoKey, pos: usize) -> Option<&MemoEntry> {
        self.map.get(&(key, pos))
    }

    #[inline]
    fn insert(&mut self, key: MemoKey, pos: usize, entry: MemoEntry) {
        let _ = self.map.insert((key, pos), entry);
    }

    #[inline]
    fn clear(&mut self) {
        self.map.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.map.len()
    }
}
