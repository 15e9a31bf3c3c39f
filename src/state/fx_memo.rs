use rustc_hash::FxHashMap;

use crate::{MemoEntry, MemoKey, MemoTable};


/// A [`MemoTable`] that uses an `FxHashMap` keyed by `(MemoKey, position)`.
///
/// The keys are small integers and positions, for which the Fx hash is fast
/// and good enough.
///
/// [`MemoTable`]: ../../curtail_core/trait.MemoTable.html
#[derive(Clone, Default, Debug)]
pub struct FxMemoTable {
    /// The entries.  May be inspected, or pre-populated, between parses.
    pub hashmap: FxHashMap<(MemoKey, usize), MemoEntry>,
}

impl FxMemoTable {
    /// Make a new empty one.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a new empty one that can hold `capacity` entries before
    /// reallocating.
    ///
    /// A memoized grammar stores at most one entry per memoized parser per
    /// position, so the input length times the number of memoized rules is an
    /// upper bound.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hashmap: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }
}

impl MemoTable for FxMemoTable {
    #[inline]
    fn entry(&self, key: MemoKey, pos: usize) -> Option<&MemoEntry> {
        self.hashmap.get(&(key, pos))
    }

    #[inline]
    fn insert(&mut self, key: MemoKey, pos: usize, entry: MemoEntry) {
        let _ = self.hashmap.insert((key, pos), entry);
    }

    #[inline]
    fn clear(&mut self) {
        self.hashmap.clear();
    }

    #[inline]
    fn len(&self) -> usize {
        self.hashmap.len()
    }
}
