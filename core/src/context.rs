//! Left-recursion bookkeeping: the identities of memoized parsers, the
//! recursion depths tracked for them at a position, and the sets of them that
//! an outcome depended on.

use alloc::{borrow::Cow, vec::Vec};
use core::sync::atomic::{AtomicU32, Ordering};


/// The identity of a memoized parser, used to key the memo table and the
/// left-recursion contexts.
///
/// `Id`s are allocated densely, when a parser is memoized, from a process-wide
/// counter, so every `memoize()` call yields a distinct key.  `Name`s are
/// chosen by grammar authors, which lets separately constructed instances of
/// the same rule share their memo entries and recursion tracking.  The two
/// variants never collide.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum MemoKey {
    /// Allocated by [`fresh`](#method.fresh).
    Id(u32),
    /// Chosen by the grammar author.
    Name(&'static str),
}

impl MemoKey {
    /// Allocate a new, never before used, `Id` key.
    pub fn fresh() -> Self {
        static NEXT_ID: AtomicU32 = AtomicU32::new(0);
        MemoKey::Id(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// A key chosen by name.
    pub const fn named(name: &'static str) -> Self {
        MemoKey::Name(name)
    }
}


/// The recursion depth that each memoized parser has reached at the current
/// position without any input being consumed.
///
/// Entries are kept sorted by key.  Contexts stay small, bounded by how many
/// memoized rules are nested at one position.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct LeftRecContext {
    depths: Vec<(MemoKey, u32)>,
}

impl LeftRecContext {
    /// An empty context, as established whenever input is consumed.
    pub const fn new() -> Self {
        Self { depths: Vec::new() }
    }

    /// Whether no depths are tracked.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// The tracked depth of `key`, if any.
    pub fn get(&self, key: MemoKey) -> Option<u32> {
        self.depths.binary_search_by_key(&key, |&(k, _)| k)
                   .ok()
                   .map(|i| self.depths[i].1)
    }

    /// The tracked depth of `key`, or 0.
    pub fn depth(&self, key: MemoKey) -> u32 {
        self.get(key).unwrap_or(0)
    }

    /// A copy of this context with `key`'s depth set to `depth`.
    #[must_use]
    pub fn with_depth(&self, key: MemoKey, depth: u32) -> Self {
        let mut depths = self.depths.clone();
        match depths.binary_search_by_key(&key, |&(k, _)| k) {
            Ok(i) => depths[i].1 = depth,
            Err(i) => depths.insert(i, (key, depth)),
        }
        Self { depths }
    }

    /// Iterate the tracked `(key, depth)` pairs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (MemoKey, u32)> + '_ {
        self.depths.iter().copied()
    }

    /// Whether an outcome stored under the `stored` context may be reused under
    /// this one: for every key the stored outcome depended on, this context
    /// must have tracked at least as much recursion.  A key absent here counts
    /// as depth -1, so it never satisfies a stored entry.
    pub fn can_reuse(&self, stored: &LeftRecContext) -> bool {
        stored.iter().all(|(key, depth)| self.get(key).is_some_and(|cur| depth <= cur))
    }

    /// A copy of this context restricted to the keys in `used`.
    #[must_use]
    pub fn pruned(&self, used: &Used) -> Self {
        if used.is_empty() {
            return Self::new();
        }
        Self {
            depths: self.depths.iter().copied().filter(|&(k, _)| used.contains(k)).collect(),
        }
    }

    /// The context to give a parser that runs after another one that started
    /// at `from` and ended at `to`: this same context if nothing was consumed,
    /// else an empty one.
    pub fn carried(&self, from: usize, to: usize) -> Cow<'_, Self> {
        if from == to {
            Cow::Borrowed(self)
        } else {
            Cow::Owned(Self::new())
        }
    }
}


/// The set of memoized parsers whose recursion tracking contributed to
/// curtailment in producing an outcome.
///
/// Kept sorted.  Mostly empty, or one or two keys.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Used {
    keys: Vec<MemoKey>,
}

impl Used {
    /// The empty set.
    pub const fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// The set of only `key`.
    pub fn single(key: MemoKey) -> Self {
        Self { keys: alloc::vec![key] }
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `key` is a member.
    pub fn contains(&self, key: MemoKey) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Add `key`.
    pub fn insert(&mut self, key: MemoKey) {
        if let Err(i) = self.keys.binary_search(&key) {
            self.keys.insert(i, key);
        }
    }

    /// The union with `other`.
    #[must_use]
    pub fn union(mut self, other: Used) -> Self {
        if self.keys.is_empty() {
            return other;
        }
        for key in other.keys {
            self.insert(key);
        }
        self
    }

    /// Combine the used sets of two parsers run in sequence, where the first
    /// started at `start` and the second ended at `end`: they are unioned only
    /// if the whole sequence consumed nothing, else the first's is kept.
    #[must_use]
    pub fn sequenced(start: usize, end: usize, first: Used, second: Used) -> Self {
        if start == end { first.union(second) } else { first }
    }

    /// Iterate the members, in order.
    pub fn iter(&self) -> impl Iterator<Item = MemoKey> + '_ {
        self.keys.iter().copied()
    }
}

impl FromIterator<MemoKey> for Used {
    fn from_iter<T: IntoIterator<Item = MemoKey>>(iter: T) -> Self {
        let mut used = Self::new();
        for key in iter {
            used.insert(key);
        }
        used
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    const A: MemoKey = MemoKey::named("a");
    const B: MemoKey = MemoKey::named("b");

    #[test]
    fn fresh_keys_are_distinct() {
        assert_ne!(MemoKey::fresh(), MemoKey::fresh());
        assert_ne!(MemoKey::fresh(), A);
    }

    #[test]
    fn depths() {
        let ctx = LeftRecContext::new().with_depth(B, 2).with_depth(A, 1);
        assert_eq!(ctx.get(A), Some(1));
        assert_eq!(ctx.depth(B), 2);
        assert_eq!(ctx.depth(MemoKey::named("c")), 0);
        assert_eq!(ctx.with_depth(A, 3).depth(A), 3);
        assert_eq!(ctx.depth(A), 1);
    }

    #[test]
    fn reuse() {
        let stored = LeftRecContext::new().with_depth(A, 2);
        assert!(LeftRecContext::new().can_reuse(&LeftRecContext::new()));
        assert!(LeftRecContext::new().with_depth(A, 2).can_reuse(&stored));
        assert!(LeftRecContext::new().with_depth(A, 3).can_reuse(&stored));
        assert!(!LeftRecContext::new().with_depth(A, 1).can_reuse(&stored));
        assert!(!LeftRecContext::new().with_depth(B, 5).can_reuse(&stored));
    }

    #[test]
    fn pruning() {
        let ctx = LeftRecContext::new().with_depth(A, 2).with_depth(B, 4);
        assert_eq!(ctx.pruned(&Used::single(B)), LeftRecContext::new().with_depth(B, 4));
        assert!(ctx.pruned(&Used::new()).is_empty());
    }

    #[test]
    fn carrying() {
        let ctx = LeftRecContext::new().with_depth(A, 1);
        assert_eq!(*ctx.carried(3, 3), ctx);
        assert!(ctx.carried(3, 4).is_empty());
    }

    #[test]
    fn used_sets() {
        let ab: Used = [B, A, B].into_iter().collect();
        assert_eq!(ab.iter().count(), 2);
        assert_eq!(Used::sequenced(0, 0, Used::single(A), Used::single(B)), ab);
        assert_eq!(Used::sequenced(0, 1, Used::single(A), Used::single(B)), Used::single(A));
    }
}
