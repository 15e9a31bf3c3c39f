//! The state threaded through every parser invocation: the input and the memo
//! table.

use alloc::rc::Rc;
use core::{any::Any, fmt};

use crate::{
    context::{LeftRecContext, MemoKey},
    outcome::Outcome,
};


/// Implementations provided for ready use.
pub mod premade
{
    mod btree_memo;
    pub use btree_memo::BTreeMemoTable;
}


/// What a memo table stores for a memoized parser at a position: its outcome,
/// type-erased, and the left-recursion context it was computed under, pruned
/// to the keys that outcome depends on.
#[derive(Clone)]
pub struct MemoEntry {
    /// An `Outcome<T>` for the `T` of the memoized parser.
    pub outcome: Rc<dyn Any>,
    /// The context it is valid for.
    pub context: LeftRecContext,
}

impl MemoEntry {
    /// Make one from a typed outcome.
    pub fn new<T: 'static>(outcome: Outcome<T>, context: LeftRecContext) -> Self {
        Self { outcome: Rc::new(outcome), context }
    }

    /// The outcome, if it is of the given type.
    #[inline]
    pub fn downcast<T: 'static>(&self) -> Option<&Outcome<T>> {
        self.outcome.downcast_ref()
    }
}

impl fmt::Debug for MemoEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoEntry")
         .field("outcome", &"<erased>")
         .field("context", &self.context)
         .finish()
    }
}


/// The mapping from `(MemoKey, position)` to the [`MemoEntry`] last stored for
/// that memoized parser at that position.
///
/// Entries are created lazily and overwritten, never removed while a parse is
/// running.  Whether a stored entry may be reused is decided by the
/// [`memoize`](../struct.Parser.html#method.memoize) combinator, not by the table.
///
/// [`MemoEntry`]: struct.MemoEntry.html
pub trait MemoTable {
    /// The entry stored for `key` at `pos`, if any.
    fn entry(&self, key: MemoKey, pos: usize) -> Option<&MemoEntry>;

    /// Store `entry` for `key` at `pos`, replacing any previous one.
    fn insert(&mut self, key: MemoKey, pos: usize, entry: MemoEntry);

    /// Remove all entries.
    fn clear(&mut self);

    /// The number of entries.
    fn len(&self) -> usize;

    /// Whether there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


/// The input being parsed and the memo table for the current parse.
///
/// Passed by `&mut` through every parser invocation, so every read of the memo
/// table sees every write made before it in call order.
pub struct ParseState<'a, I: ?Sized> {
    input: &'a I,
    memo: &'a mut dyn MemoTable,
}

impl<'a, I: ?Sized> ParseState<'a, I> {
    /// Make one for parsing `input` using `memo`.  The memo table is used as
    /// is, so it should usually be empty.
    #[inline]
    pub fn new(input: &'a I, memo: &'a mut dyn MemoTable) -> Self {
        Self { input, memo }
    }

    /// The input.
    #[inline]
    pub fn input(&self) -> &'a I {
        self.input
    }

    /// The memo table.
    #[inline]
    pub fn memo(&self) -> &dyn MemoTable {
        &*self.memo
    }

    /// The memo table, for modifying.
    #[inline]
    pub fn memo_mut(&mut self) -> &mut dyn MemoTable {
        &mut *self.memo
    }

    /// The stored outcome and context for `key` at `pos`, if any and if it has
    /// the type `T`.  An entry of another type is treated as absent.
    pub(crate) fn lookup<T: 'static>(&self, key: MemoKey, pos: usize)
                                     -> Option<(&Outcome<T>, &LeftRecContext)>
    {
        let entry = self.memo.entry(key, pos)?;
        entry.downcast().map(|outcome| (outcome, &entry.context))
    }

    pub(crate) fn store<T: 'static>(&mut self, key: MemoKey, pos: usize,
                                    outcome: Outcome<T>, context: LeftRecContext)
    {
        self.memo.insert(key, pos, MemoEntry::new(outcome, context));
    }
}

impl<I: ?Sized> fmt::Debug for ParseState<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseState")
         .field("memo_len", &self.memo.len())
         .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{outcome::Success, state::premade::BTreeMemoTable};

    #[test]
    fn typed_lookup() {
        let key = MemoKey::named("k");
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new("xy", &mut memo);
        assert!(state.lookup::<u8>(key, 0).is_none());

        state.store::<u8>(key, 0, Ok(Success::new(7, 1)), LeftRecContext::new());
        let (outcome, context) = state.lookup::<u8>(key, 0).unwrap();
        assert_eq!(outcome.as_ref().map(|s| s.value), Ok(7));
        assert!(context.is_empty());

        assert!(state.lookup::<i64>(key, 0).is_none());
        assert!(state.lookup::<u8>(key, 1).is_none());
        assert_eq!(state.memo().len(), 1);
        state.memo_mut().clear();
        assert!(state.memo().is_empty());
    }
}
