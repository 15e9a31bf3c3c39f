//! The memoization wrapper that curtails left recursion.

use log::trace;

use crate::{
    context::{MemoKey, Used},
    error::ParseError,
    input::Input,
    outcome::{used_of, Failure},
    parser::Parser,
};


/// Which remaining-input lengths a memoized parser prefers a stored success
/// over a fresh failure at.
///
/// When a chain of left recursion is curtailed, results at alternating
/// recursion depths can differ by one level, and this chooses which of them is
/// handed upward.  The usual grammar rule, whose top-level alternatives chain
/// an even number of parsers, wants the default.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub enum Parity {
    /// Prefer a stored success when an odd number of positions remain.
    #[default]
    Even,
    /// Prefer a stored success when an even number of positions remain.
    Odd,
}

impl Parity {
    #[inline]
    fn prefers_stored(self, remaining: usize) -> bool {
        match self {
            Parity::Even => remaining % 2 == 1,
            Parity::Odd => remaining % 2 == 0,
        }
    }
}


impl<I, T> Parser<I, T>
    where I: Input + ?Sized + 'static,
          T: Clone + 'static,
{
    /// Memoize this parser with the default [`Parity`](enum.Parity.html) and a
    /// fresh key.  See [`memoize_with`](#method.memoize_with).
    pub fn memoize(self) -> Parser<I, T> {
        self.memoize_with(Parity::default(), None)
    }

    /// Memoize this parser, making it safe to use left-recursively.
    ///
    /// Each invocation at a position first looks for a stored outcome whose
    /// context is reusable under the current context, and returns it if found.
    /// Otherwise, when this parser has already recursed more deeply at this
    /// position than there are remaining positions plus one, it fails with
    /// [`Curtailment`](enum.ParseError.html#variant.Curtailment), since no
    /// deeper derivation could consume anything more.  Otherwise it runs this
    /// parser one level deeper and stores the outcome, under the current
    /// context pruned to the outcome's used set, before returning it.
    ///
    /// Before storing, a stored outcome from a deeper level may be preferred
    /// over the fresh one: a stored success, reusable here, over a fresh
    /// failure when `parity` selects the remaining length, and a stored success
    /// that ends further over a fresh success that ends sooner.  The latter
    /// hands a grown left-recursive derivation up to the outermost invocation,
    /// so that it yields the longest leftmost derivation.
    ///
    /// The growth rule makes a left-recursive rule commit to its longest
    /// derivation at a position, like a PEG rule.  A shorter derivation that
    /// only a following parser could use is not offered.  For
    /// `S = A "x"` with `A = A "x" | "a"`, `A` consumes all of `"axx"` and `S`
    /// then fails expecting `x`.  Write such grammars with the continuation
    /// inside the recursive rule instead.
    ///
    /// `key` identifies this parser in the memo table and contexts.  When
    /// `None`, a fresh one is allocated.  Giving the same key to separately
    /// constructed parsers makes them share entries, so they must be
    /// equivalent.
    pub fn memoize_with(self, parity: Parity, key: Option<MemoKey>) -> Parser<I, T> {
        let key = key.unwrap_or_else(MemoKey::fresh);
        Parser::<I, T>::new(move |state, pos, ctx| {
            if let Some((outcome, stored_ctx)) = state.lookup::<T>(key, pos) {
                if ctx.can_reuse(stored_ctx) {
                    trace!("memo hit for {key:?} at {pos}");
                    return outcome.clone();
                }
            }

            let depth = ctx.depth(key);
            let remaining = state.input().remaining(pos);
            let bound = u32::try_from(remaining.saturating_add(1)).unwrap_or(u32::MAX);
            if depth > bound {
                trace!("curtailing {key:?} at {pos}, depth {depth}");
                return Err(Failure {
                    error: ParseError::Curtailment,
                    pos,
                    used: Used::single(key),
                });
            }

            let mut outcome = self.parse_at(state, pos, &ctx.with_depth(key, depth + 1));

            let stored = match &outcome {
                Err(_) if parity.prefers_stored(remaining) => {
                    state.lookup::<T>(key, pos).and_then(|(stored, stored_ctx)| match stored {
                        Ok(s) if ctx.can_reuse(stored_ctx) => Some(s.clone()),
                        _ => None,
                    })
                }
                Ok(fresh) => {
                    state.lookup::<T>(key, pos).and_then(|(stored, _)| match stored {
                        Ok(s) if s.pos > fresh.pos => {
                            trace!("{key:?} at {pos} grew from {} to {}", fresh.pos, s.pos);
                            Some(s.clone())
                        }
                        _ => None,
                    })
                }
                Err(_) => None,
            };
            if let Some(stored) = stored {
                outcome = Ok(stored);
            }

            let pruned = ctx.pruned(used_of(&outcome));
            state.store(key, pos, outcome.clone(), pruned);
            outcome
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::LeftRecContext,
        outcome::Outcome,
        state::{premade::BTreeMemoTable, ParseState},
        terminal::{literal, Declared},
    };
    use alloc::{rc::Rc, string::{String, ToString}};
    use core::cell::Cell;

    fn run<T>(parser: &Parser<str, T>, input: &str) -> Outcome<T> {
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new(input, &mut memo);
        parser.parse_at(&mut state, 0, &LeftRecContext::new())
    }

    #[test]
    fn parities() {
        assert!(Parity::Even.prefers_stored(3));
        assert!(!Parity::Even.prefers_stored(2));
        assert!(Parity::Odd.prefers_stored(0));
        assert!(!Parity::Odd.prefers_stored(1));
    }

    #[test]
    fn reuses_stored() {
        let calls = Rc::new(Cell::new(0));
        let counted = {
            let calls = Rc::clone(&calls);
            Parser::<str, String>::new(move |state, pos, ctx| {
                calls.set(calls.get() + 1);
                literal("a").parse_at(state, pos, ctx)
            })
        }.memoize();
        let p = counted.clone().then(literal("b")).or(counted.then(literal("c")));
        assert_eq!(run(&p, "ac").map(|s| s.value), Ok("c".to_string()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn curtails_by_remaining_length() {
        let calls = Rc::new(Cell::new(0));
        let decl = Declared::<str, ()>::new();
        let body = {
            let calls = Rc::clone(&calls);
            let itself = decl.parser();
            Parser::new(move |state, pos, ctx| {
                calls.set(calls.get() + 1);
                itself.parse_at(state, pos, ctx)
            })
        };
        let p = decl.define(body.memoize());
        let fail = run(&p, "xyz").unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::Curtailment, 0));
        assert_eq!(calls.get(), 3 + 2);
    }

    #[test]
    fn named_keys_share_entries() {
        let calls = Rc::new(Cell::new(0));
        let make = || {
            let calls = Rc::clone(&calls);
            Parser::<str, String>::new(move |state, pos, ctx| {
                calls.set(calls.get() + 1);
                literal("a").parse_at(state, pos, ctx)
            }).memoize_with(Parity::Even, Some(MemoKey::named("a")))
        };
        let p = make().then(literal("b")).or(make().then(literal("c")));
        assert_eq!(run(&p, "ac").map(|s| s.pos), Ok(2));
        assert_eq!(calls.get(), 1);
    }
}
