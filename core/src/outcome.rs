//! What invoking a parser yields.

use crate::{context::Used, error::ParseError};


/// The result of invoking a parser at some position: either a [`Success`] or a
/// [`Failure`].
///
/// This is simply Rust's `Result`, so `map`, `and_then`, `?` and the rest work
/// as usual.  The [`Parser`](struct.Parser.html) combinators are what apply
/// the left-recursion context and used-set rules on top of it.
pub type Outcome<T> = Result<Success<T>, Failure>;

/// The used set of either kind of outcome.
pub(crate) fn used_of<T>(outcome: &Outcome<T>) -> &Used {
    match outcome {
        Ok(s) => &s.used,
        Err(f) => &f.used,
    }
}


/// A successful parse.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Success<T> {
    /// The value produced.
    pub value: T,
    /// The position just after what was consumed.
    pub pos: usize,
    /// The memoized parsers whose curtailment influenced this result.
    pub used: Used,
}

impl<T> Success<T> {
    /// Make one with an empty used set.
    pub fn new(value: T, pos: usize) -> Self {
        Self { value, pos, used: Used::new() }
    }

    /// Transform the value, keeping the position and used set.
    pub fn map<U, F>(self, f: F) -> Success<U>
        where F: FnOnce(T) -> U,
    {
        Success { value: f(self.value), pos: self.pos, used: self.used }
    }
}


/// A failed parse.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{error} (at position {pos})")]
pub struct Failure {
    /// Why it failed.
    pub error: ParseError,
    /// The position the failure is reported at.  This can be past the position
    /// the failed parser started at, when it consumed some input before
    /// failing.
    pub pos: usize,
    /// The memoized parsers whose curtailment influenced this result.
    pub used: Used,
}

impl Failure {
    /// Make one with an empty used set.
    pub fn new(error: ParseError, pos: usize) -> Self {
        Self { error, pos, used: Used::new() }
    }

    /// Merge the failures of two alternatives that were tried at the same
    /// position.  A fatal error always wins.  Otherwise the failure that got
    /// further wins, and failures at the same position have their errors merged.
    /// The used sets are unioned in every case.
    #[must_use]
    pub fn merge(self, second: Failure) -> Failure {
        let used = self.used.union(second.used);
        let (error, pos) =
            if self.error.is_fatal() {
                (self.error, self.pos)
            } else if second.error.is_fatal() || second.pos > self.pos {
                (second.error, second.pos)
            } else if self.pos > second.pos {
                (self.error, self.pos)
            } else {
                (self.error.merge_tied(second.error), second.pos)
            };
        Failure { error, pos, used }
    }
}
