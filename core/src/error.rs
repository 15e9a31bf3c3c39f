//! Errors that might be returned by parsing.

use alloc::{string::{String, ToString}, vec::Vec};
use core::fmt;


/// The possible errors that a failed parse might carry.
///
/// All of them are plain values carried by a [`Failure`](struct.Failure.html)
/// and are never thrown.  Only [`alt`](struct.Parser.html#method.alt) and
/// the combinators built on it recover from them.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ParseError {
    /// Describes what was expected at the failure position.  Two of these
    /// from alternatives that failed at the same position are merged.
    #[error("{0}")]
    Expected(Expected),
    /// Escapes backtracking: an `alt` that sees this does not try its other
    /// branch.
    #[error(transparent)]
    Fatal(FatalParseError),
    /// Raised by a memoized parser whose left-recursion depth exceeded the
    /// bound given by the remaining input.
    #[error("Curtailment")]
    Curtailment,
    /// Any other failure, described by its message.
    #[error("{0}")]
    Message(String),
}

impl ParseError {
    /// Make an [`Expected`](#variant.Expected) error with a single expectation.
    pub fn expected(what: impl Into<String>) -> Self {
        ParseError::Expected(Expected::one(what))
    }

    /// Make a [`Fatal`](#variant.Fatal) error with the given message.
    pub fn fatal(message: impl Into<String>) -> Self {
        ParseError::Fatal(FatalParseError::new(message))
    }

    /// Make a [`Message`](#variant.Message) error.
    pub fn message(message: impl Into<String>) -> Self {
        ParseError::Message(message.into())
    }

    /// Whether this error stops alternatives from being tried.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal(_))
    }

    /// Convert into a [`Fatal`](#variant.Fatal) error, keeping the rendered
    /// message.  Already-fatal errors are returned as they are.
    #[must_use]
    pub fn into_fatal(self) -> Self {
        match self {
            fatal @ ParseError::Fatal(_) => fatal,
            other => ParseError::Fatal(FatalParseError::new(other.to_string())),
        }
    }

    /// Merge the errors of two alternatives that both failed at the same
    /// position.  Two `Expected` errors union their expectations, anything
    /// else keeps the second error.
    pub(crate) fn merge_tied(self, second: Self) -> Self {
        match (self, second) {
            (fatal @ ParseError::Fatal(_), _) => fatal,
            (ParseError::Expected(mut exp1), ParseError::Expected(exp2)) => {
                exp1.extend(exp2);
                ParseError::Expected(exp1)
            }
            (_, second) => second,
        }
    }
}


/// A failure that is not backtracked over.
///
/// Grammar authors use it, usually via
/// [`commit`](struct.Parser.html#method.commit) or
/// [`fail`](terminal/fn.fail.html), to commit to a parse path after a
/// sufficiently disambiguating prefix has matched.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[error("{message}")]
pub struct FatalParseError {
    message: String,
}

impl FatalParseError {
    /// Make one with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The message given when made.
    pub fn message(&self) -> &str {
        &self.message
    }
}


/// The list of human-readable things that were expected at a failure
/// position.
///
/// Duplicates are dropped as items are added, and the first-seen order is kept,
/// so that the rendered message lists each alternative once.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct Expected(Vec<String>);

impl Expected {
    /// Make one that expects a single thing.
    pub fn one(what: impl Into<String>) -> Self {
        Self(alloc::vec![what.into()])
    }

    /// The expectations, in first-seen order.
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Add an expectation unless it is already present.
    pub fn push(&mut self, what: impl Into<String>) {
        let what = what.into();
        if !self.0.contains(&what) {
            self.0.push(what);
        }
    }
}

impl Extend<String> for Expected {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for what in iter {
            self.push(what);
        }
    }
}

impl IntoIterator for Expected {
    type Item = String;
    type IntoIter = alloc::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Expected {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut expected = Self::default();
        for what in iter {
            expected.push(what);
        }
        expected
    }
}

/// Renders as `Expected x`, `Expected x or y`, or `Expected x, y, or z`.
impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Expected ")?;
        match self.0.as_slice() {
            [] => f.write_str("nothing"),
            [only] => f.write_str(only),
            [first, second] => write!(f, "{first} or {second}"),
            [init @ .., last] => {
                for what in init {
                    write!(f, "{what}, ")?;
                }
                write!(f, "or {last}")
            }
        }
    }
}
