//! The core of a parser-combinator library for ambiguous, possibly
//! left-recursive, context-free grammars.  Grammars are written as ordinary
//! combinations of parsers, including rules that refer to themselves in their
//! leftmost position, which naive recursive descent could never finish, and
//! parsing yields the leftmost derivation.
//!
//! Left recursion is handled by memoization that curtails it, in the manner of
//! Frost, Hafiz, and Callaghan.  Each [memoized](struct.Parser.html#method.memoize)
//! parser tracks, in a [`LeftRecContext`], how many times it has been entered
//! at the current position without any input being consumed.  Once that depth
//! exceeds the number of remaining input positions plus one, no deeper
//! derivation could consume anything more, so that invocation fails with
//! [`Curtailment`](enum.ParseError.html#variant.Curtailment), and the
//! shallower invocations build their derivations on top of what the deepest
//! successful one found.  Which memoized parsers' curtailment influenced an
//! outcome is tracked in its [`Used`] set, and stored outcomes are only reused
//! under contexts in which they would have been computed the same.  The
//! memoization also makes backtracking over ambiguous alternatives efficient.
//!
//! Parsers yield an [`Outcome`], which is a plain `Result` of a [`Success`] or
//! a [`Failure`].  Failures carry a [`ParseError`] and are never panics.
//! Alternatives that fail at the same position merge what they expected, so a
//! failed parse can be rendered with [`show_error`] as a message like
//! `Expected x, y, or z`.  A [fatal](struct.FatalParseError.html) error stops
//! alternatives from being tried, for committing to a branch.
//!
//! The input can be a `str`, parsed by `char`s, or a slice of any tokens, such
//! as those produced by a separate lexer, or anything else that implements
//! [`Input`].
//!
//! This core crate is `no_std` and only needs the `alloc` library.  It provides
//! the [`BTreeMemoTable`] for ready use.  The memo table is abstracted by the
//! [`MemoTable`] trait, so you may provide your own.  The full crate, which uses
//! the `std` library, adds a hashing memo table and a regular-expression
//! terminal.
//!
//! [`LeftRecContext`]: struct.LeftRecContext.html
//! [`Used`]: struct.Used.html
//! [`Outcome`]: type.Outcome.html
//! [`Success`]: struct.Success.html
//! [`Failure`]: struct.Failure.html
//! [`ParseError`]: enum.ParseError.html
//! [`show_error`]: fn.show_error.html
//! [`Input`]: trait.Input.html
//! [`BTreeMemoTable`]: state/premade/struct.BTreeMemoTable.html
//! [`MemoTable`]: trait.MemoTable.html

#![no_std]

extern crate alloc;


mod error;
pub use error::{Expected, FatalParseError, ParseError};

mod context;
pub use context::{LeftRecContext, MemoKey, Used};

mod outcome;
pub use outcome::{Failure, Outcome, Success};

mod input;
pub use input::Input;

pub mod state;
pub use state::{MemoEntry, MemoTable, ParseState};

mod parser;
pub use parser::{empty, sequence, unit, Parity, Parser};

pub mod terminal;

mod driver;
pub use driver::{run_parser, Driver};

mod show;
pub use show::{show_error, DEFAULT_CONTEXT};
