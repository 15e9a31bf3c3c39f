//! Used by the integration tests of both the [core](../curtail_core/index.html)
//! and the [full](../curtail/index.html) crates.  It provides test suites that
//! can be run against any type of
//! [`MemoTable`](../curtail_core/trait.MemoTable.html), and the grammars they
//! exercise, so that every memo table is held to the same results.

use std::fmt::Debug;

use curtail_core::*;


pub mod grammars;
pub mod suites;


/// Run `parser` over all of `input` with a fresh memo table of type `M`.
pub fn parse<M, T>(parser: &Parser<str, T>, input: &str) -> Outcome<T>
    where M: MemoTable + Default,
          T: 'static,
{
    Driver::<M>::default().run(parser, input)
}

/// Like [`parse`](fn.parse.html) but only give the value, panicking with the
/// rendered failure if there is none.
pub fn parse_value<M, T>(parser: &Parser<str, T>, input: &str) -> T
    where M: MemoTable + Default,
          T: 'static,
{
    match parse::<M, T>(parser, input) {
        Ok(success) => success.value,
        Err(failure) => panic!("{}", show_error(&failure, input, DEFAULT_CONTEXT)),
    }
}

/// Like [`parse`](fn.parse.html) but only give the error and its position,
/// panicking if the parse succeeded.
pub fn parse_failure<M, T>(parser: &Parser<str, T>, input: &str) -> (ParseError, usize)
    where M: MemoTable + Default,
          T: Debug + 'static,
{
    match parse::<M, T>(parser, input) {
        Ok(success) => panic!("unexpected success for {input:?}: {:?}", success.value),
        Err(failure) => (failure.error, failure.pos),
    }
}
