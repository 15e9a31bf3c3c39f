//! Running a composed parser over a whole input.

use log::debug;

use crate::{
    context::LeftRecContext,
    input::Input,
    outcome::Outcome,
    parser::Parser,
    state::{premade::BTreeMemoTable, MemoTable, ParseState},
    terminal::eof,
};


/// Run `parser` over `input` from its start, with an empty memo table and
/// context, and return its outcome.
///
/// When `consume_all` is true, the parser must be followed by the end of input,
/// else the outcome is a failure expecting `EOF`.
///
/// This uses a [`BTreeMemoTable`](state/premade/struct.BTreeMemoTable.html).
/// Use a [`Driver`](struct.Driver.html) to choose another memo table type or to
/// reuse a table's allocation.
pub fn run_parser<I, T>(parser: &Parser<I, T>, input: &I, consume_all: bool) -> Outcome<T>
    where I: Input + ?Sized + 'static,
          T: 'static,
{
    Driver { memo: BTreeMemoTable::new(), consume_all }.run(parser, input)
}


/// Configuration for running parsers over whole inputs, and the memo table
/// that each run uses.
///
/// You may set the fields directly.  The memo table is cleared at the start of
/// each run, and its entries remain afterward for inspection until the next
/// run.
#[derive(Clone, Debug)]
pub struct Driver<M> {
    /// The memo table used by each run.
    pub memo: M,
    /// Whether a run must consume all the input to succeed.
    pub consume_all: bool,
}

impl<M> Driver<M>
    where M: MemoTable,
{
    /// Make one that uses `memo` and requires consuming all input.
    #[inline]
    pub fn new(memo: M) -> Self {
        Self { memo, consume_all: true }
    }

    /// Run `parser` over `input` from its start, with an emptied memo table and
    /// an empty context, and return its outcome.
    pub fn run<I, T>(&mut self, parser: &Parser<I, T>, input: &I) -> Outcome<T>
        where I: Input + ?Sized + 'static,
              T: 'static,
    {
        self.memo.clear();
        let ctx = LeftRecContext::new();
        let mut state = ParseState::new(input, &mut self.memo);
        let outcome = if self.consume_all {
            parser.clone().skip(eof()).parse_at(&mut state, 0, &ctx)
        } else {
            parser.parse_at(&mut state, 0, &ctx)
        };
        match &outcome {
            Ok(s) => debug!("parse succeeded, ending at {} of {}, with {} memo entries",
                            s.pos, input.end(), self.memo.len()),
            Err(f) => debug!("parse failed at {} of {}, with {} memo entries: {}",
                             f.pos, input.end(), self.memo.len(), f.error),
        }
        outcome
    }
}

impl<M> Default for Driver<M>
    where M: MemoTable + Default,
{
    fn default() -> Self {
        Self::new(M::default())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ParseError, terminal::literal};

    #[test]
    fn consuming_all() {
        let p = literal("ab");
        assert_eq!(run_parser(&p, "ab", true).map(|s| s.pos), Ok(2));
        assert_eq!(run_parser(&p, "abc", false).map(|s| s.pos), Ok(2));
        let fail = run_parser(&p, "abc", true).unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::expected("EOF"), 2));
    }

    #[test]
    fn driver_clears_memo() {
        let p = literal("a").memoize().many();
        let mut driver = Driver::<BTreeMemoTable>::default();
        assert!(driver.consume_all);
        assert_eq!(driver.run(&p, "aaa").map(|s| s.value.len()), Ok(3));
        assert_eq!(driver.memo.len(), 4);
        assert_eq!(driver.run(&p, "a").map(|s| s.value.len()), Ok(1));
        assert_eq!(driver.memo.len(), 2);

        driver.consume_all = false;
        assert_eq!(driver.run(&p, "ab").map(|s| s.pos), Ok(1));
    }
}
