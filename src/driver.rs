use crate::{state::FxMemoTable, Driver, Input, Outcome, Parser};


/// Run `parser` over `input` from its start, with an empty memo table and
/// context, and return its outcome.
///
/// When `consume_all` is true, the parser must be followed by the end of input,
/// else the outcome is a failure expecting `EOF`.
///
/// This is the same as the core crate's `run_parser` but uses an
/// [`FxMemoTable`](state/struct.FxMemoTable.html).
pub fn run_parser<I, T>(parser: &Parser<I, T>, input: &I, consume_all: bool) -> Outcome<T>
    where I: Input + ?Sized + 'static,
          T: 'static,
{
    Driver { memo: FxMemoTable::new(), consume_all }.run(parser, input)
}
