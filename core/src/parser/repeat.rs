//! Repetition combinators.

use alloc::vec::Vec;

use crate::{
    context::LeftRecContext,
    outcome::{Failure, Success},
    parser::{empty, Parser},
};


impl<I, T> Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
{
    /// Zero or more repetitions of this parser, yielding their values.
    ///
    /// Ends at the first non-fatal failure, or just after the first repetition
    /// that consumed nothing.  A fatal failure is returned.
    ///
    /// Only the first repetition runs at the start position, so it is the only
    /// one given the current context, and the only one whose used set can
    /// matter.  Later ones are given an empty context.
    pub fn many(self) -> Parser<I, Vec<T>> {
        Parser::new(move |state, pos, ctx| {
            let first = match self.parse_at(state, pos, ctx) {
                Ok(first) => first,
                Err(fail) if fail.error.is_fatal() => return Err(fail),
                Err(fail) => return Ok(Success { value: Vec::new(), pos, used: fail.used }),
            };
            let used = first.used;
            let mut values = alloc::vec![first.value];
            let mut at = first.pos;
            if at != pos {
                let fresh = LeftRecContext::new();
                loop {
                    match self.parse_at(state, at, &fresh) {
                        Ok(next) => {
                            values.push(next.value);
                            if next.pos == at {
                                break;
                            }
                            at = next.pos;
                        }
                        Err(fail) if fail.error.is_fatal() => {
                            return Err(Failure { used, ..fail });
                        }
                        Err(_) => break,
                    }
                }
            }
            Ok(Success { value: values, pos: at, used })
        })
    }

    /// One or more repetitions of this parser, yielding their values.
    pub fn some(self) -> Parser<I, Vec<T>> {
        let rest = self.clone().many();
        self.seq(rest).map(|(first, mut rest)| {
            rest.insert(0, first);
            rest
        })
    }

    /// Zero or more repetitions of this parser, each optionally followed by
    /// `sep`, yielding only this parser's values.  A trailing separator is
    /// consumed.
    pub fn sep_by<S>(self, sep: Parser<I, S>) -> Parser<I, Vec<T>>
        where S: 'static,
    {
        self.skip(sep.to(()).or(empty())).many()
    }

    /// Like [`sep_by`](#method.sep_by) but requires at least one repetition.
    pub fn sep_by_plus<S>(self, sep: Parser<I, S>) -> Parser<I, Vec<T>>
        where S: 'static,
    {
        self.skip(sep.to(()).or(empty())).some()
    }
}


#[cfg(test)]
mod tests {
    use crate::{
        context::{LeftRecContext, MemoKey, Used},
        error::ParseError,
        outcome::{Failure, Outcome},
        parser::Parser,
        state::{premade::BTreeMemoTable, ParseState},
        terminal::{literal, predicate},
    };
    use alloc::{string::{String, ToString}, vec, vec::Vec};

    fn run<T>(parser: &Parser<str, T>, input: &str) -> Outcome<T> {
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new(input, &mut memo);
        parser.parse_at(&mut state, 0, &LeftRecContext::new())
    }

    fn letter() -> Parser<str, char> {
        predicate(|c: &char| c.is_alphabetic(), "letter")
    }

    #[test]
    fn many() {
        let p = literal("a").many();
        assert_eq!(run(&p, "").map(|s| (s.value.len(), s.pos)), Ok((0, 0)));
        assert_eq!(run(&p, "aab").map(|s| (s.value.len(), s.pos)), Ok((2, 2)));

        let p = letter().many().map(|cs| cs.into_iter().collect::<String>());
        assert_eq!(run(&p, "abc1").map(|s| s.value), Ok("abc".to_string()));
    }

    #[test]
    fn many_stops_after_zero_width() {
        let p = literal("").many();
        assert_eq!(run(&p, "aa").map(|s| (s.value.len(), s.pos)), Ok((1, 0)));
    }

    #[test]
    fn many_fatal() {
        let p = literal("a").then(literal("b")).commit().many();
        let fail = run(&p, "ababac").unwrap_err();
        assert!(fail.error.is_fatal());
        assert_eq!(fail.pos, 5);
    }

    #[test]
    fn many_keeps_first_used() {
        let key = MemoKey::named("k");
        let p = Parser::<str, String>::new(move |_, pos, _| {
            Err(Failure { error: ParseError::Curtailment, pos, used: Used::single(key) })
        }).many();
        assert_eq!(run(&p, "x").map(|s| (s.value, s.used)),
                   Ok((Vec::new(), Used::single(key))));
    }

    #[test]
    fn some() {
        let p = literal("a").some();
        assert_eq!(run(&p, "aaa").map(|s| s.value),
                   Ok(vec!["a".to_string(), "a".to_string(), "a".to_string()]));
        assert_eq!(run(&p, "b").unwrap_err().error, ParseError::expected("a"));
    }

    #[test]
    fn sep_by() {
        let ident = letter().some().map(|cs| cs.into_iter().collect::<String>());
        let p = ident.clone().sep_by(literal(","));
        assert_eq!(run(&p, "").map(|s| (s.value, s.pos)), Ok((vec![], 0)));
        assert_eq!(run(&p, "a,bc,d").map(|s| (s.value, s.pos)),
                   Ok((vec!["a".to_string(), "bc".to_string(), "d".to_string()], 6)));
        assert_eq!(run(&p, "a,b,").map(|s| s.pos), Ok(4));

        let p = ident.sep_by_plus(literal(","));
        assert!(run(&p, "").is_err());
        assert_eq!(run(&p, "x").map(|s| s.value), Ok(vec!["x".to_string()]));
    }
}
