//! Primitive parsers that consume input directly, and the constructors of
//! recursive parsers.

use alloc::{borrow::ToOwned, rc::Rc, string::String};
use core::{borrow::Borrow, cell::OnceCell, fmt};

use crate::{
    error::ParseError,
    input::Input,
    outcome::{used_of, Failure, Success},
    parser::Parser,
};


/// Consume `lit` if the input at the current position starts with it, yielding
/// it as a `String`.  Fails expecting `lit`.
pub fn literal(lit: &str) -> Parser<str, String> {
    literal_named(lit, lit)
}

/// Consume `lit` if the input at the current position starts with it, yielding
/// an owned copy of it.  Fails expecting `name`.
///
/// This is the form of [`literal`](fn.literal.html) for any kind of input,
/// which might not have a printable form of its own.
pub fn literal_named<I>(lit: &I, name: impl Into<String>) -> Parser<I, I::Owned>
    where I: Input + ?Sized + 'static,
          I::Owned: 'static,
{
    let owned = lit.to_owned();
    let name = name.into();
    Parser::<I, _>::new(move |state, pos, _| {
        let lit: &I = owned.borrow();
        if state.input().starts_with_at(pos, lit) {
            Ok(Success::new(lit.to_owned(), pos + lit.end()))
        } else {
            Err(Failure::new(ParseError::expected(name.clone()), pos))
        }
    })
}

/// Consume one token that satisfies `pred`, yielding it.  Fails expecting
/// `name`.
pub fn predicate<I, F>(pred: F, name: impl Into<String>) -> Parser<I, I::Token>
    where I: Input + ?Sized + 'static,
          I::Token: 'static,
          F: Fn(&I::Token) -> bool + 'static,
{
    let name = name.into();
    Parser::<I, _>::new(move |state, pos, _| {
        match state.input().next_token(pos) {
            Some((token, next)) if pred(&token) => Ok(Success::new(token, next)),
            _ => Err(Failure::new(ParseError::expected(name.clone()), pos)),
        }
    })
}

/// Alias for [`predicate`](fn.predicate.html), for inputs of already lexed
/// tokens.
#[inline]
pub fn token<I, F>(pred: F, name: impl Into<String>) -> Parser<I, I::Token>
    where I: Input + ?Sized + 'static,
          I::Token: 'static,
          F: Fn(&I::Token) -> bool + 'static,
{
    predicate(pred, name)
}

/// Scan forward for the first token that satisfies `pred`, consuming through
/// it and yielding it.  Fails expecting `name`, at the current position, when
/// no remaining token satisfies it.
pub fn find_token<I, F>(pred: F, name: impl Into<String>) -> Parser<I, I::Token>
    where I: Input + ?Sized + 'static,
          I::Token: 'static,
          F: Fn(&I::Token) -> bool + 'static,
{
    let name = name.into();
    Parser::<I, _>::new(move |state, pos, _| {
        let input = state.input();
        let mut at = pos;
        while let Some((token, next)) = input.next_token(at) {
            if pred(&token) {
                return Ok(Success::new(token, next));
            }
            at = next;
        }
        Err(Failure::new(ParseError::expected(name.clone()), pos))
    })
}

/// Run `parser` without consuming anything, yielding whether it succeeded.
/// Never fails.
///
/// The used set of `parser`'s outcome is kept, since whether it succeeded can
/// depend on curtailment.
pub fn lookahead<I, T>(parser: Parser<I, T>) -> Parser<I, bool>
    where I: ?Sized + 'static,
          T: 'static,
{
    Parser::new(move |state, pos, ctx| {
        let outcome = parser.parse_at(state, pos, ctx);
        Ok(Success { value: outcome.is_ok(), pos, used: used_of(&outcome).clone() })
    })
}

/// Consume any one token, yielding it.  Fails only at the end of input.
pub fn any<I>() -> Parser<I, I::Token>
    where I: Input + ?Sized + 'static,
          I::Token: 'static,
{
    Parser::<I, _>::new(|state, pos, _| {
        match state.input().next_token(pos) {
            Some((token, next)) => Ok(Success::new(token, next)),
            None => Err(Failure::new(ParseError::expected("any input"), pos)),
        }
    })
}

/// Consume all the remaining input, yielding an owned copy of it.  Never fails,
/// and yields an empty copy at the end of input.
pub fn all<I>() -> Parser<I, I::Owned>
    where I: Input + ?Sized + 'static,
          I::Owned: 'static,
{
    Parser::<I, _>::new(|state, pos, _| {
        let input = state.input();
        let end = input.end();
        Ok(Success::new(input.slice(pos, end).to_owned(), end.max(pos)))
    })
}

/// Succeed, consuming nothing, only at the end of input.  Fails expecting
/// `EOF`.
pub fn eof<I>() -> Parser<I, ()>
    where I: Input + ?Sized + 'static,
{
    Parser::<I, _>::new(|state, pos, _| {
        if pos >= state.input().end() {
            Ok(Success::new((), pos))
        } else {
            Err(Failure::new(ParseError::expected("EOF"), pos))
        }
    })
}

/// Always fail with `error`, consuming nothing.
pub fn fail<I, T>(error: ParseError) -> Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
{
    Parser::new(move |_, pos, _| Err(Failure::new(error.clone(), pos)))
}


/// A parser that calls `thunk` when it is first run, and runs what that returns
/// from then on.
///
/// This lets a grammar rule refer to rules that are constructed later,
/// including itself, by having `thunk` call the function that constructs it.
/// Note that such a function constructs a new parser, with new memo keys, each
/// time it is called.  So a rule that is left-recursive through `recursive`
/// must be memoized with a named key (see
/// [`memoize_with`](../struct.Parser.html#method.memoize_with)), or be built with
/// [`Declared`](struct.Declared.html) instead.
pub fn recursive<I, T, F>(thunk: F) -> Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
          F: Fn() -> Parser<I, T> + 'static,
{
    let cell = OnceCell::new();
    Parser::new(move |state, pos, ctx| cell.get_or_init(&thunk).parse_at(state, pos, ctx))
}


/// A parser that is declared before it is defined, for making rules that refer
/// to themselves, directly or indirectly, as the same parser value.
///
/// Get handles to it with [`parser`](#method.parser), use them in constructing
/// the rules, then give the rule to [`define`](#method.define).  Running a
/// handle before then panics, as that is a bug in constructing the grammar.
///
/// The defined rule and its handles form a reference cycle, so they are never
/// freed.  Grammars are usually constructed once and kept.
pub struct Declared<I: ?Sized, T> {
    cell: Rc<OnceCell<Parser<I, T>>>,
}

impl<I: ?Sized, T> Clone for Declared<I, T> {
    fn clone(&self) -> Self {
        Self { cell: Rc::clone(&self.cell) }
    }
}

impl<I: ?Sized, T> Default for Declared<I, T> {
    fn default() -> Self {
        Self { cell: Rc::new(OnceCell::new()) }
    }
}

impl<I: ?Sized, T> fmt::Debug for Declared<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declared")
         .field("defined", &self.cell.get().is_some())
         .finish()
    }
}

impl<I, T> Declared<I, T>
    where I: ?Sized + 'static,
          T: 'static,
{
    /// Make a new undefined one.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`define`](#method.define) has been called.
    #[inline]
    pub fn is_defined(&self) -> bool {
        self.cell.get().is_some()
    }

    /// A handle that runs the defined rule.
    pub fn parser(&self) -> Parser<I, T> {
        let cell = Rc::clone(&self.cell);
        Parser::new(move |state, pos, ctx| {
            match cell.get() {
                Some(rule) => rule.parse_at(state, pos, ctx),
                None => panic!("declared parser run before being defined"),
            }
        })
    }

    /// Define the rule, and return a handle to it.
    ///
    /// # Panics
    ///
    /// If already defined.
    pub fn define(&self, rule: Parser<I, T>) -> Parser<I, T> {
        let defined = self.cell.set(rule).is_ok();
        assert!(defined, "declared parser defined twice");
        self.parser()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::LeftRecContext,
        outcome::Outcome,
        state::{premade::BTreeMemoTable, ParseState},
    };
    use alloc::{string::ToString, vec, vec::Vec};

    fn run<I, T>(parser: &Parser<I, T>, input: &I) -> Outcome<T>
        where I: ?Sized,
    {
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new(input, &mut memo);
        parser.parse_at(&mut state, 0, &LeftRecContext::new())
    }

    #[test]
    fn literals() {
        assert_eq!(run(&literal("abc"), "abcd").map(|s| (s.value, s.pos)),
                   Ok(("abc".to_string(), 3)));
        let fail = run(&literal("abc"), "abd").unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::expected("abc"), 0));
        assert_eq!(run(&literal("λ"), "λx").map(|s| s.pos), Ok(2));

        let tokens: &[u8] = &[1, 2, 3];
        let p = literal_named(&[1u8, 2][..], "one two");
        assert_eq!(run(&p, tokens).map(|s| (s.value, s.pos)), Ok((vec![1, 2], 2)));
        assert_eq!(run(&p, &tokens[1..]).unwrap_err().error, ParseError::expected("one two"));
    }

    #[test]
    fn predicates() {
        let digit = predicate(|c: &char| c.is_ascii_digit(), "digit");
        assert_eq!(run(&digit, "7a").map(|s| (s.value, s.pos)), Ok(('7', 1)));
        assert_eq!(run(&digit, "a").unwrap_err().error, ParseError::expected("digit"));
        assert_eq!(run(&digit, "").unwrap_err().pos, 0);

        let even = token(|n: &i32| n % 2 == 0, "even");
        assert_eq!(run(&even, &[4, 1][..]).map(|s| s.value), Ok(4));
    }

    #[test]
    fn finding() {
        let semi = find_token(|c: &char| *c == ';', "semicolon");
        assert_eq!(run(&semi, "ab;c").map(|s| (s.value, s.pos)), Ok((';', 3)));
        let fail = run(&semi, "abc").unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::expected("semicolon"), 0));
    }

    #[test]
    fn looking_ahead() {
        let p = lookahead(literal("ab"));
        assert_eq!(run(&p, "abc").map(|s| (s.value, s.pos)), Ok((true, 0)));
        assert_eq!(run(&p, "b").map(|s| (s.value, s.pos)), Ok((false, 0)));
    }

    #[test]
    fn any_all_eof() {
        assert_eq!(run(&any(), "xy").map(|s| (s.value, s.pos)), Ok(('x', 1)));
        assert_eq!(run(&any::<str>(), "").unwrap_err().error, ParseError::expected("any input"));

        assert_eq!(run(&all(), "xyz").map(|s| (s.value, s.pos)), Ok(("xyz".to_string(), 3)));
        assert_eq!(run(&literal("x").then(all()), "x").map(|s| s.value), Ok(String::new()));
        assert_eq!(run(&all::<[u8]>(), &[][..]).map(|s| s.value), Ok(Vec::new()));

        assert!(run(&eof::<str>(), "").is_ok());
        assert_eq!(run(&eof::<str>(), "x").unwrap_err().error, ParseError::expected("EOF"));
    }

    #[test]
    fn failing() {
        let p: Parser<str, ()> = fail(ParseError::message("nope"));
        let fail = run(&p, "x").unwrap_err();
        assert_eq!((fail.error.to_string(), fail.pos), ("nope".to_string(), 0));
    }

    fn nested() -> Parser<str, usize> {
        literal("(").then(recursive(nested)).skip(literal(")")).map(|n| n + 1)
            | crate::parser::unit(0)
    }

    #[test]
    fn recursion() {
        assert_eq!(run(&nested(), "((()))").map(|s| (s.value, s.pos)), Ok((3, 6)));

        let decl = Declared::<str, usize>::new();
        assert!(!decl.is_defined());
        let p = decl.define(literal("[").then(decl.parser()).skip(literal("]")).map(|n| n + 1)
                            | crate::parser::unit(0));
        assert!(decl.is_defined());
        assert_eq!(run(&p, "[[]]").map(|s| s.value), Ok(2));
    }

    #[test]
    #[should_panic(expected = "before being defined")]
    fn undefined_declaration() {
        let decl = Declared::<str, ()>::new();
        let _ = run(&decl.parser(), "");
    }
}
