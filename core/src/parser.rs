//! The `Parser` type and its sequencing, choice, and mapping combinators.

use alloc::{rc::Rc, string::String, vec::Vec};
use core::{fmt, ops::{Add, BitOr}};

use crate::{
    context::{LeftRecContext, Used},
    error::ParseError,
    outcome::{Failure, Outcome, Success},
    state::ParseState,
};

mod memoize;
pub use memoize::Parity;

mod repeat;


/// A parser of input of type `I` that yields values of type `T`.
///
/// It is an immutable, cheaply clonable, handle to a parse function.  Parsers
/// are built by composing other parsers with the combinator methods and the
/// [`terminal`](terminal/index.html) functions, which only construct and never
/// run anything.  The composed parser is run by a
/// [`Driver`](struct.Driver.html) or [`run_parser`](fn.run_parser.html).
///
/// Every invocation is given the [`ParseState`](struct.ParseState.html), the
/// position to start at, and the [`LeftRecContext`] that tracks how deeply each
/// memoized parser has recursed at that position without consuming input.
/// Combinators that run one parser after another give the second the same
/// context when the first consumed nothing, and an empty one otherwise.  Their
/// results' [`Used`] sets are the union of both parts' sets when the whole
/// sequence consumed nothing, and the first part's set otherwise.
///
/// Parsers are `Rc`-based, so they are neither `Send` nor `Sync`.  Grammars
/// are built per thread.
///
/// [`LeftRecContext`]: struct.LeftRecContext.html
/// [`Used`]: struct.Used.html
pub struct Parser<I: ?Sized, T> {
    run: Rc<dyn Fn(&mut ParseState<'_, I>, usize, &LeftRecContext) -> Outcome<T>>,
}

impl<I: ?Sized, T> Clone for Parser<I, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self { run: Rc::clone(&self.run) }
    }
}

impl<I: ?Sized, T> fmt::Debug for Parser<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
         .field("run", &Rc::as_ptr(&self.run).cast::<()>())
         .finish()
    }
}

impl<I: ?Sized, T> Parser<I, T> {
    /// Make a parser from a raw parse function.
    ///
    /// This is the escape hatch for custom terminals.  The function must return
    /// an outcome whose position is not before `pos`, and should leave the
    /// context alone unless it invokes other parsers.
    pub fn new<F>(f: F) -> Self
        where F: Fn(&mut ParseState<'_, I>, usize, &LeftRecContext) -> Outcome<T> + 'static,
    {
        Self { run: Rc::new(f) }
    }

    /// Invoke this parser at `pos` under `ctx`.
    #[inline]
    pub fn parse_at(&self, state: &mut ParseState<'_, I>, pos: usize, ctx: &LeftRecContext)
                    -> Outcome<T>
    {
        (self.run)(state, pos, ctx)
    }
}


/// Apply the used-merge rule to the outcome of the second part of a sequence
/// that started at `start` and whose first part had `first` as its used set.
fn sequenced<T>(start: usize, first: Used, outcome: Outcome<T>) -> Outcome<T> {
    match outcome {
        Ok(s) => Ok(Success { used: Used::sequenced(start, s.pos, first, s.used), ..s }),
        Err(f) => Err(Failure { used: Used::sequenced(start, f.pos, first, f.used), ..f }),
    }
}


/// A parser that always succeeds with a clone of `value`, consuming nothing.
pub fn unit<I, T>(value: T) -> Parser<I, T>
    where I: ?Sized + 'static,
          T: Clone + 'static,
{
    Parser::new(move |_, pos, _| Ok(Success::new(value.clone(), pos)))
}

/// A parser that always succeeds with `()`, consuming nothing.
pub fn empty<I>() -> Parser<I, ()>
    where I: ?Sized + 'static,
{
    unit(())
}


impl<I, T> Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
{
    /// Transform the yielded value with `f`.
    pub fn map<U, F>(self, f: F) -> Parser<I, U>
        where U: 'static,
              F: Fn(T) -> U + 'static,
    {
        Parser::new(move |state, pos, ctx| self.parse_at(state, pos, ctx).map(|s| s.map(&f)))
    }

    /// Replace the yielded value with a clone of `value`.
    pub fn to<U>(self, value: U) -> Parser<I, U>
        where U: Clone + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Monadic sequencing: run this parser, give its value to `f`, and run the
    /// parser that `f` returns where this one ended.
    ///
    /// This is the only combinator that lets the grammar depend on what was
    /// parsed.  Prefer the applicative ones when that is not needed.
    pub fn bind<U, F>(self, f: F) -> Parser<I, U>
        where U: 'static,
              F: Fn(T) -> Parser<I, U> + 'static,
    {
        Parser::new(move |state, pos, ctx| {
            let first = self.parse_at(state, pos, ctx)?;
            let next = f(first.value);
            let ctx = ctx.carried(pos, first.pos);
            sequenced(pos, first.used, next.parse_at(state, first.pos, &ctx))
        })
    }

    /// Alias for [`bind`](#method.bind).
    #[inline]
    pub fn chain<U, F>(self, f: F) -> Parser<I, U>
        where U: 'static,
              F: Fn(T) -> Parser<I, U> + 'static,
    {
        self.bind(f)
    }

    /// Run this parser then `other`, combining both values with `f`.  All the
    /// applicative sequencing combinators are this.
    fn zip_with<U, V, F>(self, other: Parser<I, U>, f: F) -> Parser<I, V>
        where U: 'static,
              V: 'static,
              F: Fn(T, U) -> V + 'static,
    {
        Parser::new(move |state, pos, ctx| {
            let first = self.parse_at(state, pos, ctx)?;
            let ctx = ctx.carried(pos, first.pos);
            let value = first.value;
            let second = other.parse_at(state, first.pos, &ctx).map(|s| s.map(|v| f(value, v)));
            sequenced(pos, first.used, second)
        })
    }

    /// Applicative application: this parser yields a function that is applied
    /// to what `arg`, run next, yields.
    pub fn app<A, B>(self, arg: Parser<I, A>) -> Parser<I, B>
        where T: FnOnce(A) -> B,
              A: 'static,
              B: 'static,
    {
        self.zip_with(arg, |f, a| f(a))
    }

    /// Applicative application in the reversed argument order: run this
    /// parser, then `f` which yields the function to apply to this one's value.
    pub fn ap<U, F>(self, f: Parser<I, F>) -> Parser<I, U>
        where U: 'static,
              F: FnOnce(T) -> U + 'static,
    {
        self.zip_with(f, |a, f| f(a))
    }

    /// Run this parser then `other`, yielding both values.
    pub fn seq<U>(self, other: Parser<I, U>) -> Parser<I, (T, U)>
        where U: 'static,
    {
        self.zip_with(other, |a, b| (a, b))
    }

    /// Run this parser then `other`, keeping only this one's value.
    pub fn skip<U>(self, other: Parser<I, U>) -> Parser<I, T>
        where U: 'static,
    {
        self.zip_with(other, |a, _| a)
    }

    /// Alias for [`skip`](#method.skip).
    #[inline]
    pub fn seq_l<U>(self, other: Parser<I, U>) -> Parser<I, T>
        where U: 'static,
    {
        self.skip(other)
    }

    /// Run this parser then `other`, keeping only `other`'s value.
    pub fn then<U>(self, other: Parser<I, U>) -> Parser<I, U>
        where U: 'static,
    {
        self.zip_with(other, |_, b| b)
    }

    /// Alias for [`then`](#method.then).
    #[inline]
    pub fn seq_r<U>(self, other: Parser<I, U>) -> Parser<I, U>
        where U: 'static,
    {
        self.then(other)
    }

    /// Run `before`, this parser, then `after`, keeping only this one's value.
    pub fn wrap<B, A>(self, before: Parser<I, B>, after: Parser<I, A>) -> Parser<I, T>
        where B: 'static,
              A: 'static,
    {
        before.then(self).skip(after)
    }

    /// Same as `self.wrap(around.clone(), around)`.
    pub fn trim<A>(self, around: Parser<I, A>) -> Parser<I, T>
        where A: 'static,
    {
        self.wrap(around.clone(), around)
    }

    /// Choice: run this parser, and if it fails with a non-fatal error, run
    /// `other` at the same position under the same context.
    ///
    /// The used sets of both attempts are unioned, since both are relative to
    /// the same start position.  When both fail, the failures are
    /// [merged](struct.Failure.html#method.merge).  A fatal failure of this
    /// parser is returned without running `other`.
    pub fn alt(self, other: Parser<I, T>) -> Parser<I, T> {
        Parser::new(move |state, pos, ctx| {
            match self.parse_at(state, pos, ctx) {
                Err(first) if !first.error.is_fatal() => match other.parse_at(state, pos, ctx) {
                    Ok(second) => Ok(Success { used: first.used.union(second.used), ..second }),
                    Err(second) => Err(first.merge(second)),
                },
                outcome => outcome,
            }
        })
    }

    /// Alias for [`alt`](#method.alt).
    #[inline]
    pub fn or(self, other: Parser<I, T>) -> Parser<I, T> {
        self.alt(other)
    }

    /// Yield a clone of `value`, consuming nothing, when this parser fails with
    /// a non-fatal error.
    pub fn fallback(self, value: T) -> Parser<I, T>
        where T: Clone,
    {
        self.alt(unit(value))
    }

    /// Describe a failure that consumed nothing as expecting `name`, instead of
    /// whatever the failure was.  Fatal failures are left as they are.
    pub fn label(self, name: impl Into<String>) -> Parser<I, T> {
        let name = name.into();
        Parser::new(move |state, pos, ctx| {
            self.parse_at(state, pos, ctx).map_err(|f| {
                if f.error.is_fatal() || f.pos != pos {
                    f
                } else {
                    Failure { error: ParseError::expected(name.clone()), ..f }
                }
            })
        })
    }

    /// Turn any failure of this parser into a fatal one, so that enclosing
    /// alternatives do not backtrack over it.
    pub fn commit(self) -> Parser<I, T> {
        Parser::new(move |state, pos, ctx| {
            self.parse_at(state, pos, ctx)
                .map_err(|f| Failure { error: f.error.into_fatal(), ..f })
        })
    }
}


/// Run each of `parsers` in order, each starting where the previous ended,
/// yielding all their values.
pub fn sequence<I, T>(parsers: Vec<Parser<I, T>>) -> Parser<I, Vec<T>>
    where I: ?Sized + 'static,
          T: 'static,
{
    Parser::new(move |state, pos, ctx| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut used: Option<Used> = None;
        let mut at = pos;
        for parser in &parsers {
            let ctx = ctx.carried(pos, at);
            let outcome = parser.parse_at(state, at, &ctx);
            let s = match used.take() {
                None => outcome?,
                Some(prev) => sequenced(pos, prev, outcome)?,
            };
            values.push(s.value);
            used = Some(s.used);
            at = s.pos;
        }
        Ok(Success { value: values, pos: at, used: used.unwrap_or_default() })
    })
}


/// `p | q` is `p.alt(q)`.
impl<I, T> BitOr for Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
{
    type Output = Parser<I, T>;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.alt(rhs)
    }
}

/// `p + q` is `p.seq(q)`.
impl<I, T, U> Add<Parser<I, U>> for Parser<I, T>
    where I: ?Sized + 'static,
          T: 'static,
          U: 'static,
{
    type Output = Parser<I, (T, U)>;

    #[inline]
    fn add(self, rhs: Parser<I, U>) -> Self::Output {
        self.seq(rhs)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::MemoKey,
        state::premade::BTreeMemoTable,
        terminal::{fail, literal},
    };
    use alloc::{string::ToString, vec};

    fn run<T>(parser: &Parser<str, T>, input: &str) -> Outcome<T> {
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new(input, &mut memo);
        parser.parse_at(&mut state, 0, &LeftRecContext::new())
    }

    /// A parser that consumes nothing and fails with a used set of `{key}`.
    fn curtailed<T: 'static>(key: &'static str) -> Parser<str, T> {
        Parser::new(move |_, pos, _| {
            Err(Failure { error: ParseError::Curtailment, pos, used: Used::single(MemoKey::named(key)) })
        })
    }

    #[test]
    fn mapping() {
        let p = literal("ab").map(|s| s.len());
        assert_eq!(run(&p, "abc").map(|s| (s.value, s.pos)), Ok((2, 2)));
        assert_eq!(run(&literal("x").to(7), "x").map(|s| s.value), Ok(7));
    }

    #[test]
    fn binding() {
        let p = literal("a").bind(|a| literal("b").map(move |b| a.clone() + &b));
        assert_eq!(run(&p, "ab").map(|s| s.value), Ok("ab".to_string()));
        let fail = run(&p, "ac").unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::expected("b"), 1));
    }

    #[test]
    fn context_is_carried_only_when_nothing_consumed() {
        let key = MemoKey::named("k");
        let probe = || Parser::new(move |_, pos, ctx: &LeftRecContext| {
            Ok(Success::new(ctx.depth(key), pos))
        });
        let ctx = LeftRecContext::new().with_depth(key, 3);
        let mut memo = BTreeMemoTable::new();
        let mut state = ParseState::new("ab", &mut memo);

        let p = empty().then(probe());
        assert_eq!(p.parse_at(&mut state, 0, &ctx).map(|s| s.value), Ok(3));
        let p = literal("a").then(probe());
        assert_eq!(p.parse_at(&mut state, 0, &ctx).map(|s| s.value), Ok(0));
    }

    #[test]
    fn used_sets_of_sequences() {
        let k = MemoKey::named("k");
        let p = curtailed::<()>("k").fallback(()).then(literal("a"));
        assert_eq!(run(&p, "a").map(|s| s.used), Ok(Used::single(k)));

        let p = curtailed::<()>("k").fallback(()).then(empty());
        assert_eq!(run(&p, "a").map(|s| s.used), Ok(Used::single(k)));

        let p = literal("a").then(curtailed::<()>("k").fallback(()));
        assert_eq!(run(&p, "a").map(|s| s.used), Ok(Used::new()));
    }

    #[test]
    fn applicative() {
        let f = literal("+").to(|x: i32| x + 1);
        let n = literal("1").to(1);
        assert_eq!(run(&f.clone().app(n.clone()), "+1").map(|s| s.value), Ok(2));
        assert_eq!(run(&n.ap(f), "1+").map(|s| s.value), Ok(2));
    }

    #[test]
    fn sequencing() {
        let a = || literal("a");
        let b = || literal("b");
        assert_eq!(run(&a().seq(b()), "ab").map(|s| s.value),
                   Ok(("a".to_string(), "b".to_string())));
        assert_eq!(run(&(a() + b()), "ab").map(|s| s.pos), Ok(2));
        assert_eq!(run(&a().skip(b()), "ab").map(|s| s.value), Ok("a".to_string()));
        assert_eq!(run(&a().then(b()), "ab").map(|s| s.value), Ok("b".to_string()));
        assert_eq!(run(&b().wrap(a(), a()), "aba").map(|s| (s.value, s.pos)),
                   Ok(("b".to_string(), 3)));
        assert_eq!(run(&b().trim(a()), "aba").map(|s| s.pos), Ok(3));
        assert_eq!(run(&sequence(vec![a(), b(), a()]), "aba").map(|s| s.value),
                   Ok(vec!["a".to_string(), "b".to_string(), "a".to_string()]));
        assert_eq!(run(&sequence::<str, ()>(vec![]), "x").map(|s| s.pos), Ok(0));
        assert_eq!(run(&sequence(vec![a(), b()]), "aa").map_err(|f| f.pos), Err(1));
    }

    #[test]
    fn choice() {
        let p = literal("a") | literal("b");
        assert_eq!(run(&p, "b").map(|s| s.value), Ok("b".to_string()));
        let fail = run(&p, "c").unwrap_err();
        assert_eq!(fail.to_string(), "Expected a or b (at position 0)");

        let p = literal("ab").or(literal("a").then(literal("c")));
        let fail = run(&p, "ax").unwrap_err();
        assert_eq!((fail.error, fail.pos), (ParseError::expected("c"), 1));

        let p = curtailed("k").alt(literal("a"));
        assert_eq!(run(&p, "a").map(|s| s.used), Ok(Used::single(MemoKey::named("k"))));
    }

    #[test]
    fn fatal_stops_choice() {
        let p = fail(ParseError::fatal("stop")).alt(literal("a").to(()));
        assert_eq!(run(&p, "a").unwrap_err().error, ParseError::fatal("stop"));

        let p = literal("a").then(literal("b")).commit().or(literal("ac"));
        let fail = run(&p, "ac").unwrap_err();
        assert!(fail.error.is_fatal());
        assert_eq!(fail.pos, 1);
    }

    #[test]
    fn fallback_and_label() {
        let p = literal("a").fallback("z".to_string());
        assert_eq!(run(&p, "b").map(|s| (s.value, s.pos)), Ok(("z".to_string(), 0)));

        let p = (literal("0") | literal("1")).label("bit");
        assert_eq!(run(&p, "2").unwrap_err().error, ParseError::expected("bit"));

        let p = literal("a").then(literal("b")).label("ab");
        assert_eq!(run(&p, "ax").unwrap_err().error, ParseError::expected("b"));
    }
}
