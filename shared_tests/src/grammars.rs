//! Grammars exercised by the suites, several of them left-recursive.

use std::{cell::Cell, fmt, rc::Rc};

use curtail_core::{terminal::*, *};


/// A derivation tree of the `E = E E | "a"` grammar.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Tree {
    /// `"a"`
    Leaf,
    /// `E E`
    Pair(Box<Tree>, Box<Tree>),
}

impl Tree {
    /// Make a `Pair` of `left` and `right`.
    pub fn pair(left: Tree, right: Tree) -> Self {
        Tree::Pair(Box::new(left), Box::new(right))
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Leaf => f.write_str("a"),
            Tree::Pair(left, right) => write!(f, "({left} {right})"),
        }
    }
}

/// `E = E E | "a"`, which is ambiguous and directly left-recursive.
pub fn pairs() -> Parser<str, Tree> {
    let e = Declared::new();
    let rule = e.parser().seq(e.parser()).map(|(l, r)| Tree::pair(l, r))
               | literal("a").to(Tree::Leaf);
    e.define(rule.memoize())
}


/// A decimal natural number.
pub fn number() -> Parser<str, i64> {
    predicate(|c: &char| c.is_ascii_digit(), "digit")
        .some()
        .map(|digits| {
            digits.into_iter().fold(0, |n, d: char| n * 10 + i64::from(d.to_digit(10).unwrap_or(0)))
        })
        .label("number")
}

/// `E = E "-" N | N`, which is left-associative because it is left-recursive.
pub fn subtraction() -> Parser<str, i64> {
    subtraction_with(Parity::default())
}

/// [`subtraction`](fn.subtraction.html) memoized with `parity`.
pub fn subtraction_with(parity: Parity) -> Parser<str, i64> {
    let e = Declared::new();
    let rule = e.parser().skip(literal("-")).seq(number()).map(|(a, b)| a - b)
               | number();
    e.define(rule.memoize_with(parity, None))
}

/// Like [`subtraction`](fn.subtraction.html) but constructed through
/// [`recursive`](../../curtail_core/terminal/fn.recursive.html), which makes a
/// new parser for each level of recursion, with a named memo key that they all
/// share.
pub fn subtraction_by_name() -> Parser<str, i64> {
    let rule = recursive(subtraction_by_name).skip(literal("-")).seq(number()).map(|(a, b)| a - b)
               | number();
    rule.memoize_with(Parity::Even, Some(MemoKey::named("subtraction_by_name")))
}

/// The usual two-level grammar of arithmetic, left-recursive at both levels:
///
/// ```text
/// expr   = expr "+" term | expr "-" term | term
/// term   = term "*" factor | term "/" factor | factor
/// factor = number | "(" expr ")"
/// ```
pub fn arithmetic() -> Parser<str, i64> {
    arithmetic_with(Parity::default())
}

/// [`arithmetic`](fn.arithmetic.html) with both rules memoized with `parity`.
pub fn arithmetic_with(parity: Parity) -> Parser<str, i64> {
    let expr = Declared::new();
    let term = Declared::new();

    let factor = number()
                 | expr.parser().wrap(literal("("), literal(")"));

    let term_rule = term.parser().skip(literal("*")).seq(factor.clone()).map(|(a, b)| a * b)
                    | term.parser().skip(literal("/")).seq(factor.clone()).map(|(a, b)| a / b)
                    | factor;
    let _ = term.define(term_rule.memoize_with(parity, None));

    let expr_rule = expr.parser().skip(literal("+")).seq(term.parser()).map(|(a, b)| a + b)
                    | expr.parser().skip(literal("-")).seq(term.parser()).map(|(a, b)| a - b)
                    | term.parser();
    expr.define(expr_rule.memoize_with(parity, None))
}

/// Two rules that are left-recursive through each other:
///
/// ```text
/// s = t "c" | "c"
/// t = s "d" | "d"
/// ```
///
/// `s` yields its derivation with `s` nodes in brackets and `t` nodes in
/// parentheses.
pub fn indirect() -> Parser<str, String> {
    indirect_with(Parity::default())
}

/// [`indirect`](fn.indirect.html) with both rules memoized with `parity`.
pub fn indirect_with(parity: Parity) -> Parser<str, String> {
    let s = Declared::new();
    let t = Declared::new();

    let t_rule = s.parser().skip(literal("d")).map(|s| format!("({s}d)"))
                 | literal("d");
    let _ = t.define(t_rule.memoize_with(parity, None));

    let s_rule = t.parser().skip(literal("c")).map(|t| format!("[{t}c]"))
                 | literal("c");
    s.define(s_rule.memoize_with(parity, None))
}

/// `S = S "x" | "x"`, whose body counts how many times it runs.
pub fn counted_self_recursion(runs: Rc<Cell<usize>>) -> Parser<str, usize> {
    let s = Declared::new();
    let body = s.parser().skip(literal("x")).map(|n| n + 1)
               | literal("x").to(1);
    let counted = Parser::new(move |state, pos, ctx| {
        runs.set(runs.get() + 1);
        body.parse_at(state, pos, ctx)
    });
    s.define(counted.memoize())
}

/// `S = S`, whose body counts how many times it runs.  It can only ever fail
/// with curtailment.
pub fn counted_only_recursion(runs: Rc<Cell<usize>>, parity: Parity) -> Parser<str, ()> {
    let s = Declared::<str, ()>::new();
    let only = s.parser();
    let counted = Parser::new(move |state, pos, ctx| {
        runs.set(runs.get() + 1);
        only.parse_at(state, pos, ctx)
    });
    s.define(counted.memoize_with(parity, None))
}

/// `S = A "x"` with `A = A "x" | "a"`.  The memoized `A` yields its longest
/// derivation and is not retried with a shorter one, so `S` accepts nothing.
pub fn greedy_prefix() -> Parser<str, usize> {
    let a = Declared::new();
    let rule = a.parser().skip(literal("x")).map(|n| n + 1)
               | literal("a").to(0);
    let a = a.define(rule.memoize());
    a.skip(literal("x")).map(|n| n + 1)
}

/// One or more ASCII letters.
pub fn identifier() -> Parser<str, String> {
    predicate(|c: &char| c.is_ascii_alphabetic(), "letter")
        .some()
        .map(|cs| cs.into_iter().collect())
        .label("identifier")
}
