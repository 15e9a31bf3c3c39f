//! Suites of tests applied across multiple crates


use std::{cell::Cell, rc::Rc};

use curtail_core::terminal::*;

use super::*;
use crate::grammars::*;


/// The primitive terminals and `eof` enforcement.
pub fn test_terminals<M>()
    where M: MemoTable + Default,
{
    let abc = literal("abc");
    assert_eq!(parse::<M, _>(&abc, "abc").map(|s| (s.value, s.pos)),
               Ok(("abc".to_owned(), 3)));
    assert_eq!(parse_failure::<M, _>(&abc, "abd"), (ParseError::expected("abc"), 0));
    assert_eq!(parse_failure::<M, _>(&abc, "ab"), (ParseError::expected("abc"), 0));
    assert_eq!(parse_failure::<M, _>(&abc, "abcd"), (ParseError::expected("EOF"), 3));

    let digit = predicate(|c: &char| c.is_ascii_digit(), "digit");
    assert_eq!(parse_value::<M, _>(&digit, "7"), '7');
    assert_eq!(parse_failure::<M, _>(&digit, "x"), (ParseError::expected("digit"), 0));

    let nothing = eof::<str>();
    assert!(parse::<M, _>(&nothing, "").is_ok());
    assert_eq!(parse_failure::<M, _>(&nothing, "x"), (ParseError::expected("EOF"), 0));

    let rest = literal("a").then(all());
    assert_eq!(parse_value::<M, _>(&rest, "abc"), "bc");
    assert_eq!(parse_value::<M, _>(&rest, "a"), "");

    let peek = lookahead(literal("a")).seq(any());
    assert_eq!(parse_value::<M, _>(&peek, "a"), (true, 'a'));
    assert_eq!(parse_value::<M, _>(&peek, "b"), (false, 'b'));

    let found = find_token(|c: &char| *c == ';', "';'").seq(all());
    assert_eq!(parse_value::<M, _>(&found, "ab;cd"), (';', "cd".to_owned()));
    assert_eq!(parse_failure::<M, _>(&found, "abcd"), (ParseError::expected("';'"), 0));
}

/// The functor and monad laws, and the identities of choice, observed through
/// the outcomes of parsing a variety of inputs.
pub fn test_laws<M>()
    where M: MemoTable + Default,
{
    const INPUTS: [&str; 5] = ["", "1", "12", "1x", "x"];

    fn same<M, T>(left: &Parser<str, T>, right: &Parser<str, T>)
        where M: MemoTable + Default,
              T: PartialEq + Debug + 'static,
    {
        for input in INPUTS {
            assert_eq!(parse::<M, _>(left, input), parse::<M, _>(right, input),
                       "for input {input:?}");
        }
    }

    fn digit() -> Parser<str, u32> {
        predicate(|c: &char| c.is_ascii_digit(), "digit").map(|c: char| c.to_digit(10).unwrap_or(0))
    }

    let f = |n: u32| n + 1;
    let g = |n: u32| n * 10;
    let k = |n: u32| if n % 2 == 0 { unit(n) } else { digit().map(move |m| n * 10 + m) };
    let h = |n: u32| literal("x").to(n).or(unit(n + 100));

    // Functor identity and composition.
    same::<M, _>(&digit().map(|n| n), &digit());
    same::<M, _>(&digit().map(f).map(g), &digit().map(move |n| g(f(n))));

    // Monad left identity, right identity, and associativity.
    same::<M, _>(&unit(1).bind(k), &k(1));
    same::<M, _>(&unit(2).bind(k), &k(2));
    same::<M, _>(&digit().bind(unit), &digit());
    same::<M, _>(&digit().bind(k).bind(h), &digit().bind(move |n| k(n).bind(h)));

    // Failure is the identity of choice.
    let nope = || fail::<str, u32>(ParseError::message("nope"));
    same::<M, _>(&nope().alt(digit()).map(f), &digit().map(f));
    for input in ["1", "12"] {
        assert_eq!(parse::<M, _>(&digit().alt(nope()), input),
                   parse::<M, _>(&digit(), input));
    }
    assert_eq!(parse_failure::<M, _>(&nope(), "1"), (ParseError::message("nope"), 0));

    // The applicative forms agree with `bind`.
    let pair = digit().seq(digit());
    let bound = digit().bind(move |a| digit().map(move |b| (a, b)));
    same::<M, _>(&pair, &bound);
    let applied = unit::<str, fn(u32) -> u32>(|n| n + 1).app(digit());
    same::<M, _>(&applied, &digit().map(f));
}

/// Choice, committing, and the merging of failures.
pub fn test_choice<M>()
    where M: MemoTable + Default,
{
    let tried = Rc::new(Cell::new(0));
    let fallback = {
        let tried = Rc::clone(&tried);
        Parser::new(move |_, pos, _| {
            tried.set(tried.get() + 1);
            Ok(Success::new("fallback".to_owned(), pos))
        })
    };
    let committed = literal("a").then(literal("b").commit());
    let p = committed | fallback.clone();
    let (error, pos) = parse_failure::<M, _>(&p, "ac");
    assert!(error.is_fatal());
    assert_eq!(error.to_string(), "Expected b");
    assert_eq!(pos, 1);
    assert_eq!(tried.get(), 0);
    let fatal = fail::<str, String>(ParseError::fatal("stop")) | fallback.clone();
    assert_eq!(parse_failure::<M, _>(&fatal, ""), (ParseError::fatal("stop"), 0));
    assert_eq!(tried.get(), 0);
    // Without committing, the fallback is tried.
    let p = literal("a").then(literal("b")) | fallback;
    assert_eq!(parse_value::<M, _>(&p.skip(all()), "ac"), "fallback");
    assert_eq!(tried.get(), 1);

    let xy = literal("x") | literal("y");
    let (error, pos) = parse_failure::<M, _>(&xy, "z");
    assert_eq!(pos, 0);
    assert_eq!(error.to_string(), "Expected x or y");
    let failure = parse::<M, _>(&xy, "z").unwrap_err();
    assert_eq!(show_error(&failure, "z", DEFAULT_CONTEXT),
               "Error: Expected x or y in below source code (0): \nz\n\n");

    let xyz = literal("x") | literal("y") | literal("z") | literal("x");
    let (error, _) = parse_failure::<M, _>(&xyz, "w");
    assert_eq!(error.to_string(), "Expected x, y, or z");

    // The alternative that got further is the one reported.
    let further = literal("a").then(literal("b")) | literal("c");
    assert_eq!(parse_failure::<M, _>(&further, "ax"), (ParseError::expected("b"), 1));

    let labeled = (literal("a") | literal("b")).label("letter");
    assert_eq!(parse_failure::<M, _>(&labeled, "c"), (ParseError::expected("letter"), 0));

    let defaulted = literal("a").fallback("none".to_owned()).skip(all());
    assert_eq!(parse_value::<M, _>(&defaulted, "b"), "none");
    assert_eq!(parse_value::<M, _>(&defaulted, "a"), "a");
}

/// Directly and indirectly left-recursive grammars, which must terminate and
/// yield their leftmost derivations.
pub fn test_left_recursion<M>()
    where M: MemoTable + Default,
{
    let e = pairs();
    assert_eq!(parse_value::<M, _>(&e, "a"), Tree::Leaf);
    assert_eq!(parse_value::<M, _>(&e, "aa"), Tree::pair(Tree::Leaf, Tree::Leaf));
    assert_eq!(parse_failure::<M, _>(&e, "").1, 0);
    assert_eq!(parse_failure::<M, _>(&e, "b").1, 0);

    for sub in [subtraction(), subtraction_by_name()] {
        assert_eq!(parse_value::<M, _>(&sub, "7"), 7);
        assert_eq!(parse_value::<M, _>(&sub, "1-2-3"), -4);
        assert_eq!(parse_value::<M, _>(&sub, "10-1-2-3"), 4);
        assert_eq!(parse_failure::<M, _>(&sub, "1-2-"), (ParseError::expected("EOF"), 3));
    }

    let arith = arithmetic();
    assert_eq!(parse_value::<M, _>(&arith, "1+2*3"), 7);
    assert_eq!(parse_value::<M, _>(&arith, "2*3+4"), 10);
    assert_eq!(parse_value::<M, _>(&arith, "(1+2)*3"), 9);
    assert_eq!(parse_value::<M, _>(&arith, "8-2-1"), 5);
    assert_eq!(parse_value::<M, _>(&arith, "8/2/2"), 2);

    let s = indirect();
    assert_eq!(parse_value::<M, _>(&s, "c"), "c");
    assert_eq!(parse_value::<M, _>(&s, "dc"), "[dc]");
    assert_eq!(parse_value::<M, _>(&s, "cdc"), "[(cd)c]");

    // A memoized left-recursive rule commits to its longest derivation, so a
    // continuation that needs a shorter one is not found.
    let greedy = greedy_prefix();
    assert_eq!(parse_failure::<M, _>(&greedy, "axx"), (ParseError::expected("x"), 3));
    assert_eq!(parse_failure::<M, _>(&greedy, "ax"), (ParseError::expected("x"), 2));
}

/// Both parities give the same derivations for grammars whose rules always
/// have a non-recursive alternative to fall back on.
pub fn test_parities<M>()
    where M: MemoTable + Default,
{
    for parity in [Parity::Even, Parity::Odd] {
        let sub = subtraction_with(parity);
        assert_eq!(parse_value::<M, _>(&sub, "1-2-3"), -4);
        assert_eq!(parse_value::<M, _>(&sub, "10-1-2-3"), 4);

        let arith = arithmetic_with(parity);
        assert_eq!(parse_value::<M, _>(&arith, "1+2*3"), 7);
        assert_eq!(parse_value::<M, _>(&arith, "(1+2)*3-4"), 5);
        assert_eq!(parse_value::<M, _>(&arith, "8/2/2"), 2);

        let s = indirect_with(parity);
        assert_eq!(parse_value::<M, _>(&s, "dc"), "[dc]");
        assert_eq!(parse_value::<M, _>(&s, "cdc"), "[(cd)c]");
    }
}

/// How many times the body of a left-recursive memoized parser runs before it
/// is curtailed.
pub fn test_curtailment<M>()
    where M: MemoTable + Default,
{
    // `n - p + 2` at the position `p` of the recursion, for input length `n`.
    let runs = Rc::new(Cell::new(0));
    let s = literal("y").then(counted_self_recursion(Rc::clone(&runs)));
    assert_eq!(parse_value::<M, _>(&s, "yxx"), 2);
    assert_eq!(runs.get(), 3 - 1 + 2);

    runs.set(0);
    let s = counted_self_recursion(Rc::clone(&runs));
    assert_eq!(parse_value::<M, _>(&s, "xxxx"), 4);
    assert_eq!(runs.get(), 4 + 2);

    // A rule that can only recurse fails with curtailment once the bound is
    // reached.
    let runs = Rc::new(Cell::new(0));
    let only = literal("y").then(counted_only_recursion(Rc::clone(&runs), Parity::Even));
    assert_eq!(parse_failure::<M, _>(&only, "yzz"), (ParseError::Curtailment, 1));
    assert_eq!(runs.get(), 3 - 1 + 2);

    // The bound counts tokens, not bytes.
    runs.set(0);
    let s = counted_only_recursion(Rc::clone(&runs), Parity::Even);
    assert_eq!(parse_failure::<M, _>(&s, "éé"), (ParseError::Curtailment, 0));
    assert_eq!(runs.get(), 2 + 2);
    runs.set(0);
    let s = literal("y").then(counted_only_recursion(Rc::clone(&runs), Parity::Odd));
    assert_eq!(parse_failure::<M, _>(&s, "yλ€x"), (ParseError::Curtailment, 1));
    assert_eq!(runs.get(), 4 - 1 + 2);

    // Curtailment is recoverable by a choice.
    let recovered = only.or(literal("y").to(()));
    assert_eq!(parse::<M, _>(&recovered, "y").map(|s| s.pos), Ok(1));
}

/// Repetition and its boundaries.
pub fn test_repetition<M>()
    where M: MemoTable + Default,
{
    let comma = || literal(",");
    let list = identifier().sep_by(comma());
    assert_eq!(parse_value::<M, _>(&list, ""), Vec::<String>::new());
    assert_eq!(parse_value::<M, _>(&list, "a"), ["a"]);
    assert_eq!(parse_value::<M, _>(&list, "a,b,c"), ["a", "b", "c"]);
    assert_eq!(parse_value::<M, _>(&list, "ab,cd,"), ["ab", "cd"]);
    assert_eq!(parse_failure::<M, _>(&list, ",a"), (ParseError::expected("EOF"), 0));

    let plus = identifier().sep_by_plus(comma());
    assert_eq!(parse_value::<M, _>(&plus, "a,b"), ["a", "b"]);
    assert_eq!(parse_failure::<M, _>(&plus, ""), (ParseError::expected("identifier"), 0));

    let xs = literal("x").many();
    assert_eq!(parse_value::<M, _>(&xs, ""), Vec::<String>::new());
    assert_eq!(parse_value::<M, _>(&xs, "xxx").len(), 3);
    assert_eq!(parse_failure::<M, _>(&xs, "xxy"), (ParseError::expected("EOF"), 2));

    let some = literal("x").some();
    assert_eq!(parse_failure::<M, _>(&some, ""), (ParseError::expected("x"), 0));
    assert_eq!(parse_value::<M, _>(&some, "xx").len(), 2);

    // Stops after an item that consumed nothing rather than looping.
    let zero_width = unit::<str, u8>(0).many();
    assert_eq!(parse_value::<M, _>(&zero_width, ""), [0]);

    let words = sequence(vec![identifier(), literal(" ").then(identifier())]);
    assert_eq!(parse_value::<M, _>(&words, "hi there"), ["hi", "there"]);
    let spaced = identifier().trim(literal(" ").many());
    assert_eq!(parse_value::<M, _>(&spaced, "  hi "), "hi");
}

/// Two memo table types must give identical outcomes, including the used sets
/// and failure positions, for every grammar and input.
pub fn test_same_results<M1, M2>()
    where M1: MemoTable + Default,
          M2: MemoTable + Default,
{
    fn compare<M1, M2, T>(parser: &Parser<str, T>, inputs: &[&str])
        where M1: MemoTable + Default,
              M2: MemoTable + Default,
              T: PartialEq + Debug + 'static,
    {
        for input in inputs {
            assert_eq!(parse::<M1, _>(parser, input), parse::<M2, _>(parser, input),
                       "for input {input:?}");
        }
    }

    compare::<M1, M2, _>(&pairs(), &["", "a", "aa", "aaa", "aab"]);
    compare::<M1, M2, _>(&subtraction(), &["1", "1-2-3", "1--2", "-"]);
    compare::<M1, M2, _>(&arithmetic(), &["1+2*3", "(1+2)*3", "1+(2", "2*)"]);
    compare::<M1, M2, _>(&indirect(), &["c", "dc", "cdc", "dcdc", "cd"]);
    compare::<M1, M2, _>(&identifier().sep_by(literal(",")), &["", "a,b", ",", "a,,b"]);
}
