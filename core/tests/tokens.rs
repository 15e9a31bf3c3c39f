//! Parsing slices of tokens from a separate lexer, rather than text.

use curtail_core::{terminal::*, *};


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Token {
    Num(i64),
    Minus,
    Times,
}

fn num() -> Parser<[Token], i64> {
    token(|t: &Token| matches!(t, Token::Num(_)), "number")
        .map(|t| if let Token::Num(n) = t { n } else { 0 })
}

fn op(which: Token, name: &str) -> Parser<[Token], Vec<Token>> {
    literal_named(&[which][..], name)
}

/// `expr = expr "-" term | term`, `term = term "*" num | num`
fn expr() -> Parser<[Token], i64> {
    let expr = Declared::new();
    let term = Declared::new();
    let term_rule = term.parser().skip(op(Token::Times, "*")).seq(num()).map(|(a, b)| a * b)
                    | num();
    let _ = term.define(term_rule.memoize());
    let expr_rule = expr.parser().skip(op(Token::Minus, "-")).seq(term.parser()).map(|(a, b)| a - b)
                    | term.parser();
    expr.define(expr_rule.memoize())
}

#[test]
fn left_recursive_over_tokens() {
    use Token::*;
    let p = expr();
    let input = [Num(10), Minus, Num(2), Times, Num(3), Minus, Num(1)];
    assert_eq!(run_parser(&p, &input[..], true).map(|s| (s.value, s.pos)), Ok((3, 7)));

    let fail = run_parser(&p, &[Num(1), Minus, Minus][..], true).unwrap_err();
    assert_eq!((fail.error, fail.pos), (ParseError::expected("EOF"), 1));

    let fail = run_parser(&p, &[Times][..], true).unwrap_err();
    assert_eq!((fail.error, fail.pos), (ParseError::expected("number"), 0));
}

#[test]
fn driver_over_tokens() {
    use Token::*;
    let mut driver = Driver::new(state::premade::BTreeMemoTable::new());
    driver.consume_all = false;
    let p = num().many();
    assert_eq!(driver.run(&p, &[Num(1), Num(2), Minus][..]).map(|s| (s.value, s.pos)),
               Ok((vec![1, 2], 2)));
    let found = find_token(|t: &Token| *t == Minus, "-");
    assert_eq!(driver.run(&found, &[Num(1), Num(2), Minus][..]).map(|s| s.pos), Ok(3));
}
