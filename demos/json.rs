//! Parse JSON given as the command-line argument, or else read from standard
//! input, and print the value, or the failure rendered with the source around
//! it.
//!
//! Run with `RUST_LOG=trace` to see the memo table at work.

use std::{collections::BTreeMap, env, error::Error, io::{self, Read}};

use curtail::{terminal::*, *};


#[derive(Clone, PartialEq, Debug)]
enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
    Object(BTreeMap<String, Json>),
}

fn ws() -> Result<Parser<str, ()>, regex::Error> {
    Ok(pattern(r"\s*", "whitespace")?.to(()))
}

fn symbol(sym: &str) -> Result<Parser<str, String>, regex::Error> {
    Ok(literal(sym).skip(ws()?))
}

fn string() -> Result<Parser<str, String>, regex::Error> {
    let quoted = pattern(r#""((?:[^"\\]|\\.)*)""#, "string")?;
    Ok(quoted.map(|m| unescape(m.group(1).unwrap_or_default())).skip(ws()?))
}

fn unescape(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

fn number() -> Result<Parser<str, Json>, regex::Error> {
    let digits = pattern(r"-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?", "number")?;
    Ok(digits
        .bind(|m| match m.full().parse() {
            Ok(n) => unit(Json::Number(n)),
            Err(e) => fail(ParseError::message(format!("bad number: {e}"))),
        })
        .skip(ws()?))
}

fn json() -> Result<Parser<str, Json>, regex::Error> {
    let value = Declared::new();

    let array = symbol("[")?
        .then(value.parser().sep_by(symbol(",")?).skip(symbol("]")?).commit())
        .map(Json::Array);
    let member = string()?.skip(symbol(":")?).seq(value.parser());
    let object = symbol("{")?
        .then(member.sep_by(symbol(",")?).skip(symbol("}")?).commit())
        .map(|members| Json::Object(members.into_iter().collect()));

    let rule = symbol("null")?.to(Json::Null)
               | symbol("true")?.to(Json::Bool(true))
               | symbol("false")?.to(Json::Bool(false))
               | number()?
               | string()?.map(Json::String)
               | array
               | object;
    Ok(value.define(rule.label("JSON value").memoize()))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let input = match env::args().nth(1) {
        Some(arg) => arg,
        None => {
            let mut buf = String::new();
            let _ = io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let parser = ws()?.then(json()?);
    match run_parser(&parser, input.as_str(), true) {
        Ok(success) => {
            println!("{:#?}", success.value);
            Ok(())
        }
        Err(failure) => {
            eprint!("{}", show_error(&failure, input.as_str(), DEFAULT_CONTEXT));
            Err(failure.into())
        }
    }
}
