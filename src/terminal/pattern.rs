use log::debug;
use regex::Regex;

use crate::{Failure, ParseError, Parser, Success};


/// What a [`pattern`](fn.pattern.html) matched: the whole match and the
/// capture groups.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PatternMatch {
    groups: Vec<Option<String>>,
}

impl PatternMatch {
    /// The text of the whole match.
    #[inline]
    pub fn full(&self) -> &str {
        self.group(0).unwrap_or_default()
    }

    /// The text of capture group `index`, where 0 is the whole match, or `None`
    /// if that group did not participate in the match or does not exist.
    #[inline]
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index)?.as_deref()
    }

    /// The number of groups, including the whole match.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Always false, since there is always the whole match.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The text of the whole match, owned.
    pub fn into_full(mut self) -> String {
        self.groups.swap_remove(0).unwrap_or_default()
    }
}


/// Match the regular expression `pattern` at the current position of `str`
/// input, yielding the [`PatternMatch`](struct.PatternMatch.html).  Fails
/// expecting `name`.
///
/// The pattern is anchored at the current position, so it never skips input.
/// It can only see the input from the current position on, so assertions like
/// `\b` treat that as the start.
///
/// # Errors
///
/// If `pattern` is not valid `regex` syntax.
pub fn pattern(pattern: &str, name: impl Into<String>)
               -> Result<Parser<str, PatternMatch>, regex::Error>
{
    let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
    let name = name.into();
    debug!("compiled pattern for {name:?}: {}", regex.as_str());
    Ok(Parser::<str, _>::new(move |state, pos, _| {
        let rest = state.input().get(pos ..).unwrap_or_default();
        match regex.captures(rest) {
            Some(caps) => {
                let len = caps.get(0).map_or(0, |m| m.end());
                let groups = caps.iter().map(|g| g.map(|m| m.as_str().to_owned())).collect();
                Ok(Success::new(PatternMatch { groups }, pos + len))
            }
            None => Err(Failure::new(ParseError::expected(name.clone()), pos)),
        }
    }))
}
