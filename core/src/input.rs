//! The abstraction over what is parsed.

use alloc::{borrow::ToOwned, vec::Vec};


/// An indexable, finite, immutable sequence of tokens that parsers consume.
///
/// Positions are `usize` offsets in `0 ..= end()`.  What a position counts
/// depends on the implementation: for `str` it is a byte offset that is always
/// on a `char` boundary, for `[T]` it is an index.  Parsers only ever produce
/// positions that they got from [`next_token`](#tymethod.next_token), from
/// [`end`](#tymethod.end), or by adding the length of a matched prefix, so
/// positions stay valid.
///
/// Owned slices, as yielded by [`literal`](terminal/fn.literal.html) and
/// [`all`](terminal/fn.all.html), come from the `ToOwned` supertrait.
pub trait Input: ToOwned {
    /// The unit consumed by single-token terminals.
    type Token: Clone;

    /// The position just after the last token.
    fn end(&self) -> usize;

    /// The token at `pos` and the position just after it, or `None` at or past
    /// the end.
    fn next_token(&self, pos: usize) -> Option<(Self::Token, usize)>;

    /// The position of the start of the token that ends at `pos`, or `None` at
    /// the start.
    fn prev_pos(&self, pos: usize) -> Option<usize>;

    /// The sub-sequence from `from` to `to`.  Positions past the end are
    /// clamped to it.
    fn slice(&self, from: usize, to: usize) -> &Self;

    /// Whether the sub-sequence starting at `pos` starts with `prefix`.
    fn starts_with_at(&self, pos: usize, prefix: &Self) -> bool;

    /// How many tokens remain after `pos`.  This bounds left recursion, so it
    /// must count tokens even when positions do not.
    #[inline]
    fn remaining(&self, pos: usize) -> usize {
        self.end().saturating_sub(pos)
    }
}


impl Input for str {
    type Token = char;

    #[inline]
    fn end(&self) -> usize {
        self.len()
    }

    fn next_token(&self, pos: usize) -> Option<(char, usize)> {
        let c = self.get(pos ..)?.chars().next()?;
        Some((c, pos + c.len_utf8()))
    }

    fn prev_pos(&self, pos: usize) -> Option<usize> {
        let c = self.get(.. pos)?.chars().next_back()?;
        Some(pos - c.len_utf8())
    }

    fn slice(&self, from: usize, to: usize) -> &str {
        let to = to.min(self.len());
        self.get(from.min(to) .. to).unwrap_or("")
    }

    fn starts_with_at(&self, pos: usize, prefix: &str) -> bool {
        self.get(pos ..).is_some_and(|rest| rest.starts_with(prefix))
    }

    fn remaining(&self, pos: usize) -> usize {
        self.get(pos ..).map_or(0, |rest| rest.chars().count())
    }
}


impl<T> Input for [T]
    where T: Clone + PartialEq,
{
    type Token = T;

    #[inline]
    fn end(&self) -> usize {
        self.len()
    }

    fn next_token(&self, pos: usize) -> Option<(T, usize)> {
        self.get(pos).map(|t| (t.clone(), pos + 1))
    }

    fn prev_pos(&self, pos: usize) -> Option<usize> {
        if pos == 0 || pos > self.len() { None } else { Some(pos - 1) }
    }

    fn slice(&self, from: usize, to: usize) -> &[T] {
        let to = to.min(self.len());
        &self[from.min(to) .. to]
    }

    fn starts_with_at(&self, pos: usize, prefix: &[T]) -> bool {
        self.get(pos ..).is_some_and(|rest| rest.starts_with(prefix))
    }
}


/// Collect the tokens of `input` from `from` to `to`.  Used when rendering
/// diagnostics.
pub(crate) fn tokens<I>(input: &I, from: usize, to: usize) -> Vec<I::Token>
    where I: Input + ?Sized,
{
    let mut tokens = Vec::new();
    let mut pos = from;
    while pos < to {
        match input.next_token(pos) {
            Some((token, next)) => {
                tokens.push(token);
                pos = next;
            }
            None => break,
        }
    }
    tokens
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn str_positions() {
        let s = "aλb";
        assert_eq!(s.end(), 4);
        assert_eq!(s.next_token(0), Some(('a', 1)));
        assert_eq!(s.next_token(1), Some(('λ', 3)));
        assert_eq!(s.next_token(4), None);
        assert_eq!(s.prev_pos(3), Some(1));
        assert_eq!(s.prev_pos(0), None);
        assert_eq!(s.slice(1, 3), "λ");
        assert_eq!(s.slice(3, 99), "b");
        assert!(s.starts_with_at(1, "λb"));
        assert!(!s.starts_with_at(2, "b"));
        assert_eq!(s.remaining(3), 1);
    }

    #[test]
    fn remaining_counts_chars() {
        let s = "aλéb";
        assert_eq!(s.end(), 6);
        assert_eq!(s.remaining(0), 4);
        assert_eq!(s.remaining(1), 3);
        assert_eq!(s.remaining(6), 0);
        assert_eq!(s.remaining(9), 0);
        let v: &[u8] = &[1, 2, 3];
        assert_eq!(v.remaining(1), 2);
    }

    #[test]
    fn slice_positions() {
        let v = [1, 2, 3];
        let s: &[i32] = &v;
        assert_eq!(s.end(), 3);
        assert_eq!(s.next_token(2), Some((3, 3)));
        assert_eq!(s.next_token(3), None);
        assert_eq!(s.prev_pos(3), Some(2));
        assert_eq!(s.slice(1, 3), &[2, 3]);
        assert!(s.starts_with_at(1, &[2, 3]));
        assert!(!s.starts_with_at(4, &[]));
    }

    #[test]
    fn collecting_tokens() {
        assert_eq!(tokens("abcd", 1, 3), ['b', 'c']);
        assert_eq!(tokens("ab", 1, 9), ['b']);
    }
}
