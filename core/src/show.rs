//! Rendering failures for humans.

use alloc::{format, string::{String, ToString}};
use core::fmt::Display;

use crate::{
    input::{tokens, Input},
    outcome::Failure,
};


/// How many tokens on each side of a failure position
/// [`show_error`](fn.show_error.html) shows, unless told otherwise.
pub const DEFAULT_CONTEXT: usize = 30;

/// Render `failure` of a parse of `input` as a message followed by the source
/// around the failure position, `context` tokens on each side of it.
///
/// The window is centered on the failure position, so it shows up to
/// `2 * context` tokens, and not only `context` tokens starting `context`
/// before it.
///
/// The message is the error's `Display` form, so an
/// [`Expected`](enum.ParseError.html#variant.Expected) error lists each
/// expectation once, like `Expected x, y, or z`.
pub fn show_error<I>(failure: &Failure, input: &I, context: usize) -> String
    where I: Input + ?Sized,
          I::Token: Display,
{
    let pos = failure.pos.min(input.end());
    let mut start = pos;
    for _ in 0 .. context {
        match input.prev_pos(start) {
            Some(prev) => start = prev,
            None => break,
        }
    }
    let mut end = pos;
    for _ in 0 .. context {
        match input.next_token(end) {
            Some((_, next)) => end = next,
            None => break,
        }
    }
    let source: String = tokens(input, start, end).iter().map(ToString::to_string).collect();
    format!("Error: {} in below source code ({}): \n{}\n\n", failure.error, failure.pos, source)
}
