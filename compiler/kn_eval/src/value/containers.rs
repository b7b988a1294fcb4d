//! Container operations on text and sequences: `[`, `]`, `GET`, `SET`,
//! and `ASCII`.
//!
//! Text offsets count characters, not bytes. `GET` and `SET` validate their
//! range up front, so an out-of-range slice is an `InvalidArgument` error.

use std::ops::Range;

use super::{Text, Value};
use crate::errors::{
    empty_container, invalid_argument, slice_out_of_range, wrong_type, EvalError, EvalResult,
};
use crate::interpreter::Interpreter;

impl Value {
    /// First character of a text, or first element of a sequence.
    pub fn head(&self, interp: &mut Interpreter) -> EvalResult {
        match self {
            Value::Text(s) => match s.chars().next() {
                Some(c) => {
                    let head = interp.strings_mut().fetch(c.encode_utf8(&mut [0; 4]));
                    Ok(Value::Text(head))
                }
                None => Err(empty_container('[')),
            },
            Value::Sequence(items) => items.first().cloned().ok_or_else(|| empty_container('[')),
            _ => Err(wrong_type('[', self)),
        }
    }

    /// Everything after the first character or element.
    pub fn tail(&self, interp: &mut Interpreter) -> EvalResult {
        match self {
            Value::Text(s) => {
                let mut chars = s.chars();
                if chars.next().is_none() {
                    return Err(empty_container(']'));
                }
                Ok(Value::Text(interp.strings_mut().fetch(chars.as_str())))
            }
            Value::Sequence(items) => match items.split_first() {
                Some((_, rest)) => Ok(Value::sequence(rest)),
                None => Err(empty_container(']')),
            },
            _ => Err(wrong_type(']', self)),
        }
    }

    /// The `length` items starting at `start`.
    pub fn get(&self, start: i64, length: i64, interp: &mut Interpreter) -> EvalResult {
        match self {
            Value::Text(s) => {
                let range = char_range(s, start, length)?;
                Ok(Value::Text(interp.strings_mut().fetch(&s[range])))
            }
            Value::Sequence(items) => {
                let range = index_range(items.len(), start, length)?;
                Ok(Value::sequence(&items[range]))
            }
            _ => Err(wrong_type("GET", self)),
        }
    }

    /// A copy with the `length` items at `start` replaced by `replacement`,
    /// coerced to this container's family.
    pub fn set(
        &self,
        start: i64,
        length: i64,
        replacement: &Value,
        interp: &mut Interpreter,
    ) -> EvalResult {
        match self {
            Value::Text(s) => {
                let range = char_range(s, start, length)?;
                let replacement = replacement.to_text(interp)?;
                let mut spliced = String::with_capacity(s.len() - range.len() + replacement.len());
                spliced.push_str(&s[..range.start]);
                spliced.push_str(&replacement);
                spliced.push_str(&s[range.end..]);
                Ok(Value::Text(interp.strings_mut().fetch_owned(spliced)))
            }
            Value::Sequence(items) => {
                let range = index_range(items.len(), start, length)?;
                let replacement = replacement.to_sequence(interp)?;
                let mut spliced =
                    Vec::with_capacity(items.len() - range.len() + replacement.len());
                spliced.extend_from_slice(&items[..range.start]);
                spliced.extend_from_slice(&replacement);
                spliced.extend_from_slice(&items[range.end..]);
                Ok(Value::sequence(spliced))
            }
            _ => Err(wrong_type("SET", self)),
        }
    }

    /// Number to one-character text, or text to the code point of its first
    /// character.
    pub fn ascii(&self, interp: &mut Interpreter) -> EvalResult {
        match self {
            Value::Number(n) => {
                let c = u32::try_from(*n)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| invalid_argument(format!("{n} is not a valid code point")))?;
                Ok(Value::Text(interp.strings_mut().fetch(c.encode_utf8(&mut [0; 4]))))
            }
            Value::Text(s) => match s.chars().next() {
                Some(c) => Ok(Value::Number(i64::from(u32::from(c)))),
                None => Err(empty_container("ASCII")),
            },
            _ => Err(wrong_type("ASCII", self)),
        }
    }
}

/// `start..start + length` if it lies within `0..len`.
fn index_range(len: usize, start: i64, length: i64) -> Result<Range<usize>, EvalError> {
    let bounds = usize::try_from(start)
        .ok()
        .zip(usize::try_from(length).ok())
        .and_then(|(s, l)| Some(s..s.checked_add(l)?))
        .filter(|range| range.end <= len);
    bounds.ok_or_else(|| slice_out_of_range(start, length, len))
}

/// Byte range of the characters `start..start + length` of `s`.
fn char_range(s: &Text, start: i64, length: i64) -> Result<Range<usize>, EvalError> {
    if s.is_ascii() {
        return index_range(s.len(), start, length);
    }
    let count = s.chars().count();
    let chars = index_range(count, start, length)?;
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    Ok(byte_at(chars.start)..byte_at(chars.end))
}
