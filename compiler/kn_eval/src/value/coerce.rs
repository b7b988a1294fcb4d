//! Conversions from any value to boolean, number, text, or sequence.
//!
//! Every conversion is total. The lazy variants are reduced with `run`
//! first and the result converted, which is why each conversion needs the
//! interpreter.

use super::{Sequence, Text, Value};
use crate::errors::EvalError;
use crate::interpreter::Interpreter;
use crate::stack::ensure_sufficient_stack;

impl Value {
    /// Truthiness: null, false, zero, and empty text/sequence are false.
    pub fn to_boolean(&self, interp: &mut Interpreter) -> Result<bool, EvalError> {
        Ok(match self {
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0,
            Value::Text(s) => !s.is_empty(),
            Value::Sequence(items) => !items.is_empty(),
            Value::Variable(_) | Value::Function(_) => {
                return self.run(interp)?.to_boolean(interp);
            }
        })
    }

    /// Numeric form. Text yields its leading integer (0 if none); a
    /// sequence yields its length.
    pub fn to_number(&self, interp: &mut Interpreter) -> Result<i64, EvalError> {
        Ok(match self {
            Value::Null => 0,
            Value::Boolean(b) => i64::from(*b),
            Value::Number(n) => *n,
            Value::Text(s) => parse_leading_integer(s),
            Value::Sequence(items) => i64::try_from(items.len()).unwrap_or(i64::MAX),
            Value::Variable(_) | Value::Function(_) => {
                return self.run(interp)?.to_number(interp);
            }
        })
    }

    /// Text form. Sequences join their elements' text forms with newlines.
    pub fn to_text(&self, interp: &mut Interpreter) -> Result<Text, EvalError> {
        match self {
            Value::Null => Ok(interp.strings_mut().fetch("null")),
            Value::Boolean(true) => Ok(interp.strings_mut().fetch("true")),
            Value::Boolean(false) => Ok(interp.strings_mut().fetch("false")),
            Value::Number(n) => Ok(interp.strings_mut().fetch_owned(n.to_string())),
            Value::Text(s) => Ok(s.clone()),
            Value::Sequence(items) => join_text(items, "\n", interp),
            Value::Variable(_) | Value::Function(_) => self.run(interp)?.to_text(interp),
        }
    }

    /// Sequence form.
    ///
    /// - null: empty
    /// - boolean: a single-element sequence holding it
    /// - number: its decimal digits, each negated for a negative number
    /// - text: one single-character text per character
    pub fn to_sequence(&self, interp: &mut Interpreter) -> Result<Sequence, EvalError> {
        match self {
            Value::Null => Ok(Sequence::default()),
            Value::Boolean(_) => Ok(Sequence::from(vec![self.clone()])),
            Value::Number(n) => Ok(Sequence::from(decimal_digits(*n))),
            Value::Text(s) => {
                let strings = interp.strings_mut();
                let chars: Vec<Value> = s
                    .chars()
                    .map(|c| Value::Text(strings.fetch(c.encode_utf8(&mut [0; 4]))))
                    .collect();
                Ok(Sequence::from(chars))
            }
            Value::Sequence(items) => Ok(items.clone()),
            Value::Variable(_) | Value::Function(_) => self.run(interp)?.to_sequence(interp),
        }
    }
}

/// Join the text forms of `items` with `separator`.
///
/// Shared by sequence-to-text conversion and the sequence form of `^`.
/// Nested sequences recurse, so each element goes through the stack guard.
pub(crate) fn join_text(
    items: &[Value],
    separator: &str,
    interp: &mut Interpreter,
) -> Result<Text, EvalError> {
    let mut joined = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            joined.push_str(separator);
        }
        joined.push_str(&ensure_sufficient_stack(|| item.to_text(interp))?);
    }
    Ok(interp.strings_mut().fetch_owned(joined))
}

/// Leading-integer parse in the manner of `strtoll`: skip leading
/// whitespace, accept one sign, then digits until the first non-digit.
fn parse_leading_integer(s: &str) -> i64 {
    let trimmed = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0'))
        });
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

fn decimal_digits(n: i64) -> Vec<Value> {
    let sign = if n < 0 { -1 } else { 1 };
    n.unsigned_abs()
        .to_string()
        .bytes()
        .map(|d| Value::Number(sign * i64::from(d - b'0')))
        .collect()
}
