//! Binary operator implementations.
//!
//! Every operator dispatches on the *left* operand's variant and coerces the
//! right operand into the same family. Combinations the language does not
//! define are `WrongType` errors, never silent widenings.
//!
//! Both operands arrive already reduced; the builtins that call
//! [`evaluate_binary`] run their arguments first.

use std::cmp::Ordering;

use crate::errors::{
    division_by_zero, invalid_argument, modulo_by_zero, negative_repetition, wrong_type,
    EvalError, EvalResult,
};
use crate::interpreter::Interpreter;
use crate::stack::ensure_sufficient_stack;
use crate::value::{join_text, Value};

/// Binary operator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    Eq,
    Lt,
    Gt,
}

impl BinaryOp {
    /// Name of the builtin implementing this operator.
    pub fn as_symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Mod => '%',
            BinaryOp::Pow => '^',
            BinaryOp::Eq => '?',
            BinaryOp::Lt => '<',
            BinaryOp::Gt => '>',
        }
    }
}

/// Evaluate a binary operation on two reduced operands.
pub fn evaluate_binary(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    interp: &mut Interpreter,
) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Boolean(left == right)),
        BinaryOp::Lt => Ok(Value::Boolean(compare(left, right, op, interp)?.is_lt())),
        BinaryOp::Gt => Ok(Value::Boolean(compare(left, right, op, interp)?.is_gt())),
        BinaryOp::Add => add(left, right, interp),
        BinaryOp::Mul => multiply(left, right, interp),
        BinaryOp::Pow => power(left, right, interp),
        BinaryOp::Sub | BinaryOp::Div | BinaryOp::Mod => {
            let Value::Number(a) = left else {
                return Err(wrong_type(op.as_symbol(), left));
            };
            eval_int_binary(*a, right.to_number(interp)?, op)
        }
    }
}

// Type-Specific Evaluation Functions

/// Arithmetic on numbers. Overflow wraps.
fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let n = match op {
        BinaryOp::Add => a.wrapping_add(b),
        BinaryOp::Sub => a.wrapping_sub(b),
        BinaryOp::Mul => a.wrapping_mul(b),
        BinaryOp::Div if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div => a.wrapping_div(b),
        BinaryOp::Mod if b == 0 => return Err(modulo_by_zero()),
        BinaryOp::Mod => a.wrapping_rem(b),
        BinaryOp::Pow => integer_power(a, b),
        BinaryOp::Eq | BinaryOp::Lt | BinaryOp::Gt => {
            return Err(wrong_type(op.as_symbol(), &Value::Number(a)))
        }
    };
    Ok(Value::Number(n))
}

fn add(left: &Value, right: &Value, interp: &mut Interpreter) -> EvalResult {
    match left {
        Value::Number(a) => eval_int_binary(*a, right.to_number(interp)?, BinaryOp::Add),
        Value::Text(a) => {
            let b = right.to_text(interp)?;
            if b.is_empty() {
                return Ok(left.clone());
            }
            let mut joined = String::with_capacity(a.len() + b.len());
            joined.push_str(a);
            joined.push_str(&b);
            Ok(Value::Text(interp.strings_mut().fetch_owned(joined)))
        }
        Value::Sequence(a) => {
            let b = right.to_sequence(interp)?;
            if b.is_empty() {
                return Ok(left.clone());
            }
            let mut items = Vec::with_capacity(a.len() + b.len());
            items.extend_from_slice(a);
            items.extend_from_slice(&b);
            Ok(Value::sequence(items))
        }
        _ => Err(wrong_type('+', left)),
    }
}

fn multiply(left: &Value, right: &Value, interp: &mut Interpreter) -> EvalResult {
    match left {
        Value::Number(a) => eval_int_binary(*a, right.to_number(interp)?, BinaryOp::Mul),
        Value::Text(a) => {
            let count = repeat_count(right, interp)?;
            let total = checked_repeat(a.len(), count, 1)?;
            let mut text = String::new();
            text.try_reserve_exact(total)
                .map_err(|_| repetition_too_large())?;
            if !a.is_empty() {
                for _ in 0..count {
                    text.push_str(a);
                }
            }
            Ok(Value::Text(interp.strings_mut().fetch_owned(text)))
        }
        Value::Sequence(a) => {
            let count = repeat_count(right, interp)?;
            let total = checked_repeat(a.len(), count, std::mem::size_of::<Value>())?;
            let mut items = Vec::new();
            items
                .try_reserve_exact(total)
                .map_err(|_| repetition_too_large())?;
            items.extend(a.iter().cycle().take(total).cloned());
            Ok(Value::sequence(items))
        }
        _ => Err(wrong_type('*', left)),
    }
}

/// Right operand of a repetition, rejected if negative.
fn repeat_count(right: &Value, interp: &mut Interpreter) -> Result<usize, EvalError> {
    let count = right.to_number(interp)?;
    usize::try_from(count).map_err(|_| negative_repetition(count))
}

/// Total element count of a repetition. Its size in bytes, at
/// `element_size` bytes per element, must fit in `isize`.
fn checked_repeat(len: usize, count: usize, element_size: usize) -> Result<usize, EvalError> {
    len.checked_mul(count)
        .filter(|total| {
            total
                .checked_mul(element_size)
                .is_some_and(|bytes| isize::try_from(bytes).is_ok())
        })
        .ok_or_else(repetition_too_large)
}

#[cold]
fn repetition_too_large() -> EvalError {
    invalid_argument("repetition is too large")
}

fn power(left: &Value, right: &Value, interp: &mut Interpreter) -> EvalResult {
    match left {
        Value::Number(a) => eval_int_binary(*a, right.to_number(interp)?, BinaryOp::Pow),
        Value::Sequence(items) => {
            let separator = right.to_text(interp)?;
            Ok(Value::Text(join_text(items, &separator, interp)?))
        }
        _ => Err(wrong_type('^', left)),
    }
}

/// Integer exponentiation without floating point.
///
/// Bases `1` and `-1` and exponents `0` and `1` are answered directly; any
/// other negative exponent truncates to `0`. The general case squares and
/// multiplies, wrapping on overflow.
pub(crate) fn integer_power(base: i64, exp: i64) -> i64 {
    if base == 1 {
        return 1;
    }
    if base == -1 {
        return if exp & 1 == 0 { 1 } else { -1 };
    }
    if exp == 1 {
        return base;
    }
    if exp == 0 {
        return 1;
    }
    if exp < 0 || base == 0 {
        return 0;
    }

    let mut result: i64 = 1;
    let mut base = base;
    let mut exp = exp;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exp >>= 1;
    }
    result
}

/// Order `left` against `right` coerced to `left`'s family.
///
/// - number: numeric
/// - text: bytewise lexicographic
/// - boolean: false before true
/// - sequence: element by element, then by length
fn compare(
    left: &Value,
    right: &Value,
    op: BinaryOp,
    interp: &mut Interpreter,
) -> Result<Ordering, EvalError> {
    match left {
        Value::Number(a) => Ok(a.cmp(&right.to_number(interp)?)),
        Value::Text(a) => Ok(a.as_bytes().cmp(right.to_text(interp)?.as_bytes())),
        Value::Boolean(a) => Ok(a.cmp(&right.to_boolean(interp)?)),
        Value::Sequence(a) => {
            let b = right.to_sequence(interp)?;
            for (x, y) in a.iter().zip(b.iter()) {
                let ordering = ensure_sufficient_stack(|| compare(x, y, op, interp))?;
                if ordering.is_ne() {
                    return Ok(ordering);
                }
            }
            Ok(a.len().cmp(&b.len()))
        }
        _ => Err(wrong_type(op.as_symbol(), left)),
    }
}
