//! Runtime values for the Knight interpreter.
//!
//! `Value` is a closed sum type. Literals (`Null`, `Boolean`, `Number`,
//! `Text`, `Sequence`) are already fully reduced; `Variable` and `Function`
//! are the two lazy forms that [`Value::run`] reduces.
//!
//! Heap payloads go through [`Shared`], so cloning a value is a reference
//! count bump and equality is always by content.

mod coerce;
mod containers;
mod shared;


use std::fmt;

pub use shared::{Payload, Sequence, Shared, Text};

pub(crate) use coerce::join_text;

use crate::environment::{Environment, VarId};
use crate::errors::{unassigned_variable, EvalResult};
use crate::function::Thunk;
use crate::interpreter::Interpreter;
use crate::stack::ensure_sufficient_stack;

/// Runtime value in the Knight interpreter.
#[derive(Clone)]
pub enum Value {
    /// `N` / `NULL`.
    Null,
    /// `T` / `F`.
    Boolean(bool),
    /// Signed 64-bit integer. Arithmetic wraps.
    Number(i64),
    /// Immutable text.
    Text(Text),
    /// Immutable ordered list of values; elements may be any variant.
    Sequence(Sequence),
    /// Reference to a variable cell in the interpreter's [`Environment`].
    Variable(VarId),
    /// Builtin applied to unevaluated arguments.
    Function(Thunk),
}

// Factory Methods

impl Value {
    /// Create a text value without going through the string cache.
    #[inline]
    pub fn text(s: impl Into<Text>) -> Self {
        Value::Text(s.into())
    }

    /// Create a sequence value.
    #[inline]
    pub fn sequence(items: impl Into<Sequence>) -> Self {
        Value::Sequence(items.into())
    }

    /// The `@` literal.
    #[inline]
    pub fn empty_sequence() -> Self {
        Value::Sequence(Sequence::default())
    }
}

// Value Methods

impl Value {
    /// Name of this value's variant, as used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Sequence(_) => "sequence",
            Value::Variable(_) => "variable",
            Value::Function(_) => "function",
        }
    }

    /// Whether `run` returns this value unchanged.
    #[inline]
    pub fn is_reduced(&self) -> bool {
        !matches!(self, Value::Variable(_) | Value::Function(_))
    }

    /// The referenced cell, if this is an (unevaluated) variable reference.
    #[inline]
    pub fn as_variable(&self) -> Option<VarId> {
        match self {
            Value::Variable(id) => Some(*id),
            _ => None,
        }
    }

    /// Reduce this node by one step.
    ///
    /// Literals return themselves (sequences are not deep-reduced). A variable
    /// yields its current value; a function invokes its builtin on the
    /// captured arguments. Running a function again repeats its side effects.
    pub fn run(&self, interp: &mut Interpreter) -> EvalResult {
        match self {
            Value::Variable(id) => {
                let env = interp.env();
                env.value(*id)
                    .cloned()
                    .ok_or_else(|| unassigned_variable(env.name(*id)))
            }
            Value::Function(thunk) => thunk.call(interp),
            _ => Ok(self.clone()),
        }
    }

    /// Render this value in the `DUMP` debug format.
    ///
    /// Variable names live in the environment, so it must be supplied.
    pub fn display<'a>(&'a self, env: &'a Environment) -> ValueDisplay<'a> {
        ValueDisplay { value: self, env }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => ensure_sufficient_stack(|| a == b),
            // Cells and thunks are equal by identity
            (Value::Variable(a), Value::Variable(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({:?})", &**s),
            Value::Sequence(items) => {
                ensure_sufficient_stack(|| write!(f, "Sequence({:?})", &**items))
            }
            Value::Variable(id) => write!(f, "Variable({id:?})"),
            Value::Function(thunk) => ensure_sufficient_stack(|| write!(f, "{thunk:?}")),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

// Teardown

/// Move every nested sequence and thunk out of `items` into `out`, leaving
/// `Null` in its place. Leaves are left where they are.
pub(crate) fn take_nested(items: &mut [Value], out: &mut Vec<Value>) {
    for item in items {
        if matches!(item, Value::Sequence(_) | Value::Function(_)) {
            out.push(std::mem::replace(item, Value::Null));
        }
    }
}

/// Drop `pending` and everything it uniquely owns, one level at a time.
///
/// Each value is emptied of its nested children before it is dropped, so
/// its own drop is shallow no matter how deep the tree is.
pub(crate) fn release(mut pending: Vec<Value>) {
    while let Some(mut value) = pending.pop() {
        match &mut value {
            Value::Sequence(items) => {
                if let Some(items) = items.get_mut() {
                    take_nested(items, &mut pending);
                }
            }
            Value::Function(thunk) => thunk.take_nested_args(&mut pending),
            _ => {}
        }
    }
}

/// `DUMP` rendering of a value, resolving variable names through an
/// [`Environment`].
pub struct ValueDisplay<'a> {
    value: &'a Value,
    env: &'a Environment,
}

impl fmt::Display for ValueDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Value::Null => write!(f, "Null()"),
            Value::Boolean(b) => write!(f, "Boolean({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "String({})", &**s),
            Value::Sequence(items) => {
                write!(f, "List(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    ensure_sufficient_stack(|| write!(f, "{}", item.display(self.env)))?;
                }
                write!(f, ")")
            }
            Value::Variable(id) => write!(f, "Variable({})", self.env.name(*id)),
            Value::Function(thunk) => {
                write!(f, "Function({}", thunk.name())?;
                for arg in thunk.args() {
                    ensure_sufficient_stack(|| write!(f, ", {}", arg.display(self.env)))?;
                }
                write!(f, ")")
            }
        }
    }
}
