//! Builtin registry and function thunks.
//!
//! A [`FunctionRegistry`] maps a one-character name to a [`Builtin`]: its
//! arity and the native operation implementing it. The parser consults the
//! registry to decide how many argument sub-trees to read, and packages
//! them, unevaluated, into a [`Thunk`]. Running the thunk hands those
//! sub-trees to the native operation, which runs each as often as its
//! semantics require.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::builtins;
use crate::diagnostics::CallFrame;
use crate::errors::{invalid_argument, EvalError, EvalResult};
use crate::interpreter::Interpreter;
use crate::stack::ensure_sufficient_stack;
use crate::value::{release, take_nested, Value};

/// Native operation behind a builtin. Receives its arguments unevaluated.
pub type NativeFn = fn(&mut Interpreter, &[Value]) -> EvalResult;

/// Most arguments any builtin may take.
pub const MAX_ARITY: usize = 4;

/// A registered builtin.
///
/// Only the registry builds these, and only the parser pairs one with
/// arguments, so a native operation always sees exactly `arity` of them.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub(crate) name: char,
    pub(crate) arity: usize,
    pub(crate) op: NativeFn,
}

impl Builtin {
    #[inline]
    pub fn name(&self) -> char {
        self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({}/{})", self.name, self.arity)
    }
}

/// One-character name to builtin.
///
/// Populated before parsing; registering a name twice replaces the earlier
/// entry.
#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    entries: FxHashMap<char, Builtin>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every standard builtin.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::register_all(&mut registry);
        registry
    }

    /// Register `op` under `name`, returning the entry it replaced.
    ///
    /// `op` is handed exactly `arity` arguments, which may be at most
    /// [`MAX_ARITY`].
    pub fn register(
        &mut self,
        name: char,
        arity: usize,
        op: NativeFn,
    ) -> Result<Option<Builtin>, EvalError> {
        if arity > MAX_ARITY {
            return Err(invalid_argument(format!(
                "builtin `{name}` takes {arity} arguments, at most {MAX_ARITY} are supported"
            )));
        }
        Ok(self.insert(name, arity, op))
    }

    pub(crate) fn insert(&mut self, name: char, arity: usize, op: NativeFn) -> Option<Builtin> {
        self.entries.insert(name, Builtin { name, arity, op })
    }

    #[inline]
    pub fn get(&self, name: char) -> Option<Builtin> {
        self.entries.get(&name).copied()
    }

    #[inline]
    pub fn contains(&self, name: char) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Captured argument sub-trees.
pub type ThunkArgs = SmallVec<[Value; MAX_ARITY]>;

struct ThunkData {
    builtin: Builtin,
    args: ThunkArgs,
}

impl Drop for ThunkData {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_nested(&mut self.args, &mut pending);
        release(pending);
    }
}

/// A builtin applied to unevaluated arguments.
///
/// Cloning shares the node; equality is identity, since two thunks are
/// only interchangeable if they are the same parsed node.
#[derive(Clone)]
pub struct Thunk(Rc<ThunkData>);

impl Thunk {
    pub(crate) fn new(builtin: Builtin, args: ThunkArgs) -> Self {
        debug_assert_eq!(builtin.arity, args.len(), "arity mismatch for {}", builtin.name);
        Thunk(Rc::new(ThunkData { builtin, args }))
    }

    #[inline]
    pub fn name(&self) -> char {
        self.0.builtin.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.0.builtin.arity
    }

    #[inline]
    pub fn args(&self) -> &[Value] {
        &self.0.args
    }

    #[inline]
    pub fn builtin(&self) -> Builtin {
        self.0.builtin
    }

    /// Move nested arguments into `out` if no other handle shares this node.
    pub(crate) fn take_nested_args(&mut self, out: &mut Vec<Value>) {
        if let Some(data) = Rc::get_mut(&mut self.0) {
            take_nested(&mut data.args, out);
        }
    }

    /// Invoke the builtin on the captured arguments.
    ///
    /// Pushes a call frame for the duration of the call. An error escaping
    /// the builtin gets the call chain attached as its backtrace.
    pub fn call(&self, interp: &mut Interpreter) -> EvalResult {
        let Builtin { name, arity, op } = self.0.builtin;
        tracing::trace!(%name, arity, depth = interp.call_stack.depth(), "call");

        interp.call_stack.push(CallFrame { name })?;
        let result = ensure_sufficient_stack(|| op(interp, &self.0.args));
        let result = result.map_err(|err| interp.call_stack.annotate(err));
        interp.call_stack.pop();
        result
    }
}

impl PartialEq for Thunk {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Thunk {}

impl fmt::Debug for Thunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({}, {:?})", self.name(), self.args())
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
