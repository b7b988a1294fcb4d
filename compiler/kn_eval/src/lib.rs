//! Knight Eval - tree-walking evaluation engine for the Knight language.
//!
//! Source text is parsed directly into a [`Value`] tree: literals,
//! [`Value::Variable`] references into the [`Environment`], and
//! [`Value::Function`] thunks holding *unevaluated* argument sub-trees.
//! [`Value::run`] reduces one node; each builtin decides how often to run
//! each of its arguments, which is what gives `&`, `|`, `I` and `W` their
//! short-circuit and loop semantics.
//!
//! # Architecture
//!
//! - `Interpreter`: owns all per-run state (variables, string cache, I/O
//!   handlers, random source, call stack). No process-wide singletons, so
//!   independent interpreters can coexist in one process.
//! - `Parser`: single-pass, one-byte-lookahead recursive descent.
//! - `FunctionRegistry`: one-character name to (arity, native operation),
//!   shared between interpreters through `SharedRegistry`.
//! - `evaluate_binary`: operator dispatch on the left operand's variant.
//! - `StringCache`: best-effort dedup of short text values.

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod function;
mod input_handler;
mod interpreter;
mod operators;
mod parser;
mod print_handler;
mod random;
mod shared;
mod stack;
mod string_cache;
mod value;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests use unwrap for brevity")]
mod tests;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, VarId, Variable};
pub use errors::{BacktraceFrame, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};
pub use eval_mode::EvalMode;
pub use function::{Builtin, FunctionRegistry, NativeFn, Thunk, ThunkArgs, MAX_ARITY};
pub use input_handler::{
    buffer_input, empty_input, stdin_input, BufferInputHandler, InputHandlerImpl,
    SharedInputHandler, StdinInputHandler,
};
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, BinaryOp};
pub use parser::{ParseError, ParseErrorKind, Parser};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use random::Random;
pub use shared::SharedRegistry;
pub use stack::ensure_sufficient_stack;
pub use string_cache::{CacheStats, StringCache};
pub use value::{Payload, Sequence, Shared, Text, Value, ValueDisplay};
