//! The interpreter: all state one Knight program runs against.
//!
//! There are no process-wide singletons. Variables, the string cache, I/O
//! handlers, the random source and the call stack all live here, so
//! independent interpreters can coexist in one process. The builtin
//! registry is shared read-only through [`SharedRegistry`].

mod builder;

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

pub use builder::InterpreterBuilder;

use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::errors::EvalResult;
use crate::eval_mode::EvalMode;
use crate::function::FunctionRegistry;
use crate::input_handler::SharedInputHandler;
use crate::parser::{ParseError, ParseErrorKind, Parser};
use crate::print_handler::SharedPrintHandler;
use crate::random::Random;
use crate::shared::SharedRegistry;
use crate::string_cache::StringCache;
use crate::value::Value;

/// Tree-walking Knight interpreter.
pub struct Interpreter {
    pub(crate) env: Environment,
    pub(crate) functions: SharedRegistry<FunctionRegistry>,
    pub(crate) strings: StringCache,
    pub(crate) print_handler: SharedPrintHandler,
    pub(crate) input_handler: SharedInputHandler,
    pub(crate) random: Random,
    pub(crate) mode: EvalMode,
    pub(crate) call_stack: CallStack,
}

impl Interpreter {
    /// An interpreter with the standard builtins, stdout/stdin, and an
    /// entropy-seeded random source.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Parse the first value in `source` into this interpreter's
    /// environment. Anything after that value is ignored.
    pub fn parse(&mut self, source: &str) -> Result<Value, ParseError> {
        let mut parser = Parser::new(source, &mut self.env, &self.functions, &mut self.strings);
        match parser.parse_value()? {
            Some(value) => Ok(value),
            None => Err(ParseError::new(ParseErrorKind::EmptyProgram, parser.offset())),
        }
    }

    /// Parse and evaluate `source`. Used by the driver and by `EVAL`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn play(&mut self, source: &str) -> EvalResult {
        let program = self.parse(source)?;
        tracing::debug!(variables = self.env.len(), "parsed");
        self.run(&program)
    }

    /// Reduce `value` by one step.
    #[inline]
    pub fn run(&mut self, value: &Value) -> EvalResult {
        value.run(self)
    }

    /// Current value of the variable `name`, if it exists and is assigned.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let id = self.env.lookup(name)?;
        self.env.value(id).cloned()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn strings(&self) -> &StringCache {
        &self.strings
    }

    pub fn strings_mut(&mut self) -> &mut StringCache {
        &mut self.strings
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn input_handler(&self) -> &SharedInputHandler {
        &self.input_handler
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
