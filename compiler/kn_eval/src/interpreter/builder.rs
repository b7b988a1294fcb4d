//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::function::FunctionRegistry;
use crate::input_handler::{stdin_input, SharedInputHandler};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::random::Random;
use crate::shared::SharedRegistry;
use crate::string_cache::StringCache;

/// Builder for creating Interpreter instances.
///
/// Every unset option falls back to the standard configuration: the
/// builtin registry, stdout and stdin, a default-sized string cache, an
/// entropy-seeded random source, and the mode's nesting limit.
#[derive(Default)]
pub struct InterpreterBuilder {
    mode: EvalMode,
    functions: Option<SharedRegistry<FunctionRegistry>>,
    print_handler: Option<SharedPrintHandler>,
    input_handler: Option<SharedInputHandler>,
    strings: Option<StringCache>,
    seed: Option<u64>,
    max_depth: Option<Option<usize>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a custom builtin registry, e.g. one shared with other
    /// interpreters.
    #[must_use]
    pub fn functions(mut self, functions: SharedRegistry<FunctionRegistry>) -> Self {
        self.functions = Some(functions);
        self
    }

    /// Where `OUTPUT` and `DUMP` write. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Where `PROMPT` reads. Default is stdin.
    #[must_use]
    pub fn input_handler(mut self, handler: SharedInputHandler) -> Self {
        self.input_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn string_cache(mut self, cache: StringCache) -> Self {
        self.strings = Some(cache);
        self
    }

    /// Seed `RANDOM` for a reproducible run.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builtin nesting limit; `None` is unlimited. Overrides the mode default.
    #[must_use]
    pub fn max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let max_depth = self
            .max_depth
            .unwrap_or_else(|| self.mode.max_recursion_depth());
        let random = self.seed.map_or_else(Random::from_entropy, Random::with_seed);

        Interpreter {
            env: Environment::new(),
            functions: self
                .functions
                .unwrap_or_else(|| SharedRegistry::new(FunctionRegistry::with_builtins())),
            strings: self.strings.unwrap_or_default(),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            input_handler: self.input_handler.unwrap_or_else(stdin_input),
            random,
            mode: self.mode,
            call_stack: CallStack::new(max_depth),
        }
    }
}
