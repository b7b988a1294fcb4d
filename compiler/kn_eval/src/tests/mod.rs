//! Cross-module tests that drive the interpreter through Knight source.

mod parser_tests;

use crate::errors::{EvalErrorKind, EvalResult};
use crate::input_handler::{buffer_input, empty_input};
use crate::print_handler::buffer_handler;
use crate::Interpreter;

/// Interpreter with captured output, no input, and a fixed seed.
pub(crate) fn test_interpreter() -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .input_handler(empty_input())
        .seed(7)
        .build()
}

/// Interpreter whose `PROMPT` reads from `input`.
pub(crate) fn interpreter_with_input(input: &str) -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .input_handler(buffer_input(input))
        .seed(7)
        .build()
}

/// Run `source` in a fresh test interpreter.
pub(crate) fn eval(source: &str) -> EvalResult {
    test_interpreter().play(source)
}

/// Run `source`, returning the result and everything it printed.
pub(crate) fn eval_with_output(source: &str) -> (EvalResult, String) {
    let mut interp = test_interpreter();
    let result = interp.play(source);
    (result, interp.print_handler().get_output())
}

/// Error kind of a program expected to fail.
pub(crate) fn eval_err(source: &str) -> EvalErrorKind {
    match eval(source) {
        Ok(value) => panic!("expected `{source}` to fail, got {value:?}"),
        Err(err) => err.kind,
    }
}
