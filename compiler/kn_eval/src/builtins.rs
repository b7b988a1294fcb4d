//! The standard Knight builtins.
//!
//! Each builtin receives its argument sub-trees unevaluated and runs them
//! itself. Most run every argument once, left to right; `B`, `&`, `|`,
//! `=`, `W` and `I` are the exceptions that give the language blocks,
//! short-circuiting, assignment and loops.

use std::process::{Command, Stdio};

use crate::errors::{
    invalid_assignment_target, io_error, missing_capability, quit, EvalResult,
};
use crate::function::{FunctionRegistry, NativeFn};
use crate::interpreter::Interpreter;
use crate::operators::{evaluate_binary, BinaryOp};
use crate::value::Value;

/// Name, arity, and implementation of every standard builtin.
const BUILTINS: &[(char, usize, NativeFn)] = &[
    ('P', 0, prompt),
    ('R', 0, random),
    ('B', 1, block),
    ('C', 1, call),
    ('E', 1, eval),
    ('`', 1, system),
    ('Q', 1, quit_program),
    ('!', 1, not),
    ('L', 1, length),
    ('D', 1, dump),
    ('O', 1, output),
    ('A', 1, ascii),
    ('~', 1, negate),
    (',', 1, box_value),
    ('[', 1, head),
    (']', 1, tail),
    ('+', 2, add),
    ('-', 2, sub),
    ('*', 2, mul),
    ('/', 2, div),
    ('%', 2, rem),
    ('^', 2, pow),
    ('?', 2, equals),
    ('<', 2, less_than),
    ('>', 2, greater_than),
    ('&', 2, and),
    ('|', 2, or),
    (';', 2, then),
    ('=', 2, assign),
    ('W', 2, while_loop),
    ('I', 3, if_else),
    ('G', 3, get),
    ('S', 4, set),
];

pub(crate) fn register_all(registry: &mut FunctionRegistry) {
    for &(name, arity, op) in BUILTINS {
        registry.insert(name, arity, op);
    }
}

// Nullary

/// Read one line of input. End of input is `NULL`.
fn prompt(interp: &mut Interpreter, _: &[Value]) -> EvalResult {
    interp.print_handler.flush().map_err(|e| io_error(&e))?;
    let Some(mut line) = interp.input_handler.read_line().map_err(|e| io_error(&e))? else {
        return Ok(Value::Null);
    };
    if line.ends_with('\n') {
        line.pop();
    }
    if line.ends_with('\r') {
        line.pop();
    }
    Ok(Value::Text(interp.strings.fetch_owned(line)))
}

fn random(interp: &mut Interpreter, _: &[Value]) -> EvalResult {
    Ok(Value::Number(interp.random.next_number()))
}

// Unary

/// Return the argument unevaluated.
fn block(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Ok(args[0].clone())
}

/// Run the argument, then run what it produced.
fn call(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)?.run(interp)
}

fn eval(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let source = args[0].run(interp)?.to_text(interp)?;
    interp.play(&source)
}

/// Run a shell command and return its standard output.
fn system(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    if !interp.mode.allows_system() {
        return Err(missing_capability("system"));
    }
    let command = args[0].run(interp)?.to_text(interp)?;
    interp.print_handler.flush().map_err(|e| io_error(&e))?;

    tracing::debug!(command = &*command, "system");
    let output = Command::new("sh")
        .arg("-c")
        .arg(&*command)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| io_error(&e))?;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    Ok(Value::Text(interp.strings.fetch_owned(stdout)))
}

fn quit_program(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let code = args[0].run(interp)?.to_number(interp)?;
    Err(quit(code))
}

fn not(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let value = args[0].run(interp)?;
    Ok(Value::Boolean(!value.to_boolean(interp)?))
}

/// Length of the argument's sequence form; text counts characters.
fn length(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let len = match args[0].run(interp)? {
        Value::Text(s) => s.chars().count(),
        Value::Sequence(items) => items.len(),
        other => other.to_sequence(interp)?.len(),
    };
    Ok(Value::Number(i64::try_from(len).unwrap_or(i64::MAX)))
}

/// Print the debug form of the argument (no newline) and return it.
fn dump(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let value = args[0].run(interp)?;
    let rendered = value.display(&interp.env).to_string();
    interp.print_handler.print(&rendered).map_err(|e| io_error(&e))?;
    Ok(value)
}

/// Print the argument's text form with a newline. A trailing backslash is
/// stripped instead and suppresses the newline.
fn output(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let text = args[0].run(interp)?.to_text(interp)?;
    let written = match text.strip_suffix('\\') {
        Some(body) => interp.print_handler.print(body),
        None => interp.print_handler.println(&text),
    };
    written.map_err(|e| io_error(&e))?;
    Ok(Value::Text(text))
}

fn ascii(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)?.ascii(interp)
}

fn negate(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let n = args[0].run(interp)?.to_number(interp)?;
    Ok(Value::Number(n.wrapping_neg()))
}

/// Wrap the argument in a one-element sequence.
fn box_value(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let value = args[0].run(interp)?;
    Ok(Value::sequence(vec![value]))
}

fn head(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)?.head(interp)
}

fn tail(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)?.tail(interp)
}

// Binary

/// Run both operands, left first, then apply `op`.
fn binary(interp: &mut Interpreter, args: &[Value], op: BinaryOp) -> EvalResult {
    let left = args[0].run(interp)?;
    let right = args[1].run(interp)?;
    evaluate_binary(&left, &right, op, interp)
}

fn add(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Add)
}

fn sub(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Sub)
}

fn mul(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Mul)
}

fn div(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Div)
}

fn rem(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Mod)
}

fn pow(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Pow)
}

fn equals(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Eq)
}

fn less_than(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Lt)
}

fn greater_than(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    binary(interp, args, BinaryOp::Gt)
}

/// The left operand if it is falsy, otherwise the right operand.
fn and(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let left = args[0].run(interp)?;
    if left.to_boolean(interp)? {
        args[1].run(interp)
    } else {
        Ok(left)
    }
}

/// The left operand if it is truthy, otherwise the right operand.
fn or(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let left = args[0].run(interp)?;
    if left.to_boolean(interp)? {
        Ok(left)
    } else {
        args[1].run(interp)
    }
}

fn then(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)?;
    args[1].run(interp)
}

/// Store the right operand in the variable named by the unevaluated left
/// operand and return it.
fn assign(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let Some(id) = args[0].as_variable() else {
        return Err(invalid_assignment_target(&args[0]));
    };
    let value = args[1].run(interp)?;
    interp.env.assign(id, value.clone());
    Ok(value)
}

fn while_loop(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    while args[0].run(interp)?.to_boolean(interp)? {
        args[1].run(interp)?;
    }
    Ok(Value::Null)
}

// Ternary and up

fn if_else(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    if args[0].run(interp)?.to_boolean(interp)? {
        args[1].run(interp)
    } else {
        args[2].run(interp)
    }
}

fn get(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let container = args[0].run(interp)?;
    let start = args[1].run(interp)?.to_number(interp)?;
    let length = args[2].run(interp)?.to_number(interp)?;
    container.get(start, length, interp)
}

fn set(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    let container = args[0].run(interp)?;
    let start = args[1].run(interp)?.to_number(interp)?;
    let length = args[2].run(interp)?.to_number(interp)?;
    let replacement = args[3].run(interp)?;
    container.set(start, length, &replacement, interp)
}
