use super::*;
use crate::errors::EvalErrorKind;
use crate::input_handler::{buffer_input, empty_input};
use crate::print_handler::buffer_handler;
use pretty_assertions::assert_eq;

fn quiet() -> InterpreterBuilder {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .input_handler(empty_input())
}

#[test]
fn play_returns_program_value() {
    let mut interp = quiet().build();
    assert_eq!(interp.play("* 6 7").unwrap(), Value::Number(42));
}

#[test]
fn empty_source_is_parse_error() {
    let mut interp = quiet().build();
    for source in ["", "   ", "# only a comment\n", "()"] {
        let err = interp.play(source).unwrap_err();
        assert!(
            matches!(&err.kind, EvalErrorKind::Parse(p) if p.kind == ParseErrorKind::EmptyProgram),
            "{source:?} gave {err:?}"
        );
    }
}

#[test]
fn parse_does_not_run() {
    let mut interp = quiet().build();
    let program = interp.parse("O 'hi'").unwrap();
    assert!(!program.is_reduced());
    assert_eq!(interp.print_handler().get_output(), "");
    interp.run(&program).unwrap();
    interp.run(&program).unwrap();
    assert_eq!(interp.print_handler().get_output(), "hi\nhi\n");
}

#[test]
fn lookup_distinguishes_missing_and_unassigned() {
    let mut interp = quiet().build();
    interp.play("; = a 1 b").unwrap_err();
    assert_eq!(interp.lookup("a"), Some(Value::Number(1)));
    assert_eq!(interp.lookup("b"), None);
    assert!(interp.env().lookup("b").is_some());
    assert!(interp.env().lookup("c").is_none());
}

#[test]
fn variables_persist_across_plays() {
    let mut interp = quiet().build();
    interp.play("= counter 0").unwrap();
    for _ in 0..3 {
        interp.play("= counter + counter 1").unwrap();
    }
    assert_eq!(interp.lookup("counter"), Some(Value::Number(3)));
}

#[test]
fn builder_defaults_follow_mode() {
    let interp = quiet().build();
    assert_eq!(interp.mode(), EvalMode::Interpret);
    assert_eq!(
        interp.call_stack().max_depth(),
        EvalMode::Interpret.max_recursion_depth()
    );

    let sandboxed = quiet().mode(EvalMode::Sandboxed).build();
    assert_eq!(sandboxed.call_stack().max_depth(), Some(10_000));
}

#[test]
fn builder_max_depth_overrides_mode() {
    let interp = quiet().mode(EvalMode::Sandboxed).max_depth(None).build();
    assert_eq!(interp.call_stack().max_depth(), None);
}

#[test]
fn builder_input_handler_feeds_prompt() {
    let mut interp = quiet().input_handler(buffer_input("line\n")).build();
    assert_eq!(interp.play("PROMPT").unwrap(), Value::text("line"));
}

#[test]
fn custom_registry_is_used_by_parser() {
    fn seven(_: &mut Interpreter, _: &[Value]) -> EvalResult {
        Ok(Value::Number(7))
    }
    let mut registry = FunctionRegistry::with_builtins();
    registry.register('X', 0, seven).unwrap();
    let shared = SharedRegistry::new(registry);

    let mut a = quiet().functions(shared.clone()).build();
    let mut b = quiet().functions(shared).build();
    assert_eq!(a.play("+ X 1").unwrap(), Value::Number(8));
    assert_eq!(b.play("XYZ").unwrap(), Value::Number(7));
    assert!(a.functions().contains('X'));
}

#[test]
fn disabled_string_cache_still_evaluates() {
    let mut interp = quiet().string_cache(StringCache::with_capacity(0, 0)).build();
    assert_eq!(interp.play("+ 'a' 'b'").unwrap(), Value::text("ab"));
    assert_eq!(interp.strings().stats().hits, 0);
}

#[test]
fn seeded_interpreters_agree() {
    let mut a = quiet().seed(99).build();
    let mut b = quiet().seed(99).build();
    assert_eq!(a.play("R").unwrap(), b.play("R").unwrap());
}
