use super::*;
use crate::errors::{division_by_zero, EvalErrorKind};
use pretty_assertions::assert_eq;
use smallvec::smallvec;

fn constant(_: &mut Interpreter, _: &[Value]) -> EvalResult {
    Ok(Value::Number(7))
}

fn first(interp: &mut Interpreter, args: &[Value]) -> EvalResult {
    args[0].run(interp)
}

fn fail(_: &mut Interpreter, _: &[Value]) -> EvalResult {
    Err(division_by_zero())
}

#[test]
fn standard_registry_covers_every_builtin() {
    let registry = FunctionRegistry::with_builtins();
    for name in "PRBCE`Q!LDOA~,[]+-*/%^?<>&|;=WIGS".chars() {
        assert!(registry.contains(name), "missing builtin {name}");
    }
    assert_eq!(registry.get('S').unwrap().arity(), 4);
    assert_eq!(registry.get('I').unwrap().arity(), 3);
    assert_eq!(registry.get('P').unwrap().arity(), 0);
}

#[test]
fn register_is_last_writer_wins() {
    let mut registry = FunctionRegistry::new();
    assert!(registry.register('X', 0, constant).unwrap().is_none());
    let replaced = registry.register('X', 1, first).unwrap().unwrap();
    assert_eq!(replaced.arity(), 0);
    assert_eq!(registry.get('X').unwrap().arity(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn register_rejects_arity_above_limit() {
    let mut registry = FunctionRegistry::with_builtins();
    let err = registry.register('X', MAX_ARITY + 1, constant).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::InvalidArgument { .. }));
    assert!(!registry.contains('X'));
    assert!(registry.register('Y', MAX_ARITY, constant).unwrap().is_none());
}

#[test]
fn parsed_thunks_match_registered_arity() {
    let mut interp = Interpreter::new();
    for name in "PRBCE`Q!LDOA~,[]+-*/%^?<>&|;=WIGS".chars() {
        let arity = interp.functions().get(name).unwrap().arity();
        let source = format!("{name}{}", " 1".repeat(arity));
        let Value::Function(thunk) = interp.parse(&source).unwrap() else {
            panic!("`{source}` did not parse to a function");
        };
        assert_eq!(thunk.args().len(), arity, "builtin {name}");
        assert_eq!(thunk.arity(), arity);
    }
}

#[test]
fn dropping_a_deep_thunk_chain_does_not_recurse() {
    let negate = FunctionRegistry::with_builtins().get('~').unwrap();
    let mut program = Value::Number(0);
    for _ in 0..1_000_000 {
        program = Value::Function(Thunk::new(negate, smallvec![program]));
    }
    drop(program);
}

#[test]
fn dropping_a_thunk_keeps_shared_arguments() {
    let negate = FunctionRegistry::with_builtins().get('~').unwrap();
    let inner = Value::Function(Thunk::new(negate, smallvec![Value::Number(3)]));
    let outer = Value::Function(Thunk::new(negate, smallvec![inner.clone()]));
    drop(outer);
    let Value::Function(thunk) = &inner else {
        unreachable!()
    };
    assert_eq!(thunk.args(), &[Value::Number(3)]);
}

#[test]
fn thunk_passes_arguments_unevaluated() {
    let mut interp = Interpreter::new();
    let inner = Thunk::new(
        Builtin {
            name: 'K',
            arity: 0,
            op: constant,
        },
        smallvec![],
    );
    let outer = Thunk::new(
        Builtin {
            name: 'F',
            arity: 1,
            op: first,
        },
        smallvec![Value::Function(inner)],
    );
    assert_eq!(outer.call(&mut interp).unwrap(), Value::Number(7));
    assert!(interp.call_stack.is_empty());
    assert_eq!(interp.call_stack.total_calls(), 2);
}

#[test]
fn errors_carry_the_call_chain() {
    let mut interp = Interpreter::new();
    let failing = Thunk::new(
        Builtin {
            name: '/',
            arity: 0,
            op: fail,
        },
        smallvec![],
    );
    let outer = Thunk::new(
        Builtin {
            name: 'F',
            arity: 1,
            op: first,
        },
        smallvec![Value::Function(failing)],
    );
    let err = outer.call(&mut interp).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let names: Vec<char> = err.backtrace.unwrap().frames().iter().map(|f| f.name).collect();
    assert_eq!(names, vec!['/', 'F']);
    assert!(interp.call_stack.is_empty());
}

#[test]
fn thunks_compare_by_identity() {
    let builtin = Builtin {
        name: 'K',
        arity: 0,
        op: constant,
    };
    let a = Thunk::new(builtin, smallvec![]);
    let b = Thunk::new(builtin, smallvec![]);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
}
