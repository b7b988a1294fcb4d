use super::*;
use crate::errors::{division_by_zero, quit, EvalErrorKind};
use pretty_assertions::assert_eq;

fn frame(name: char) -> CallFrame {
    CallFrame { name }
}

#[test]
fn empty_stack() {
    let stack = CallStack::new(Some(100));
    assert!(stack.is_empty());
    assert_eq!(stack.depth(), 0);
}

#[test]
fn push_and_pop() {
    let mut stack = CallStack::new(Some(100));
    stack.push(frame('+')).expect("push should succeed");
    assert_eq!(stack.depth(), 1);
    stack.pop();
    assert!(stack.is_empty());
    assert_eq!(stack.total_calls(), 1);
    assert_eq!(stack.peak_depth(), 1);
}

#[test]
fn depth_limit_enforced() {
    let mut stack = CallStack::new(Some(3));
    for _ in 0..3 {
        stack.push(frame(';')).expect("push within limit");
    }
    let err = stack.push(frame(';')).expect_err("push should fail at max depth");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { depth: 3 });
    // Depth unchanged after failed push
    assert_eq!(stack.depth(), 3);
}

#[test]
fn unlimited_depth() {
    let mut stack = CallStack::default();
    for _ in 0..1000 {
        stack.push(frame('C')).expect("unlimited should never fail");
    }
    assert_eq!(stack.depth(), 1000);
    assert_eq!(stack.peak_depth(), 1000);
}

#[test]
fn capture_is_most_recent_first() {
    let mut stack = CallStack::default();
    stack.push(frame(';')).expect("push");
    stack.push(frame('/')).expect("push");
    let bt = stack.capture();
    assert_eq!(
        bt.frames(),
        &[
            BacktraceFrame { name: '/', depth: 2 },
            BacktraceFrame { name: ';', depth: 1 },
        ]
    );
}

#[test]
fn annotate_keeps_innermost_backtrace() {
    let mut stack = CallStack::default();
    stack.push(frame(';')).expect("push");
    stack.push(frame('/')).expect("push");
    let err = stack.annotate(division_by_zero());
    stack.pop();
    let err = stack.annotate(err);
    let bt = err.backtrace.expect("backtrace attached");
    assert_eq!(bt.len(), 2);
}

#[test]
fn annotate_skips_quit() {
    let mut stack = CallStack::default();
    stack.push(frame('Q')).expect("push");
    assert!(stack.annotate(quit(0)).backtrace.is_none());
}
