use super::*;
use pretty_assertions::assert_eq;

#[test]
fn clone_shares_allocation() {
    let a = Text::from("hello");
    let b = a.clone();
    assert!(a.ptr_eq(&b));
    assert_eq!(a.strong_count(), 2);
}

#[test]
fn equality_is_structural() {
    let a = Text::from("hello");
    let b = Text::from(String::from("hello"));
    assert!(!a.ptr_eq(&b));
    assert_eq!(a, b);
    assert_ne!(a, Text::from("world"));
}

#[test]
fn sequence_equality_compares_elements() {
    let a = Sequence::from(vec![Value::Number(1), Value::text("x")]);
    let b = Sequence::from(vec![Value::Number(1), Value::text("x")]);
    let c = Sequence::from(vec![Value::Number(1)]);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn defaults_are_empty() {
    assert!(Text::default().is_empty());
    assert!(Sequence::default().is_empty());
}

fn nested(depth: usize) -> Value {
    let mut value = Value::empty_sequence();
    for _ in 0..depth {
        value = Value::sequence(vec![value]);
    }
    value
}

#[test]
fn dropping_a_deep_sequence_does_not_recurse() {
    drop(nested(1_000_000));
}

#[test]
fn dropping_keeps_shared_children_intact() {
    let inner = Value::sequence(vec![Value::Number(1), Value::sequence(vec![Value::Number(2)])]);
    let outer = Value::sequence(vec![inner.clone(), Value::text("x")]);
    drop(outer);
    assert_eq!(
        inner,
        Value::sequence(vec![Value::Number(1), Value::sequence(vec![Value::Number(2)])])
    );
}

#[test]
fn deep_sequences_compare_structurally() {
    let a = nested(200_000);
    let b = nested(200_000);
    assert_eq!(a, b);
    assert_ne!(a, nested(199_999));
}
