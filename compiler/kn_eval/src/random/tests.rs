use super::*;
use pretty_assertions::assert_eq;

#[test]
fn same_seed_same_sequence() {
    let mut a = Random::with_seed(42);
    let mut b = Random::with_seed(42);
    let xs: Vec<i64> = (0..16).map(|_| a.next_number()).collect();
    let ys: Vec<i64> = (0..16).map(|_| b.next_number()).collect();
    assert_eq!(xs, ys);
}

#[test]
fn numbers_are_non_negative() {
    let mut rng = Random::with_seed(0);
    assert!((0..1000).all(|_| rng.next_number() >= 0));
}

#[test]
fn different_seeds_diverge() {
    let mut a = Random::with_seed(1);
    let mut b = Random::with_seed(2);
    let xs: Vec<i64> = (0..4).map(|_| a.next_number()).collect();
    let ys: Vec<i64> = (0..4).map(|_| b.next_number()).collect();
    assert_ne!(xs, ys);
}
