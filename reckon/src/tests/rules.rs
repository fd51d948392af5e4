use crate::rules::{can_append, can_swap};
use crate::{Element, Operator, Term};

fn n(v: i64) -> Element {
    Element::from(v)
}

fn op(op: Operator) -> Element {
    Element::Operator(op)
}

#[test]
fn test_empty_expression_starts_with_term() {
    assert!(can_append(None, &n(5)));
    assert!(can_append(None, &Element::Term(Term::leaf(5))));
    assert!(!can_append(None, &op(Operator::Add)));
}

#[test]
fn test_operator_follows_term() {
    assert!(can_append(Some(&n(5)), &op(Operator::Add)));
    assert!(can_append(
        Some(&Element::Term(Term::leaf(5))),
        &op(Operator::Divide)
    ));
}

#[test]
fn test_term_follows_operator() {
    assert!(can_append(Some(&op(Operator::Add)), &n(5)));
}

#[test]
fn test_no_adjacent_terms_or_operators() {
    assert!(!can_append(Some(&n(5)), &n(3)));
    assert!(!can_append(
        Some(&op(Operator::Add)),
        &op(Operator::Subtract)
    ));
}

#[test]
fn test_swap_requires_same_kind() {
    assert!(can_swap(Some(&n(5)), &n(3)));
    assert!(can_swap(Some(&op(Operator::Add)), &op(Operator::Multiply)));
    assert!(!can_swap(Some(&n(5)), &op(Operator::Add)));
    assert!(!can_swap(Some(&op(Operator::Add)), &n(5)));
    assert!(!can_swap(None, &n(5)));
}
