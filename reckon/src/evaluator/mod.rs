//! Order-of-operations evaluation
//!
//! Evaluates a flat sequence of numbers, terms and operators in two passes:
//! 1. `×` and `÷`, left to right
//! 2. `+` and `-`, left to right
//!
//! Each pass produces a new, shorter sequence; nothing is spliced in place.

pub mod operations;

use crate::classifier::{unwrap, Unwrapped};
use crate::{Element, Operator, ReckonError, ReckonResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// Decimal places kept in a result. Division carries 28 significant digits,
/// so `1 ÷ 3 × 3` would otherwise come out as `0.999…9`.
pub const RESULT_DECIMAL_PLACES: u32 = 20;

/// Result of evaluating a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Evaluation {
    /// The sequence has a finite value
    Finite(Decimal),
    /// Positive infinity: a division by zero (or an unrepresentable result)
    /// made the whole evaluation undefined
    Infinite,
}

impl Evaluation {
    pub fn is_finite(&self) -> bool {
        matches!(self, Evaluation::Finite(_))
    }

    /// The value if finite, None otherwise
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Evaluation::Finite(v) => Some(*v),
            Evaluation::Infinite => None,
        }
    }
}

impl std::fmt::Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluation::Finite(v) => write!(f, "{}", v.normalize()),
            Evaluation::Infinite => write!(f, "∞"),
        }
    }
}

/// Evaluate an alternating term/operator sequence with standard precedence.
///
/// Results are rounded to [`RESULT_DECIMAL_PLACES`] decimal places.
/// The empty sequence evaluates to 0. A sequence that does not alternate
/// (leading or trailing operator, adjacent terms or operators) is rejected
/// with [`ReckonError::MalformedExpression`].
///
/// # Examples
/// ```text
/// 2 + 3 × 4 = 14
/// 5 ÷ 0     = ∞
/// ```
pub fn evaluate(elements: &[Element]) -> ReckonResult<Evaluation> {
    let items: Vec<Unwrapped> = elements.iter().map(unwrap).collect();
    evaluate_unwrapped(&items)
}

/// Evaluate a sequence that has already been unwrapped
pub fn evaluate_unwrapped(items: &[Unwrapped]) -> ReckonResult<Evaluation> {
    if items.is_empty() {
        return Ok(Evaluation::Finite(Decimal::ZERO));
    }
    check_alternation(items)?;

    let Some(products) = reduce_tier(items, Operator::is_multiplicative)? else {
        return Ok(Evaluation::Infinite);
    };
    let Some(sums) = reduce_tier(&products, Operator::is_additive)? else {
        return Ok(Evaluation::Infinite);
    };

    match sums.as_slice() {
        [Unwrapped::Number(value)] => Ok(Evaluation::Finite(
            value.round_dp(RESULT_DECIMAL_PLACES).normalize(),
        )),
        _ => Err(ReckonError::Engine(format!(
            "Evaluation left {} entries instead of one",
            sums.len()
        ))),
    }
}

/// Collapse every `left op right` window whose operator belongs to the tier.
///
/// Returns `None` as soon as one step has no finite result.
fn reduce_tier(
    items: &[Unwrapped],
    in_tier: fn(&Operator) -> bool,
) -> ReckonResult<Option<Vec<Unwrapped>>> {
    let mut reduced: Vec<Unwrapped> = Vec::with_capacity(items.len());
    let mut rest = items.iter().copied();

    while let Some(item) = rest.next() {
        match item {
            Unwrapped::Operator(op) if in_tier(&op) => {
                let Some(Unwrapped::Number(left)) = reduced.pop() else {
                    return Err(malformed(format!("'{}' has no left operand", op)));
                };
                let Some(Unwrapped::Number(right)) = rest.next() else {
                    return Err(malformed(format!("'{}' has no right operand", op)));
                };
                match operations::apply(left, op, right) {
                    Some(value) => reduced.push(Unwrapped::Number(value)),
                    None => return Ok(None),
                }
            }
            other => reduced.push(other),
        }
    }

    Ok(Some(reduced))
}

fn check_alternation(items: &[Unwrapped]) -> ReckonResult<()> {
    for (index, item) in items.iter().enumerate() {
        let expect_number = index % 2 == 0;
        if item.is_number() != expect_number {
            let expected = if expect_number { "a number" } else { "an operator" };
            return Err(malformed(format!(
                "expected {} at position {}",
                expected,
                index + 1
            )));
        }
    }
    if items.len() % 2 == 0 {
        return Err(malformed(format!(
            "sequence of {} entries ends with an operator",
            items.len()
        )));
    }
    Ok(())
}

fn malformed(message: String) -> ReckonError {
    ReckonError::MalformedExpression(message)
}
