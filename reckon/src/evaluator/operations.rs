//! Checked decimal arithmetic for the four operators

use crate::Operator;
use rust_decimal::Decimal;

/// Apply `op` to two values.
///
/// Returns `None` when the result is not a finite number: division by zero,
/// or a result outside the range of `Decimal`.
pub fn apply(left: Decimal, op: Operator, right: Decimal) -> Option<Decimal> {
    match op {
        Operator::Add => left.checked_add(right),
        Operator::Subtract => left.checked_sub(right),
        Operator::Multiply => left.checked_mul(right),
        Operator::Divide => {
            if right.is_zero() {
                return None;
            }
            left.checked_div(right)
        }
    }
}

/// Whether `numerator` divides evenly by `denominator`.
/// A zero denominator never divides evenly.
pub fn divides_evenly(numerator: Decimal, denominator: Decimal) -> bool {
    if denominator.is_zero() {
        return false;
    }
    numerator
        .checked_rem(denominator)
        .is_some_and(|rem| rem.is_zero())
}
