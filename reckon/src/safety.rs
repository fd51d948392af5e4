//! Safe-move lookahead
//!
//! A move is safe when every intermediate result stays a whole number and
//! every subtraction or division makes strict progress: the value left of
//! `-` or `÷` must be larger than the term to its right, and a division must
//! leave no remainder.

use crate::classifier::{unwrap, Unwrapped};
use crate::evaluator::evaluate_unwrapped;
use crate::evaluator::operations::divides_evenly;
use crate::{Element, Operator};
use rust_decimal::Decimal;

/// Whether placing `candidate` after `expression` keeps the puzzle tractable.
///
/// The move is inferred the same way the session applies it: a candidate of
/// the same kind as the last entry replaces it, anything else is appended.
/// An operator candidate has no right-hand term yet, so it is not added;
/// the term-terminated expression it will follow is checked instead.
pub fn is_safe_move(expression: &[Element], candidate: &Element) -> bool {
    let mut items: Vec<Unwrapped> = expression.iter().map(unwrap).collect();
    let candidate = unwrap(candidate);

    if items
        .last()
        .is_some_and(|last| last.same_category(&candidate))
    {
        items.pop();
    }
    if candidate.is_number() {
        items.push(candidate);
    }

    if items.len() < 3 {
        return true;
    }

    let governing_index = items.len() - 2;
    let (Unwrapped::Operator(governing), Unwrapped::Number(right)) =
        (items[governing_index], items[items.len() - 1])
    else {
        return false;
    };

    match governing {
        Operator::Divide | Operator::Subtract => {
            let chain = left_chain(&items[..governing_index]);
            is_progress(chain, governing, right)
        }
        Operator::Add | Operator::Multiply => true,
    }
}

/// The run of entries directly left of the governing operator, back to the
/// nearest `+` or `-`. Under precedence this is what the operator's right
/// term combines with.
fn left_chain(before: &[Unwrapped]) -> &[Unwrapped] {
    let start = before
        .iter()
        .rposition(|item| matches!(item, Unwrapped::Operator(op) if op.is_additive()))
        .map_or(0, |boundary| boundary + 1);
    &before[start..]
}

fn is_progress(chain: &[Unwrapped], governing: Operator, right: Decimal) -> bool {
    let Some(left) = evaluate_unwrapped(chain).ok().and_then(|e| e.value()) else {
        return false;
    };

    if governing == Operator::Divide && !divides_evenly(left, right) {
        return false;
    }

    left > right
}
