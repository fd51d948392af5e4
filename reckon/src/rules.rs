//! Append and swap rules for the working expression
//!
//! The working expression must alternate term, operator, term, ... and start
//! with a term. Appending is checked here; replacing the last entry with one
//! of the same kind is a swap.

use crate::classifier::{is_number_like, is_operator};
use crate::Element;

/// Whether `candidate` may be appended after `last`.
///
/// `last` is the final entry of the working expression, or `None` when it is
/// empty.
pub fn can_append(last: Option<&Element>, candidate: &Element) -> bool {
    let Some(last) = last else {
        // An expression starts with a term
        return is_number_like(candidate);
    };

    if is_operator(last) && is_operator(candidate) {
        return false;
    }
    if is_number_like(last) && is_number_like(candidate) {
        // Two terms in a row: the caller swaps instead
        return false;
    }

    (is_number_like(last) && is_operator(candidate))
        || (is_operator(last) && is_number_like(candidate))
}

/// Whether `candidate` may replace `last`: both terms or both operators
pub fn can_swap(last: Option<&Element>, candidate: &Element) -> bool {
    match last {
        Some(last) => {
            (is_operator(last) && is_operator(candidate))
                || (is_number_like(last) && is_number_like(candidate))
        }
        None => false,
    }
}
