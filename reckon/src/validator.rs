use crate::classifier::{is_number_like, is_operator};
use crate::Element;

/// Whether an expression is ready to be finalized or submitted.
///
/// A complete expression has an odd length of at least 3, starts and ends
/// with a term, and alternates term and operator in between.
pub fn is_complete(expression: &[Element]) -> bool {
    if expression.len() < 3 || expression.len() % 2 == 0 {
        return false;
    }

    expression.iter().enumerate().all(|(offset, entry)| {
        if offset % 2 == 0 {
            is_number_like(entry)
        } else {
            is_operator(entry)
        }
    })
}
