//! Classification of expression entries
//!
//! Every other component asks these questions instead of probing entries
//! directly. Text only enters the engine through [`classify`].

use crate::{Element, Operator};
use rust_decimal::Decimal;

/// An entry reduced to what evaluation cares about: a number or an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unwrapped {
    Number(Decimal),
    Operator(Operator),
}

impl Unwrapped {
    pub fn is_number(&self) -> bool {
        matches!(self, Unwrapped::Number(_))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Unwrapped::Operator(_))
    }

    /// Both entries are numbers, or both are operators
    pub fn same_category(&self, other: &Unwrapped) -> bool {
        self.is_number() == other.is_number()
    }
}

/// True for raw numbers and terms
pub fn is_number_like(element: &Element) -> bool {
    matches!(element, Element::Number(_) | Element::Term(_))
}

pub fn is_operator(element: &Element) -> bool {
    matches!(element, Element::Operator(_))
}

/// A term unwraps to its value; numbers and operators are returned as they are
pub fn unwrap(element: &Element) -> Unwrapped {
    match element {
        Element::Number(n) => Unwrapped::Number(*n),
        Element::Term(term) => Unwrapped::Number(term.value()),
        Element::Operator(op) => Unwrapped::Operator(*op),
    }
}

/// Classify external text: numeric strings become numbers, the operator
/// symbols become operators, anything else is rejected
pub fn classify(text: &str) -> Option<Element> {
    text.parse::<Element>().ok()
}

pub fn is_number_like_text(text: &str) -> bool {
    classify(text).is_some_and(|el| is_number_like(&el))
}

pub fn is_operator_text(text: &str) -> bool {
    classify(text).is_some_and(|el| is_operator(&el))
}
