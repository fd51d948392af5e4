//! Core value types: operators, terms and the elements of an expression
//!
//! An expression is a flat sequence of [`Element`]s. A [`Term`] wraps either an
//! original puzzle number or a finalized sub-expression, so nesting only ever
//! comes from reusing an earlier result as a single value.

use crate::evaluator::evaluate;
use crate::validator::is_complete;
use crate::{ReckonError, ReckonResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-", alias = "−")]
    Subtract,
    #[serde(rename = "×", alias = "*")]
    Multiply,
    #[serde(rename = "÷", alias = "/")]
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Canonical display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// Binding strength: 2 for `× ÷`, 1 for `+ -`
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Multiply | Operator::Divide => 2,
            Operator::Add | Operator::Subtract => 1,
        }
    }

    /// Multiplicative operators bind tighter than additive ones
    pub fn is_multiplicative(&self) -> bool {
        self.precedence() == 2
    }

    pub fn is_additive(&self) -> bool {
        !self.is_multiplicative()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ReckonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Operator::Add),
            "-" | "−" => Ok(Operator::Subtract),
            "×" | "*" => Ok(Operator::Multiply),
            "÷" | "/" => Ok(Operator::Divide),
            other => Err(ReckonError::Engine(format!(
                "'{}' is not an operator (expected one of + - × ÷)",
                other
            ))),
        }
    }
}

/// An entry of an expression
///
/// Raw numbers appear only inside leaf terms and in sequences built from text;
/// the working expression of a session holds terms and operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Operator(Operator),
    Number(Decimal),
    Term(Term),
}

impl Element {
    pub fn number(n: impl Into<Decimal>) -> Self {
        Element::Number(n.into())
    }

    /// Numeric value of a number or term, `None` for operators
    pub fn value(&self) -> Option<Decimal> {
        match self {
            Element::Number(n) => Some(*n),
            Element::Term(term) => Some(term.value()),
            Element::Operator(_) => None,
        }
    }

    pub fn as_operator(&self) -> Option<Operator> {
        match self {
            Element::Operator(op) => Some(*op),
            _ => None,
        }
    }
}

impl From<Operator> for Element {
    fn from(op: Operator) -> Self {
        Element::Operator(op)
    }
}

impl From<Term> for Element {
    fn from(term: Term) -> Self {
        Element::Term(term)
    }
}

impl From<i64> for Element {
    fn from(n: i64) -> Self {
        Element::Number(Decimal::from(n))
    }
}

impl FromStr for Element {
    type Err = ReckonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(op) = s.parse::<Operator>() {
            return Ok(Element::Operator(op));
        }
        Decimal::from_str(s.trim())
            .map(Element::Number)
            .map_err(|_| {
                ReckonError::Engine(format!("'{}' is neither a number nor an operator", s))
            })
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Operator(op) => write!(f, "{}", op),
            Element::Number(n) => write!(f, "{}", n.normalize()),
            Element::Term(term) if term.is_leaf() => write!(f, "{}", term),
            Element::Term(term) => write!(f, "({})", term),
        }
    }
}

/// A puzzle number or the result of a finalized sub-expression.
///
/// `value` is always the evaluation of `elements`; both are fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTerm")]
pub struct Term {
    value: Decimal,
    elements: Vec<Element>,
}

impl Term {
    /// A term for an original puzzle number
    pub fn leaf(n: impl Into<Decimal>) -> Self {
        let value = n.into();
        Self {
            value,
            elements: vec![Element::Number(value)],
        }
    }

    /// Finalize a complete expression into a single term.
    ///
    /// Fails if the sequence is not complete or evaluates to the
    /// non-finite sentinel (division by zero).
    pub fn from_elements(elements: Vec<Element>) -> ReckonResult<Self> {
        if !is_complete(&elements) {
            return Err(ReckonError::IncompleteExpression(format!(
                "'{}' must alternate number and operator and end in a number",
                join(&elements)
            )));
        }
        let value = evaluate(&elements)?.value().ok_or_else(|| {
            ReckonError::UndefinedTerm(format!("'{}' does not evaluate to a number", join(&elements)))
        })?;
        Ok(Self { value, elements })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.elements.as_slice(), [Element::Number(_)])
    }

    /// Nesting depth: 0 for a puzzle number, one more than the deepest
    /// nested term otherwise
    pub fn depth(&self) -> usize {
        if self.is_leaf() {
            return 0;
        }
        1 + self
            .elements
            .iter()
            .filter_map(|el| match el {
                Element::Term(term) => Some(term.depth()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_leaf() {
            return write!(f, "{}", self.value.normalize());
        }
        write!(f, "{}", join(&self.elements))
    }
}

fn join(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|el| el.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Deserialize)]
struct RawTerm {
    value: Decimal,
    elements: Vec<Element>,
}

impl TryFrom<RawTerm> for Term {
    type Error = ReckonError;

    fn try_from(raw: RawTerm) -> Result<Self, Self::Error> {
        let term = match raw.elements.as_slice() {
            [Element::Number(n)] => Term::leaf(*n),
            _ => Term::from_elements(raw.elements)?,
        };
        if term.value != raw.value {
            return Err(ReckonError::Engine(format!(
                "term value {} does not match its elements '{}' (= {})",
                raw.value.normalize(),
                term,
                term.value.normalize()
            )));
        }
        Ok(term)
    }
}
