use crate::evaluator::{evaluate, Evaluation};
use crate::rules::{can_append, can_swap};
use crate::validator::is_complete;
use crate::{Element, ReckonResult};
use serde::Serialize;

/// The expression the player is building.
///
/// Entries are kept in placement order, which is also evaluation order.
/// Mutation goes through [`try_append`](Self::try_append) and
/// [`try_swap`](Self::try_swap), so the sequence always alternates
/// term/operator starting with a term.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WorkingExpression {
    entries: Vec<Element>,
}

impl WorkingExpression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Element] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Element> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        is_complete(&self.entries)
    }

    /// Evaluate the entries placed so far.
    ///
    /// An expression ending in an operator is malformed and errors.
    pub fn evaluate(&self) -> ReckonResult<Evaluation> {
        evaluate(&self.entries)
    }

    /// Append `element` if the append rules allow it; otherwise hand it back
    pub fn try_append(&mut self, element: Element) -> Result<(), Element> {
        if !can_append(self.last(), &element) {
            return Err(element);
        }
        self.entries.push(element);
        Ok(())
    }

    /// Replace the last entry with `element` of the same kind, returning the
    /// replaced entry; otherwise hand `element` back
    pub fn try_swap(&mut self, element: Element) -> Result<Element, Element> {
        if !can_swap(self.last(), &element) {
            return Err(element);
        }
        match self.entries.last_mut() {
            Some(last) => Ok(std::mem::replace(last, element)),
            None => Err(element),
        }
    }

    pub fn pop(&mut self) -> Option<Element> {
        self.entries.pop()
    }

    /// Reset to empty, yielding the entries
    pub fn take(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.entries)
    }
}

impl std::fmt::Display for WorkingExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.entries.iter().map(|el| el.to_string()).collect();
        write!(f, "{}", parts.join(" "))
    }
}
