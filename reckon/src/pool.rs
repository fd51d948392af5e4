//! The pool of terms available to place into the working expression

use crate::Term;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Unique identifier of a term in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(u64);

impl TermId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counter for generating unique term IDs.
///
/// Puzzle numbers take `1..=K`; every later term draws from the same counter,
/// so an ID is never handed out twice.
#[derive(Debug, Clone)]
pub struct TermIdGenerator {
    next_id: u64,
}

impl Default for TermIdGenerator {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl TermIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TermId {
        let id = TermId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Terms not currently placed in the working expression, keyed by ID
#[derive(Debug, Clone, Default)]
pub struct Pool {
    terms: BTreeMap<TermId, Term>,
    ids: TermIdGenerator,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    /// One leaf term per puzzle number, with positional IDs `1..=K`
    pub fn from_numbers(numbers: &[i64]) -> Self {
        let mut pool = Self::new();
        for &n in numbers {
            pool.insert(Term::leaf(Decimal::from(n)));
        }
        pool
    }

    /// Add a term under a fresh ID
    pub fn insert(&mut self, term: Term) -> TermId {
        let id = self.ids.next_id();
        self.terms.insert(id, term);
        id
    }

    /// Put a term back under the ID it was taken from
    pub fn restore(&mut self, id: TermId, term: Term) {
        self.terms.insert(id, term);
    }

    /// Remove a term, transferring ownership to the caller
    pub fn take(&mut self, id: TermId) -> Option<Term> {
        self.terms.remove(&id)
    }

    pub fn get(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    pub fn contains(&self, id: TermId) -> bool {
        self.terms.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermId, &Term)> {
        self.terms.iter().map(|(id, term)| (*id, term))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Lowest-ID puzzle number with the given value
    pub fn find_leaf(&self, value: Decimal) -> Option<TermId> {
        self.iter()
            .find(|(_, term)| term.is_leaf() && term.value() == value)
            .map(|(id, _)| id)
    }

    /// Lowest-ID term of any kind with the given value
    pub fn find_value(&self, value: Decimal) -> Option<TermId> {
        self.iter()
            .find(|(_, term)| term.value() == value)
            .map(|(id, _)| id)
    }
}
