use crate::classifier::is_number_like;
use crate::evaluator::Evaluation;
use crate::expression::WorkingExpression;
use crate::outcome::{MoveOutcome, Rejection, Replay, ReplayStep, Submission};
use crate::pool::{Pool, TermId};
use crate::rules::{can_append, can_swap};
use crate::safety::is_safe_move;
use crate::snapshot::{PoolEntry, Snapshot};
use crate::{Element, Operator, Puzzle, ReckonResult, Term};
use rust_decimal::Decimal;

/// One player's game: the puzzle, the pool and the working expression.
///
/// A term lives in exactly one of the pool or the working expression; every
/// move transfers ownership between the two. Illegal moves leave the session
/// untouched and come back as [`MoveOutcome::Rejected`].
#[derive(Debug, Clone)]
pub struct Session {
    puzzle: Puzzle,
    pool: Pool,
    expression: WorkingExpression,
}

enum Placement {
    Append,
    Swap,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> ReckonResult<Self> {
        puzzle.validate()?;
        let pool = Pool::from_numbers(&puzzle.numbers);
        Ok(Self {
            puzzle,
            pool,
            expression: WorkingExpression::new(),
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn target(&self) -> i64 {
        self.puzzle.target
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn expression(&self) -> &WorkingExpression {
        &self.expression
    }

    /// Move a pool term into the working expression.
    ///
    /// After an operator (or into an empty expression) the term is appended;
    /// after a term it replaces that term, which returns to the pool.
    pub fn place_term(&mut self, id: TermId) -> MoveOutcome {
        let Some(term) = self.pool.take(id) else {
            return MoveOutcome::rejected(Rejection::UnknownTerm { id });
        };
        let element = Element::Term(term);

        match self.apply(element) {
            Ok(outcome) => outcome,
            Err((element, reason)) => {
                if let Element::Term(term) = element {
                    self.pool.restore(id, term);
                }
                MoveOutcome::rejected(reason)
            }
        }
    }

    /// Append an operator after a term, or replace a trailing operator
    pub fn place_operator(&mut self, op: Operator) -> MoveOutcome {
        match self.apply(Element::Operator(op)) {
            Ok(outcome) => outcome,
            Err((_, reason)) => MoveOutcome::rejected(reason),
        }
    }

    fn apply(&mut self, element: Element) -> Result<MoveOutcome, (Element, Rejection)> {
        let last = self.expression.last();
        let placement = if can_swap(last, &element) {
            Placement::Swap
        } else if can_append(last, &element) {
            Placement::Append
        } else {
            return Err((element, Rejection::OutOfOrder));
        };

        if !is_safe_move(self.expression.entries(), &element) {
            return Err((element, Rejection::Unsafe));
        }

        match placement {
            Placement::Append => self
                .expression
                .try_append(element)
                .map(|()| MoveOutcome::Appended)
                .map_err(|element| (element, Rejection::OutOfOrder)),
            Placement::Swap => {
                let replaced = self
                    .expression
                    .try_swap(element)
                    .map_err(|element| (element, Rejection::OutOfOrder))?;
                Ok(MoveOutcome::Swapped {
                    returned: self.return_to_pool(replaced),
                })
            }
        }
    }

    /// Remove the last entry of the working expression
    pub fn undo(&mut self) -> MoveOutcome {
        match self.expression.pop() {
            Some(element) => MoveOutcome::Removed {
                returned: self.return_to_pool(element),
            },
            None => MoveOutcome::rejected(Rejection::Empty),
        }
    }

    /// Return every term of the working expression to the pool
    pub fn clear(&mut self) -> MoveOutcome {
        if self.expression.is_empty() {
            return MoveOutcome::rejected(Rejection::Empty);
        }
        let returned = self
            .expression
            .take()
            .into_iter()
            .filter_map(|element| self.return_to_pool(element))
            .collect();
        MoveOutcome::Cleared { returned }
    }

    /// Turn the complete working expression into a new pool term
    pub fn finalize(&mut self) -> MoveOutcome {
        if self.expression.is_empty() {
            return MoveOutcome::rejected(Rejection::Empty);
        }
        if !self.expression.is_complete() {
            return MoveOutcome::rejected(Rejection::Incomplete);
        }
        match Term::from_elements(self.expression.entries().to_vec()) {
            Ok(term) => {
                self.expression.take();
                MoveOutcome::Finalized {
                    id: self.pool.insert(term),
                }
            }
            Err(_) => MoveOutcome::rejected(Rejection::Undefined),
        }
    }

    /// Compare the value of the complete working expression with the target
    pub fn submit(&self) -> Submission {
        if !self.expression.is_complete() {
            return Submission::Incomplete;
        }
        match self.expression.evaluate() {
            Ok(Evaluation::Finite(value)) if value == Decimal::from(self.puzzle.target) => {
                Submission::Solved { value }
            }
            Ok(Evaluation::Finite(value)) => Submission::Missed {
                value,
                target: self.puzzle.target,
            },
            Ok(Evaluation::Infinite) | Err(_) => Submission::Undefined,
        }
    }

    /// A built term whose value is the target. Puzzle numbers that already
    /// equal the target do not count.
    pub fn solved_term(&self) -> Option<TermId> {
        let target = Decimal::from(self.puzzle.target);
        self.pool
            .iter()
            .find(|(_, term)| !term.is_leaf() && term.value() == target)
            .map(|(id, _)| id)
    }

    /// Start over with the original numbers
    pub fn restart(&mut self) {
        self.pool = Pool::from_numbers(&self.puzzle.numbers);
        self.expression = WorkingExpression::new();
    }

    /// Build a parsed expression through the normal move rules.
    ///
    /// Parenthesized groups are built and finalized first, innermost first,
    /// then the top level is placed and left in the working expression.
    /// Raw numbers are taken from unused puzzle numbers of the same value.
    /// Stops at the first rejected move.
    pub fn replay(&mut self, elements: &[Element]) -> Replay {
        let mut replay = Replay::default();
        if !self.expression.is_empty() {
            let outcome = self.clear();
            replay.steps.push(ReplayStep {
                entry: "clear".to_string(),
                outcome,
            });
        }
        self.replay_sequence(elements, &mut replay);
        replay
    }

    /// Returns false once a step has been rejected
    fn replay_sequence(&mut self, elements: &[Element], replay: &mut Replay) -> bool {
        let mut groups = Vec::new();
        for element in elements {
            if let Element::Term(term) = element {
                if !term.is_leaf() {
                    match self.replay_group(term, replay) {
                        Some(id) => groups.push(id),
                        None => return false,
                    }
                }
            }
        }

        let mut groups = groups.into_iter();
        for element in elements {
            let outcome = match element {
                Element::Operator(op) => self.place_operator(*op),
                Element::Number(n) => self.place_number(*n),
                Element::Term(term) if term.is_leaf() => self.place_number(term.value()),
                Element::Term(_) => match groups.next() {
                    Some(id) => self.place_term(id),
                    None => MoveOutcome::rejected(Rejection::OutOfOrder),
                },
            };
            let accepted = outcome.is_accepted();
            replay.steps.push(ReplayStep {
                entry: element.to_string(),
                outcome,
            });
            if !accepted {
                return false;
            }
        }
        true
    }

    fn replay_group(&mut self, term: &Term, replay: &mut Replay) -> Option<TermId> {
        if !self.replay_sequence(term.elements(), replay) {
            return None;
        }
        let outcome = self.finalize();
        let id = match &outcome {
            MoveOutcome::Finalized { id } => Some(*id),
            _ => None,
        };
        replay.steps.push(ReplayStep {
            entry: format!("finalize {}", term),
            outcome,
        });
        id
    }

    fn place_number(&mut self, value: Decimal) -> MoveOutcome {
        match self.pool.find_leaf(value) {
            Some(id) => self.place_term(id),
            None => MoveOutcome::rejected(Rejection::UnavailableNumber { value }),
        }
    }

    fn return_to_pool(&mut self, element: Element) -> Option<TermId> {
        match element {
            Element::Term(term) => Some(self.pool.insert(term)),
            Element::Number(n) => Some(self.pool.insert(Term::leaf(n))),
            Element::Operator(_) => None,
        }
    }

    /// Serializable view of the current state
    pub fn snapshot(&self) -> Snapshot {
        let pool = self
            .pool
            .iter()
            .map(|(id, term)| PoolEntry {
                id,
                value: term.value().normalize(),
                display: term.to_string(),
                term: term.clone(),
            })
            .collect();
        let value = if self.expression.is_complete() {
            self.expression.evaluate().ok()
        } else {
            None
        };
        Snapshot {
            target: self.puzzle.target,
            pool,
            expression: self.expression.entries().to_vec(),
            display: self.expression.to_string(),
            complete: self.expression.is_complete(),
            can_place_operator: self.expression.last().is_some_and(is_number_like),
            value,
            solved: self.solved_term().is_some(),
        }
    }
}
