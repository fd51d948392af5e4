use crate::pool::TermId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Result of a player move
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The entry was added to the end of the working expression
    Appended,
    /// The entry replaced the last one; a replaced term went back to the pool
    Swapped { returned: Option<TermId> },
    /// The last entry was removed
    Removed { returned: Option<TermId> },
    /// The working expression was emptied back into the pool
    Cleared { returned: Vec<TermId> },
    /// The working expression became a new pool term
    Finalized { id: TermId },
    /// The move is not allowed; nothing changed
    Rejected { reason: Rejection },
}

impl MoveOutcome {
    pub fn rejected(reason: Rejection) -> Self {
        MoveOutcome::Rejected { reason }
    }

    pub fn is_accepted(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected { .. })
    }

    /// The rejection reason, None if the move was accepted
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            MoveOutcome::Rejected { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Why a move was rejected.
///
/// The engine only reports the reason; presenting it is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// No term with this ID is in the pool
    UnknownTerm { id: TermId },
    /// The entry cannot follow the last one
    OutOfOrder,
    /// The move would lead to a fraction, or a subtraction or division
    /// that does not make progress
    Unsafe,
    /// The working expression is empty
    Empty,
    /// The working expression is not complete
    Incomplete,
    /// The working expression has no finite value
    Undefined,
    /// No puzzle number with this value is left in the pool
    UnavailableNumber { value: Decimal },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownTerm { id } => write!(f, "term {} is not available", id),
            Rejection::OutOfOrder => write!(f, "numbers and operators must alternate"),
            Rejection::Unsafe => write!(
                f,
                "that move would give a fraction or would not make progress"
            ),
            Rejection::Empty => write!(f, "the expression is empty"),
            Rejection::Incomplete => write!(f, "the expression is not complete"),
            Rejection::Undefined => write!(f, "the expression divides by zero"),
            Rejection::UnavailableNumber { value } => {
                write!(f, "{} is not available", value.normalize())
            }
        }
    }
}

/// Result of submitting the working expression as a solution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Solved { value: Decimal },
    Missed { value: Decimal, target: i64 },
    Incomplete,
    Undefined,
}

impl Submission {
    pub fn is_solved(&self) -> bool {
        matches!(self, Submission::Solved { .. })
    }
}

/// One step of replaying a textual expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayStep {
    /// What was placed, e.g. `4`, `×`, `finalize 4 × 6`
    pub entry: String,
    pub outcome: MoveOutcome,
}

/// All steps of a replay; stops at the first rejected step
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Replay {
    pub steps: Vec<ReplayStep>,
}

impl Replay {
    pub fn is_accepted(&self) -> bool {
        self.steps.iter().all(|step| step.outcome.is_accepted())
    }

    /// The step that stopped the replay, if any
    pub fn rejected_step(&self) -> Option<&ReplayStep> {
        self.steps.iter().find(|step| !step.outcome.is_accepted())
    }
}
