use crate::evaluator::Evaluation;
use crate::pool::TermId;
use crate::{Element, Term};
use rust_decimal::Decimal;
use serde::Serialize;

/// A term available in the pool
#[derive(Debug, Clone, Serialize)]
pub struct PoolEntry {
    pub id: TermId,
    pub value: Decimal,
    /// The term as the player sees it, e.g. `24` or `4 × 6`
    pub display: String,
    pub term: Term,
}

/// State of a session for display and serialization
///
/// Everything a front-end needs to draw the board: the pool, the working
/// expression, and whether it can be finalized.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub target: i64,
    pub pool: Vec<PoolEntry>,
    pub expression: Vec<Element>,
    pub display: String,
    pub complete: bool,
    /// Operators can only follow a term
    pub can_place_operator: bool,
    /// Value of the working expression once it is complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Evaluation>,
    /// A pool term already equals the target
    pub solved: bool,
}
