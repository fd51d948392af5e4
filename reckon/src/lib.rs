//! # Reckon Engine
//!
//! **Reach the target with + - × ÷**
//!
//! Reckon is the engine of a daily numbers puzzle. The player gets a handful
//! of numbers and a target, and combines the numbers with the four basic
//! operators, one move at a time, until something equals the target.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reckon::{Operator, Puzzle, ReckonResult, Session, TermId};
//!
//! fn main() -> ReckonResult<()> {
//!     let mut session = Session::new(Puzzle::new(vec![4, 6, 2], 26))?;
//!
//!     session.place_term(TermId::new(1));
//!     session.place_operator(Operator::Multiply);
//!     session.place_term(TermId::new(2));
//!     session.place_operator(Operator::Add);
//!     session.place_term(TermId::new(3));
//!
//!     assert!(session.submit().is_solved());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Terms
//! A term is a puzzle number or a finalized sub-expression. Finalizing
//! `4 × 6` puts a single term worth 24 back into the pool.
//!
//! ### The working expression
//! Terms and operators alternate, starting with a term. Precedence is the
//! usual one: `×` and `÷` before `+` and `-`.
//!
//! ### Safe moves
//! Moves that would produce a fraction, or a subtraction or division that
//! does not make progress, are rejected so every intermediate result stays a
//! whole number a person can check.

pub mod classifier;
pub mod error;
pub mod evaluator;
pub mod expression;
pub mod limits;
pub mod outcome;
pub mod parser;
pub mod pool;
pub mod puzzle;
pub mod rules;
pub mod safety;
pub mod session;
pub mod snapshot;
pub mod span;
pub mod term;
pub mod validator;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use classifier::{is_number_like, is_operator, unwrap, Unwrapped};
pub use error::{ErrorDetails, ReckonError};
pub use evaluator::{evaluate, Evaluation};
pub use expression::WorkingExpression;
pub use limits::Limits;
pub use outcome::{MoveOutcome, Rejection, Replay, ReplayStep, Submission};
pub use parser::{parse, parse_expression};
pub use pool::{Pool, TermId, TermIdGenerator};
pub use puzzle::{Puzzle, PuzzleConfig};
pub use rules::{can_append, can_swap};
pub use safety::is_safe_move;
pub use session::Session;
pub use snapshot::{PoolEntry, Snapshot};
pub use span::Span;
pub use term::{Element, Operator, Term};
pub use validator::is_complete;

/// Result type for Reckon operations
pub type ReckonResult<T> = Result<T, ReckonError>;

#[cfg(test)]
mod tests;
