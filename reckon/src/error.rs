use crate::span::Span;
use std::fmt;
use std::sync::Arc;

/// Detailed error information with source location
#[derive(Debug, Clone)]
pub struct ErrorDetails {
    pub message: String,
    pub span: Span,
    pub source_id: String,
    pub source_text: Arc<str>,
    pub suggestion: Option<String>,
}

/// Error types for the Reckon engine.
///
/// Player moves never produce these: illegal moves are reported as
/// [`MoveOutcome::Rejected`](crate::MoveOutcome). Errors are reserved for
/// broken preconditions and bad external input.
#[derive(Debug, Clone)]
pub enum ReckonError {
    /// Parse error in a textual expression, with source location
    Parse(Box<ErrorDetails>),

    /// Sequence handed to the evaluator does not alternate term/operator
    MalformedExpression(String),

    /// Finalizing a sequence whose evaluation is not finite
    UndefinedTerm(String),

    /// Finalizing a sequence that is not a complete expression
    IncompleteExpression(String),

    /// Puzzle record or puzzle configuration is unusable
    InvalidPuzzle(String),

    /// Input exceeded one of the configured limits
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },

    /// Engine error without specific source location
    Engine(String),
}

impl ReckonError {
    /// Create a parse error with source information
    pub fn parse(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: None,
        }))
    }

    /// Create a parse error with suggestion
    pub fn parse_with_suggestion(
        message: impl Into<String>,
        span: Span,
        source_id: impl Into<String>,
        source_text: Arc<str>,
        suggestion: impl Into<String>,
    ) -> Self {
        Self::Parse(Box::new(ErrorDetails {
            message: message.into(),
            span,
            source_id: source_id.into(),
            source_text,
            suggestion: Some(suggestion.into()),
        }))
    }
}

impl fmt::Display for ReckonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReckonError::Parse(details) => {
                write!(f, "Parse error: {}", details.message)?;
                if let Some(suggestion) = &details.suggestion {
                    write!(f, " (suggestion: {})", suggestion)?;
                }
                write!(
                    f,
                    " at {}:{}:{}",
                    details.source_id, details.span.line, details.span.col
                )
            }
            ReckonError::MalformedExpression(msg) => write!(f, "Malformed expression: {}", msg),
            ReckonError::UndefinedTerm(msg) => write!(f, "Undefined term: {}", msg),
            ReckonError::IncompleteExpression(msg) => {
                write!(f, "Incomplete expression: {}", msg)
            }
            ReckonError::InvalidPuzzle(msg) => write!(f, "Invalid puzzle: {}", msg),
            ReckonError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
                suggestion,
            } => write!(
                f,
                "Resource limit exceeded: {} (limit {}, actual {}). {}",
                limit_name, limit_value, actual_value, suggestion
            ),
            ReckonError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for ReckonError {}

impl From<std::fmt::Error> for ReckonError {
    fn from(err: std::fmt::Error) -> Self {
        ReckonError::Engine(format!("Format error: {}", err))
    }
}
