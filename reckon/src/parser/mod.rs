//! Parser for textual expressions
//!
//! Turns `(4 × 6) + 2` into the element sequence the engine works on.
//! Parenthesized groups become finalized [`Term`]s.

use crate::error::ReckonError;
use crate::limits::Limits;
use crate::span::Span;
use crate::{Element, Operator, Term};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Parser)]
#[grammar = "src/parser/reckon.pest"]
pub struct ReckonParser;

const SYNTAX_HINT: &str = "write numbers separated by + - × ÷ (or * /), with parentheses around finished sub-expressions";

struct ParseContext<'a> {
    source_id: String,
    source_text: Arc<str>,
    limits: &'a Limits,
    entries: usize,
}

impl ParseContext<'_> {
    fn error(&self, message: impl Into<String>, pair: &Pair<Rule>) -> ReckonError {
        ReckonError::parse(
            message,
            Span::from_pest_span(pair.as_span()),
            self.source_id.clone(),
            self.source_text.clone(),
        )
    }

    fn count_entry(&mut self) -> Result<(), ReckonError> {
        self.entries += 1;
        if self.entries > self.limits.max_entries {
            return Err(ReckonError::ResourceLimitExceeded {
                limit_name: "max_entries".to_string(),
                limit_value: self.limits.max_entries.to_string(),
                actual_value: format!("more than {}", self.limits.max_entries),
                suggestion: "Split the expression into fewer numbers and operators".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse an expression with default limits
pub fn parse_expression(text: &str) -> Result<Vec<Element>, ReckonError> {
    parse(text, None, &Limits::default())
}

/// Parse a complete or partially built expression.
///
/// A trailing operator is accepted at the top level; groups must be complete
/// and must have a finite value.
pub fn parse(
    text: &str,
    source_id: Option<String>,
    limits: &Limits,
) -> Result<Vec<Element>, ReckonError> {
    if text.len() > limits.max_input_bytes {
        return Err(ReckonError::ResourceLimitExceeded {
            limit_name: "max_input_bytes".to_string(),
            limit_value: format!("{} bytes", limits.max_input_bytes),
            actual_value: format!("{} bytes", text.len()),
            suggestion: "Shorten the expression".to_string(),
        });
    }

    let mut context = ParseContext {
        source_id: source_id.unwrap_or_else(|| "<input>".to_string()),
        source_text: Arc::from(text),
        limits,
        entries: 0,
    };

    let pairs = ReckonParser::parse(Rule::expression, text).map_err(|e| {
        let (start, end) = match e.location {
            pest::error::InputLocation::Pos(pos) => (pos, pos),
            pest::error::InputLocation::Span((start, end)) => (start, end),
        };
        let (line, col) = match e.line_col {
            pest::error::LineColLocation::Pos((line, col)) => (line, col),
            pest::error::LineColLocation::Span((line, col), _) => (line, col),
        };
        ReckonError::parse_with_suggestion(
            format!("{}", e.variant),
            Span {
                start,
                end,
                line,
                col,
            },
            context.source_id.clone(),
            context.source_text.clone(),
            SYNTAX_HINT,
        )
    })?;

    let mut elements = Vec::new();
    for pair in pairs {
        if pair.as_rule() != Rule::expression {
            continue;
        }
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::sequence => elements.extend(parse_sequence(inner, &mut context, 0)?),
                Rule::operator => {
                    context.count_entry()?;
                    elements.push(Element::Operator(parse_operator(&inner, &context)?));
                }
                Rule::EOI => {}
                other => {
                    return Err(context.error(format!("Unexpected {:?} in expression", other), &inner))
                }
            }
        }
    }

    Ok(elements)
}

fn parse_sequence(
    pair: Pair<Rule>,
    context: &mut ParseContext,
    depth: usize,
) -> Result<Vec<Element>, ReckonError> {
    let mut elements = Vec::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => {
                context.count_entry()?;
                elements.push(Element::Number(parse_number(&inner, context)?));
            }
            Rule::operator => {
                context.count_entry()?;
                elements.push(Element::Operator(parse_operator(&inner, context)?));
            }
            Rule::group => elements.push(Element::Term(parse_group(inner, context, depth + 1)?)),
            other => {
                return Err(context.error(format!("Unexpected {:?} in expression", other), &inner))
            }
        }
    }
    Ok(elements)
}

fn parse_group(
    pair: Pair<Rule>,
    context: &mut ParseContext,
    depth: usize,
) -> Result<Term, ReckonError> {
    if depth > context.limits.max_nesting_depth {
        return Err(ReckonError::ResourceLimitExceeded {
            limit_name: "max_nesting_depth".to_string(),
            limit_value: context.limits.max_nesting_depth.to_string(),
            actual_value: depth.to_string(),
            suggestion: "Use fewer nested parentheses".to_string(),
        });
    }

    let span_pair = pair.clone();
    let sequence = pair
        .into_inner()
        .next()
        .ok_or_else(|| context.error("Empty group", &span_pair))?;
    let elements = parse_sequence(sequence, context, depth)?;

    Term::from_elements(elements).map_err(|e| match e {
        ReckonError::IncompleteExpression(_) => ReckonError::parse_with_suggestion(
            "A group must combine at least two numbers",
            Span::from_pest_span(span_pair.as_span()),
            context.source_id.clone(),
            context.source_text.clone(),
            "remove the parentheses around a single number",
        ),
        ReckonError::UndefinedTerm(_) => {
            context.error("This group divides by zero", &span_pair)
        }
        other => other,
    })
}

fn parse_number(pair: &Pair<Rule>, context: &ParseContext) -> Result<Decimal, ReckonError> {
    Decimal::from_str(pair.as_str())
        .map_err(|e| context.error(format!("Invalid number '{}': {}", pair.as_str(), e), pair))
}

fn parse_operator(pair: &Pair<Rule>, context: &ParseContext) -> Result<Operator, ReckonError> {
    Operator::from_str(pair.as_str())
        .map_err(|_| context.error(format!("Unknown operator '{}'", pair.as_str()), pair))
}
