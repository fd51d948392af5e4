//! Source locations for textual expressions

/// Span representing a location in an expression string
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }

    /// Span of the whole input, used when no finer location is known
    pub fn whole(source: &str) -> Self {
        Self {
            start: 0,
            end: source.len(),
            line: 1,
            col: 1,
        }
    }
}
