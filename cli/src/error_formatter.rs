use ariadne::{Color, Label, Report, ReportKind, Source};
use reckon::{ReckonError, Span};
use std::ops::Range;

/// Format a ReckonError with fancy terminal output using Ariadne
pub fn format_error(error: &ReckonError) -> String {
    match error {
        ReckonError::Parse(details) => {
            let mut output = Vec::new();
            let range = char_range(&details.source_text, &details.span);

            let mut report = Report::build(ReportKind::Error, &details.source_id, range.start)
                .with_message(format!("Parse error: {}", details.message))
                .with_label(
                    Label::new((&details.source_id, range))
                        .with_message("here")
                        .with_color(Color::Red),
                );

            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report.finish().write(
                (
                    &details.source_id,
                    Source::from(details.source_text.as_ref()),
                ),
                &mut output,
            ) {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => format!("{}", error),
            }
        }
        ReckonError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        other => format!("{}", other),
    }
}

/// Ariadne counts characters, spans count bytes
fn char_range(source: &str, span: &Span) -> Range<usize> {
    let to_chars = |byte: usize| {
        let byte = byte.min(source.len());
        source
            .char_indices()
            .take_while(|(index, _)| *index < byte)
            .count()
    };
    to_chars(span.start)..to_chars(span.end)
}
