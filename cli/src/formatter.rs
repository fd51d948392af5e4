use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, Row, Table};
use reckon::{Element, Evaluation, MoveOutcome, Puzzle, Replay, Snapshot, Submission};

pub struct Formatter {}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn format_puzzle(&self, puzzle: &Puzzle, label: &str) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new(format!("Puzzle ({})", label)).set_alignment(CellAlignment::Left),
            Cell::new("Target").set_alignment(CellAlignment::Right),
        ]));

        let numbers: Vec<String> = puzzle.numbers.iter().map(|n| n.to_string()).collect();
        table.add_row(Row::from(vec![
            Cell::new(numbers.join("  ")),
            Cell::new(puzzle.target).set_alignment(CellAlignment::Right),
        ]));

        format!("{}\n", table)
    }

    pub fn format_evaluation(
        &self,
        elements: &[Element],
        value: &Evaluation,
        complete: bool,
    ) -> String {
        let expression = render(elements);
        let value = match value {
            Evaluation::Finite(_) => value.to_string(),
            Evaluation::Infinite => "undefined".to_string(),
        };
        let mut output = format!("{} = {}\n", expression, value);
        if !complete {
            output.push_str("(expression is not complete)\n");
        }
        output
    }

    /// Step table of a replay followed by the verdict
    pub fn format_check(&self, puzzle: &Puzzle, replay: &Replay, submission: &Submission) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("#").set_alignment(CellAlignment::Right),
            Cell::new("Move"),
            Cell::new("Result"),
        ]));

        for (index, step) in replay.steps.iter().enumerate() {
            table.add_row(Row::from(vec![
                Cell::new(index + 1).set_alignment(CellAlignment::Right),
                Cell::new(&step.entry),
                Cell::new(self.format_outcome(&step.outcome)),
            ]));
        }

        let mut output = format!("{}\n", table);
        if let Some(step) = replay.rejected_step() {
            output.push_str(&format!("Stopped at '{}'\n", step.entry));
        }
        output.push_str(&self.format_submission(puzzle, submission));
        output
    }

    pub fn format_outcome(&self, outcome: &MoveOutcome) -> String {
        match outcome {
            MoveOutcome::Appended => "placed".to_string(),
            MoveOutcome::Swapped { returned: Some(id) } => format!("swapped, {} back in pool", id),
            MoveOutcome::Swapped { returned: None } => "swapped".to_string(),
            MoveOutcome::Removed { returned: Some(id) } => format!("removed, {} back in pool", id),
            MoveOutcome::Removed { returned: None } => "removed".to_string(),
            MoveOutcome::Cleared { returned } => {
                format!("cleared, {} term(s) back in pool", returned.len())
            }
            MoveOutcome::Finalized { id } => format!("new term {}", id),
            MoveOutcome::Rejected { reason } => format!("rejected: {}", reason),
        }
    }

    pub fn format_submission(&self, puzzle: &Puzzle, submission: &Submission) -> String {
        match submission {
            Submission::Solved { value } => {
                format!("Solved: {} = {}\n", value.normalize(), puzzle.target)
            }
            Submission::Missed { value, target } => {
                format!("Missed: got {}, target {}\n", value.normalize(), target)
            }
            Submission::Incomplete => "Not complete\n".to_string(),
            Submission::Undefined => "Undefined (division by zero)\n".to_string(),
        }
    }

    /// The board during interactive play
    pub fn format_board(&self, snapshot: &Snapshot) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(Row::from(vec![
            Cell::new("Term").set_alignment(CellAlignment::Right),
            Cell::new("Value").set_alignment(CellAlignment::Right),
            Cell::new("Built from"),
        ]));

        for entry in &snapshot.pool {
            let built_from = if entry.term.is_leaf() {
                String::new()
            } else {
                entry.display.clone()
            };
            table.add_row(Row::from(vec![
                Cell::new(entry.id).set_alignment(CellAlignment::Right),
                Cell::new(entry.value).set_alignment(CellAlignment::Right),
                Cell::new(built_from),
            ]));
        }

        let mut output = format!("Target: {}\n{}\n", snapshot.target, table);
        let expression = if snapshot.display.is_empty() {
            "(empty)"
        } else {
            snapshot.display.as_str()
        };
        output.push_str(&format!("Expression: {}", expression));
        if let Some(value) = &snapshot.value {
            output.push_str(&format!(" = {}", value));
        }
        output.push('\n');
        output
    }
}

fn render(elements: &[Element]) -> String {
    elements
        .iter()
        .map(|el| el.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckon::{parse_expression, Operator, Session, TermId};
    use rust_decimal::Decimal;

    #[test]
    fn test_format_puzzle() {
        let puzzle = Puzzle::new(vec![25, 50, 3, 6], 952);
        let output = Formatter::default().format_puzzle(&puzzle, "2025-06-01");
        assert!(output.contains("Puzzle (2025-06-01)"));
        assert!(output.contains("25  50  3  6"));
        assert!(output.contains("952"));
    }

    #[test]
    fn test_format_evaluation() {
        let formatter = Formatter::default();
        let elements = parse_expression("2 + 3 × 4").unwrap();
        let value = Evaluation::Finite(Decimal::from(14));
        assert_eq!(
            formatter.format_evaluation(&elements, &value, true),
            "2 + 3 × 4 = 14\n"
        );

        let elements = parse_expression("5 ÷ 0").unwrap();
        assert_eq!(
            formatter.format_evaluation(&elements, &Evaluation::Infinite, true),
            "5 ÷ 0 = undefined\n"
        );
    }

    #[test]
    fn test_incomplete_evaluation_is_flagged() {
        let elements = parse_expression("4 ×").unwrap();
        let value = Evaluation::Finite(Decimal::from(4));
        let output = Formatter::default().format_evaluation(&elements, &value, false);
        assert!(output.contains("not complete"));
    }

    #[test]
    fn test_format_check_solved() {
        let puzzle = Puzzle::new(vec![4, 6, 2], 26);
        let mut session = Session::new(puzzle.clone()).unwrap();
        let replay = session.replay(&parse_expression("(4 × 6) + 2").unwrap());
        let output = Formatter::default().format_check(&puzzle, &replay, &session.submit());

        assert!(output.contains("finalize 4 × 6"));
        assert!(output.contains("new term #4"));
        assert!(output.contains("Solved: 26 = 26"));
    }

    #[test]
    fn test_format_check_rejected() {
        let puzzle = Puzzle::new(vec![10, 3], 3);
        let mut session = Session::new(puzzle.clone()).unwrap();
        let replay = session.replay(&parse_expression("10 ÷ 3").unwrap());
        let output = Formatter::default().format_check(&puzzle, &replay, &session.submit());

        assert!(output.contains("rejected: that move would give a fraction"));
        assert!(output.contains("Stopped at '3'"));
        assert!(output.contains("Not complete"));
    }

    #[test]
    fn test_format_board() {
        let mut session = Session::new(Puzzle::new(vec![4, 6, 2], 26)).unwrap();
        session.place_term(TermId::new(1));
        session.place_operator(Operator::Multiply);
        session.place_term(TermId::new(2));
        session.finalize();
        session.place_term(TermId::new(4));

        let output = Formatter::default().format_board(&session.snapshot());
        assert!(output.contains("Target: 26"));
        assert!(output.contains("#3"));
        assert!(output.contains("Expression: (4 × 6)\n"));
    }
}
