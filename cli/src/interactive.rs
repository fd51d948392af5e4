use crate::formatter::Formatter;
use anyhow::{Context, Result};
use inquire::{InquireError, Select};
use reckon::{MoveOutcome, Operator, Puzzle, Session, Submission, TermId};
use std::fmt;
use tracing::debug;

enum Choice {
    Term { id: TermId, label: String },
    Operator(Operator),
    Finalize,
    Undo,
    Clear,
    Restart,
    Quit,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Term { label, .. } => write!(f, "{}", label),
            Choice::Operator(op) => write!(f, "{}", op),
            Choice::Finalize => write!(f, "use (turn the expression into a new term)"),
            Choice::Undo => write!(f, "undo"),
            Choice::Clear => write!(f, "clear"),
            Choice::Restart => write!(f, "restart"),
            Choice::Quit => write!(f, "quit"),
        }
    }
}

/// Play `puzzle` until it is solved or the player quits
pub fn play(puzzle: Puzzle, label: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reckon=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let formatter = Formatter::default();
    let mut session = Session::new(puzzle)?;

    println!("Puzzle {}: reach {}\n", label, session.target());

    loop {
        let snapshot = session.snapshot();
        print!("{}", formatter.format_board(&snapshot));

        if snapshot.solved || session.submit().is_solved() {
            println!("\nSolved!");
            return Ok(());
        }

        let choice = match Select::new("Your move:", choices(&session))
            .with_help_message("Pick a term or an operator; a term after a term replaces it")
            .with_page_size(12)
            .prompt()
        {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(())
            }
            Err(e) => return Err(e).context("Failed to get move"),
        };

        let outcome = match choice {
            Choice::Term { id, .. } => session.place_term(id),
            Choice::Operator(op) => session.place_operator(op),
            Choice::Finalize => session.finalize(),
            Choice::Undo => session.undo(),
            Choice::Clear => session.clear(),
            Choice::Restart => {
                session.restart();
                continue;
            }
            Choice::Quit => {
                if let Submission::Missed { value, target } = session.submit() {
                    println!("Closest so far: {} (target {})", value.normalize(), target);
                }
                return Ok(());
            }
        };

        if let MoveOutcome::Rejected { reason } = &outcome {
            debug!(?reason, expression = %session.expression(), "move rejected");
            println!("\n{}\n", reason);
        } else {
            println!("\n{}\n", formatter.format_outcome(&outcome));
        }
    }
}

fn choices(session: &Session) -> Vec<Choice> {
    let mut choices: Vec<Choice> = session
        .pool()
        .iter()
        .map(|(id, term)| {
            let label = if term.is_leaf() {
                format!("{}  {}", id, term)
            } else {
                format!("{}  {}  ({})", id, term.value().normalize(), term)
            };
            Choice::Term { id, label }
        })
        .collect();

    if !session.expression().is_empty() {
        choices.extend(Operator::ALL.into_iter().map(Choice::Operator));
    }
    if session.expression().is_complete() {
        choices.push(Choice::Finalize);
    }
    if !session.expression().is_empty() {
        choices.push(Choice::Undo);
        choices.push(Choice::Clear);
    }
    choices.push(Choice::Restart);
    choices.push(Choice::Quit);
    choices
}
