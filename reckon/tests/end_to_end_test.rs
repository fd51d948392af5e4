use chrono::NaiveDate;
use reckon::*;
use rust_decimal::Decimal;

fn replay_text(session: &mut Session, text: &str) -> Replay {
    let elements = parse_expression(text).unwrap();
    session.replay(&elements)
}

#[test]
fn test_end_to_end_famous_puzzle() {
    let puzzle = Puzzle::new(vec![25, 50, 75, 100, 3, 6], 952);
    let mut session = Session::new(puzzle).unwrap();

    let replay = replay_text(&mut session, "(((100 + 6) × 3 × 75) - 50) ÷ 25");
    if let Some(step) = replay.rejected_step() {
        panic!("step '{}' was rejected: {:?}", step.entry, step.outcome);
    }

    let finalized: Vec<TermId> = replay
        .steps
        .iter()
        .filter_map(|step| match step.outcome {
            MoveOutcome::Finalized { id } => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(
        finalized,
        vec![TermId::new(7), TermId::new(8), TermId::new(9)]
    );

    assert_eq!(
        session.submit(),
        Submission::Solved {
            value: Decimal::from(952)
        }
    );
    assert_eq!(
        session.expression().to_string(),
        "(((100 + 6) × 3 × 75) - 50) ÷ 25"
    );
}

#[test]
fn test_end_to_end_step_by_step() {
    let mut session = Session::new(Puzzle::new(vec![25, 50, 75, 100, 3, 6], 952)).unwrap();

    // 100 + 6
    session.place_term(TermId::new(4));
    session.place_operator(Operator::Add);
    session.place_term(TermId::new(6));
    let MoveOutcome::Finalized { id: sum } = session.finalize() else {
        panic!("expected 100 + 6 to finalize");
    };
    assert_eq!(session.pool().get(sum).map(|t| t.value()), Some(Decimal::from(106)));

    // a wrong turn, then back out
    session.place_term(sum);
    session.place_operator(Operator::Divide);
    assert_eq!(
        session.place_term(TermId::new(5)),
        MoveOutcome::rejected(Rejection::Unsafe)
    );
    session.clear();
    assert!(session.expression().is_empty());
    assert_eq!(session.pool().len(), 5);

    // the returned 106 has a fresh id
    assert!(!session.pool().contains(sum));
    let sum = session.pool().find_value(Decimal::from(106)).unwrap();

    session.place_term(sum);
    session.place_operator(Operator::Multiply);
    session.place_term(TermId::new(5));
    session.place_operator(Operator::Multiply);
    session.place_term(TermId::new(3));
    session.place_operator(Operator::Subtract);
    session.place_term(TermId::new(2));
    assert_eq!(
        session.expression().evaluate().unwrap(),
        Evaluation::Finite(Decimal::from(23_800))
    );

    let MoveOutcome::Finalized { id: big } = session.finalize() else {
        panic!("expected finalize");
    };
    session.place_term(big);
    session.place_operator(Operator::Divide);
    assert_eq!(session.place_term(TermId::new(1)), MoveOutcome::Appended);
    assert!(session.submit().is_solved());

    session.finalize();
    let solved = session.solved_term().unwrap();
    let term = session.pool().get(solved).unwrap();
    assert_eq!(term.to_string(), "((100 + 6) × 3 × 75 - 50) ÷ 25");
    assert_eq!(term.depth(), 3);
    assert!(session.snapshot().solved);
}

#[test]
fn test_end_to_end_daily_session() {
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let puzzle = Puzzle::daily(date, &PuzzleConfig::default()).unwrap();
    let session = Session::new(puzzle.clone()).unwrap();

    let snapshot = session.snapshot();
    assert_eq!(snapshot.target, puzzle.target);
    assert_eq!(snapshot.pool.len(), 6);
    let values: Vec<Decimal> = snapshot.pool.iter().map(|entry| entry.value).collect();
    let expected: Vec<Decimal> = puzzle.numbers.iter().map(|&n| Decimal::from(n)).collect();
    assert_eq!(values, expected);
    assert!(snapshot.expression.is_empty());
    assert!(!snapshot.complete);
    assert!(!snapshot.can_place_operator);
}

#[test]
fn test_end_to_end_replay_twice_clears_first() {
    let mut session = Session::new(Puzzle::new(vec![4, 6, 2], 26)).unwrap();
    replay_text(&mut session, "4 ×");

    let replay = replay_text(&mut session, "6 × 4 + 2");
    assert_eq!(replay.steps[0].entry, "clear");
    assert!(replay.is_accepted());
    assert!(session.submit().is_solved());
}

#[test]
fn test_end_to_end_terms_survive_json() {
    let mut session = Session::new(Puzzle::new(vec![4, 6, 2], 26)).unwrap();
    replay_text(&mut session, "(4 × 6) + 2");
    session.finalize();

    let id = session.solved_term().unwrap();
    let term = session.pool().get(id).unwrap().clone();
    let json = serde_json::to_string(&term).unwrap();
    let back: Term = serde_json::from_str(&json).unwrap();
    assert_eq!(back, term);

    let tampered = json.replacen("\"26\"", "\"27\"", 1);
    assert!(serde_json::from_str::<Term>(&tampered).is_err());
}
