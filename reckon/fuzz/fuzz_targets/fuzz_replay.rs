#![no_main]

use libfuzzer_sys::fuzz_target;
use reckon::{parse_expression, Puzzle, PuzzleConfig, Session};

fuzz_target!(|input: (u64, &str)| {
    let (seed, text) = input;
    let Ok(puzzle) = Puzzle::generate(seed, &PuzzleConfig::default()) else {
        return;
    };
    let Ok(mut session) = Session::new(puzzle) else {
        return;
    };
    if let Ok(elements) = parse_expression(text) {
        let replay = session.replay(&elements);
        if replay.is_accepted() && session.expression().is_complete() {
            let _ = session.finalize();
        }
        let _ = session.snapshot();
    }
});
