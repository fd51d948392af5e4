#![no_main]

use libfuzzer_sys::fuzz_target;
use reckon::parse_expression;

fuzz_target!(|depth: u8| {
    let depth = (depth as usize % 50) + 1;

    let mut expr = String::from("1 + 1");
    for _ in 0..depth {
        expr = format!("({}) + 1", expr);
    }

    let _ = parse_expression(&expr);
});
