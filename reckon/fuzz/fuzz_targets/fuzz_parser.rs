#![no_main]

use libfuzzer_sys::fuzz_target;
use reckon::parse_expression;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(elements) = parse_expression(s) {
            let _ = reckon::evaluate(&elements);
        }
    }
});
