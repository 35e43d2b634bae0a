#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(parsed) = http_bench::fuzzing::parse_response_input(data) else {
        return;
    };
    if let Ok(response) = parsed {
        debug_assert!(response.status != 400);
        debug_assert!(response.bytes >= response.content_length);
        debug_assert!(response.bytes <= data.len() as u64);
    }
});
