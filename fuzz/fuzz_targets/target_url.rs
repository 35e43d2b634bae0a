#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(target) = http_bench::fuzzing::parse_target_input(input) {
            debug_assert!(!target.host.is_empty());
            debug_assert!(target.path.starts_with('/'));
            debug_assert!(!target.host_header.contains(char::is_whitespace));
        }
    }
});
