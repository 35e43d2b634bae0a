#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    let Some((selector, payload)) = data.split_first() else {
        return;
    };

    let suffix = match selector % 4 {
        0 => ".toml",
        1 => ".json",
        2 => ".txt",
        _ => "",
    };

    let Ok(mut file) = tempfile::Builder::new().suffix(suffix).tempfile() else {
        return;
    };
    if file.write_all(payload).is_err() {
        return;
    }

    let path = file.path().to_path_buf();
    if http_bench::fuzzing::load_config_file_input(&path).is_ok() {
        debug_assert!(suffix == ".toml" || suffix == ".json");
    }
});
