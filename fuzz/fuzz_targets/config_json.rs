#![no_main]

use http_bench::config::types::ConfigFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let parsed: Option<ConfigFile> = serde_json::from_slice(data).ok();
    let applied = http_bench::fuzzing::apply_config_from_json(data);
    if applied.is_ok() {
        debug_assert!(parsed.is_some());
        if let Some(threads) = parsed.and_then(|config| config.threads) {
            debug_assert!(threads >= 1);
        }
    }
});
