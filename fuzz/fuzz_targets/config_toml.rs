#![no_main]

use http_bench::config::types::ConfigFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let parsed: Option<ConfigFile> = toml::from_str(input).ok();
        let applied = http_bench::fuzzing::apply_config_from_toml(input);
        if applied.is_ok() {
            debug_assert!(parsed.is_some());
            if let Some(threads) = parsed.and_then(|config| config.threads) {
                debug_assert!(threads >= 1);
            }
        }
    }
});
