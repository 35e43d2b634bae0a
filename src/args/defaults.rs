pub(crate) const DEFAULT_USER_AGENT: &str = concat!("http-bench/", env!("CARGO_PKG_VERSION"));

/// Config filenames picked up from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["http-bench.toml", "http-bench.json"];
