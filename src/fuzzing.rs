use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tokio::io::BufReader;

use crate::args::{BenchArgs, PositiveUsize, parse_duration_arg};
use crate::config::apply_config;
use crate::config::types::ConfigFile;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::http::{Fault, TargetUrl, parse_target, read_response};

/// Pseudo path reported for in-memory config input.
const FUZZ_CONFIG_PATH: &str = "<fuzz>";

thread_local! {
    static BASE_MATCHES: ArgMatches = BenchArgs::command().get_matches_from(["http-bench"]);
}

/// Summary of a response the parser accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseSummary {
    pub status: u64,
    pub keep_alive: bool,
    pub content_length: u64,
    pub bytes: u64,
}

/// How the parser classified an input it rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseRejection {
    Recoverable,
    Fatal,
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Validates a target URL.
///
/// # Errors
///
/// Returns an error when the URL is not a usable http(s) URL.
pub fn parse_target_input(input: &str) -> AppResult<TargetUrl> {
    parse_target(input)
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input).map_err(|source| {
        AppError::config(ConfigError::ParseToml {
            path: PathBuf::from(FUZZ_CONFIG_PATH),
            source,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input).map_err(|source| {
        AppError::config(ConfigError::ParseJson {
            path: PathBuf::from(FUZZ_CONFIG_PATH),
            source,
        })
    })?;
    apply_config_to_defaults(&config)
}

/// Loads a config file from disk to exercise extension handling.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config_file_input(path: &Path) -> AppResult<()> {
    crate::config::load_config_file(path).map(|_| ())
}

/// Runs the response parser over an in-memory byte stream.
///
/// # Errors
///
/// Returns an error when the runtime cannot be built.
pub fn parse_response_input(
    input: &[u8],
) -> AppResult<Result<ResponseSummary, ResponseRejection>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .map_err(|source| ValidationError::RuntimeBuildFailed { source })?;
    let mut reader = BufReader::new(Cursor::new(input));
    let parsed = runtime.block_on(read_response(&mut reader));
    Ok(match parsed {
        Ok(response) => Ok(ResponseSummary {
            status: response.status,
            keep_alive: response.keep_alive,
            content_length: response.content_length,
            bytes: response.bytes,
        }),
        Err(Fault::Fatal(_)) => Err(ResponseRejection::Fatal),
        Err(Fault::Io { .. } | Fault::Timeout) => Err(ResponseRejection::Recoverable),
    })
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = BenchArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}
