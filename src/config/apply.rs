use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Values given explicitly on
/// the command line take precedence.
///
/// # Errors
///
/// Returns an error when a config value is out of range or malformed.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration.as_ref()
    {
        args.duration = to_duration(duration, "duration")?;
    }

    if !is_cli(matches, "threads")
        && let Some(threads) = config.threads
    {
        args.threads = PositiveUsize::try_from(threads).map_err(|err| {
            AppError::config(ConfigError::FieldMustBePositive {
                field: "threads".to_owned(),
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = to_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = to_duration(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "verify_tls")
        && let Some(verify_tls) = config.verify_tls
    {
        args.verify_tls = verify_tls;
    }

    if !is_cli(matches, "latency")
        && let Some(latency) = config.latency
    {
        args.latency = latency;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn to_duration(value: &DurationValue, field: &str) -> AppResult<std::time::Duration> {
    value.to_duration().map_err(|err| {
        AppError::config(ConfigError::InvalidDuration {
            field: field.to_owned(),
            source: err,
        })
    })
}
