use super::parsers::parse_duration_text;
use super::test_support::parse_test_args;
use super::*;
use crate::error::{AppError, AppResult, ValidationError};
use std::time::Duration;

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["http-bench", "http://localhost"])?;

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost"),
            "Unexpected url",
        ),
        (args.duration == Duration::from_secs(10), "Unexpected duration"),
        (args.threads.get() == 10, "Unexpected threads"),
        (
            args.request_timeout == Duration::from_secs(5),
            "Unexpected request_timeout",
        ),
        (
            args.connect_timeout == Duration::from_secs(5),
            "Unexpected connect_timeout",
        ),
        (!args.verify_tls, "Expected verify_tls to be false"),
        (!args.latency, "Expected latency to be false"),
        (!args.verbose, "Expected verbose to be false"),
        (args.config.is_none(), "Expected config to be None"),
    ];

    for (ok, message) in checks {
        if !ok {
            return Err(AppError::validation(message));
        }
    }
    Ok(())
}

#[test]
fn parse_args_short_flags() -> AppResult<()> {
    let args = parse_test_args([
        "http-bench",
        "-d",
        "2m",
        "-t",
        "4",
        "https://example.com/health",
    ])?;

    if args.duration != Duration::from_secs(120) {
        return Err(AppError::validation(format!(
            "Unexpected duration: {:?}",
            args.duration
        )));
    }
    if args.threads.get() != 4 {
        return Err(AppError::validation("Unexpected threads"));
    }
    if args.url.as_deref() != Some("https://example.com/health") {
        return Err(AppError::validation("Unexpected url"));
    }
    Ok(())
}

#[test]
fn parse_args_url_is_optional() -> AppResult<()> {
    let args = parse_test_args(["http-bench"])?;
    if args.url.is_some() {
        return Err(AppError::validation("Expected url to be None"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_threads() -> AppResult<()> {
    if parse_test_args(["http-bench", "-t", "0", "http://localhost"]).is_ok() {
        return Err(AppError::validation("Expected zero threads to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_args_rejects_zero_duration() -> AppResult<()> {
    if parse_test_args(["http-bench", "-d", "0s", "http://localhost"]).is_ok() {
        return Err(AppError::validation("Expected zero duration to be rejected"));
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> AppResult<()> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("3", Duration::from_secs(3)),
        ("3s", Duration::from_secs(3)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
        (" 7s ", Duration::from_secs(7)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_text(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!(
                "Unexpected duration for '{}': {:?}",
                input, parsed
            )));
        }
    }
    Ok(())
}

#[test]
fn parse_duration_errors() -> AppResult<()> {
    if !matches!(parse_duration_text(""), Err(ValidationError::DurationEmpty)) {
        return Err(AppError::validation("Expected DurationEmpty"));
    }
    if !matches!(
        parse_duration_text("s"),
        Err(ValidationError::InvalidDurationFormat { .. })
    ) {
        return Err(AppError::validation("Expected InvalidDurationFormat"));
    }
    if !matches!(
        parse_duration_text("5d"),
        Err(ValidationError::InvalidDurationUnit { .. })
    ) {
        return Err(AppError::validation("Expected InvalidDurationUnit"));
    }
    if !matches!(
        parse_duration_text("0ms"),
        Err(ValidationError::DurationZero)
    ) {
        return Err(AppError::validation("Expected DurationZero"));
    }
    if !matches!(
        parse_duration_text("18446744073709551615h"),
        Err(ValidationError::DurationOverflow)
    ) {
        return Err(AppError::validation("Expected DurationOverflow"));
    }
    Ok(())
}

#[test]
fn positive_usize_parsing() -> AppResult<()> {
    let value: PositiveUsize = "12".parse()?;
    if value.get() != 12 {
        return Err(AppError::validation("Unexpected positive value"));
    }
    if "0".parse::<PositiveUsize>().is_ok() {
        return Err(AppError::validation("Expected 0 to be rejected"));
    }
    if "-3".parse::<PositiveUsize>().is_ok() {
        return Err(AppError::validation("Expected negative value to be rejected"));
    }
    Ok(())
}
