use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::BenchArgs;
use crate::error::{AppError, AppResult};

fn parse_with_matches(argv: &[&str]) -> AppResult<(BenchArgs, clap::ArgMatches)> {
    let matches = BenchArgs::command().try_get_matches_from(argv)?;
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("http-bench.toml");
    let content = r#"
url = "http://localhost:3000/ping"
duration = "30s"
threads = 4
timeout = 2
connect_timeout = "750ms"
verify_tls = true
latency = true
"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.url.as_deref() != Some("http://localhost:3000/ping") {
        return Err(AppError::config("Unexpected url"));
    }
    if config.threads != Some(4) {
        return Err(AppError::config("Unexpected threads"));
    }
    let connect_timeout = config
        .connect_timeout
        .as_ref()
        .ok_or_else(|| AppError::config("Expected connect_timeout"))?
        .to_duration()?;
    if connect_timeout != Duration::from_millis(750) {
        return Err(AppError::config(format!(
            "Unexpected connect_timeout: {:?}",
            connect_timeout
        )));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("http-bench.json");
    let content = r#"{ "url": "https://example.com", "duration": 5, "threads": 2 }"#;
    std::fs::write(&path, content)?;

    let config = load_config_file(&path)?;
    if config.url.as_deref() != Some("https://example.com") {
        return Err(AppError::config("Unexpected url"));
    }
    let duration = config
        .duration
        .as_ref()
        .ok_or_else(|| AppError::config("Expected duration"))?
        .to_duration()?;
    if duration != Duration::from_secs(5) {
        return Err(AppError::config("Unexpected duration"));
    }
    Ok(())
}

#[test]
fn rejects_unknown_extension() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("http-bench.yaml");
    std::fs::write(&path, "url: x")?;
    if load_config_file(&path).is_ok() {
        return Err(AppError::config("Expected unsupported extension error"));
    }
    Ok(())
}

#[test]
fn rejects_unknown_fields() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("http-bench.toml");
    std::fs::write(&path, "connections = 3\n")?;
    if load_config_file(&path).is_ok() {
        return Err(AppError::config("Expected unknown field error"));
    }
    Ok(())
}

#[test]
fn config_fills_values_not_given_on_cli() -> AppResult<()> {
    let (mut args, matches) = parse_with_matches(&["http-bench", "-t", "3"])?;
    let config = ConfigFile {
        url: Some("http://localhost:8080".to_owned()),
        duration: Some(super::types::DurationValue::Text("1m".to_owned())),
        threads: Some(50),
        latency: Some(true),
        ..ConfigFile::default()
    };

    apply_config(&mut args, &matches, &config)?;

    if args.url.as_deref() != Some("http://localhost:8080") {
        return Err(AppError::config("Expected url from config"));
    }
    if args.duration != Duration::from_secs(60) {
        return Err(AppError::config("Expected duration from config"));
    }
    if args.threads.get() != 3 {
        return Err(AppError::config("Expected CLI threads to win"));
    }
    if !args.latency {
        return Err(AppError::config("Expected latency from config"));
    }
    Ok(())
}

#[test]
fn config_rejects_zero_threads() -> AppResult<()> {
    let (mut args, matches) = parse_with_matches(&["http-bench", "http://localhost"])?;
    let config = ConfigFile {
        threads: Some(0),
        ..ConfigFile::default()
    };
    if apply_config(&mut args, &matches, &config).is_ok() {
        return Err(AppError::config("Expected zero threads to be rejected"));
    }
    Ok(())
}
