use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::{BenchArgs, DEFAULT_CONFIG_FILES};
use crate::config::{apply_config, load_config};
use crate::error::{AppResult, ValidationError};

pub(crate) fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose);

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, &matches, &config)?;
    }

    if args.url.is_none() {
        tracing::debug!("No URL given on the command line or in config.");
        print_help()?;
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|source| ValidationError::RuntimeBuildFailed { source })?;

    let result = runtime.block_on(run_local(args));
    if let Err(err) = &result {
        tracing::error!("{}", err);
    }
    result
}

fn parse_args() -> AppResult<Option<(BenchArgs, ArgMatches)>> {
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        print_help()?;
        return Ok(None);
    }

    let matches = BenchArgs::command().get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok(Some((args, matches)))
}

fn print_help() -> AppResult<()> {
    BenchArgs::command().print_help()?;
    println!();
    Ok(())
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}
