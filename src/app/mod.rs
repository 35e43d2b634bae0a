mod format;
mod runner;
mod summary;

use crate::args::BenchArgs;
use crate::error::AppResult;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

/// Runs one benchmark and prints its report to stdout.
///
/// # Errors
///
/// Returns an error when the target cannot be resolved, a worker hits a
/// fatal fault, or the signal handler task fails.
pub async fn run_local(args: BenchArgs) -> AppResult<()> {
    let url = args.url.as_deref().unwrap_or_default();
    println!(
        "{}",
        summary::banner_line(args.duration, url, args.threads.get())
    );

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let outcome = runner::run_bench(&args, &shutdown_tx).await;

    drop(shutdown_tx.send(()));
    signal_handle.await?;

    let report = outcome?;
    summary::print_summary(&report, args.latency);
    Ok(())
}
