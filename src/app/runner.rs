use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::args::{BenchArgs, DEFAULT_USER_AGENT};
use crate::error::{AppResult, HttpError, ValidationError};
use crate::http::{
    ResolvedTarget, TlsSettings, Worker, WorkerPlan, build_tls_connector, render_get_request,
    resolve_target,
};
use crate::metrics::{AggregateReport, WorkerStats};
use crate::shutdown::ShutdownSender;

type WorkerResult = Result<WorkerStats, HttpError>;

fn build_plan(
    args: &BenchArgs,
    target: &ResolvedTarget,
    started: Instant,
) -> AppResult<WorkerPlan> {
    let tls = if target.url.scheme.is_tls() {
        Some(TlsSettings {
            connector: build_tls_connector(args.verify_tls)?,
            domain: target.url.host.clone(),
        })
    } else {
        None
    };
    let deadline = started
        .checked_add(args.duration)
        .ok_or(ValidationError::DurationOverflow)?;

    Ok(WorkerPlan {
        addr: target.addr,
        request: render_get_request(&target.url, DEFAULT_USER_AGENT),
        tls,
        connect_timeout: args.connect_timeout,
        request_timeout: args.request_timeout,
        deadline,
    })
}

/// Starts every worker, waits for all of them, and reduces their stats.
///
/// A fatal error in any worker broadcasts shutdown to the others and is
/// returned once every worker has reported.
pub(crate) async fn run_bench(
    args: &BenchArgs,
    shutdown_tx: &ShutdownSender,
) -> AppResult<AggregateReport> {
    let raw_url = args.url.as_deref().ok_or(ValidationError::MissingUrl)?;
    let target = resolve_target(raw_url)?;
    debug!("Resolved {} to {}", target.url.host, target.addr);

    let threads = args.threads.get();
    let started = Instant::now();
    let plan = Arc::new(build_plan(args, &target, started)?);

    let mut receivers = Vec::with_capacity(threads);
    for id in 0..threads {
        let (done_tx, done_rx) = oneshot::channel::<WorkerResult>();
        let worker = Worker::new(id, Arc::clone(&plan), shutdown_tx.subscribe());
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            let result = worker.run().await;
            if let Err(err) = &result {
                error!("Worker {} failed: {}", id, err);
                drop(shutdown_tx.send(()));
            }
            drop(done_tx.send(result));
        });
        receivers.push(done_rx);
    }

    let mut stats = Vec::with_capacity(threads);
    let mut fatal = None;
    for (id, done_rx) in receivers.into_iter().enumerate() {
        match done_rx.await {
            Ok(Ok(worker_stats)) => stats.push(worker_stats),
            Ok(Err(err)) => {
                fatal.get_or_insert(err);
            }
            Err(err) => {
                debug!("Worker {} dropped its result channel: {}", id, err);
                fatal.get_or_insert(HttpError::WorkerLost { worker: id });
            }
        }
    }
    let elapsed = started.elapsed();

    if let Some(err) = fatal {
        return Err(err.into());
    }
    info!("All {} workers finished", threads);
    Ok(AggregateReport::from_workers(stats, elapsed))
}
