use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::sync::broadcast::error::TryRecvError;
use tokio::time::{Instant, timeout};
use tracing::debug;

use super::connection::{Connection, ConnectionManager};
use super::fault::Fault;
use super::response::{ParsedResponse, read_response};
use super::tls::TlsSettings;
use crate::error::HttpError;
use crate::metrics::{ErrorCategory, WorkerStats};
use crate::shutdown::ShutdownReceiver;

/// Read-only settings shared by every worker in a run.
pub(crate) struct WorkerPlan {
    pub(crate) addr: std::net::SocketAddr,
    pub(crate) request: Vec<u8>,
    pub(crate) tls: Option<TlsSettings>,
    pub(crate) connect_timeout: Duration,
    pub(crate) request_timeout: Duration,
    pub(crate) deadline: Instant,
}

/// One closed-loop request driver: a single connection, one request in
/// flight, the next request issued as soon as the previous one finished.
pub(crate) struct Worker {
    id: usize,
    plan: Arc<WorkerPlan>,
    connection: ConnectionManager,
    stats: WorkerStats,
    shutdown_rx: ShutdownReceiver,
}

impl Worker {
    pub(crate) fn new(id: usize, plan: Arc<WorkerPlan>, shutdown_rx: ShutdownReceiver) -> Self {
        let connection = ConnectionManager::new(plan.addr, plan.tls.clone(), plan.connect_timeout);
        Self {
            id,
            plan,
            connection,
            stats: WorkerStats::default(),
            shutdown_rx,
        }
    }

    /// Runs until the deadline passes or shutdown is broadcast.
    ///
    /// An attempt already in flight when the deadline passes is allowed to
    /// finish and is counted.
    pub(crate) async fn run(mut self) -> Result<WorkerStats, HttpError> {
        debug!("Worker {} started", self.id);
        while !self.should_stop() {
            if let Err(err) = self.attempt().await {
                self.connection.teardown();
                debug!("Worker {} aborting: {}", self.id, err);
                return Err(err);
            }
        }
        self.connection.teardown();
        debug!(
            "Worker {} finished: {} completed, {} errors, {} connections",
            self.id,
            self.stats.completed,
            self.stats.errors.total(),
            self.connection.opened()
        );
        Ok(self.stats)
    }

    fn should_stop(&mut self) -> bool {
        if Instant::now() >= self.plan.deadline {
            return true;
        }
        match self.shutdown_rx.try_recv() {
            Ok(()) | Err(TryRecvError::Closed | TryRecvError::Lagged(_)) => true,
            Err(TryRecvError::Empty) => false,
        }
    }

    async fn attempt(&mut self) -> Result<(), HttpError> {
        match self.exchange().await {
            Ok((response, latency)) => {
                self.record(&response, latency);
                Ok(())
            }
            Err(Fault::Fatal(err)) => Err(err),
            Err(fault) => {
                debug!("Worker {} {}", self.id, fault);
                if let Some(category) = fault.category() {
                    self.stats.record_error(category);
                }
                self.connection.teardown();
                Ok(())
            }
        }
    }

    fn record(&mut self, response: &ParsedResponse, latency: Duration) {
        if response.is_error_status() {
            self.stats.record_error(ErrorCategory::Status);
        } else {
            self.stats.record_success(latency, response.bytes);
        }
        if !response.keep_alive {
            self.connection.teardown();
        }
    }

    async fn exchange(&mut self) -> Result<(ParsedResponse, Duration), Fault> {
        let stream = self.connection.ensure_connection().await?;
        let started = Instant::now();

        match timeout(
            self.plan.request_timeout,
            write_request(stream, &self.plan.request),
        )
        .await
        {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(Fault::write(err)),
            Err(_) => return Err(Fault::Timeout),
        }

        let response = match timeout(self.plan.request_timeout, read_response(stream)).await {
            Ok(result) => result?,
            Err(_) => return Err(Fault::Timeout),
        };
        Ok((response, started.elapsed()))
    }
}

async fn write_request(stream: &mut Connection, request: &[u8]) -> std::io::Result<()> {
    stream.write_all(request).await?;
    stream.flush().await
}
