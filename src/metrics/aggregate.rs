use std::time::Duration;

use super::types::{ErrorCounts, WorkerStats};

/// Nanoseconds per second.
const NS_PER_SEC: u128 = 1_000_000_000;
/// Fixed-point scale for requests/sec.
const RATE_SCALE: u128 = 100;

/// Merged statistics of every worker in a run.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Wall-clock time from worker start until the last worker stopped.
    pub elapsed: Duration,
    pub completed: u64,
    pub bytes: u64,
    pub latency_total: Duration,
    /// Pooled samples; each worker's samples stay in completion order.
    pub latencies: Vec<Duration>,
    pub errors: ErrorCounts,
    pub mean_latency: Duration,
    /// Sample standard deviation; `None` with fewer than two samples.
    pub stdev_latency: Option<Duration>,
    pub max_latency: Option<Duration>,
    /// Requests per second scaled by 100.
    pub requests_per_sec_x100: u64,
    pub bytes_per_sec: u64,
}

impl AggregateReport {
    /// Reduces per-worker statistics into one report.
    ///
    /// Rates use `elapsed` as their shared time denominator and are zero
    /// when nothing completed or no time elapsed.
    #[must_use]
    pub fn from_workers<I>(workers: I, elapsed: Duration) -> Self
    where
        I: IntoIterator<Item = WorkerStats>,
    {
        let mut completed: u64 = 0;
        let mut bytes: u64 = 0;
        let mut latency_total = Duration::ZERO;
        let mut latencies = Vec::new();
        let mut errors = ErrorCounts::default();

        for worker in workers {
            completed = completed.saturating_add(worker.completed);
            bytes = bytes.saturating_add(worker.bytes);
            latency_total = latency_total.saturating_add(worker.latency_total);
            errors.merge(&worker.errors);
            latencies.extend(worker.latencies);
        }

        let mean_latency = mean_duration(latency_total, completed);
        let stdev_latency = sample_stdev(&latencies);
        let max_latency = latencies.iter().max().copied();

        let elapsed_ns = elapsed.as_nanos();
        let requests_per_sec_x100 = per_second(
            u128::from(completed).saturating_mul(RATE_SCALE),
            elapsed_ns,
        );
        let bytes_per_sec = per_second(u128::from(bytes), elapsed_ns);

        Self {
            elapsed,
            completed,
            bytes,
            latency_total,
            latencies,
            errors,
            mean_latency,
            stdev_latency,
            max_latency,
            requests_per_sec_x100,
            bytes_per_sec,
        }
    }

    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.latencies.len()
    }
}

fn mean_duration(total: Duration, count: u64) -> Duration {
    let mean_ns = total
        .as_nanos()
        .checked_div(u128::from(count))
        .unwrap_or(0);
    duration_from_nanos(mean_ns)
}

fn sample_stdev(samples: &[Duration]) -> Option<Duration> {
    let count = u128::try_from(samples.len()).ok()?;
    if count <= 1 {
        return None;
    }
    let sum = samples
        .iter()
        .fold(0_u128, |acc, sample| acc.saturating_add(sample.as_nanos()));
    let mean = sum.checked_div(count)?;
    let squared_deviations = samples.iter().fold(0_u128, |acc, sample| {
        let deviation = sample.as_nanos().abs_diff(mean);
        acc.saturating_add(deviation.saturating_mul(deviation))
    });
    let variance = squared_deviations.checked_div(count.saturating_sub(1))?;
    Some(duration_from_nanos(variance.isqrt()))
}

fn per_second(amount: u128, elapsed_ns: u128) -> u64 {
    let scaled = amount
        .saturating_mul(NS_PER_SEC)
        .checked_div(elapsed_ns)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn duration_from_nanos(nanos: u128) -> Duration {
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}
