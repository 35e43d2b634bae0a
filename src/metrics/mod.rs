//! Per-worker statistics, cross-worker aggregation, and latency histograms.
mod aggregate;
mod histogram;
mod types;


pub use aggregate::AggregateReport;
pub use histogram::{LatencyHistogram, LatencyPercentiles};
pub use types::{ErrorCategory, ErrorCounts, WorkerStats};
