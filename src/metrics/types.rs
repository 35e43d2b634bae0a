use std::fmt;
use std::time::Duration;

/// Recoverable failure classes tallied per worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Connect,
    Write,
    Read,
    Status,
    Timeout,
}

impl ErrorCategory {
    /// Report order.
    pub const ALL: [ErrorCategory; 5] = [
        ErrorCategory::Connect,
        ErrorCategory::Write,
        ErrorCategory::Read,
        ErrorCategory::Status,
        ErrorCategory::Timeout,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Connect => "connect",
            ErrorCategory::Write => "write",
            ErrorCategory::Read => "read",
            ErrorCategory::Status => "status",
            ErrorCategory::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorCounts {
    pub connect: u64,
    pub write: u64,
    pub read: u64,
    pub status: u64,
    pub timeout: u64,
}

impl ErrorCounts {
    pub const fn record(&mut self, category: ErrorCategory) {
        let slot = self.slot_mut(category);
        *slot = slot.saturating_add(1);
    }

    #[must_use]
    pub const fn get(&self, category: ErrorCategory) -> u64 {
        match category {
            ErrorCategory::Connect => self.connect,
            ErrorCategory::Write => self.write,
            ErrorCategory::Read => self.read,
            ErrorCategory::Status => self.status,
            ErrorCategory::Timeout => self.timeout,
        }
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        ErrorCategory::ALL
            .iter()
            .fold(0_u64, |acc, category| acc.saturating_add(self.get(*category)))
    }

    pub fn merge(&mut self, other: &ErrorCounts) {
        for category in ErrorCategory::ALL {
            let slot = self.slot_mut(category);
            *slot = slot.saturating_add(other.get(category));
        }
    }

    const fn slot_mut(&mut self, category: ErrorCategory) -> &mut u64 {
        match category {
            ErrorCategory::Connect => &mut self.connect,
            ErrorCategory::Write => &mut self.write,
            ErrorCategory::Read => &mut self.read,
            ErrorCategory::Status => &mut self.status,
            ErrorCategory::Timeout => &mut self.timeout,
        }
    }
}

/// Counters owned by a single worker for the lifetime of its task.
///
/// Only attempts that reached a terminal state are recorded: either a
/// completed exchange or exactly one error category.
#[derive(Debug, Clone, Default)]
pub struct WorkerStats {
    pub completed: u64,
    pub bytes: u64,
    pub latency_total: Duration,
    /// Successful request latencies in completion order.
    pub latencies: Vec<Duration>,
    pub errors: ErrorCounts,
}

impl WorkerStats {
    pub fn record_success(&mut self, latency: Duration, bytes: u64) {
        self.completed = self.completed.saturating_add(1);
        self.bytes = self.bytes.saturating_add(bytes);
        self.latency_total = self.latency_total.saturating_add(latency);
        self.latencies.push(latency);
    }

    pub const fn record_error(&mut self, category: ErrorCategory) {
        self.errors.record(category);
    }

    /// Attempts that reached a terminal state.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.completed.saturating_add(self.errors.total())
    }
}
