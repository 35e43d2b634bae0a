use thiserror::Error;

use crate::error::HttpError;
use crate::metrics::ErrorCategory;

/// Outcome of a failed attempt. Everything except `Fatal` is tallied by the
/// worker and followed by a reconnect.
#[derive(Debug, Error)]
pub(crate) enum Fault {
    #[error("{category} error: {source}")]
    Io {
        category: ErrorCategory,
        #[source]
        source: std::io::Error,
    },
    #[error("request timed out")]
    Timeout,
    #[error(transparent)]
    Fatal(#[from] HttpError),
}

impl Fault {
    pub(crate) const fn connect(source: std::io::Error) -> Self {
        Fault::Io {
            category: ErrorCategory::Connect,
            source,
        }
    }

    pub(crate) const fn write(source: std::io::Error) -> Self {
        Fault::Io {
            category: ErrorCategory::Write,
            source,
        }
    }

    pub(crate) const fn read(source: std::io::Error) -> Self {
        Fault::Io {
            category: ErrorCategory::Read,
            source,
        }
    }

    /// Category to tally, `None` for faults that end the run.
    pub(crate) const fn category(&self) -> Option<ErrorCategory> {
        match self {
            Fault::Io { category, .. } => Some(*category),
            Fault::Timeout => Some(ErrorCategory::Timeout),
            Fault::Fatal(_) => None,
        }
    }
}
