use thiserror::Error;

/// Failures that abort the whole run.
///
/// Recoverable per-request faults (connect, write, read, non-400 status,
/// timeout) never become an `HttpError`; workers count them instead.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Failed to resolve {host}:{port} ({source})")]
    ResolveHost {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("No addresses resolved for {host}.")]
    NoAddressesResolved { host: String },
    #[error("Failed to build TLS connector: {source}")]
    BuildTlsConnector {
        #[source]
        source: native_tls::Error,
    },
    #[error("TLS handshake with {domain} failed: {source}")]
    TlsHandshake {
        domain: String,
        #[source]
        source: native_tls::Error,
    },
    #[error("Cannot parse status code in '{line}': {source}")]
    InvalidStatusCode {
        line: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Server rejected the request: {line}")]
    BadRequest { line: String },
    #[error("Invalid Content-Length '{value}': {source}")]
    InvalidContentLength {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Worker {worker} stopped without reporting its results.")]
    WorkerLost { worker: usize },
}
