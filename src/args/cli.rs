use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_positive_usize};
use super::types::PositiveUsize;

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "http-bench",
    version,
    about = "Closed-loop HTTP/1.1 load tester: N workers, one persistent connection each, one repeated GET."
)]
pub struct BenchArgs {
    /// Target URL (http:// or https://)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Duration of test (supports ms/s/m/h, bare numbers are seconds)
    #[arg(
        long = "duration",
        short = 'd',
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub duration: Duration,

    /// Number of workers, each driving its own connection
    #[arg(
        long = "threads",
        short = 't',
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub threads: PositiveUsize,

    /// Per-request timeout covering the write and the full response (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection, TLS handshake included (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Verify TLS certificates and hostnames (verification is off by default)
    #[arg(long = "verify-tls")]
    pub verify_tls: bool,

    /// Print the latency distribution (p50/p75/p90/p99)
    #[arg(long = "latency")]
    pub latency: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by HTTP_BENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to config file (TOML/JSON). Defaults to ./http-bench.toml or ./http-bench.json if present.
    #[arg(long)]
    pub config: Option<String>,
}
