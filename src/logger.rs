use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global subscriber. `HTTP_BENCH_LOG` wins over `RUST_LOG`;
/// output goes to stderr so the report on stdout stays clean.
pub fn init_logging(verbose: bool) {
    let filter = std::env::var("HTTP_BENCH_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| {
                if verbose {
                    EnvFilter::new("debug")
                } else {
                    EnvFilter::new("info")
                }
            },
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new("info")),
        );

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_tolerates_repeated_calls() {
        init_logging(true);
        init_logging(false);
    }
}
