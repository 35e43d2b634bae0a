use std::time::Duration;

use tracing::warn;

use crate::metrics::{AggregateReport, ErrorCategory, LatencyHistogram};

use super::format::{format_bytes, format_duration, format_rate_x100};

pub(crate) fn banner_line(duration: Duration, url: &str, threads: usize) -> String {
    format!(
        "Running {} test @ {} using {} threads.",
        format_duration(duration),
        url,
        threads
    )
}

/// Renders the final report. Mean/Stdev/Max need at least two samples; the
/// distribution is added only when requested and at least one sample exists.
pub(crate) fn summary_lines(report: &AggregateReport, show_distribution: bool) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("Latency: {}", format_duration(report.mean_latency)));
    lines.push(format!(
        "{} requests in {}, {} read",
        report.completed,
        format_duration(report.elapsed),
        format_bytes(report.bytes)
    ));
    lines.push(format!(
        "Requests/sec: {}",
        format_rate_x100(report.requests_per_sec_x100)
    ));
    lines.push(format!("Transfer/sec: {}", format_bytes(report.bytes_per_sec)));

    if let (Some(stdev), Some(max)) = (report.stdev_latency, report.max_latency) {
        lines.push(format!("Mean: {}", format_duration(report.mean_latency)));
        lines.push(format!("Stdev: {}", format_duration(stdev)));
        lines.push(format!("Max: {}", format_duration(max)));
    }

    if show_distribution && report.sample_count() > 0 {
        distribution_lines(&report.latencies, &mut lines);
    }

    for category in ErrorCategory::ALL {
        let count = report.errors.get(category);
        if count > 0 {
            lines.push(format!("{} errors: {}", category, count));
        }
    }

    lines
}

fn distribution_lines(samples: &[Duration], lines: &mut Vec<String>) {
    let percentiles = match LatencyHistogram::from_samples(samples) {
        Ok(histogram) => histogram.percentiles(),
        Err(err) => {
            warn!("Skipping latency distribution: {}", err);
            None
        }
    };
    let Some(percentiles) = percentiles else {
        return;
    };

    lines.push("Latency Distribution".to_owned());
    for (label, value) in [
        ("50%", percentiles.p50),
        ("75%", percentiles.p75),
        ("90%", percentiles.p90),
        ("99%", percentiles.p99),
    ] {
        lines.push(format!("  {:>4} {}", label, format_duration(value)));
    }
}

pub(crate) fn print_summary(report: &AggregateReport, show_distribution: bool) {
    for line in summary_lines(report, show_distribution) {
        println!("{}", line);
    }
}
