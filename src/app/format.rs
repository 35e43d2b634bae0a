use std::time::Duration;

/// Nanoseconds per microsecond.
const NS_PER_US: u128 = 1_000;
/// Nanoseconds per millisecond.
const NS_PER_MS: u128 = 1_000_000;
/// Nanoseconds per second.
const NS_PER_SEC: u128 = 1_000_000_000;
/// Hundredths per whole unit.
const HUNDREDTHS: u128 = 100;
/// Seconds per minute.
const SECS_PER_MIN: u128 = 60;
/// Seconds per hour.
const SECS_PER_HOUR: u128 = 3_600;

/// Binary byte units, largest first.
const BYTE_UNITS: [(u128, &str); 4] = [
    (1 << 40, "TB"),
    (1 << 30, "GB"),
    (1 << 20, "MB"),
    (1 << 10, "KB"),
];

/// Rounds `value / unit` to hundredths, half up.
fn hundredths(value: u128, unit: u128) -> u128 {
    value
        .saturating_mul(HUNDREDTHS)
        .saturating_add(unit / 2)
        .checked_div(unit)
        .unwrap_or(0)
}

fn with_two_decimals(value_x100: u128, suffix: &str) -> String {
    format!(
        "{}.{:02}{}",
        value_x100 / HUNDREDTHS,
        value_x100 % HUNDREDTHS,
        suffix
    )
}

/// Formats a byte count in the largest fitting binary unit, e.g. `1.50MB`.
pub(crate) fn format_bytes(bytes: u64) -> String {
    let bytes = u128::from(bytes);
    for (unit, suffix) in BYTE_UNITS {
        if bytes >= unit {
            return with_two_decimals(hundredths(bytes, unit), suffix);
        }
    }
    with_two_decimals(bytes.saturating_mul(HUNDREDTHS), "B")
}

/// Formats a duration in the largest unit that keeps the value readable:
/// `ns`, `us`, `ms`, `s`, then `XmY.YYs` and `XhYmZs`.
pub(crate) fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos < NS_PER_US {
        return format!("{}ns", nanos);
    }

    for (unit, suffix, limit) in [
        (NS_PER_US, "us", 1_000),
        (NS_PER_MS, "ms", 1_000),
        (NS_PER_SEC, "s", SECS_PER_MIN),
    ] {
        let scaled = hundredths(nanos, unit);
        if scaled < limit.saturating_mul(HUNDREDTHS) {
            return with_two_decimals(scaled, suffix);
        }
    }

    let secs_x100 = hundredths(nanos, NS_PER_SEC);
    let minute_x100 = SECS_PER_MIN.saturating_mul(HUNDREDTHS);
    if secs_x100 < SECS_PER_HOUR.saturating_mul(HUNDREDTHS) {
        let minutes = secs_x100 / minute_x100;
        let rest = secs_x100 % minute_x100;
        return format!("{}m{}", minutes, with_two_decimals(rest, "s"));
    }

    let secs = nanos
        .saturating_add(NS_PER_SEC / 2)
        .checked_div(NS_PER_SEC)
        .unwrap_or(0);
    format!(
        "{}h{}m{}s",
        secs / SECS_PER_HOUR,
        (secs % SECS_PER_HOUR) / SECS_PER_MIN,
        secs % SECS_PER_MIN
    )
}

/// Formats a x100 fixed-point rate: integer above 100, one decimal above
/// 10, two decimals otherwise.
pub(crate) fn format_rate_x100(rate_x100: u64) -> String {
    if rate_x100 > 10_000 {
        return rate_x100.saturating_add(50).checked_div(100).unwrap_or(0).to_string();
    }
    if rate_x100 > 1_000 {
        let tenths = rate_x100.saturating_add(5).checked_div(10).unwrap_or(0);
        return format!("{}.{}", tenths / 10, tenths % 10);
    }
    format!("{}.{:02}", rate_x100 / 100, rate_x100 % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};

    fn expect_eq(actual: &str, expected: &str) -> AppResult<()> {
        if actual != expected {
            return Err(AppError::validation(format!(
                "Expected '{}', got '{}'",
                expected, actual
            )));
        }
        Ok(())
    }

    #[test]
    fn format_bytes_uses_binary_units() -> AppResult<()> {
        expect_eq(&format_bytes(0), "0.00B")?;
        expect_eq(&format_bytes(512), "512.00B")?;
        expect_eq(&format_bytes(1024), "1.00KB")?;
        expect_eq(&format_bytes(1536), "1.50KB")?;
        expect_eq(&format_bytes(5 * 1024 * 1024), "5.00MB")?;
        expect_eq(&format_bytes(3 << 30), "3.00GB")?;
        expect_eq(&format_bytes(2 << 40), "2.00TB")
    }

    #[test]
    fn format_duration_picks_largest_fitting_unit() -> AppResult<()> {
        expect_eq(&format_duration(Duration::from_nanos(750)), "750ns")?;
        expect_eq(&format_duration(Duration::from_nanos(1_500)), "1.50us")?;
        expect_eq(&format_duration(Duration::from_micros(2_345)), "2.35ms")?;
        expect_eq(&format_duration(Duration::from_millis(1_250)), "1.25s")?;
        expect_eq(&format_duration(Duration::from_secs(10)), "10.00s")?;
        expect_eq(&format_duration(Duration::from_millis(65_500)), "1m5.50s")?;
        expect_eq(&format_duration(Duration::from_secs(3_725)), "1h2m5s")
    }

    #[test]
    fn format_duration_carries_rounding_into_next_unit() -> AppResult<()> {
        expect_eq(&format_duration(Duration::from_nanos(999_999)), "1.00ms")?;
        expect_eq(&format_duration(Duration::from_nanos(59_999_999_999)), "1m0.00s")
    }

    #[test]
    fn format_rate_precision_depends_on_magnitude() -> AppResult<()> {
        expect_eq(&format_rate_x100(0), "0.00")?;
        expect_eq(&format_rate_x100(725), "7.25")?;
        expect_eq(&format_rate_x100(1_000), "10.00")?;
        expect_eq(&format_rate_x100(4_567), "45.7")?;
        expect_eq(&format_rate_x100(10_000), "100.0")?;
        expect_eq(&format_rate_x100(123_456), "1235")
    }
}
