use std::time::Duration;

use hdrhistogram::Histogram;

/// Significant figures kept by the histogram.
const SIGNIFICANT_FIGURES: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyPercentiles {
    pub p50: Duration,
    pub p75: Duration,
    pub p90: Duration,
    pub p99: Duration,
}

/// Microsecond-resolution latency histogram.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, String> {
        let hist = Histogram::<u64>::new(SIGNIFICANT_FIGURES)
            .map_err(|err| format!("Failed to create histogram: {}", err))?;
        Ok(Self { hist })
    }

    /// Build a histogram from latency samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created or a sample
    /// cannot be recorded.
    pub fn from_samples(samples: &[Duration]) -> Result<Self, String> {
        let mut histogram = Self::new()?;
        for sample in samples {
            histogram.record(*sample)?;
        }
        Ok(histogram)
    }

    /// Record one latency sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency: Duration) -> Result<(), String> {
        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.hist
            .record(micros.max(1))
            .map_err(|err| format!("Failed to record latency: {}", err))
    }

    #[must_use]
    pub fn percentiles(&self) -> Option<LatencyPercentiles> {
        if self.count() == 0 {
            return None;
        }

        Some(LatencyPercentiles {
            p50: self.value_at(0.5),
            p75: self.value_at(0.75),
            p90: self.value_at(0.9),
            p99: self.value_at(0.99),
        })
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }

    fn value_at(&self, quantile: f64) -> Duration {
        Duration::from_micros(self.hist.value_at_quantile(quantile))
    }
}
