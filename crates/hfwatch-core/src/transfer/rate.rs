//! Smoothed throughput and ETA estimation.
//!
//! Converts successive `(seconds-since-start, cumulative-bytes)` samples into
//! a stable rate estimate. Polling produces bursty samples; an 85/15
//! exponential moving average damps the noise while still tracking real
//! throughput changes within a few seconds.

/// Weight given to the newest instantaneous rate.
const SMOOTHING: f64 = 0.15;

/// Minimum elapsed time between samples; smaller deltas are degenerate and
/// skipped rather than fed into a division.
const MIN_ELAPSED_SECS: f64 = 1e-6;

/// Exponentially-weighted throughput estimator.
///
/// State is bounded: only the smoothed rate and the last sample are retained.
/// One estimator lives for one run and is discarded with it.
#[derive(Debug, Clone, Default)]
pub struct RateEstimator {
    smoothed: Option<f64>,
    last_sample: Option<Sample>,
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    elapsed_secs: f64,
    cumulative_bytes: u64,
}

impl RateEstimator {
    /// Create an estimator with no observations.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            smoothed: None,
            last_sample: None,
        }
    }

    /// Record a `(time, cumulative-bytes)` sample.
    ///
    /// The first positive instantaneous rate seeds the average; afterwards
    /// `smoothed = smoothed * 0.85 + instantaneous * 0.15`. Zero or negative
    /// byte deltas (metadata-only ticks, racy fallback picks) and degenerate
    /// time deltas are skipped so they never drag the average toward zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn record(&mut self, elapsed_secs: f64, cumulative_bytes: u64) {
        let Some(prev) = self.last_sample else {
            self.last_sample = Some(Sample {
                elapsed_secs,
                cumulative_bytes,
            });
            return;
        };

        let window = elapsed_secs - prev.elapsed_secs;
        if window < MIN_ELAPSED_SECS {
            tracing::trace!(window, "degenerate sample window, skipping rate update");
            return;
        }

        if cumulative_bytes > prev.cumulative_bytes {
            let instantaneous = (cumulative_bytes - prev.cumulative_bytes) as f64 / window;
            self.smoothed = Some(self.smoothed.map_or(instantaneous, |avg| {
                avg * (1.0 - SMOOTHING) + instantaneous * SMOOTHING
            }));
        }

        self.last_sample = Some(Sample {
            elapsed_secs,
            cumulative_bytes,
        });
    }

    /// The smoothed rate in bytes per second, once established.
    #[must_use]
    pub const fn rate(&self) -> Option<f64> {
        self.smoothed
    }

    /// Estimated whole seconds until `remaining_bytes` are done.
    ///
    /// `None` until a rate is established, which avoids reporting implausible
    /// instant ETAs at the start of a run.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn eta_seconds(&self, remaining_bytes: u64) -> Option<u64> {
        let rate = self.smoothed.filter(|r| *r > 0.0)?;
        Some((remaining_bytes as f64 / rate).floor() as u64)
    }
}
