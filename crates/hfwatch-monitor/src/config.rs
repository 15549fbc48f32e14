//! Monitor configuration.

use std::time::Duration;

/// Tuning knobs for a monitor run.
///
/// # Example
///
/// ```
/// use hfwatch_monitor::MonitorConfig;
/// use std::time::Duration;
///
/// let config = MonitorConfig::new()
///     .with_poll_interval(Duration::from_millis(250));
/// ```
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// How often the poller inspects the staging directory.
    ///
    /// 200-500 ms is responsive for UIs without hammering the filesystem.
    pub poll_interval: Duration,
    /// Whether partial-file polling runs at all.
    ///
    /// When disabled, progress is reported at whole-file granularity only.
    pub polling_enabled: bool,
    /// How long to wait for a poller to acknowledge its stop signal.
    ///
    /// A poller that misses this window is abandoned; it must never block
    /// completion of an otherwise-successful transfer.
    pub stop_grace: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            polling_enabled: true,
            stop_grace: Duration::from_secs(1),
        }
    }
}

impl MonitorConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the polling interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Enable or disable partial-file polling.
    #[must_use]
    pub const fn with_polling_enabled(mut self, enabled: bool) -> Self {
        self.polling_enabled = enabled;
        self
    }

    /// Set the poller shutdown grace period.
    #[must_use]
    pub const fn with_stop_grace(mut self, grace: Duration) -> Self {
        self.stop_grace = grace;
        self
    }
}
