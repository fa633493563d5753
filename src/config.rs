//! Compile-time tunables and their validation.

use crate::time::TimeDuration;

/// Depth of the edge event queue.
pub const EVENT_QUEUE_CAPACITY: usize = 10;

/// Presses closer together than this are treated as bounce.
pub const DEBOUNCE_MS: u64 = 150;

/// How long the shared line is held Low for one pulse.
pub const PULSE_WIDTH_MS: u64 = 200;

/// Sleep between busy-line checks during arbitration.
pub const RETRY_INTERVAL_MS: u64 = 3000;

/// Busy reads tolerated before arbitration gives up.
pub const MAX_ATTEMPTS: u32 = 50;

/// Period of the driver loop that services the pulse timer.
pub const POLL_PERIOD_MS: u64 = 10;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pulse width of zero would never drive the line.
    ZeroPulseWidth,

    /// Arbitration needs at least one attempt.
    ZeroAttempts,

    /// Poll period must be shorter than the pulse width.
    PollPeriodTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroPulseWidth => write!(f, "pulse width must be non-zero"),
            ConfigError::ZeroAttempts => write!(f, "arbitration needs at least one attempt"),
            ConfigError::PollPeriodTooLong => {
                write!(f, "poll period must be shorter than the pulse width")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing parameters for one controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseConfig<D: TimeDuration> {
    pub debounce: D,
    pub pulse_width: D,
    pub retry_interval: D,
    pub max_attempts: u32,
    pub poll_period: D,
}

impl<D: TimeDuration> PulseConfig<D> {
    /// Returns a builder seeded with the defaults.
    pub fn builder() -> PulseConfigBuilder<D> {
        PulseConfigBuilder::new()
    }
}

impl<D: TimeDuration> Default for PulseConfig<D> {
    fn default() -> Self {
        Self {
            debounce: D::from_millis(DEBOUNCE_MS),
            pulse_width: D::from_millis(PULSE_WIDTH_MS),
            retry_interval: D::from_millis(RETRY_INTERVAL_MS),
            max_attempts: MAX_ATTEMPTS,
            poll_period: D::from_millis(POLL_PERIOD_MS),
        }
    }
}

/// Builder for [`PulseConfig`].
#[derive(Debug, Clone, Copy)]
pub struct PulseConfigBuilder<D: TimeDuration> {
    config: PulseConfig<D>,
}

impl<D: TimeDuration> PulseConfigBuilder<D> {
    /// Creates a builder with default timing.
    pub fn new() -> Self {
        Self {
            config: PulseConfig::default(),
        }
    }

    pub fn debounce(mut self, debounce: D) -> Self {
        self.config.debounce = debounce;
        self
    }

    pub fn pulse_width(mut self, pulse_width: D) -> Self {
        self.config.pulse_width = pulse_width;
        self
    }

    pub fn retry_interval(mut self, retry_interval: D) -> Self {
        self.config.retry_interval = retry_interval;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    pub fn poll_period(mut self, poll_period: D) -> Self {
        self.config.poll_period = poll_period;
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    /// * `ZeroPulseWidth` - pulse width is zero
    /// * `ZeroAttempts` - `max_attempts` is zero
    /// * `PollPeriodTooLong` - poll period is not shorter than the pulse width
    pub fn build(self) -> Result<PulseConfig<D>, ConfigError> {
        let config = self.config;

        if config.pulse_width.as_millis() == 0 {
            return Err(ConfigError::ZeroPulseWidth);
        }

        if config.max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }

        if config.poll_period.as_millis() >= config.pulse_width.as_millis() {
            return Err(ConfigError::PollPeriodTooLong);
        }

        Ok(config)
    }
}

impl<D: TimeDuration> Default for PulseConfigBuilder<D> {
    fn default() -> Self {
        Self::new()
    }
}
