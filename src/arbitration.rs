//! Bounded wait for the shared line to become idle.
//!
//! [`arbitrate`] only reads the line through a closure and sleeps through an
//! injected [`DelayNs`], so it can be exercised without hardware or real time.

use crate::config::PulseConfig;
use crate::time::TimeDuration;
use crate::types::Level;
use embedded_hal_async::delay::DelayNs;

/// Retry budget for one arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArbitrationPolicy {
    /// Busy reads tolerated before giving up.
    pub max_attempts: u32,
    /// Sleep between busy reads, in milliseconds.
    pub retry_interval_ms: u32,
}

impl ArbitrationPolicy {
    pub const fn new(max_attempts: u32, retry_interval_ms: u32) -> Self {
        Self {
            max_attempts,
            retry_interval_ms,
        }
    }
}

impl<D: TimeDuration> From<&PulseConfig<D>> for ArbitrationPolicy {
    fn from(config: &PulseConfig<D>) -> Self {
        Self::new(config.max_attempts, config.retry_interval.as_delay_millis())
    }
}

/// Outcome of an arbitration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Arbitration {
    /// The line read High after `attempts` busy reads.
    Idle { attempts: u32 },
    /// The line read Low `attempts` times in a row.
    TimedOut { attempts: u32 },
}

impl Arbitration {
    pub fn is_idle(&self) -> bool {
        matches!(self, Arbitration::Idle { .. })
    }

    /// Number of busy reads observed.
    pub fn attempts(&self) -> u32 {
        match *self {
            Arbitration::Idle { attempts } | Arbitration::TimedOut { attempts } => attempts,
        }
    }
}

/// Waits until `read_level` returns High or the attempt budget runs out.
///
/// Every Low read counts as one attempt. When the count reaches
/// `policy.max_attempts` this returns `TimedOut` without sleeping again;
/// otherwise it sleeps `retry_interval_ms` and reads again. A High read returns
/// immediately, so a line that frees up mid-wait does not wait out the rest.
pub async fn arbitrate<R, D>(
    mut read_level: R,
    policy: ArbitrationPolicy,
    delay: &mut D,
) -> Arbitration
where
    R: FnMut() -> Level,
    D: DelayNs,
{
    let mut attempts = 0;

    while read_level().is_low() {
        attempts += 1;
        warn!("Line busy (LOW), attempt {}...", attempts);

        if attempts >= policy.max_attempts {
            error!("Timeout: line stayed busy for {} attempts", attempts);
            return Arbitration::TimedOut { attempts };
        }

        delay.delay_ms(policy.retry_interval_ms).await;
    }

    Arbitration::Idle { attempts }
}
