//! Adapters from `embassy_time` to the pulse-line clock traits.

use embassy_time::{Duration, Instant};
use pulse_line::{TimeDuration, TimeInstant, TimeSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmbassyDuration(pub Duration);

impl TimeDuration for EmbassyDuration {
    const ZERO: Self = Self(Duration::MIN);

    fn as_millis(&self) -> u64 {
        self.0.as_millis()
    }

    fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }

    fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.checked_sub(other.0).unwrap_or(Duration::MIN))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EmbassyInstant(pub Instant);

impl TimeInstant for EmbassyInstant {
    type Duration = EmbassyDuration;

    fn duration_since(&self, earlier: Self) -> EmbassyDuration {
        EmbassyDuration(self.0.saturating_duration_since(earlier.0))
    }

    fn checked_add(self, duration: EmbassyDuration) -> Option<Self> {
        self.0.checked_add(duration.0).map(Self)
    }
}

/// Reads the embassy time driver. Zero-sized, so it can live in a `static`.
pub struct EmbassyTimeSource;

impl EmbassyTimeSource {
    pub const fn new() -> Self {
        Self
    }
}

impl TimeSource<EmbassyInstant> for EmbassyTimeSource {
    fn now(&self) -> EmbassyInstant {
        EmbassyInstant(Instant::now())
    }
}
