//! Clock traits.
//!
//! The controller only reads the clock. Sleeping goes through
//! [`embedded_hal_async::delay::DelayNs`], which `embassy_time::Delay` implements
//! on target and a mock implements on the host.

/// A monotonic clock the controller can read.
pub trait TimeSource<I: TimeInstant> {
    fn now(&self) -> I;
}

/// Span between two readings of a [`TimeSource`], in whatever tick unit the platform uses.
pub trait TimeDuration: Copy + PartialEq {
    const ZERO: Self;

    fn as_millis(&self) -> u64;

    fn from_millis(millis: u64) -> Self;

    /// `self - other`, stopping at [`ZERO`](Self::ZERO).
    fn saturating_sub(self, other: Self) -> Self;

    /// Milliseconds as taken by `DelayNs::delay_ms`. Spans past `u32::MAX` ms clamp.
    fn as_delay_millis(&self) -> u32 {
        u32::try_from(self.as_millis()).unwrap_or(u32::MAX)
    }
}

/// A reading of a [`TimeSource`].
pub trait TimeInstant: Copy {
    type Duration: TimeDuration;

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is the later reading.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// `None` when the instant would overflow the clock's range.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
