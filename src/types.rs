//! Core types shared by the edge source, the worker and the pulse timer.

/// Logic level of a digital line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Line pulled to ground. On the shared line this means busy or pulsing.
    Low,
    /// Line released. On the shared line this means idle.
    High,
}

impl Level {
    /// Returns true for [`Level::Low`].
    #[inline]
    pub fn is_low(self) -> bool {
        self == Level::Low
    }

    /// Returns true for [`Level::High`].
    #[inline]
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl From<bool> for Level {
    /// `true` maps to `High`.
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl core::ops::Not for Level {
    type Output = Level;

    fn not(self) -> Level {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Identifies which input line produced a falling edge.
///
/// Passed by value through the event queue and consumed exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventToken {
    /// Board pin number of the input that fired.
    pub pin: u8,
}

impl EventToken {
    /// Creates a token for the given pin.
    #[inline]
    pub const fn new(pin: u8) -> Self {
        Self { pin }
    }
}

/// Why a press was dropped before reaching the pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscardReason {
    /// Arrived inside the debounce window of the previous accepted press.
    Bounce,
    /// Button no longer reads Low when the token was processed.
    Released,
    /// A pulse is already in flight.
    PulseActive,
    /// Arbitration saw the line idle but it was Low again when the pulse was due.
    LineBusy,
}

impl core::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DiscardReason::Bounce => write!(f, "press inside debounce window"),
            DiscardReason::Released => write!(f, "button released before confirmation"),
            DiscardReason::PulseActive => write!(f, "pulse already active"),
            DiscardReason::LineBusy => write!(f, "line became busy before pulse start"),
        }
    }
}

/// Result of processing one event token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressOutcome {
    /// Pulse started. `attempts` is the number of busy reads seen first.
    Pulsing { attempts: u32 },
    /// The line stayed busy for every attempt; nothing was driven.
    TimedOut { attempts: u32 },
    /// The press was filtered out.
    Discarded(DiscardReason),
}

/// State reported by the pulse timer poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PulseStatus<D> {
    /// No pulse in flight; the poll did nothing.
    Inactive,
    /// Pulse in flight, line still Low for at least `remaining`.
    Active { remaining: D },
    /// This poll ended the pulse and released the line.
    Completed,
}

/// Running counters for diagnostics. They wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineStats {
    /// Presses confirmed after debounce.
    pub presses: u32,
    /// Pulses started.
    pub pulses: u32,
    /// Arbitrations that ran out of attempts.
    pub timeouts: u32,
    /// Presses discarded for any [`DiscardReason`].
    pub discards: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate std;
    use std::string::ToString;

    #[test]
    fn level_from_bool_and_not() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert_eq!(!Level::High, Level::Low);
        assert!((!Level::High).is_low());
        assert!(Level::High.is_high());
    }

    #[test]
    fn discard_reason_display() {
        assert_eq!(DiscardReason::PulseActive.to_string(), "pulse already active");
    }
}
