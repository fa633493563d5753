//! Line state machine: debounce, press confirmation, pulse start and the pulse timer.
//!
//! Provides [`LineController`], which owns both GPIO lines and every piece of
//! state that used to be process-wide: whether a pulse is in flight, when it
//! started, and when the last press was accepted.

use crate::config::PulseConfig;
use crate::line::{ButtonInput, SharedLine};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::{DiscardReason, EventToken, Level, LineStats, PulseStatus};

/// Owns the shared line and the button and decides what each press does.
///
/// The controller never sleeps. Waiting for a busy line is done by
/// [`arbitrate`](crate::arbitration::arbitrate) between
/// [`accept_press`](Self::accept_press) and [`begin_pulse`](Self::begin_pulse),
/// and [`poll_pulse`](Self::poll_pulse) is meant to be called from a periodic loop.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `L` - Shared output line implementation
/// * `B` - Button input implementation
/// * `T` - Time source implementation
pub struct LineController<'t, I: TimeInstant, L: SharedLine, B: ButtonInput, T: TimeSource<I>> {
    line: L,
    button: B,
    time_source: &'t T,
    config: PulseConfig<I::Duration>,
    pulse_start: Option<I>,
    last_press: Option<I>,
    last_token: Option<EventToken>,
    boot_level: Level,
    stats: LineStats,
}

impl<'t, I, L, B, T> LineController<'t, I, L, B, T>
where
    I: TimeInstant,
    L: SharedLine,
    B: ButtonInput,
    T: TimeSource<I>,
{
    /// Creates an idle controller and releases the shared line.
    ///
    /// The level read back right after releasing is kept as [`boot_level`](Self::boot_level).
    pub fn new(
        mut line: L,
        button: B,
        time_source: &'t T,
        config: PulseConfig<I::Duration>,
    ) -> Self {
        line.set_level(Level::High);
        let boot_level = line.level();
        info!("Output line level at boot: {}", boot_level);

        Self {
            line,
            button,
            time_source,
            config,
            pulse_start: None,
            last_press: None,
            last_token: None,
            boot_level,
            stats: LineStats::default(),
        }
    }

    /// Filters a press before arbitration.
    ///
    /// In order: rejects presses inside the debounce window, records the press
    /// time, rejects the press if the button already reads High again, and
    /// rejects it if a pulse is in flight. Presses during a pulse are dropped,
    /// not deferred.
    pub fn accept_press(&mut self, token: EventToken) -> Result<(), DiscardReason> {
        let now = self.time_source.now();

        if let Some(last) = self.last_press
            && now.duration_since(last).as_millis() < self.config.debounce.as_millis()
        {
            debug!("Bounce on pin {} ignored", token.pin);
            return Err(self.discard(DiscardReason::Bounce));
        }
        self.last_press = Some(now);
        self.last_token = Some(token);

        if !self.button.is_pressed() {
            debug!("Pin {} released before confirmation", token.pin);
            return Err(self.discard(DiscardReason::Released));
        }

        info!("Button pressed on pin {}", token.pin);
        self.stats.presses = self.stats.presses.wrapping_add(1);

        if self.is_pulsing() {
            debug!("Pulse already active, press ignored");
            return Err(self.discard(DiscardReason::PulseActive));
        }

        Ok(())
    }

    /// Starts a pulse: records the start time and drives the line Low.
    ///
    /// Re-reads the line first. If another participant grabbed it since
    /// arbitration saw it idle, nothing is driven.
    pub fn begin_pulse(&mut self) -> Result<(), DiscardReason> {
        if self.is_pulsing() {
            return Err(self.discard(DiscardReason::PulseActive));
        }

        if self.line.level().is_low() {
            warn!("Line went busy before pulse start");
            return Err(self.discard(DiscardReason::LineBusy));
        }

        self.pulse_start = Some(self.time_source.now());
        self.line.set_level(Level::Low);
        self.stats.pulses = self.stats.pulses.wrapping_add(1);
        info!(
            "Pulse started: line LOW for {} ms",
            self.config.pulse_width.as_millis()
        );

        Ok(())
    }

    /// Counts an arbitration that ran out of attempts.
    pub fn record_timeout(&mut self) {
        self.stats.timeouts = self.stats.timeouts.wrapping_add(1);
    }

    /// Services the pulse timer.
    ///
    /// Releases the line once the pulse width has elapsed. Calling this while no
    /// pulse is in flight does nothing, however often it is called.
    ///
    /// # Returns
    /// - `PulseStatus::Inactive` - no pulse in flight
    /// - `PulseStatus::Active { remaining }` - line still held Low
    /// - `PulseStatus::Completed` - this call released the line
    pub fn poll_pulse(&mut self) -> PulseStatus<I::Duration> {
        let Some(start) = self.pulse_start else {
            return PulseStatus::Inactive;
        };

        let elapsed = self.time_source.now().duration_since(start);
        if elapsed.as_millis() < self.config.pulse_width.as_millis() {
            return PulseStatus::Active {
                remaining: self.config.pulse_width.saturating_sub(elapsed),
            };
        }

        self.line.set_level(Level::High);
        self.pulse_start = None;
        info!("Pulse complete: line released HIGH");

        PulseStatus::Completed
    }

    /// Reads the shared line.
    pub fn line_level(&mut self) -> Level {
        self.line.level()
    }

    /// Returns true while a pulse holds the line Low.
    pub fn is_pulsing(&self) -> bool {
        self.pulse_start.is_some()
    }

    /// Start of the pulse in flight, if any.
    pub fn pulse_start(&self) -> Option<I> {
        self.pulse_start
    }

    /// When the pulse in flight is due to end. `None` if idle or on clock overflow.
    pub fn pulse_deadline(&self) -> Option<I> {
        self.pulse_start
            .and_then(|start| start.checked_add(self.config.pulse_width))
    }

    /// Time of the last press that passed debounce.
    pub fn last_press(&self) -> Option<I> {
        self.last_press
    }

    /// Token of the last press that passed debounce.
    pub fn last_token(&self) -> Option<EventToken> {
        self.last_token
    }

    /// Line level read right after the controller released it at startup.
    pub fn boot_level(&self) -> Level {
        self.boot_level
    }

    pub fn stats(&self) -> LineStats {
        self.stats
    }

    pub fn config(&self) -> &PulseConfig<I::Duration> {
        &self.config
    }

    /// Consumes the controller and hands back the pins.
    pub fn release(self) -> (L, B) {
        (self.line, self.button)
    }

    fn discard(&mut self, reason: DiscardReason) -> DiscardReason {
        self.stats.discards = self.stats.discards.wrapping_add(1);
        reason
    }
}
