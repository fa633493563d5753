//! Pin adapters between embassy-stm32 GPIO and the pulse-line traits.

use embassy_stm32::gpio::{self, Input, OutputOpenDrain};
use pulse_line::{ButtonInput, Level, SharedLine};

fn to_level(level: gpio::Level) -> Level {
    match level {
        gpio::Level::Low => Level::Low,
        gpio::Level::High => Level::High,
    }
}

/// Shared line on an open-drain output whose input buffer stays enabled,
/// so reads return the wire state rather than the output latch.
pub struct OpenDrainLine<'d> {
    pin: OutputOpenDrain<'d>,
}

impl<'d> OpenDrainLine<'d> {
    pub fn new(pin: OutputOpenDrain<'d>) -> Self {
        Self { pin }
    }
}

impl SharedLine for OpenDrainLine<'_> {
    fn level(&mut self) -> Level {
        to_level(self.pin.get_level())
    }

    fn set_level(&mut self, level: Level) {
        match level {
            Level::Low => self.pin.set_low(),
            Level::High => self.pin.set_high(),
        }
    }
}

/// Active-low button read through a plain input.
pub struct ButtonPin<'d> {
    pin: Input<'d>,
}

impl<'d> ButtonPin<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl ButtonInput for ButtonPin<'_> {
    fn level(&mut self) -> Level {
        to_level(self.pin.get_level())
    }
}
