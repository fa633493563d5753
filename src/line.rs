//! Hardware abstraction for the two GPIO lines the controller touches.
//!
//! Implement these for your board's pins. Both are infallible: adapters for
//! fallible HALs should absorb the error and report the safest level.

use crate::types::Level;

/// The shared open-drain output line.
///
/// Any participant may pull the line Low; it only reads High when everyone
/// has released it. `set_level(Level::High)` releases the driver, it does not
/// force the wire High.
pub trait SharedLine {
    /// Reads the level currently on the wire.
    fn level(&mut self) -> Level;

    /// Drives Low or releases the line.
    fn set_level(&mut self, level: Level);
}

/// The active-low push button.
pub trait ButtonInput {
    /// Reads the button pin level. Pressed reads Low.
    fn level(&mut self) -> Level;

    /// Returns true while the button is held down.
    fn is_pressed(&mut self) -> bool {
        self.level().is_low()
    }
}
