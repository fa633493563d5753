//! Driver loop helpers: periodic servicing of the pulse timer.

use crate::line::{ButtonInput, SharedLine};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::PulseStatus;
use crate::worker::SharedController;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

/// Polls the pulse timer once under the lock.
pub fn service_pulse<M, I, L, B, T>(
    shared: &SharedController<'_, M, I, L, B, T>,
) -> PulseStatus<I::Duration>
where
    M: RawMutex,
    I: TimeInstant,
    L: SharedLine,
    B: ButtonInput,
    T: TimeSource<I>,
{
    shared.lock(|cell| cell.borrow_mut().poll_pulse())
}

/// Services the pulse timer every `poll_period` forever.
///
/// The delay is a cooperative yield; the loop never busy-spins.
pub async fn run_pulse_timer<M, I, L, B, T, D>(
    shared: &SharedController<'_, M, I, L, B, T>,
    delay: &mut D,
)
where
    M: RawMutex,
    I: TimeInstant,
    L: SharedLine,
    B: ButtonInput,
    T: TimeSource<I>,
    D: DelayNs,
{
    let period_ms = shared.lock(|cell| cell.borrow().config().poll_period.as_delay_millis());

    loop {
        service_pulse(shared);
        delay.delay_ms(period_ms).await;
    }
}
