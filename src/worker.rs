//! The press worker: one task that turns event tokens into pulses.

use crate::arbitration::{Arbitration, ArbitrationPolicy, arbitrate};
use crate::controller::LineController;
use crate::line::{ButtonInput, SharedLine};
use crate::time::{TimeInstant, TimeSource};
use crate::types::{EventToken, PressOutcome};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embedded_hal_async::delay::DelayNs;

/// A [`LineController`] shared between the worker and the pulse timer.
///
/// The lock is only taken inside short synchronous closures and is never held
/// across an `.await`.
pub type SharedController<'t, M, I, L, B, T> = Mutex<M, RefCell<LineController<'t, I, L, B, T>>>;

/// Runs one press through debounce, confirmation, arbitration and pulse start.
///
/// Never fails: every way a press can end is reported in the returned
/// [`PressOutcome`], and the controller is left ready for the next token.
pub async fn process_event<M, I, L, B, T, D>(
    shared: &SharedController<'_, M, I, L, B, T>,
    delay: &mut D,
    token: EventToken,
) -> PressOutcome
where
    M: RawMutex,
    I: TimeInstant,
    L: SharedLine,
    B: ButtonInput,
    T: TimeSource<I>,
    D: DelayNs,
{
    let (accepted, policy) = shared.lock(|cell| {
        let mut controller = cell.borrow_mut();
        let policy = ArbitrationPolicy::from(controller.config());
        (controller.accept_press(token), policy)
    });

    if let Err(reason) = accepted {
        return PressOutcome::Discarded(reason);
    }

    let read_line = || shared.lock(|cell| cell.borrow_mut().line_level());

    match arbitrate(read_line, policy, delay).await {
        Arbitration::Idle { attempts } => {
            match shared.lock(|cell| cell.borrow_mut().begin_pulse()) {
                Ok(()) => PressOutcome::Pulsing { attempts },
                Err(reason) => PressOutcome::Discarded(reason),
            }
        }
        Arbitration::TimedOut { attempts } => {
            shared.lock(|cell| cell.borrow_mut().record_timeout());
            PressOutcome::TimedOut { attempts }
        }
    }
}

/// Worker loop: waits on the queue and processes tokens in arrival order. Never returns.
pub async fn run_worker<M, Q, I, L, B, T, D, const N: usize>(
    shared: &SharedController<'_, M, I, L, B, T>,
    receiver: Receiver<'_, Q, EventToken, N>,
    delay: &mut D,
)
where
    M: RawMutex,
    Q: RawMutex,
    I: TimeInstant,
    L: SharedLine,
    B: ButtonInput,
    T: TimeSource<I>,
    D: DelayNs,
{
    loop {
        let token = receiver.receive().await;
        let outcome = process_event(shared, delay, token).await;
        debug!("Press on pin {} finished: {}", token.pin, outcome);
    }
}
