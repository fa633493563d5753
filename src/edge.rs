//! Falling-edge capture and hand-off into the bounded event queue.

use crate::config::EVENT_QUEUE_CAPACITY;
use crate::types::EventToken;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::{Channel, Sender, TrySendError};
use embedded_hal_async::digital::Wait;

/// The queue between the edge source and the worker.
pub type EventQueue<M> = Channel<M, EventToken, EVENT_QUEUE_CAPACITY>;

/// What happened to one captured edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeOutcome {
    /// Token enqueued for the worker.
    Queued,
    /// Queue was full; the press is lost.
    Dropped,
}

/// Producer side of the event queue for one input pin.
///
/// [`on_falling_edge`](Self::on_falling_edge) never blocks and never retries;
/// it is safe to call from interrupt context when `M` is a
/// `CriticalSectionRawMutex`.
pub struct EdgeEventSource<'q, M: RawMutex, const N: usize> {
    sender: Sender<'q, M, EventToken, N>,
    token: EventToken,
}

impl<'q, M: RawMutex, const N: usize> EdgeEventSource<'q, M, N> {
    pub fn new(sender: Sender<'q, M, EventToken, N>, token: EventToken) -> Self {
        Self { sender, token }
    }

    /// Enqueues this pin's token, dropping it if the queue is full.
    pub fn on_falling_edge(&self) -> EdgeOutcome {
        match self.sender.try_send(self.token) {
            Ok(()) => EdgeOutcome::Queued,
            Err(TrySendError::Full(_)) => {
                warn!("Event queue full, press on pin {} dropped", self.token.pin);
                EdgeOutcome::Dropped
            }
        }
    }

    pub fn token(&self) -> EventToken {
        self.token
    }
}

/// Forwards every falling edge on `pin` to `source`, forever.
///
/// A failed wait is logged and the loop keeps going.
pub async fn run_edge_source<W, M, const N: usize>(
    pin: &mut W,
    source: &EdgeEventSource<'_, M, N>,
)
where
    W: Wait,
    M: RawMutex,
{
    loop {
        match pin.wait_for_falling_edge().await {
            Ok(()) => {
                source.on_falling_edge();
            }
            Err(_) => {
                error!("Edge wait failed on pin {}", source.token().pin);
            }
        }
    }
}
