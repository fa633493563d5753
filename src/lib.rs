#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`LineController`**: Owns the shared line and the button, holds the pulse and debounce state
//! - **`SharedLine`** / **`ButtonInput`**: Traits to implement for your GPIO hardware
//! - **`TimeSource`**: Trait to implement for your monotonic clock
//! - **`EdgeEventSource`**: Non-blocking producer that turns falling edges into queued tokens
//! - **`arbitrate`**: Bounded wait for the shared line to become idle
//! - **`process_event`** / **`run_worker`**: The press lifecycle and the task that drives it
//! - **`service_pulse`** / **`run_pulse_timer`**: The periodic pulse timer
//! - **`PulseConfig`**: Timing parameters, defaulting to 150 ms debounce and 200 ms pulses
//!
//! Sleeping is always injected through `embedded_hal_async::delay::DelayNs`, so every
//! path runs on a host with a mock clock.

#[macro_use]
mod fmt;

pub mod arbitration;
pub mod config;
pub mod controller;
pub mod driver;
pub mod edge;
pub mod line;
pub mod time;
pub mod types;
pub mod worker;

pub use arbitration::{Arbitration, ArbitrationPolicy, arbitrate};
pub use config::{ConfigError, EVENT_QUEUE_CAPACITY, PulseConfig, PulseConfigBuilder};
pub use controller::LineController;
pub use driver::{run_pulse_timer, service_pulse};
pub use edge::{EdgeEventSource, EdgeOutcome, EventQueue, run_edge_source};
pub use line::{ButtonInput, SharedLine};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{DiscardReason, EventToken, Level, LineStats, PressOutcome, PulseStatus};
pub use worker::{SharedController, process_event, run_worker};
