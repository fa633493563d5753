//! Shared test infrastructure for pulse-line integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::{Cell, RefCell};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_futures::yield_now;
use embedded_hal::digital::{ErrorKind, ErrorType};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use pulse_line::{
    ButtonInput, Level, LineController, PulseConfig, SharedLine, TimeDuration, TimeInstant,
    TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Shared Line
// ============================================================================

/// The physical open-drain wire, shared between our driver and an external actor
pub struct LineWire {
    driven_low: Cell<bool>,
    held: Cell<bool>,
    busy_reads: Cell<u32>,
    reads: Cell<u32>,
    writes: RefCell<heapless::Vec<(u64, Level), 32>>,
}

impl LineWire {
    pub fn new() -> Self {
        Self {
            driven_low: Cell::new(false),
            held: Cell::new(false),
            busy_reads: Cell::new(0),
            reads: Cell::new(0),
            writes: RefCell::new(heapless::Vec::new()),
        }
    }

    /// External actor pulls the line Low until `release` is called
    pub fn hold(&self) {
        self.held.set(true);
    }

    pub fn release(&self) {
        self.held.set(false);
    }

    /// External actor keeps the line Low for the next `count` reads
    pub fn busy_for_reads(&self, count: u32) {
        self.busy_reads.set(count);
    }

    /// Level an observer on the wire would see, without consuming busy reads
    pub fn observed(&self) -> Level {
        if self.held.get() || self.busy_reads.get() > 0 || self.driven_low.get() {
            Level::Low
        } else {
            Level::High
        }
    }

    pub fn read_count(&self) -> u32 {
        self.reads.get()
    }

    /// Every `set_level` call as (time in ms, level)
    pub fn writes(&self) -> heapless::Vec<(u64, Level), 32> {
        self.writes.borrow().clone()
    }
}

/// Our open-drain driver on the wire
pub struct MockLine<'a> {
    wire: &'a LineWire,
    clock: &'a MockTimeSource,
}

impl<'a> MockLine<'a> {
    pub fn new(wire: &'a LineWire, clock: &'a MockTimeSource) -> Self {
        Self { wire, clock }
    }
}

impl SharedLine for MockLine<'_> {
    fn level(&mut self) -> Level {
        self.wire.reads.set(self.wire.reads.get() + 1);

        let busy = self.wire.busy_reads.get();
        if busy > 0 {
            self.wire.busy_reads.set(busy - 1);
            return Level::Low;
        }

        if self.wire.held.get() || self.wire.driven_low.get() {
            Level::Low
        } else {
            Level::High
        }
    }

    fn set_level(&mut self, level: Level) {
        self.wire.driven_low.set(level.is_low());
        let _ = self.wire.writes.borrow_mut().push((self.clock.millis(), level));
    }
}

// ============================================================================
// Mock Button
// ============================================================================

/// Button reading a level the test controls
pub struct MockButton<'a> {
    level: &'a Cell<Level>,
}

impl<'a> MockButton<'a> {
    pub fn new(level: &'a Cell<Level>) -> Self {
        Self { level }
    }
}

impl ButtonInput for MockButton<'_> {
    fn level(&mut self) -> Level {
        self.level.get()
    }
}

// ============================================================================
// Mock Delay
// ============================================================================

/// Delay that advances the mock clock instead of sleeping.
///
/// `delay_ms` yields once so a task sleeping on it lets the other futures in a
/// `select` run, the way a real timer wait would.
pub struct MockDelay<'a> {
    clock: &'a MockTimeSource,
    sleeps: heapless::Vec<u32, 64>,
}

impl<'a> MockDelay<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            sleeps: heapless::Vec::new(),
        }
    }

    /// Every requested sleep in milliseconds
    pub fn sleeps(&self) -> &[u32] {
        &self.sleeps
    }
}

impl DelayNs for MockDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance(u64::from(ns) / 1_000_000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.advance(u64::from(us) / 1_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        let _ = self.sleeps.push(ms);
        self.clock.advance(u64::from(ms));
        yield_now().await;
    }
}

// ============================================================================
// Mock Edge Pin
// ============================================================================

/// Edge-capable pin whose falling-edge waits alternate between failing and firing
pub struct FlakyEdgePin {
    errors: u32,
    edges: u32,
}

impl FlakyEdgePin {
    pub fn new() -> Self {
        Self { errors: 0, edges: 0 }
    }

    /// Waits that returned an error
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Waits that reported a falling edge
    pub fn edges(&self) -> u32 {
        self.edges
    }
}

impl ErrorType for FlakyEdgePin {
    type Error = ErrorKind;
}

impl Wait for FlakyEdgePin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// First wait fails, second fires, and so on. Each wait yields first.
    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        yield_now().await;

        if self.errors == self.edges {
            self.errors += 1;
            Err(ErrorKind::Other)
        } else {
            self.edges += 1;
            Ok(())
        }
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub type TestController<'a> =
    LineController<'a, TestInstant, MockLine<'a>, MockButton<'a>, MockTimeSource>;

pub type TestShared<'a> = Mutex<NoopRawMutex, RefCell<TestController<'a>>>;

/// Hardware and clock for one test; controllers borrow from it
pub struct Rig {
    pub clock: MockTimeSource,
    pub wire: LineWire,
    pub button: Cell<Level>,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            clock: MockTimeSource::new(),
            wire: LineWire::new(),
            button: Cell::new(Level::High),
        }
    }

    pub fn controller(&self) -> TestController<'_> {
        self.controller_with(PulseConfig::default())
    }

    pub fn controller_with(&self, config: PulseConfig<TestDuration>) -> TestController<'_> {
        LineController::new(
            MockLine::new(&self.wire, &self.clock),
            MockButton::new(&self.button),
            &self.clock,
            config,
        )
    }

    pub fn shared(&self) -> TestShared<'_> {
        Mutex::new(RefCell::new(self.controller()))
    }

    pub fn shared_with(&self, config: PulseConfig<TestDuration>) -> TestShared<'_> {
        Mutex::new(RefCell::new(self.controller_with(config)))
    }

    pub fn press(&self) {
        self.button.set(Level::Low);
    }

    pub fn release_button(&self) {
        self.button.set(Level::High);
    }
}
