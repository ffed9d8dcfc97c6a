//! Time abstraction traits for platform-agnostic timing operations.
//!
//! This module provides the `TimeSource` and `Delay` traits that abstract over
//! different time providers (hardware timer, SITL clock, mock) so control logic
//! can be tested on host with deterministic time.

use core::cell::Cell;

/// Monotonic time source for control loops and timing.
///
/// # Example
///
/// ```
/// use catapult_core::traits::{MockTime, TimeSource};
///
/// fn control_loop<T: TimeSource>(time: &T, last_update: &mut u64) {
///     let now = time.now_us();
///     let elapsed = time.elapsed_since(*last_update);
///     if elapsed >= 20_000 { // 50Hz
///         // Do control update
///         *last_update = now;
///     }
/// }
///
/// let time = MockTime::new();
/// let mut last = 0;
/// control_loop(&time, &mut last);
/// ```
pub trait TimeSource {
    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }

    /// Returns elapsed time in microseconds since a reference point.
    ///
    /// Uses saturating subtraction to handle potential overflow.
    fn elapsed_since(&self, reference_us: u64) -> u64 {
        self.now_us().saturating_sub(reference_us)
    }
}

/// Blocking delay.
///
/// Only the startup initialize routine and the blocking launch driver wait
/// through this trait. Everything else in the control loop is tick-driven.
pub trait Delay {
    /// Block the caller for `ms` milliseconds.
    fn delay_ms(&self, ms: u32);
}

/// A time source that can also block.
///
/// Lifecycle entry points take a `Clock` so startup sequences can wait and
/// then read the time that has passed.
pub trait Clock: TimeSource + Delay {}

impl<T: TimeSource + Delay> Clock for T {}

/// Convert a duration in seconds to whole milliseconds.
///
/// Negative and NaN durations map to zero.
pub fn seconds_to_ms(seconds: f32) -> u32 {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    (seconds * 1000.0) as u32
}

/// Convert a duration in seconds to whole microseconds.
///
/// Negative and NaN durations map to zero.
pub fn seconds_to_us(seconds: f32) -> u64 {
    if seconds.is_nan() || seconds <= 0.0 {
        return 0;
    }
    (seconds as f64 * 1_000_000.0) as u64
}

// ============================================================================
// Mock Implementation (always available for testing)
// ============================================================================

/// Mock time source for testing with controllable time advancement.
///
/// `delay_ms` advances the mock clock instead of sleeping, so blocking
/// sequences complete instantly while still observing elapsed time.
///
/// # Example
///
/// ```
/// use catapult_core::traits::{Delay, MockTime, TimeSource};
///
/// let time = MockTime::new();
/// assert_eq!(time.now_us(), 0);
///
/// time.advance(1000); // Advance 1ms
/// assert_eq!(time.now_ms(), 1);
///
/// time.delay_ms(500);
/// assert_eq!(time.now_ms(), 501);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at the specified time.
    pub fn with_initial(us: u64) -> Self {
        Self {
            current_us: Cell::new(us),
        }
    }

    /// Sets the current time to an absolute value.
    pub fn set(&self, us: u64) {
        self.current_us.set(us);
    }

    /// Advances the current time by the specified amount.
    pub fn advance(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advances the current time by a duration in seconds.
    pub fn advance_secs(&self, seconds: f32) {
        self.advance(seconds_to_us(seconds));
    }
}

impl TimeSource for MockTime {
    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}

impl Delay for MockTime {
    fn delay_ms(&self, ms: u32) {
        self.advance(ms as u64 * 1000);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
