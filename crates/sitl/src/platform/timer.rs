//! Simulated time source for SITL.
//!
//! Wraps a shared atomic counter for simulation time, allowing the runner,
//! the robot and the mechanism model to share one time reference.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use catapult_core::traits::{Delay, TimeSource};

/// Simulated time source backed by a shared atomic counter.
///
/// Multiple clones share the same underlying counter. Delays advance
/// simulated time instead of sleeping, so blocking robot code (solenoid
/// initialization, blocking launches) costs no wall-clock time.
#[derive(Debug, Clone)]
pub struct SitlTimeSource {
    time_us: Arc<AtomicU64>,
}

impl SitlTimeSource {
    /// Create a new time source starting at zero.
    pub fn new() -> Self {
        Self {
            time_us: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advance simulation time by the given number of microseconds.
    pub fn advance_us(&self, us: u64) {
        self.time_us.fetch_add(us, Ordering::Relaxed);
    }

    /// Current simulation time in seconds.
    pub fn now_s(&self) -> f64 {
        self.now_us() as f64 / 1_000_000.0
    }
}

impl TimeSource for SitlTimeSource {
    fn now_us(&self) -> u64 {
        self.time_us.load(Ordering::Relaxed)
    }
}

impl Delay for SitlTimeSource {
    fn delay_ms(&self, ms: u32) {
        self.advance_us(ms as u64 * 1000);
    }
}

impl Default for SitlTimeSource {
    fn default() -> Self {
        Self::new()
    }
}
