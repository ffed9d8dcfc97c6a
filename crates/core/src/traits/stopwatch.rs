//! Resettable stopwatch over a [`TimeSource`](super::TimeSource) timestamp.
//!
//! The stopwatch only stores the timestamp of its last reset; elapsed time is
//! always computed from the caller's current time so a stale reading can
//! never be carried across control cycles.

/// Elapsed-time counter that starts at zero after [`reset`](Stopwatch::reset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stopwatch {
    started_us: u64,
}

impl Stopwatch {
    /// Move the zero point to `now_us`.
    pub fn reset(&mut self, now_us: u64) {
        self.started_us = now_us;
    }

    /// Elapsed microseconds since the last reset (saturating).
    pub fn elapsed_us(&self, now_us: u64) -> u64 {
        now_us.saturating_sub(self.started_us)
    }

    /// Elapsed seconds since the last reset.
    pub fn elapsed_s(&self, now_us: u64) -> f32 {
        self.elapsed_us(now_us) as f32 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_after_reset() {
        let mut sw = Stopwatch::default();
        sw.reset(2_000_000);
        assert_eq!(sw.elapsed_us(2_000_000), 0);
        assert!((sw.elapsed_s(3_500_000) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn elapsed_saturates_before_start() {
        let mut sw = Stopwatch::default();
        sw.reset(10_000);
        assert_eq!(sw.elapsed_us(5_000), 0);
        assert_eq!(sw.elapsed_us(12_000), 2_000);
    }
}
