//! Autonomous Phase Sequencer
//!
//! Fixed, time-gated autonomous routine run once per match:
//!
//! | Phase | Action                                                      | Next |
//! |-------|-------------------------------------------------------------|------|
//! | 0     | Indicator on, reset phase timer                             | 1    |
//! | 1     | Drive forward every cycle until `AUTO_DRV_TIME`, then stop  | 2    |
//! | 2     | Indicator off                                               | 3    |
//! | 3     | Terminal, no-op                                             | 3    |
//!
//! The phase advances at most one step per [`update`](AutonomousSequencer::update)
//! and never moves backwards. Only [`reset`](AutonomousSequencer::reset),
//! called at autonomous entry, returns it to phase 0.

use core::fmt;

use crate::drive::{DriveBase, Indicator};
use crate::parameters::AutoParams;
use crate::traits::Stopwatch;

/// Autonomous routine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AutoPhase {
    /// Entry: light on, start the phase timer
    #[default]
    Start = 0,
    /// Scripted forward drive
    DriveForward = 1,
    /// Light off
    Finish = 2,
    /// Routine finished
    Done = 3,
}

impl AutoPhase {
    /// Numeric phase index (0..=3).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Phase name for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            AutoPhase::Start => "start",
            AutoPhase::DriveForward => "drive forward",
            AutoPhase::Finish => "finish",
            AutoPhase::Done => "done",
        }
    }
}

impl fmt::Display for AutoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.as_str())
    }
}

/// Autonomous routine state machine.
#[derive(Debug, Clone, Copy)]
pub struct AutonomousSequencer {
    phase: AutoPhase,
    /// Phase timer, reset on entry to phase 1
    timer: Stopwatch,
    params: AutoParams,
}

impl AutonomousSequencer {
    /// Create a sequencer in phase 0.
    pub fn new(params: AutoParams) -> Self {
        Self {
            phase: AutoPhase::Start,
            timer: Stopwatch::default(),
            params,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> AutoPhase {
        self.phase
    }

    /// Return to phase 0 (call at autonomous entry).
    pub fn reset(&mut self) {
        self.phase = AutoPhase::Start;
    }

    /// Run one control cycle
    ///
    /// # Arguments
    ///
    /// * `now_us` - Current time in microseconds
    /// * `drive` - Drive base (commanded in phase 1 only)
    /// * `indicator` - Indicator light (switched in phases 0 and 2)
    ///
    /// # Returns
    ///
    /// The phase after this cycle
    pub fn update<D, I>(&mut self, now_us: u64, drive: &mut D, indicator: &mut I) -> AutoPhase
    where
        D: DriveBase,
        I: Indicator,
    {
        let next = match self.phase {
            AutoPhase::Start => {
                indicator.set_indicator(true);
                self.timer.reset(now_us);
                AutoPhase::DriveForward
            }
            AutoPhase::DriveForward => {
                if self.timer.elapsed_s(now_us) < self.params.drive_time_s {
                    drive.drive_cartesian(0.0, self.params.drive_speed, 0.0);
                    AutoPhase::DriveForward
                } else {
                    drive.stop();
                    AutoPhase::Finish
                }
            }
            AutoPhase::Finish => {
                indicator.set_indicator(false);
                AutoPhase::Done
            }
            AutoPhase::Done => AutoPhase::Done,
        };

        if next != self.phase {
            crate::log_info!(
                "Autonomous phase {} -> {}",
                self.phase.index(),
                next.index()
            );
            self.phase = next;
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drive::{DriveCommand, MockDrive, MockIndicator};
    use crate::traits::{MockTime, TimeSource};
    use std::vec::Vec;

    const TICK_US: u64 = 20_000;

    fn sequencer() -> AutonomousSequencer {
        AutonomousSequencer::new(AutoParams::default())
    }

    #[test]
    fn test_entry_turns_light_on_and_advances() {
        let mut seq = sequencer();
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        assert_eq!(
            seq.update(0, &mut drive, &mut light),
            AutoPhase::DriveForward
        );
        assert!(light.is_on());
        // Phase 0 does not drive
        assert_eq!(drive.call_count(), 0);
    }

    #[test]
    fn test_drives_forward_until_drive_time() {
        let mut seq = sequencer();
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        seq.update(0, &mut drive, &mut light);
        seq.update(600_000, &mut drive, &mut light);
        let cmd = drive.last_command().unwrap();
        assert_eq!(cmd.forward, 1.0);
        assert_eq!(cmd.strafe, 0.0);
        assert_eq!(seq.phase(), AutoPhase::DriveForward);

        assert_eq!(
            seq.update(1_200_000, &mut drive, &mut light),
            AutoPhase::Finish
        );
        assert_eq!(drive.last_command(), Some(DriveCommand::STOP));
    }

    #[test]
    fn test_phase_monotonicity() {
        let time = MockTime::new();
        let mut seq = sequencer();
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        let mut phases = Vec::new();
        for _ in 0..200 {
            phases.push(seq.update(time.now_us(), &mut drive, &mut light));
            time.advance(TICK_US);
        }

        // Never moves backwards, never skips a step
        for pair in phases.windows(2) {
            assert!(pair[1] >= pair[0]);
            assert!(pair[1].index() - pair[0].index() <= 1);
        }

        // Each transition happens exactly once
        let transitions = |from: AutoPhase, to: AutoPhase| {
            phases
                .windows(2)
                .filter(|p| p[0] == from && p[1] == to)
                .count()
        };
        assert_eq!(transitions(AutoPhase::DriveForward, AutoPhase::Finish), 1);
        assert_eq!(transitions(AutoPhase::Finish, AutoPhase::Done), 1);
        assert_eq!(phases[0], AutoPhase::DriveForward);
        assert_eq!(*phases.last().unwrap(), AutoPhase::Done);

        // Light on then off exactly once each
        assert_eq!(light.write_count(), 2);
        assert!(!light.is_on());
    }

    #[test]
    fn test_done_is_stable() {
        let mut seq = sequencer();
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        seq.update(0, &mut drive, &mut light);
        seq.update(2_000_000, &mut drive, &mut light);
        seq.update(2_020_000, &mut drive, &mut light);
        assert_eq!(seq.phase(), AutoPhase::Done);

        let drive_calls = drive.call_count();
        for t in 0..50 {
            assert_eq!(
                seq.update(3_000_000 + t * TICK_US, &mut drive, &mut light),
                AutoPhase::Done
            );
        }
        assert_eq!(drive.call_count(), drive_calls);
        assert_eq!(light.write_count(), 2);
    }

    #[test]
    fn test_reset_restarts_routine() {
        let mut seq = sequencer();
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        seq.update(0, &mut drive, &mut light);
        seq.update(5_000_000, &mut drive, &mut light);
        seq.reset();
        assert_eq!(seq.phase(), AutoPhase::Start);

        // Phase timer restarts at re-entry
        seq.update(10_000_000, &mut drive, &mut light);
        seq.update(10_500_000, &mut drive, &mut light);
        assert_eq!(seq.phase(), AutoPhase::DriveForward);
    }

    #[test]
    fn test_custom_drive_time() {
        let params = AutoParams {
            drive_time_s: 0.5,
            drive_speed: 0.6,
        };
        let mut seq = AutonomousSequencer::new(params);
        let mut drive = MockDrive::new();
        let mut light = MockIndicator::new();

        seq.update(0, &mut drive, &mut light);
        seq.update(100_000, &mut drive, &mut light);
        assert!((drive.last_command().unwrap().forward - 0.6).abs() < f32::EPSILON);
        assert_eq!(
            seq.update(500_000, &mut drive, &mut light),
            AutoPhase::Finish
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(std::format!("{}", AutoPhase::Finish), "2 (finish)");
    }
}
