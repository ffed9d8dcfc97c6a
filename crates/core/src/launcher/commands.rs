//! Pressurization-gated launcher commands
//!
//! [`Launcher`] is the single owner of the launch solenoid, the lock solenoid,
//! the pressurization stopwatch and the status display line. Every guarded
//! command re-classifies the launcher, compares the result against exactly one
//! required status, and only then touches a solenoid. A mismatch is a no-op:
//! the operator pressed a button while the mechanism was in the wrong state.
//!
//! | Command     | Requires       | Actuation              |
//! |-------------|----------------|------------------------|
//! | pressurize  | `Locked`       | retract launch         |
//! | drop        | `Raised`       | extend launch          |
//! | lock        | `Down`         | extend lock            |
//! | release     | `Ready`        | retract lock           |

use core::fmt;

use super::status::{classify, LauncherStatus};
use crate::display::{StatusDisplay, LINE_STATUS};
use crate::parameters::LauncherParams;
use crate::pneumatics::{ActuatorPosition, DoubleSolenoid};
use crate::traits::{seconds_to_ms, Clock, Stopwatch};

/// Guarded launcher command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LauncherCommand {
    /// Retract the launch cylinder to store energy
    Pressurize,
    /// Extend the launch cylinder to pull the arm down
    Drop,
    /// Extend the lock to latch the arm
    Lock,
    /// Retract the lock to fire
    Release,
}

impl LauncherCommand {
    /// The only status in which this command may actuate.
    pub fn precondition(self) -> LauncherStatus {
        match self {
            LauncherCommand::Pressurize => LauncherStatus::Locked,
            LauncherCommand::Drop => LauncherStatus::Raised,
            LauncherCommand::Lock => LauncherStatus::Down,
            LauncherCommand::Release => LauncherStatus::Ready,
        }
    }

    /// Command name for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            LauncherCommand::Pressurize => "pressurize",
            LauncherCommand::Drop => "drop",
            LauncherCommand::Lock => "lock",
            LauncherCommand::Release => "release",
        }
    }
}

impl fmt::Display for LauncherCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a guarded command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandOutcome {
    /// Precondition held and the solenoid was commanded
    Applied,
    /// Precondition did not hold; nothing was actuated
    Ignored {
        /// Status the command requires
        required: LauncherStatus,
        /// Status observed when the command was evaluated
        actual: LauncherStatus,
    },
}

/// Launcher mechanism: two solenoids, the pressurization timer and its status line.
pub struct Launcher<S: DoubleSolenoid, P: StatusDisplay> {
    /// Launch cylinder (retracted = pressurized, extended = dropped)
    launch: S,
    /// Arm lock (extended = locked, retracted = released)
    lock: S,
    /// Status display
    display: P,
    /// Time since the last completed re-pressurization
    pressurization: Stopwatch,
    /// Launcher tuning
    params: LauncherParams,
}

impl<S: DoubleSolenoid, P: StatusDisplay> Launcher<S, P> {
    /// Create a launcher
    ///
    /// # Arguments
    ///
    /// * `launch` - Launch solenoid
    /// * `lock` - Lock solenoid
    /// * `display` - Status display
    /// * `params` - Launcher tuning (launch delay, settle/fall waits, init waits)
    pub fn new(launch: S, lock: S, display: P, params: LauncherParams) -> Self {
        Self {
            launch,
            lock,
            display,
            pressurization: Stopwatch::default(),
            params,
        }
    }

    /// Launcher tuning in use.
    pub fn params(&self) -> &LauncherParams {
        &self.params
    }

    /// Classify the launcher at `now_us`.
    ///
    /// Pure query; safe to call at any rate.
    pub fn status(&self, now_us: u64) -> LauncherStatus {
        classify(
            self.launch.position(),
            self.lock.position(),
            self.pressurization.elapsed_s(now_us),
            self.params.launch_delay_s,
        )
    }

    /// Launch solenoid position.
    pub fn launch_position(&self) -> Option<ActuatorPosition> {
        self.launch.position()
    }

    /// Lock solenoid position.
    pub fn lock_position(&self) -> Option<ActuatorPosition> {
        self.lock.position()
    }

    /// Seconds since the pressurization timer was reset.
    pub fn pressurization_elapsed_s(&self, now_us: u64) -> f32 {
        self.pressurization.elapsed_s(now_us)
    }

    /// Restart the pressurization timer at `now_us`.
    pub fn reset_pressurization(&mut self, now_us: u64) {
        self.pressurization.reset(now_us);
    }

    /// Status display.
    pub fn display(&self) -> &P {
        &self.display
    }

    /// Status display (mutable, for mode banners).
    pub fn display_mut(&mut self) -> &mut P {
        &mut self.display
    }

    /// Re-classify and write the status line.
    pub fn refresh_display(&mut self, now_us: u64) -> LauncherStatus {
        let status = self.status(now_us);
        self.show_status(status);
        status
    }

    /// Write `status` to the status line without re-classifying.
    pub fn show_status(&mut self, status: LauncherStatus) {
        self.display.show(status.as_str(), LINE_STATUS);
    }

    /// Execute a guarded command
    ///
    /// Re-classifies, actuates only if the status equals the command's
    /// precondition, then refreshes the status line.
    pub fn execute(&mut self, command: LauncherCommand, now_us: u64) -> CommandOutcome {
        let actual = self.status(now_us);
        let required = command.precondition();

        let outcome = if actual == required {
            match command {
                LauncherCommand::Pressurize => self.launch.retract(),
                LauncherCommand::Drop => self.launch.extend(),
                LauncherCommand::Lock => self.lock.extend(),
                LauncherCommand::Release => self.lock.retract(),
            }
            crate::log_debug!("Launcher {} applied", command.as_str());
            CommandOutcome::Applied
        } else {
            crate::log_debug!(
                "Launcher {} ignored: requires {}, status {}",
                command.as_str(),
                required.as_str(),
                actual.as_str()
            );
            CommandOutcome::Ignored { required, actual }
        };

        self.refresh_display(now_us);
        outcome
    }

    /// Retract the launch cylinder (requires `Locked`).
    pub fn pressurize(&mut self, now_us: u64) -> CommandOutcome {
        self.execute(LauncherCommand::Pressurize, now_us)
    }

    /// Extend the launch cylinder (requires `Raised`).
    pub fn drop_launcher(&mut self, now_us: u64) -> CommandOutcome {
        self.execute(LauncherCommand::Drop, now_us)
    }

    /// Extend the lock (requires `Down`).
    pub fn lock(&mut self, now_us: u64) -> CommandOutcome {
        self.execute(LauncherCommand::Lock, now_us)
    }

    /// Retract the lock (requires `Ready`).
    pub fn release(&mut self, now_us: u64) -> CommandOutcome {
        self.execute(LauncherCommand::Release, now_us)
    }

    /// Emergency release: extend the launch cylinder unconditionally.
    ///
    /// Vents the stored energy so the operator can recover from `Abnormal`.
    pub fn free(&mut self, now_us: u64) {
        self.launch.extend();
        crate::log_info!("Launcher freed");
        self.refresh_display(now_us);
    }

    /// Manual lock override: command the lock unconditionally.
    pub fn manual_lock(&mut self, position: ActuatorPosition, now_us: u64) {
        self.lock.set_position(position);
        self.refresh_display(now_us);
    }

    /// Bench override: command the launch cylinder unconditionally.
    pub fn manual_launch(&mut self, position: ActuatorPosition, now_us: u64) {
        self.launch.set_position(position);
        self.refresh_display(now_us);
    }

    /// Startup initialization (blocking)
    ///
    /// Brings the solenoids into the locked + pressurizing configuration
    /// regardless of their current state.
    ///
    /// # Steps
    ///
    /// 1. Autonomous only: extend launch, wait `init_prime_s`
    /// 2. Extend lock, wait `init_lock_s`
    /// 3. Retract launch
    /// 4. Refresh the status line
    pub fn initialize<C: Clock>(&mut self, autonomous: bool, clock: &C) -> LauncherStatus {
        if autonomous {
            self.launch.extend();
            clock.delay_ms(seconds_to_ms(self.params.init_prime_s));
        }

        self.lock.extend();
        clock.delay_ms(seconds_to_ms(self.params.init_lock_s));
        self.launch.retract();

        let status = self.refresh_display(clock.now_us());
        if status == LauncherStatus::Abnormal {
            crate::log_warn!("Launcher abnormal after initialization");
        } else {
            crate::log_info!("Launcher initialized: {}", status.as_str());
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MockDisplay;
    use crate::pneumatics::MockSolenoid;
    use crate::traits::{MockTime, TimeSource};
    use ActuatorPosition::{Extended, Retracted};

    type TestLauncher = Launcher<MockSolenoid, MockDisplay>;

    /// Launcher with the given solenoid positions and the timer reset at t=0.
    fn launcher(launch: Option<ActuatorPosition>, lock: Option<ActuatorPosition>) -> TestLauncher {
        let make = |p: Option<ActuatorPosition>| match p {
            Some(p) => MockSolenoid::at(p),
            None => MockSolenoid::new(),
        };
        Launcher::new(
            make(launch),
            make(lock),
            MockDisplay::new(),
            LauncherParams::default(),
        )
    }

    const READY_US: u64 = 11_000_000;

    #[test]
    fn test_status_tracks_solenoids_and_timer() {
        let l = launcher(Some(Retracted), Some(Extended));
        assert_eq!(l.status(0), LauncherStatus::Pressurizing);
        assert_eq!(l.status(READY_US), LauncherStatus::Ready);
    }

    #[test]
    fn test_pressurize_from_locked() {
        let mut l = launcher(Some(Extended), Some(Extended));
        assert_eq!(l.pressurize(0), CommandOutcome::Applied);
        assert_eq!(l.launch_position(), Some(Retracted));
        assert_eq!(l.status(0), LauncherStatus::Pressurizing);
    }

    #[test]
    fn test_drop_from_raised() {
        let mut l = launcher(Some(Retracted), Some(Retracted));
        assert_eq!(l.drop_launcher(0), CommandOutcome::Applied);
        assert_eq!(l.status(0), LauncherStatus::Down);
    }

    #[test]
    fn test_lock_from_down() {
        let mut l = launcher(Some(Extended), Some(Retracted));
        assert_eq!(l.lock(0), CommandOutcome::Applied);
        assert_eq!(l.status(0), LauncherStatus::Locked);
    }

    #[test]
    fn test_release_from_ready() {
        let mut l = launcher(Some(Retracted), Some(Extended));
        assert_eq!(l.release(READY_US), CommandOutcome::Applied);
        assert_eq!(l.lock_position(), Some(Retracted));
        assert_eq!(l.status(READY_US), LauncherStatus::Raised);
    }

    #[test]
    fn test_release_while_pressurizing_is_ignored() {
        let mut l = launcher(Some(Retracted), Some(Extended));
        let outcome = l.release(5_000_000);
        assert_eq!(
            outcome,
            CommandOutcome::Ignored {
                required: LauncherStatus::Ready,
                actual: LauncherStatus::Pressurizing,
            }
        );
        assert_eq!(l.lock_position(), Some(Extended));
    }

    #[test]
    fn test_guard_never_actuates_on_mismatch() {
        let positions = [None, Some(Extended), Some(Retracted)];
        let commands = [
            LauncherCommand::Pressurize,
            LauncherCommand::Drop,
            LauncherCommand::Lock,
            LauncherCommand::Release,
        ];

        for launch in positions {
            for lock in positions {
                for now in [0, READY_US] {
                    for command in commands {
                        let mut l = launcher(launch, lock);
                        let before = l.status(now);
                        let outcome = l.execute(command, now);

                        if before == command.precondition() {
                            assert_eq!(outcome, CommandOutcome::Applied);
                        } else {
                            assert_ne!(outcome, CommandOutcome::Applied);
                            assert_eq!(l.launch.command_count(), 0);
                            assert_eq!(l.lock.command_count(), 0);
                            assert_eq!(l.launch_position(), launch);
                            assert_eq!(l.lock_position(), lock);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_every_command_refreshes_display() {
        let mut l = launcher(Some(Extended), Some(Extended));
        l.release(0);
        assert_eq!(l.display().line(LINE_STATUS), "Launcher Locked");
        l.pressurize(0);
        assert_eq!(l.display().line(LINE_STATUS), "Launcher Pressurizing");
        assert_eq!(l.display().write_count(), 2);
    }

    #[test]
    fn test_free_is_unconditional() {
        let mut l = launcher(Some(Retracted), Some(Extended));
        l.free(0);
        assert_eq!(l.launch_position(), Some(Extended));
        assert_eq!(l.status(0), LauncherStatus::Locked);

        let mut abnormal = launcher(None, None);
        abnormal.free(0);
        assert_eq!(abnormal.launch_position(), Some(Extended));
    }

    #[test]
    fn test_manual_lock_override() {
        let mut l = launcher(Some(Retracted), Some(Extended));
        l.manual_lock(Retracted, 0);
        assert_eq!(l.status(0), LauncherStatus::Raised);
        l.manual_lock(Extended, 0);
        assert_eq!(l.status(0), LauncherStatus::Pressurizing);
    }

    #[test]
    fn test_initialize_autonomous_waits_prime_and_lock() {
        let time = MockTime::new();
        let mut l = launcher(None, None);

        let status = l.initialize(true, &time);

        assert_eq!(l.launch_position(), Some(Retracted));
        assert_eq!(l.lock_position(), Some(Extended));
        assert_eq!(time.now_ms(), 1_500);
        assert_eq!(status, LauncherStatus::Pressurizing);
        // extend + retract
        assert_eq!(l.launch.command_count(), 2);
    }

    #[test]
    fn test_initialize_teleop_skips_prime() {
        let time = MockTime::new();
        let mut l = launcher(Some(Extended), Some(Retracted));

        l.initialize(false, &time);

        assert_eq!(time.now_ms(), 1_000);
        assert_eq!(l.launch.command_count(), 1);
        assert_eq!(l.display().line(LINE_STATUS), "Launcher Pressurizing");
    }

    #[test]
    fn test_reset_pressurization() {
        let mut l = launcher(Some(Retracted), Some(Extended));
        assert_eq!(l.status(READY_US), LauncherStatus::Ready);
        l.reset_pressurization(READY_US);
        assert_eq!(l.status(READY_US), LauncherStatus::Pressurizing);
        assert!((l.pressurization_elapsed_s(READY_US + 500_000) - 0.5).abs() < 1e-6);
    }
}
