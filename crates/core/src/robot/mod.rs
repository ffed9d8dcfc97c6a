//! Robot lifecycle facade
//!
//! [`Robot`] owns every mechanism and exposes one entry point per runtime
//! callback: `*_init` runs once when a mode is entered, `*_periodic` once per
//! control cycle while the mode is active. The hosting runtime (SITL runner or
//! robot firmware) decides which callback to invoke.
//!
//! # Display layout
//!
//! | Line | Content                       |
//! |------|-------------------------------|
//! | 0    | Mode banner                   |
//! | 1    | Launcher status               |
//! | 2    | Bench feedback (test mode)    |

use core::fmt;

use crate::autonomous::{AutoPhase, AutonomousSequencer};
use crate::display::{StatusDisplay, LINE_BENCH, LINE_MODE};
use crate::drive::{DriveBase, Indicator};
use crate::launcher::{Blocker, LaunchEvent, LaunchSequencer, Launcher, LauncherStatus};
use crate::operator::{BenchAction, BenchButtons, DriverAxes, ShooterButtons};
use crate::parameters::RobotConfig;
use crate::pneumatics::{ActuatorPosition, Compressor, DoubleSolenoid};
use crate::traits::Clock;

/// Concrete hardware types a [`Robot`] is built from.
pub trait RobotHardware {
    /// Double solenoid type (launch, lock and blocker)
    type Solenoid: DoubleSolenoid;
    /// Drivetrain
    type Drive: DriveBase;
    /// Indicator light
    type Indicator: Indicator;
    /// Driver station display
    type Display: StatusDisplay;
    /// Air compressor
    type Compressor: Compressor;
}

/// Hardware instances handed to [`Robot::new`].
pub struct RobotParts<H: RobotHardware> {
    pub launch: H::Solenoid,
    pub lock: H::Solenoid,
    pub blocker: H::Solenoid,
    pub drive: H::Drive,
    pub indicator: H::Indicator,
    pub display: H::Display,
    pub compressor: H::Compressor,
}

/// Runtime mode currently entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RobotMode {
    /// Constructed, `robot_init` not yet called
    #[default]
    Boot,
    Disabled,
    Autonomous,
    Teleop,
    Test,
}

impl RobotMode {
    /// Banner shown on mode entry.
    pub fn init_banner(self) -> &'static str {
        match self {
            RobotMode::Boot => "Robot Enabled",
            RobotMode::Disabled => "Robot Disabled",
            RobotMode::Autonomous => "Autonomous Mode",
            RobotMode::Teleop => "Teleop Mode",
            RobotMode::Test => "Test Mode",
        }
    }

    /// Banner shown every periodic cycle.
    pub fn periodic_banner(self) -> &'static str {
        match self {
            RobotMode::Autonomous => "Autonomous Enabled",
            RobotMode::Teleop => "Teleop Enabled",
            other => other.init_banner(),
        }
    }
}

impl fmt::Display for RobotMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RobotMode::Boot => "boot",
            RobotMode::Disabled => "disabled",
            RobotMode::Autonomous => "autonomous",
            RobotMode::Teleop => "teleop",
            RobotMode::Test => "test",
        };
        f.write_str(name)
    }
}

/// The complete robot.
pub struct Robot<H: RobotHardware> {
    launcher: Launcher<H::Solenoid, H::Display>,
    blocker: Blocker<H::Solenoid>,
    sequencer: LaunchSequencer,
    autonomous: AutonomousSequencer,
    drive: H::Drive,
    indicator: H::Indicator,
    compressor: H::Compressor,
    config: RobotConfig,
    mode: RobotMode,
}

impl<H: RobotHardware> Robot<H> {
    /// Assemble the robot from its parts.
    pub fn new(parts: RobotParts<H>, config: RobotConfig) -> Self {
        Self {
            launcher: Launcher::new(parts.launch, parts.lock, parts.display, config.launcher),
            blocker: Blocker::new(parts.blocker),
            sequencer: LaunchSequencer::new(),
            autonomous: AutonomousSequencer::new(config.autonomous),
            drive: parts.drive,
            indicator: parts.indicator,
            compressor: parts.compressor,
            config,
            mode: RobotMode::Boot,
        }
    }

    pub fn mode(&self) -> RobotMode {
        self.mode
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }

    pub fn launcher(&self) -> &Launcher<H::Solenoid, H::Display> {
        &self.launcher
    }

    pub fn blocker(&self) -> &Blocker<H::Solenoid> {
        &self.blocker
    }

    pub fn sequencer(&self) -> &LaunchSequencer {
        &self.sequencer
    }

    pub fn autonomous(&self) -> &AutonomousSequencer {
        &self.autonomous
    }

    pub fn drive(&self) -> &H::Drive {
        &self.drive
    }

    pub fn drive_mut(&mut self) -> &mut H::Drive {
        &mut self.drive
    }

    pub fn indicator(&self) -> &H::Indicator {
        &self.indicator
    }

    pub fn compressor(&self) -> &H::Compressor {
        &self.compressor
    }

    /// Current launcher status.
    pub fn status(&self, now_us: u64) -> LauncherStatus {
        self.launcher.status(now_us)
    }

    fn enter(&mut self, mode: RobotMode) {
        self.sequencer.reset();
        let display = self.launcher.display_mut();
        display.clear();
        display.show(mode.init_banner(), LINE_MODE);
        crate::log_info!("Mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    fn banner(&mut self) {
        let text = self.mode.periodic_banner();
        self.launcher.display_mut().show(text, LINE_MODE);
    }

    /// Power-on: show the banner and start the compressor.
    pub fn robot_init(&mut self) {
        self.launcher.display_mut().show(RobotMode::Boot.init_banner(), LINE_MODE);
        self.compressor.start();
        crate::log_info!("Robot initialized, compressor started");
    }

    /// Enter disabled mode.
    pub fn disabled_init(&mut self) {
        self.enter(RobotMode::Disabled);
    }

    /// Enter autonomous mode (blocking for the initialization waits)
    ///
    /// Resets the pressurization timer and the autonomous routine, lowers the
    /// blocker and runs the autonomous solenoid initialization.
    pub fn autonomous_init<C: Clock>(&mut self, clock: &C) -> LauncherStatus {
        self.enter(RobotMode::Autonomous);
        self.launcher.reset_pressurization(clock.now_us());
        self.autonomous.reset();
        self.blocker.down();
        self.launcher.initialize(true, clock)
    }

    /// One autonomous control cycle.
    pub fn autonomous_periodic<C: Clock>(&mut self, clock: &C) -> AutoPhase {
        self.banner();
        let now_us = clock.now_us();
        self.launcher.refresh_display(now_us);

        if self.sequencer.is_active() {
            self.sequencer.update(&mut self.launcher, now_us);
        }

        self.autonomous.update(now_us, &mut self.drive, &mut self.indicator)
    }

    /// Enter teleop mode (blocking for the initialization waits).
    pub fn teleop_init<C: Clock>(&mut self, clock: &C) -> LauncherStatus {
        self.enter(RobotMode::Teleop);
        self.launcher.reset_pressurization(clock.now_us());
        self.launcher.initialize(false, clock)
    }

    /// One teleop control cycle
    ///
    /// Drives from the driver axes, advances any launch in progress and
    /// dispatches the shooter buttons. While a launch is in progress the
    /// shooter buttons are ignored; driving continues.
    ///
    /// # Returns
    ///
    /// The launch event for this cycle (`Idle` when nothing happened)
    pub fn teleop_periodic<C: Clock>(
        &mut self,
        clock: &C,
        axes: &DriverAxes,
        buttons: &ShooterButtons,
    ) -> LaunchEvent {
        self.banner();
        self.drive.apply(axes.to_drive_command(self.config.drive.deadband));
        self.launcher.refresh_display(clock.now_us());

        if self.sequencer.is_active() {
            return self.sequencer.update(&mut self.launcher, clock.now_us());
        }

        self.dispatch_shooter(clock, buttons)
    }

    fn dispatch_shooter<C: Clock>(&mut self, clock: &C, buttons: &ShooterButtons) -> LaunchEvent {
        let mut event = LaunchEvent::Idle;

        if buttons.fire {
            event = if self.config.launcher.stepped {
                self.sequencer.trigger(&mut self.launcher, clock.now_us())
            } else {
                self.sequencer.fire_blocking(&mut self.launcher, clock)
            };
            if self.sequencer.is_active() {
                return event;
            }
        }

        let now_us = clock.now_us();
        if buttons.blocker_up {
            self.blocker.up();
        }
        if buttons.blocker_down {
            self.blocker.down();
        }
        if buttons.free {
            self.launcher.free(now_us);
        }
        if buttons.pressurize {
            self.launcher.pressurize(now_us);
        }
        if buttons.lock_extend {
            self.launcher.manual_lock(ActuatorPosition::Extended, now_us);
        }
        if buttons.lock_retract {
            self.launcher.manual_lock(ActuatorPosition::Retracted, now_us);
        }

        event
    }

    /// One bench-test cycle
    ///
    /// Performs at most one raw actuation, confirms it on the bench line and
    /// refreshes the status line.
    pub fn test_periodic<C: Clock>(
        &mut self,
        clock: &C,
        bench: &BenchButtons,
    ) -> Option<BenchAction> {
        if self.mode != RobotMode::Test {
            self.enter(RobotMode::Test);
        }

        let action = bench.action();
        if let Some(action) = action {
            let now_us = clock.now_us();
            match action {
                BenchAction::LaunchExtend => {
                    self.launcher.manual_launch(ActuatorPosition::Extended, now_us)
                }
                BenchAction::LaunchRetract => {
                    self.launcher.manual_launch(ActuatorPosition::Retracted, now_us)
                }
                BenchAction::LockRetract => {
                    self.launcher.manual_lock(ActuatorPosition::Retracted, now_us)
                }
                BenchAction::LockExtend => {
                    self.launcher.manual_lock(ActuatorPosition::Extended, now_us)
                }
                BenchAction::BlockerRetract => self.blocker.up(),
                BenchAction::BlockerExtend => self.blocker.down(),
                BenchAction::Reinitialize => {
                    self.launcher.initialize(true, clock);
                }
            }
            self.launcher
                .display_mut()
                .show(action.message(), LINE_BENCH);
            crate::log_debug!("Bench: {}", action.message());
        }

        self.launcher.refresh_display(clock.now_us());
        action
    }
}

/// Hardware set made of the crate's mocks.
pub struct MockHardware;

impl RobotHardware for MockHardware {
    type Solenoid = crate::pneumatics::MockSolenoid;
    type Drive = crate::drive::MockDrive;
    type Indicator = crate::drive::MockIndicator;
    type Display = crate::display::MockDisplay;
    type Compressor = crate::pneumatics::MockCompressor;
}

impl RobotParts<MockHardware> {
    /// Fresh mocks with every solenoid de-energized.
    pub fn mock() -> Self {
        use crate::display::MockDisplay;
        use crate::drive::{MockDrive, MockIndicator};
        use crate::pneumatics::{MockCompressor, MockSolenoid};

        Self {
            launch: MockSolenoid::new(),
            lock: MockSolenoid::new(),
            blocker: MockSolenoid::new(),
            drive: MockDrive::new(),
            indicator: MockIndicator::new(),
            display: MockDisplay::new(),
            compressor: MockCompressor::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::LINE_STATUS;
    use crate::drive::DriveCommand;
    use crate::launcher::BlockerPosition;
    use crate::traits::{MockTime, TimeSource};

    const TICK_US: u64 = 20_000;

    fn robot(config: RobotConfig) -> Robot<MockHardware> {
        Robot::new(RobotParts::mock(), config)
    }

    fn idle_axes() -> DriverAxes {
        DriverAxes::default()
    }

    fn fire() -> ShooterButtons {
        ShooterButtons {
            fire: true,
            ..ShooterButtons::NONE
        }
    }

    /// Enter teleop and wait until the launcher reports Ready.
    fn ready_in_teleop(config: RobotConfig) -> (Robot<MockHardware>, MockTime) {
        let time = MockTime::new();
        let mut robot = robot(config);
        robot.robot_init();
        robot.teleop_init(&time);
        time.advance_secs(10.0);
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Ready);
        (robot, time)
    }

    #[test]
    fn test_robot_init_starts_compressor() {
        let mut robot = robot(RobotConfig::default());
        robot.robot_init();
        assert!(robot.compressor().is_running());
        assert_eq!(robot.launcher().display().line(LINE_MODE), "Robot Enabled");
    }

    #[test]
    fn test_disabled_init_banner() {
        let mut robot = robot(RobotConfig::default());
        robot.disabled_init();
        assert_eq!(robot.mode(), RobotMode::Disabled);
        assert_eq!(robot.launcher().display().line(LINE_MODE), "Robot Disabled");
    }

    #[test]
    fn test_autonomous_init_prepares_launcher() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());

        let status = robot.autonomous_init(&time);
        assert_eq!(status, LauncherStatus::Pressurizing);
        assert_eq!(robot.blocker().position(), Some(BlockerPosition::Down));
        // Prime 0.5 s + lock 1.0 s
        assert_eq!(time.now_ms(), 1500);
        assert_eq!(robot.autonomous().phase(), AutoPhase::Start);
        assert_eq!(
            robot.launcher().display().line(LINE_STATUS),
            "Launcher Pressurizing"
        );
    }

    #[test]
    fn test_autonomous_routine_runs_to_done() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());
        robot.autonomous_init(&time);

        let mut last = AutoPhase::Start;
        for _ in 0..150 {
            let phase = robot.autonomous_periodic(&time);
            assert!(phase >= last);
            last = phase;
            time.advance(TICK_US);
        }

        assert_eq!(last, AutoPhase::Done);
        assert!(!robot.indicator().is_on());
        assert_eq!(robot.drive().last_command(), Some(DriveCommand::STOP));
        assert_eq!(
            robot.launcher().display().line(LINE_MODE),
            "Autonomous Enabled"
        );
    }

    #[test]
    fn test_teleop_stepped_launch_cycle() {
        let (mut robot, time) = ready_in_teleop(RobotConfig::default());

        assert_eq!(
            robot.teleop_periodic(&time, &idle_axes(), &fire()),
            LaunchEvent::Started
        );
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Raised);

        let mut completed = false;
        for _ in 0..200 {
            time.advance(TICK_US);
            // Holding the trigger does not restart the sequence
            match robot.teleop_periodic(&time, &idle_axes(), &fire()) {
                LaunchEvent::Completed => {
                    completed = true;
                    break;
                }
                LaunchEvent::Waiting | LaunchEvent::Dropped => {}
                other => panic!("unexpected event {:?}", other),
            }
        }

        assert!(completed);
        assert_eq!(robot.sequencer().completed_count(), 1);
        assert_eq!(
            robot.launcher().launch_position(),
            Some(ActuatorPosition::Retracted)
        );
        assert_eq!(
            robot.launcher().lock_position(),
            Some(ActuatorPosition::Extended)
        );
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Pressurizing);

        time.advance_secs(10.5);
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Ready);
    }

    #[test]
    fn test_mode_change_abandons_launch() {
        let (mut robot, time) = ready_in_teleop(RobotConfig::default());
        assert_eq!(
            robot.teleop_periodic(&time, &idle_axes(), &fire()),
            LaunchEvent::Started
        );

        robot.disabled_init();
        assert!(!robot.sequencer().is_active());
        robot.teleop_init(&time);

        let blocker_up = ShooterButtons {
            blocker_up: true,
            ..ShooterButtons::NONE
        };
        time.advance(TICK_US);
        assert_eq!(
            robot.teleop_periodic(&time, &idle_axes(), &blocker_up),
            LaunchEvent::Idle
        );
        assert_eq!(robot.blocker().position(), Some(BlockerPosition::Up));
        assert_eq!(robot.sequencer().halted_count(), 0);
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Pressurizing);
    }

    #[test]
    fn test_teleop_blocking_launch() {
        let mut config = RobotConfig::default();
        config.launcher.stepped = false;
        let (mut robot, time) = ready_in_teleop(config);
        let before_ms = time.now_ms();

        assert_eq!(
            robot.teleop_periodic(&time, &idle_axes(), &fire()),
            LaunchEvent::Completed
        );
        // Settle 1 s + fall 2 s spent inside the call
        assert_eq!(time.now_ms() - before_ms, 3000);
        assert!(!robot.sequencer().is_active());
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Pressurizing);
    }

    #[test]
    fn test_buttons_ignored_during_launch() {
        let (mut robot, time) = ready_in_teleop(RobotConfig::default());
        robot.teleop_periodic(&time, &idle_axes(), &fire());

        time.advance(TICK_US);
        let buttons = ShooterButtons {
            blocker_up: true,
            lock_extend: true,
            ..ShooterButtons::NONE
        };
        let axes = DriverAxes {
            left_y: -1.0,
            ..DriverAxes::default()
        };
        assert_eq!(
            robot.teleop_periodic(&time, &axes, &buttons),
            LaunchEvent::Waiting
        );

        // Shooter untouched, drive still commanded
        assert_eq!(robot.blocker().position(), None);
        assert_eq!(
            robot.launcher().lock_position(),
            Some(ActuatorPosition::Retracted)
        );
        assert_eq!(robot.drive().last_command().unwrap().forward, 1.0);
    }

    #[test]
    fn test_fire_not_ready_falls_through_to_buttons() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());
        robot.teleop_init(&time);

        let buttons = ShooterButtons {
            fire: true,
            blocker_up: true,
            ..ShooterButtons::NONE
        };
        assert_eq!(
            robot.teleop_periodic(&time, &idle_axes(), &buttons),
            LaunchEvent::NotReady(LauncherStatus::Pressurizing)
        );
        assert_eq!(robot.blocker().position(), Some(BlockerPosition::Up));
    }

    #[test]
    fn test_manual_buttons() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());
        robot.teleop_init(&time);

        // Free: launch extended while locked
        let free = ShooterButtons {
            free: true,
            ..ShooterButtons::NONE
        };
        robot.teleop_periodic(&time, &idle_axes(), &free);
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Locked);

        // Pressurize is allowed from Locked
        let pressurize = ShooterButtons {
            pressurize: true,
            ..ShooterButtons::NONE
        };
        robot.teleop_periodic(&time, &idle_axes(), &pressurize);
        assert_eq!(
            robot.launcher().launch_position(),
            Some(ActuatorPosition::Retracted)
        );

        let unlock = ShooterButtons {
            lock_retract: true,
            ..ShooterButtons::NONE
        };
        robot.teleop_periodic(&time, &idle_axes(), &unlock);
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Raised);
        assert_eq!(
            robot.launcher().display().line(LINE_STATUS),
            "Launcher Raised"
        );
    }

    #[test]
    fn test_teleop_drive_deadband() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());
        robot.teleop_init(&time);

        let axes = DriverAxes {
            left_y: 0.2,
            triggers: 0.0,
            right_x: 0.9,
        };
        robot.teleop_periodic(&time, &axes, &ShooterButtons::NONE);
        let cmd = robot.drive().last_command().unwrap();
        assert_eq!(cmd.forward, 0.0);
        assert!((cmd.rotation - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_bench_actions() {
        let time = MockTime::new();
        let mut robot = robot(RobotConfig::default());

        let bench = BenchButtons {
            launch_extend: true,
            ..BenchButtons::default()
        };
        assert_eq!(
            robot.test_periodic(&time, &bench),
            Some(BenchAction::LaunchExtend)
        );
        assert_eq!(robot.mode(), RobotMode::Test);
        assert_eq!(
            robot.launcher().display().line(LINE_BENCH),
            "Launch extended"
        );
        // Lock still de-energized
        assert_eq!(robot.status(time.now_us()), LauncherStatus::Abnormal);

        let bench = BenchButtons {
            reinitialize: true,
            ..BenchButtons::default()
        };
        robot.test_periodic(&time, &bench);
        assert_eq!(
            robot.launcher().display().line(LINE_BENCH),
            "Solenoids reset"
        );
        assert_eq!(
            robot.launcher().display().line(LINE_STATUS),
            "Launcher Pressurizing"
        );

        assert_eq!(robot.test_periodic(&time, &BenchButtons::default()), None);
    }
}
