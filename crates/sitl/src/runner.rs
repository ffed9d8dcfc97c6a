//! Match runner.
//!
//! Plays one match against the simulated robot: robot init, disabled,
//! autonomous, teleop, disabled. Each mode's init callback runs once, then
//! its periodic callback every control period. Simulated time advances by
//! one period per tick; blocking waits inside the robot (initialization,
//! blocking launches) advance it further and the mechanism model catches up.

use std::time::Duration;

use catapult_core::autonomous::AutoPhase;
use catapult_core::launcher::{LaunchEvent, LauncherStatus};
use catapult_core::parameters::RobotConfig;
use catapult_core::robot::Robot;
use catapult_core::traits::TimeSource;

use crate::config::{MatchConfig, TimeMode};
use crate::error::SimulatorError;
use crate::mechanism::LauncherModel;
use crate::platform::{SitlHardware, SitlPlatform};
use crate::script::MatchScript;

/// Summary of a finished match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchReport {
    /// Simulated time at the end of the match (seconds)
    pub sim_time_s: f64,
    /// Control cycles run
    pub ticks: u64,
    /// Full-pressure shots
    pub shots: u32,
    /// Releases with a partial charge
    pub weak_shots: u32,
    pub launches_completed: u32,
    pub launches_halted: u32,
    /// Launcher status when teleop ended
    pub final_status: LauncherStatus,
    /// Autonomous phase when autonomous ended
    pub autonomous_phase: AutoPhase,
    /// Distance driven from the start position (m)
    pub distance_m: f32,
}

/// Simulated match.
pub struct MatchRunner {
    platform: SitlPlatform,
    robot: Robot<SitlHardware>,
    model: LauncherModel,
    script: MatchScript,
    config: MatchConfig,
    ticks: u64,
    /// Simulated time the model has been stepped to
    model_time_us: u64,
}

impl MatchRunner {
    /// Build a runner on a fresh platform.
    pub fn new(
        robot_config: RobotConfig,
        script: MatchScript,
        config: MatchConfig,
    ) -> Result<Self, SimulatorError> {
        config.validate()?;

        let platform = SitlPlatform::new();
        let robot = Robot::new(platform.robot_parts(), robot_config);
        let model = LauncherModel::new(
            platform.launch().clone(),
            platform.lock().clone(),
            platform.compressor().clone(),
        )
        .with_charge_time(config.charge_time_s);

        Ok(Self {
            platform,
            robot,
            model,
            script,
            config,
            ticks: 0,
            model_time_us: 0,
        })
    }

    pub fn robot(&self) -> &Robot<SitlHardware> {
        &self.robot
    }

    pub fn platform(&self) -> &SitlPlatform {
        &self.platform
    }

    pub fn model(&self) -> &LauncherModel {
        &self.model
    }

    /// Run the whole match.
    pub async fn run(&mut self) -> Result<MatchReport, SimulatorError> {
        let time = self.platform.time_source().clone();

        self.robot.robot_init();
        self.robot.disabled_init();

        log::info!("Autonomous period ({} s)", self.config.autonomous_s);
        let start_us = time.now_us();
        let status = self.robot.autonomous_init(&time);
        log::info!("Autonomous init complete: {}", status);
        self.catch_up_model();
        let end_us = start_us.saturating_add(secs_to_us(self.config.autonomous_s));
        while time.now_us() < end_us {
            self.robot.autonomous_periodic(&time);
            self.tick().await;
        }
        let autonomous_phase = self.robot.autonomous().phase();

        log::info!("Teleop period ({} s)", self.config.teleop_s);
        let start_us = time.now_us();
        let status = self.robot.teleop_init(&time);
        log::info!("Teleop init complete: {}", status);
        self.catch_up_model();
        let end_us = start_us.saturating_add(secs_to_us(self.config.teleop_s));
        while time.now_us() < end_us {
            let t_s = (time.now_us() - start_us) as f32 / 1_000_000.0;
            let buttons = self.script.buttons_at(t_s);
            let axes = self.script.axes_at(t_s);
            let event = self.robot.teleop_periodic(&time, &axes, &buttons);
            log_launch_event(t_s, event);
            self.catch_up_model();
            self.tick().await;
        }
        let final_status = self.robot.status(time.now_us());
        let launcher = self.robot.launcher();
        log::debug!(
            "Launcher at end of teleop: launch {:?}, lock {:?}, pressurized {:.1} s",
            launcher.launch_position(),
            launcher.lock_position(),
            launcher.pressurization_elapsed_s(time.now_us())
        );

        self.robot.disabled_init();

        let report = MatchReport {
            sim_time_s: time.now_s(),
            ticks: self.ticks,
            shots: self.model.shots(),
            weak_shots: self.model.weak_shots(),
            launches_completed: self.robot.sequencer().completed_count(),
            launches_halted: self.robot.sequencer().halted_count(),
            final_status,
            autonomous_phase,
            distance_m: self.robot.drive().distance_m(),
        };
        log::info!(
            "Match complete: {} shots, {} weak, final status {}",
            report.shots,
            report.weak_shots,
            report.final_status
        );
        Ok(report)
    }

    /// Step the model over time consumed by blocking robot code.
    fn catch_up_model(&mut self) {
        let now_us = self.platform.time_source().now_us();
        if now_us > self.model_time_us {
            let dt_s = (now_us - self.model_time_us) as f32 / 1_000_000.0;
            self.model.step(dt_s);
            self.model_time_us = now_us;
        }
    }

    /// Advance one control period.
    async fn tick(&mut self) {
        let period_s = self.config.period_s();
        self.robot.drive_mut().integrate(period_s);
        self.platform.time_source().advance_us(self.config.period_us);
        self.catch_up_model();
        self.ticks += 1;

        match self.config.time_mode {
            TimeMode::Lockstep => tokio::task::yield_now().await,
            TimeMode::Scaled { factor } => {
                let wall = Duration::from_secs_f64(period_s as f64 / factor as f64);
                tokio::time::sleep(wall).await;
            }
        }
    }
}

fn secs_to_us(seconds: f32) -> u64 {
    (seconds.max(0.0) as f64 * 1_000_000.0) as u64
}

fn log_launch_event(t_s: f32, event: LaunchEvent) {
    match event {
        LaunchEvent::Started => log::info!("[{:6.2}s] Fire", t_s),
        LaunchEvent::Completed => log::info!("[{:6.2}s] Launch cycle complete", t_s),
        LaunchEvent::Halted { command, status } => {
            log::warn!("[{:6.2}s] Launch halted at {}: {}", t_s, command, status)
        }
        LaunchEvent::NotReady(status) => log::debug!("[{:6.2}s] Fire ignored: {}", t_s, status),
        _ => {}
    }
}
