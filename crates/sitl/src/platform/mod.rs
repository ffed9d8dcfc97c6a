//! Simulated platform for SITL.
//!
//! `SitlPlatform` owns the shared handles of the simulated peripherals and
//! hands out the [`RobotParts`] a [`Robot`](catapult_core::robot::Robot) is
//! built from. The mechanism model observes the same solenoids through the
//! platform handles.

pub mod dashboard;
pub mod drive;
pub mod gpio;
pub mod pneumatics;
pub mod timer;

pub use dashboard::SitlDashboard;
pub use drive::{mecanum_mix, SitlMecanumDrive, WheelOutputs};
pub use gpio::SitlGpio;
pub use pneumatics::{SitlCompressor, SitlSolenoid};
pub use timer::SitlTimeSource;

use catapult_core::robot::{RobotHardware, RobotParts};

/// Relay channel driving the camera ring light.
pub const LIGHT_RELAY: u8 = 1;

/// Full-scale drive speed (m/s).
pub const MAX_SPEED_MPS: f32 = 3.0;

/// Full-scale turn rate (rad/s).
pub const MAX_TURN_RPS: f32 = 3.0;

/// Simulated hardware set.
pub struct SitlHardware;

impl RobotHardware for SitlHardware {
    type Solenoid = SitlSolenoid;
    type Drive = SitlMecanumDrive;
    type Indicator = SitlGpio;
    type Display = SitlDashboard;
    type Compressor = SitlCompressor;
}

/// Shared peripheral handles for one simulated robot.
#[derive(Debug, Clone)]
pub struct SitlPlatform {
    time_source: SitlTimeSource,
    launch: SitlSolenoid,
    lock: SitlSolenoid,
    blocker: SitlSolenoid,
    compressor: SitlCompressor,
}

impl SitlPlatform {
    /// Create a platform with its own time source.
    pub fn new() -> Self {
        Self::with_time_source(SitlTimeSource::new())
    }

    /// Create a platform with a shared time source.
    pub fn with_time_source(time_source: SitlTimeSource) -> Self {
        Self {
            time_source,
            launch: SitlSolenoid::new("launch"),
            lock: SitlSolenoid::new("lock"),
            blocker: SitlSolenoid::new("blocker"),
            compressor: SitlCompressor::new(),
        }
    }

    /// Build the robot's hardware parts (sharing the platform handles).
    pub fn robot_parts(&self) -> RobotParts<SitlHardware> {
        RobotParts {
            launch: self.launch.clone(),
            lock: self.lock.clone(),
            blocker: self.blocker.clone(),
            drive: SitlMecanumDrive::new(MAX_SPEED_MPS, MAX_TURN_RPS),
            indicator: SitlGpio::new_output(LIGHT_RELAY),
            display: SitlDashboard::new(),
            compressor: self.compressor.clone(),
        }
    }

    pub fn time_source(&self) -> &SitlTimeSource {
        &self.time_source
    }

    pub fn launch(&self) -> &SitlSolenoid {
        &self.launch
    }

    pub fn lock(&self) -> &SitlSolenoid {
        &self.lock
    }

    pub fn blocker(&self) -> &SitlSolenoid {
        &self.blocker
    }

    pub fn compressor(&self) -> &SitlCompressor {
        &self.compressor
    }
}

impl Default for SitlPlatform {
    fn default() -> Self {
        Self::new()
    }
}
