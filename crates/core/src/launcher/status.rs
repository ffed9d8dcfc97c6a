//! Launcher status classification
//!
//! The launcher status is never stored. It is derived on demand from the two
//! solenoid positions and the time since the pressurization timer was reset.

use core::fmt;

use crate::pneumatics::ActuatorPosition;

/// Default pressurization time before the launcher counts as ready (seconds).
pub const DEFAULT_LAUNCH_DELAY_S: f32 = 10.0;

/// Discrete operating status of the launcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LauncherStatus {
    /// Locked, pressurized and the launch delay has elapsed
    Ready,
    /// Locked and pressurized, launch delay still running
    Pressurizing,
    /// Locked with the launch cylinder dropped
    Locked,
    /// Released with the launch cylinder dropped
    Down,
    /// Released with the arm up
    Raised,
    /// Any combination outside the modeled operating phases
    Abnormal,
}

impl LauncherStatus {
    /// Dashboard text for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LauncherStatus::Ready => "Launcher Ready",
            LauncherStatus::Pressurizing => "Launcher Pressurizing",
            LauncherStatus::Locked => "Launcher Locked",
            LauncherStatus::Down => "Launcher Dropped",
            LauncherStatus::Raised => "Launcher Raised",
            LauncherStatus::Abnormal => "Abnormal State",
        }
    }
}

impl fmt::Display for LauncherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify the launcher from its actuator positions and pressurization time.
///
/// Rules are evaluated in order and the first match wins:
///
/// 1. lock extended, launch retracted, `elapsed_s > launch_delay_s` → `Ready`
/// 2. lock extended, launch retracted → `Pressurizing`
/// 3. lock extended, launch extended → `Locked`
/// 4. lock retracted, launch extended → `Down`
/// 5. lock retracted → `Raised`
/// 6. anything else (a de-energized valve) → `Abnormal`
///
/// A NaN elapsed time never exceeds the delay and classifies as `Pressurizing`.
///
/// # Arguments
///
/// * `launch` - Launch solenoid position (`None` = de-energized)
/// * `lock` - Lock solenoid position (`None` = de-energized)
/// * `elapsed_s` - Seconds since the pressurization timer was reset
/// * `launch_delay_s` - Pressurization threshold in seconds
pub fn classify(
    launch: Option<ActuatorPosition>,
    lock: Option<ActuatorPosition>,
    elapsed_s: f32,
    launch_delay_s: f32,
) -> LauncherStatus {
    use ActuatorPosition::{Extended, Retracted};

    match (lock, launch) {
        (Some(Extended), Some(Retracted)) if elapsed_s > launch_delay_s => LauncherStatus::Ready,
        (Some(Extended), Some(Retracted)) => LauncherStatus::Pressurizing,
        (Some(Extended), Some(Extended)) => LauncherStatus::Locked,
        (Some(Retracted), Some(Extended)) => LauncherStatus::Down,
        (Some(Retracted), _) => LauncherStatus::Raised,
        _ => LauncherStatus::Abnormal,
    }
}
