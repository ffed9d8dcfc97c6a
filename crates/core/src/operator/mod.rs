//! Operator input mapping
//!
//! Snapshots of the operator controls sampled once per control cycle, and
//! their translation into drive commands and bench actions. Reading the
//! physical joystick is the platform's job; this module only interprets the
//! sampled values.

use crate::drive::DriveCommand;

/// Shooter joystick buttons sampled this cycle.
///
/// Dispatch order within a cycle is the field order below.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShooterButtons {
    /// Trigger: run the launch sequence
    pub fire: bool,
    /// Raise the blocker gate
    pub blocker_up: bool,
    /// Lower the blocker gate
    pub blocker_down: bool,
    /// Extend the launch cylinder unconditionally
    pub free: bool,
    /// Guarded re-pressurize
    pub pressurize: bool,
    /// Manual lock extend
    pub lock_extend: bool,
    /// Manual lock retract
    pub lock_retract: bool,
}

impl ShooterButtons {
    /// No buttons pressed.
    pub const NONE: Self = Self {
        fire: false,
        blocker_up: false,
        blocker_down: false,
        free: false,
        pressurize: false,
        lock_extend: false,
        lock_retract: false,
    };
}

/// Driver gamepad axes sampled this cycle, each in -1.0..=1.0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverAxes {
    /// Left stick Y (pushed forward is negative)
    pub left_y: f32,
    /// Combined trigger axis
    pub triggers: f32,
    /// Right stick X
    pub right_x: f32,
}

impl DriverAxes {
    /// Map axes to a drive command.
    ///
    /// forward = -deadband(left_y), strafe = -triggers,
    /// rotation = deadband(right_x). The trigger axis has no deadband.
    pub fn to_drive_command(&self, deadband: f32) -> DriveCommand {
        DriveCommand::new(
            -self.triggers,
            -apply_deadband(self.left_y, deadband),
            apply_deadband(self.right_x, deadband),
        )
    }
}

/// Zero any value whose magnitude is below `deadband`.
///
/// Symmetric for both signs. Non-finite input maps to 0.
pub fn apply_deadband(value: f32, deadband: f32) -> f32 {
    if !value.is_finite() || value.abs() < deadband {
        0.0
    } else {
        value
    }
}

/// Bench (test mode) buttons sampled this cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BenchButtons {
    pub launch_extend: bool,
    pub launch_retract: bool,
    pub lock_retract: bool,
    pub lock_extend: bool,
    pub blocker_retract: bool,
    pub blocker_extend: bool,
    pub reinitialize: bool,
}

/// Single raw actuation selected from the bench buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BenchAction {
    LaunchExtend,
    LaunchRetract,
    LockRetract,
    LockExtend,
    BlockerRetract,
    BlockerExtend,
    Reinitialize,
}

impl BenchAction {
    /// Dashboard confirmation text.
    pub fn message(self) -> &'static str {
        match self {
            BenchAction::LaunchExtend => "Launch extended",
            BenchAction::LaunchRetract => "Launch retracted",
            BenchAction::LockRetract => "Lock retracted",
            BenchAction::LockExtend => "Lock extended",
            BenchAction::BlockerRetract => "Blocker retracted",
            BenchAction::BlockerExtend => "Blocker extended",
            BenchAction::Reinitialize => "Solenoids reset",
        }
    }
}

impl BenchButtons {
    /// First pressed button in priority order, if any.
    ///
    /// Only one actuation runs per cycle.
    pub fn action(&self) -> Option<BenchAction> {
        let table = [
            (self.launch_extend, BenchAction::LaunchExtend),
            (self.launch_retract, BenchAction::LaunchRetract),
            (self.lock_retract, BenchAction::LockRetract),
            (self.lock_extend, BenchAction::LockExtend),
            (self.blocker_retract, BenchAction::BlockerRetract),
            (self.blocker_extend, BenchAction::BlockerExtend),
            (self.reinitialize, BenchAction::Reinitialize),
        ];
        table
            .iter()
            .find(|(pressed, _)| *pressed)
            .map(|(_, action)| *action)
    }
}
