//! Drive base and indicator abstraction
//!
//! The drivetrain is a holonomic (mecanum) base commanded in the robot frame.
//! Wheel mixing belongs to the implementation; control logic only issues
//! normalized Cartesian commands.

/// Robot-frame drive command, each component normalized to [-1.0, +1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveCommand {
    /// Sideways motion (+ right)
    pub strafe: f32,
    /// Forward motion (+ forward)
    pub forward: f32,
    /// Rotation (+ clockwise)
    pub rotation: f32,
}

impl DriveCommand {
    /// All-zero command.
    pub const STOP: Self = Self {
        strafe: 0.0,
        forward: 0.0,
        rotation: 0.0,
    };

    /// Create a command with each component clamped to [-1.0, +1.0].
    pub fn new(strafe: f32, forward: f32, rotation: f32) -> Self {
        Self {
            strafe: strafe.clamp(-1.0, 1.0),
            forward: forward.clamp(-1.0, 1.0),
            rotation: rotation.clamp(-1.0, 1.0),
        }
    }
}

/// Drive base interface
pub trait DriveBase {
    /// Drive in the robot frame
    ///
    /// # Arguments
    ///
    /// * `strafe` - Sideways command (-1.0 left, +1.0 right)
    /// * `forward` - Forward command (-1.0 reverse, +1.0 forward)
    /// * `rotation` - Rotation command (-1.0 counter-clockwise, +1.0 clockwise)
    fn drive_cartesian(&mut self, strafe: f32, forward: f32, rotation: f32);

    /// Stop all wheels
    fn stop(&mut self) {
        self.apply(DriveCommand::STOP);
    }

    /// Apply a [`DriveCommand`]
    fn apply(&mut self, command: DriveCommand) {
        self.drive_cartesian(command.strafe, command.forward, command.rotation);
    }
}

/// On/off indicator output (camera ring light relay)
pub trait Indicator {
    /// Switch the indicator on or off
    fn set_indicator(&mut self, on: bool);
}

/// Mock drive base that records the last command and call count.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockDrive {
    last: Option<DriveCommand>,
    calls: u32,
}

impl MockDrive {
    /// Create a mock drive with no commands received.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last command received, if any.
    pub fn last_command(&self) -> Option<DriveCommand> {
        self.last
    }

    /// Number of drive calls received (including stops).
    pub fn call_count(&self) -> u32 {
        self.calls
    }
}

impl DriveBase for MockDrive {
    fn drive_cartesian(&mut self, strafe: f32, forward: f32, rotation: f32) {
        self.last = Some(DriveCommand::new(strafe, forward, rotation));
        self.calls += 1;
    }
}

/// Mock indicator that records its state and number of switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockIndicator {
    on: bool,
    writes: u32,
}

impl MockIndicator {
    /// Create an indicator that is off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current indicator state.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Number of `set_indicator` calls received.
    pub fn write_count(&self) -> u32 {
        self.writes
    }
}

impl Indicator for MockIndicator {
    fn set_indicator(&mut self, on: bool) {
        self.on = on;
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_command_clamped() {
        let cmd = DriveCommand::new(2.0, -3.0, 0.5);
        assert_eq!(cmd.strafe, 1.0);
        assert_eq!(cmd.forward, -1.0);
        assert_eq!(cmd.rotation, 0.5);
    }

    #[test]
    fn test_stop_via_default_method() {
        let mut drive = MockDrive::new();
        drive.drive_cartesian(0.0, 1.0, 0.0);
        drive.stop();
        assert_eq!(drive.call_count(), 2);
        assert_eq!(drive.last_command(), Some(DriveCommand::STOP));
    }

    #[test]
    fn test_indicator_records_state() {
        let mut light = MockIndicator::new();
        light.set_indicator(true);
        assert!(light.is_on());
        light.set_indicator(false);
        assert!(!light.is_on());
        assert_eq!(light.write_count(), 2);
    }
}
