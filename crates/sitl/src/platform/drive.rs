//! Simulated mecanum drive for SITL.
//!
//! Mixes Cartesian commands into four normalized wheel outputs (right side
//! inverted, as wired on the robot) and dead-reckons the robot position.

use catapult_core::drive::{DriveBase, DriveCommand};

/// Wheel outputs in [-1.0, 1.0], after inversion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WheelOutputs {
    pub front_left: f32,
    pub front_right: f32,
    pub rear_left: f32,
    pub rear_right: f32,
}

/// Mecanum mixing of a robot-frame command.
///
/// Outputs are scaled down together when any wheel exceeds 1.0.
pub fn mecanum_mix(command: DriveCommand) -> WheelOutputs {
    let DriveCommand {
        strafe,
        forward,
        rotation,
    } = command;

    let mut wheels = [
        forward + strafe + rotation,
        forward - strafe - rotation,
        forward - strafe + rotation,
        forward + strafe - rotation,
    ];

    let max = wheels.iter().fold(0.0_f32, |m, w| m.max(w.abs()));
    if max > 1.0 {
        for w in wheels.iter_mut() {
            *w /= max;
        }
    }

    WheelOutputs {
        front_left: wheels[0],
        front_right: -wheels[1],
        rear_left: wheels[2],
        rear_right: -wheels[3],
    }
}

/// Simulated mecanum drive base.
#[derive(Debug, Clone, Default)]
pub struct SitlMecanumDrive {
    command: DriveCommand,
    wheels: WheelOutputs,
    /// Dead-reckoned position (m), x forward, y right
    position_m: (f32, f32),
    /// Heading (rad), clockwise
    heading_rad: f32,
    max_speed_mps: f32,
    max_turn_rps: f32,
}

impl SitlMecanumDrive {
    /// Create a drive with the given full-scale speeds.
    pub fn new(max_speed_mps: f32, max_turn_rps: f32) -> Self {
        Self {
            max_speed_mps,
            max_turn_rps,
            ..Default::default()
        }
    }

    /// Last commanded motion.
    pub fn command(&self) -> DriveCommand {
        self.command
    }

    /// Last wheel outputs.
    pub fn wheels(&self) -> WheelOutputs {
        self.wheels
    }

    /// Dead-reckoned position (m).
    pub fn position_m(&self) -> (f32, f32) {
        self.position_m
    }

    /// Distance from the start position (m).
    pub fn distance_m(&self) -> f32 {
        let (x, y) = self.position_m;
        (x * x + y * y).sqrt()
    }

    /// Integrate the current command over `dt_s`.
    pub fn integrate(&mut self, dt_s: f32) {
        let c = self.command;
        self.heading_rad += c.rotation * self.max_turn_rps * dt_s;
        let (sin, cos) = self.heading_rad.sin_cos();
        let vx = c.forward * self.max_speed_mps;
        let vy = c.strafe * self.max_speed_mps;
        self.position_m.0 += (vx * cos - vy * sin) * dt_s;
        self.position_m.1 += (vx * sin + vy * cos) * dt_s;
    }
}

impl DriveBase for SitlMecanumDrive {
    fn drive_cartesian(&mut self, strafe: f32, forward: f32, rotation: f32) {
        self.command = DriveCommand::new(strafe, forward, rotation);
        self.wheels = mecanum_mix(self.command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_mix_inverts_right_side() {
        let w = mecanum_mix(DriveCommand::new(0.0, 0.5, 0.0));
        assert_eq!(w.front_left, 0.5);
        assert_eq!(w.rear_left, 0.5);
        assert_eq!(w.front_right, -0.5);
        assert_eq!(w.rear_right, -0.5);
    }

    #[test]
    fn test_mix_normalizes() {
        let w = mecanum_mix(DriveCommand::new(1.0, 1.0, 0.0));
        assert!((w.front_left - 1.0).abs() < 1e-6);
        assert!(w.front_right.abs() < 1e-6);
        assert!((w.rear_right + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_integrate_forward() {
        let mut drive = SitlMecanumDrive::new(2.0, 1.0);
        drive.drive_cartesian(0.0, 1.0, 0.0);
        for _ in 0..50 {
            drive.integrate(0.02);
        }
        let (x, y) = drive.position_m();
        assert!((x - 2.0).abs() < 1e-3);
        assert!(y.abs() < 1e-6);

        drive.stop();
        drive.integrate(1.0);
        assert!((drive.distance_m() - 2.0).abs() < 1e-3);
    }
}
