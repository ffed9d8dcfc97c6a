//! Launcher mechanism model.
//!
//! Observes the launch and lock solenoids and tracks the air stored in the
//! launch cylinder. Pressure builds while the arm is locked with the launch
//! cylinder retracted and the compressor running. Releasing the lock fires
//! the arm; the shot only counts when the cylinder was fully charged.

use catapult_core::pneumatics::{ActuatorPosition, Compressor, DoubleSolenoid};

use crate::platform::{SitlCompressor, SitlSolenoid};

/// Default time to charge the cylinder from empty (seconds).
pub const DEFAULT_CHARGE_TIME_S: f32 = 8.0;

/// Stored pressure at or above which a release is a full shot.
const FULL_CHARGE: f32 = 0.999;

/// Outcome of one model step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MechanismEvent {
    /// Nothing notable
    None,
    /// Arm released at full pressure
    Shot,
    /// Arm released with a partial charge
    WeakShot,
}

/// Physical launcher model.
#[derive(Debug)]
pub struct LauncherModel {
    launch: SitlSolenoid,
    lock: SitlSolenoid,
    compressor: SitlCompressor,
    charge_time_s: f32,
    /// Stored pressure, 0.0 (vented) to 1.0 (full)
    pressure: f32,
    /// Lock releases already accounted for
    seen_releases: u32,
    shots: u32,
    weak_shots: u32,
}

impl LauncherModel {
    /// Attach the model to the robot's solenoids.
    pub fn new(launch: SitlSolenoid, lock: SitlSolenoid, compressor: SitlCompressor) -> Self {
        let seen_releases = lock.releases();
        Self {
            launch,
            lock,
            compressor,
            charge_time_s: DEFAULT_CHARGE_TIME_S,
            pressure: 0.0,
            seen_releases,
            shots: 0,
            weak_shots: 0,
        }
    }

    /// Override the charge time (clamped to at least 1 ms).
    pub fn with_charge_time(mut self, seconds: f32) -> Self {
        self.charge_time_s = seconds.max(0.001);
        self
    }

    pub fn pressure(&self) -> f32 {
        self.pressure
    }

    pub fn shots(&self) -> u32 {
        self.shots
    }

    pub fn weak_shots(&self) -> u32 {
        self.weak_shots
    }

    /// Advance the model by `dt_s`.
    pub fn step(&mut self, dt_s: f32) -> MechanismEvent {
        let lock = self.lock.position();
        let launch = self.launch.position();
        let mut event = MechanismEvent::None;

        // Releases are counted by the valve, so a release and re-lock inside
        // one long step still fires once
        let releases = self.lock.releases();
        if releases != self.seen_releases {
            self.seen_releases = releases;
            event = if self.pressure >= FULL_CHARGE {
                self.shots += 1;
                log::info!("Shot fired (total {})", self.shots);
                MechanismEvent::Shot
            } else {
                self.weak_shots += 1;
                log::warn!("Weak shot at {:.0}% pressure", self.pressure * 100.0);
                MechanismEvent::WeakShot
            };
            self.pressure = 0.0;
        }

        match (lock, launch) {
            (Some(ActuatorPosition::Extended), Some(ActuatorPosition::Retracted)) => {
                if self.compressor.is_running() {
                    self.pressure = (self.pressure + dt_s / self.charge_time_s).min(1.0);
                }
            }
            // Cylinder extended vents the stored air
            (_, Some(ActuatorPosition::Extended)) => self.pressure = 0.0,
            _ => {}
        }

        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> (LauncherModel, SitlSolenoid, SitlSolenoid, SitlCompressor) {
        let launch = SitlSolenoid::new("launch");
        let lock = SitlSolenoid::new("lock");
        let compressor = SitlCompressor::new();
        let model = LauncherModel::new(launch.clone(), lock.clone(), compressor.clone())
            .with_charge_time(2.0);
        (model, launch, lock, compressor)
    }

    fn run(model: &mut LauncherModel, seconds: f32) {
        let steps = (seconds / 0.02).round() as u32;
        for _ in 0..steps {
            model.step(0.02);
        }
    }

    #[test]
    fn test_charges_only_when_locked_and_pressurized() {
        let (mut model, mut launch, mut lock, mut compressor) = model();
        compressor.start();

        lock.extend();
        launch.extend();
        run(&mut model, 1.0);
        assert_eq!(model.pressure(), 0.0);

        launch.retract();
        run(&mut model, 1.0);
        assert!((model.pressure() - 0.5).abs() < 0.02);

        compressor.stop();
        run(&mut model, 1.0);
        assert!((model.pressure() - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_full_release_is_shot() {
        let (mut model, mut launch, mut lock, mut compressor) = model();
        compressor.start();
        lock.extend();
        launch.retract();
        run(&mut model, 3.0);
        assert_eq!(model.pressure(), 1.0);

        lock.retract();
        assert_eq!(model.step(0.02), MechanismEvent::Shot);
        assert_eq!(model.shots(), 1);
        assert_eq!(model.pressure(), 0.0);
    }

    #[test]
    fn test_early_release_is_weak() {
        let (mut model, mut launch, mut lock, mut compressor) = model();
        compressor.start();
        lock.extend();
        launch.retract();
        run(&mut model, 0.5);

        lock.retract();
        assert_eq!(model.step(0.02), MechanismEvent::WeakShot);
        assert_eq!(model.shots(), 0);
        assert_eq!(model.weak_shots(), 1);
    }
}
