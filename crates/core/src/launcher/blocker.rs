//! Blocker gate
//!
//! The blocker is a single solenoid in front of the launcher. It is not part
//! of the launch interlock and is commanded directly by the operator.

use crate::pneumatics::{ActuatorPosition, DoubleSolenoid};

/// Blocker gate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlockerPosition {
    /// Gate raised (solenoid retracted)
    Up,
    /// Gate lowered (solenoid extended)
    Down,
}

/// Blocker gate driven by one double solenoid.
pub struct Blocker<S: DoubleSolenoid> {
    solenoid: S,
}

impl<S: DoubleSolenoid> Blocker<S> {
    /// Wrap the blocker solenoid.
    pub fn new(solenoid: S) -> Self {
        Self { solenoid }
    }

    /// Raise the gate.
    pub fn up(&mut self) {
        self.solenoid.retract();
    }

    /// Lower the gate.
    pub fn down(&mut self) {
        self.solenoid.extend();
    }

    /// Current gate position (`None` until first commanded).
    pub fn position(&self) -> Option<BlockerPosition> {
        self.solenoid.position().map(|p| match p {
            ActuatorPosition::Retracted => BlockerPosition::Up,
            ActuatorPosition::Extended => BlockerPosition::Down,
        })
    }
}
