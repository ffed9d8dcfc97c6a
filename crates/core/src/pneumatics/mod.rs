//! Pneumatic actuator abstraction
//!
//! This module provides platform-agnostic types for two-position pneumatic
//! actuators (double solenoids) and the compressor that feeds them:
//! - [`ActuatorPosition`]: commanded/queried position of a solenoid
//! - [`DoubleSolenoid`]: command and query interface
//! - [`Compressor`]: start/stop interface for the air supply
//!
//! # Design
//!
//! This module is pure `no_std` with no feature gates. Solenoid positions are
//! owned by the implementation (hardware or simulation); control logic only
//! reads them through [`DoubleSolenoid::position`] and writes them through
//! [`DoubleSolenoid::set_position`].

mod mock;

pub use mock::{MockCompressor, MockSolenoid};

use core::fmt;

/// Position of a two-position pneumatic actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActuatorPosition {
    /// Forward valve energized, piston extended
    Extended,
    /// Reverse valve energized, piston retracted
    Retracted,
}

impl fmt::Display for ActuatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorPosition::Extended => write!(f, "extended"),
            ActuatorPosition::Retracted => write!(f, "retracted"),
        }
    }
}

/// Double solenoid interface
///
/// A double solenoid has a forward and a reverse valve. Commanding a position
/// energizes one of them; until the first command (or after a power loss) both
/// are off and [`position`](DoubleSolenoid::position) reports `None`.
pub trait DoubleSolenoid {
    /// Command the actuator to a position
    fn set_position(&mut self, position: ActuatorPosition);

    /// Query the current position
    ///
    /// Returns `None` while both valves are de-energized.
    fn position(&self) -> Option<ActuatorPosition>;

    /// Extend the actuator
    fn extend(&mut self) {
        self.set_position(ActuatorPosition::Extended);
    }

    /// Retract the actuator
    fn retract(&mut self) {
        self.set_position(ActuatorPosition::Retracted);
    }
}

/// Air compressor interface
///
/// Closed-loop pressure switch handling is the implementation's concern;
/// control logic only enables or disables the compressor.
pub trait Compressor {
    /// Enable the compressor
    fn start(&mut self);

    /// Disable the compressor
    fn stop(&mut self);

    /// Check if the compressor is enabled
    fn is_running(&self) -> bool;
}
