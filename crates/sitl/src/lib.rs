//! catapult_sitl - Software-in-the-loop match simulation
//!
//! Runs the `catapult_core` robot against simulated pneumatics, drive,
//! relay and driver station, with a physical model of the launcher and
//! scripted operator input.

pub mod config;
pub mod error;
pub mod mechanism;
pub mod platform;
pub mod runner;
pub mod script;

pub use config::{build_store, parse_override, MatchConfig, TimeMode};
pub use error::SimulatorError;
pub use mechanism::{LauncherModel, MechanismEvent};
pub use platform::{SitlHardware, SitlPlatform, SitlTimeSource};
pub use runner::{MatchReport, MatchRunner};
pub use script::{MatchScript, ScriptAction, ScriptedInput};
