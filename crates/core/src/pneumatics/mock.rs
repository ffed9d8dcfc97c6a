//! Mock pneumatics for host testing

use super::{ActuatorPosition, Compressor, DoubleSolenoid};

/// Mock double solenoid that records every command it receives.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockSolenoid {
    position: Option<ActuatorPosition>,
    commands: u32,
}

impl MockSolenoid {
    /// Create a de-energized solenoid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a solenoid already in `position`.
    ///
    /// The initial position does not count as a command.
    pub fn at(position: ActuatorPosition) -> Self {
        Self {
            position: Some(position),
            commands: 0,
        }
    }

    /// De-energize both valves (simulates a power loss).
    pub fn de_energize(&mut self) {
        self.position = None;
    }

    /// Number of `set_position` calls received.
    pub fn command_count(&self) -> u32 {
        self.commands
    }
}

impl DoubleSolenoid for MockSolenoid {
    fn set_position(&mut self, position: ActuatorPosition) {
        self.position = Some(position);
        self.commands += 1;
    }

    fn position(&self) -> Option<ActuatorPosition> {
        self.position
    }
}

/// Mock compressor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCompressor {
    running: bool,
}

impl MockCompressor {
    /// Create a stopped compressor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Compressor for MockCompressor {
    fn start(&mut self) {
        self.running = true;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
