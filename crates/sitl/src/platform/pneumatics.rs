//! Simulated pneumatics for SITL.
//!
//! Valve state lives behind an `Arc` so the mechanism model can observe the
//! same solenoid the robot commands.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

use catapult_core::pneumatics::{ActuatorPosition, Compressor, DoubleSolenoid};

const OFF: u8 = 0;
const EXTENDED: u8 = 1;
const RETRACTED: u8 = 2;

fn encode(position: Option<ActuatorPosition>) -> u8 {
    match position {
        None => OFF,
        Some(ActuatorPosition::Extended) => EXTENDED,
        Some(ActuatorPosition::Retracted) => RETRACTED,
    }
}

fn decode(raw: u8) -> Option<ActuatorPosition> {
    match raw {
        EXTENDED => Some(ActuatorPosition::Extended),
        RETRACTED => Some(ActuatorPosition::Retracted),
        _ => None,
    }
}

#[derive(Debug)]
struct ValveState {
    position: AtomicU8,
    transitions: AtomicU32,
    releases: AtomicU32,
}

/// Simulated double solenoid.
///
/// Clones share state. Starts de-energized.
#[derive(Debug, Clone)]
pub struct SitlSolenoid {
    name: &'static str,
    state: Arc<ValveState>,
}

impl SitlSolenoid {
    /// Create a de-energized solenoid.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: Arc::new(ValveState {
                position: AtomicU8::new(OFF),
                transitions: AtomicU32::new(0),
                releases: AtomicU32::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of position changes (repeated commands to the same position
    /// are not counted).
    pub fn transitions(&self) -> u32 {
        self.state.transitions.load(Ordering::Relaxed)
    }

    /// Number of Extended to Retracted changes.
    pub fn releases(&self) -> u32 {
        self.state.releases.load(Ordering::Relaxed)
    }

    /// Drop both valves (simulates a pneumatics power loss).
    pub fn de_energize(&self) {
        self.state.position.store(OFF, Ordering::Relaxed);
    }
}

impl DoubleSolenoid for SitlSolenoid {
    fn set_position(&mut self, position: ActuatorPosition) {
        let new = encode(Some(position));
        let old = self.state.position.swap(new, Ordering::Relaxed);
        if old != new {
            self.state.transitions.fetch_add(1, Ordering::Relaxed);
            if old == EXTENDED && new == RETRACTED {
                self.state.releases.fetch_add(1, Ordering::Relaxed);
            }
            log::debug!("Solenoid {} {}", self.name, position);
        }
    }

    fn position(&self) -> Option<ActuatorPosition> {
        decode(self.state.position.load(Ordering::Relaxed))
    }
}

/// Simulated compressor. Clones share the enable flag.
#[derive(Debug, Clone, Default)]
pub struct SitlCompressor {
    running: Arc<AtomicBool>,
}

impl SitlCompressor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Compressor for SitlCompressor {
    fn start(&mut self) {
        self.running.store(true, Ordering::Relaxed);
    }

    fn stop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }
}
