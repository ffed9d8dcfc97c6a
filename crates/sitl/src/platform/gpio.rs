//! Simulated relay output for SITL.
//!
//! Drives the camera ring light. Tracks the pin state and the number of
//! state changes.

use catapult_core::drive::Indicator;

/// Simulated relay-driven output pin.
#[derive(Debug)]
pub struct SitlGpio {
    pin: u8,
    state: bool,
    transitions: u32,
}

impl SitlGpio {
    /// Create a new output pin (default low).
    pub fn new_output(pin: u8) -> Self {
        Self {
            pin,
            state: false,
            transitions: 0,
        }
    }

    /// Read pin state.
    pub fn read(&self) -> bool {
        self.state
    }

    /// Get the pin number.
    pub fn pin(&self) -> u8 {
        self.pin
    }

    /// Number of low/high changes since creation.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

impl Indicator for SitlGpio {
    fn set_indicator(&mut self, on: bool) {
        if on != self.state {
            self.transitions += 1;
            log::debug!("Relay {} {}", self.pin, if on { "on" } else { "off" });
        }
        self.state = on;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_pin() {
        let mut gpio = SitlGpio::new_output(1);
        assert_eq!(gpio.pin(), 1);
        assert!(!gpio.read());

        gpio.set_indicator(true);
        assert!(gpio.read());
        gpio.set_indicator(true);
        gpio.set_indicator(false);
        assert!(!gpio.read());
        assert_eq!(gpio.transitions(), 2);
    }
}
