//! Simulated driver station LCD for SITL.

use catapult_core::display::{StatusDisplay, DISPLAY_LINES};

/// Six-line text panel. Line changes are logged at info level.
#[derive(Debug, Clone, Default)]
pub struct SitlDashboard {
    lines: [String; DISPLAY_LINES],
    changes: u32,
}

impl SitlDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text on `line` (empty when out of range).
    pub fn line(&self, line: u8) -> &str {
        self.lines
            .get(line as usize)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Number of writes that changed a line.
    pub fn changes(&self) -> u32 {
        self.changes
    }
}

impl StatusDisplay for SitlDashboard {
    fn show(&mut self, text: &str, line: u8) {
        let Some(slot) = self.lines.get_mut(line as usize) else {
            return;
        };
        if slot.as_str() != text {
            log::info!("[LCD {}] {}", line, text);
            slot.clear();
            slot.push_str(text);
            self.changes += 1;
        }
    }

    fn clear(&mut self) {
        for line in self.lines.iter_mut() {
            line.clear();
        }
    }
}
