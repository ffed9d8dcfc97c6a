//! Driver station status display
//!
//! The driver station exposes a small text panel. The robot writes its mode
//! banner on line 0, the launcher status on line 1 and bench-test feedback on
//! line 2. Writes are fire-and-forget.

use heapless::String;

/// Number of text lines on the driver station panel.
pub const DISPLAY_LINES: usize = 6;

/// Line used for the robot mode banner.
pub const LINE_MODE: u8 = 0;

/// Line used for the launcher status.
pub const LINE_STATUS: u8 = 1;

/// Line used for bench-test feedback.
pub const LINE_BENCH: u8 = 2;

/// Status display interface
pub trait StatusDisplay {
    /// Replace the contents of `line` with `text`
    ///
    /// Out-of-range lines are ignored.
    fn show(&mut self, text: &str, line: u8);

    /// Clear every line
    fn clear(&mut self) {}
}

/// Maximum characters kept per line by [`MockDisplay`].
pub const MOCK_LINE_LEN: usize = 32;

/// Mock display that keeps the last text written to each line.
#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    lines: [String<MOCK_LINE_LEN>; DISPLAY_LINES],
    writes: u32,
}

impl MockDisplay {
    /// Create a blank display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text currently shown on `line` (empty when out of range).
    pub fn line(&self, line: u8) -> &str {
        self.lines
            .get(line as usize)
            .map(|l| l.as_str())
            .unwrap_or("")
    }

    /// Number of `show` calls received.
    pub fn write_count(&self) -> u32 {
        self.writes
    }
}

impl StatusDisplay for MockDisplay {
    fn show(&mut self, text: &str, line: u8) {
        let Some(slot) = self.lines.get_mut(line as usize) else {
            return;
        };
        slot.clear();
        for c in text.chars() {
            if slot.push(c).is_err() {
                break;
            }
        }
        self.writes += 1;
    }

    fn clear(&mut self) {
        for line in self.lines.iter_mut() {
            line.clear();
        }
    }
}
