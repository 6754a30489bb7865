//! Time primitives shared by the controller and its clock adapters.
//!
//! Ticks are milliseconds from a free-running counter that wraps at
//! `u32::MAX` (about 49.7 days), so every elapsed-time comparison goes
//! through [`elapsed`] and its wrapping subtraction.

use core::fmt::{self, Write};

use heapless::String;

/// Monotonic millisecond tick.
pub type Tick = u32;

/// Ticks elapsed from `since` to `now`, tolerant of counter wrap.
#[inline]
pub fn elapsed(now: Tick, since: Tick) -> Tick {
    now.wrapping_sub(since)
}

/// Length of a formatted timestamp: `MM/DD/YYYY HH:MM:SS`.
pub const TIMESTAMP_LEN: usize = 19;

/// Calendar timestamp as reported by the real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl Timestamp {
    /// Render as the fixed-width string shown on the alarm screen.
    pub fn format(&self) -> String<TIMESTAMP_LEN> {
        let mut out = String::new();
        // Every field is clamped to its digit width, so this always fits.
        let _ = write!(out, "{self}");
        out
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}",
            self.month.min(99),
            self.day.min(99),
            self.year.min(9999),
            self.hour.min(99),
            self.minute.min(99),
            self.second.min(99),
        )
    }
}
