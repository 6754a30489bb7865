//! Host clock adapter.
//!
//! Provides the millisecond tick and the calendar reading for the
//! simulator and host-side tests.
//!
//! - **Tick**: `std::time::Instant` since construction, truncated to `u32`
//!   so it wraps exactly like the board's millisecond counter.
//! - **Timestamp**: `SystemTime` converted to a UTC civil date.  A clock
//!   set before the Unix epoch reads as the epoch.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use crate::app::ports::ClockPort;
use crate::clock::{Tick, Timestamp};

/// Clock adapter backed by the host's monotonic and wall clocks.
pub struct HostClock {
    start: Instant,
}

impl Default for HostClock {
    fn default() -> Self {
        Self::new()
    }
}

impl HostClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl ClockPort for HostClock {
    fn now_ms(&self) -> Tick {
        self.start.elapsed().as_millis() as Tick
    }

    fn timestamp(&mut self) -> Timestamp {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        timestamp_from_unix(secs)
    }
}

/// Break Unix seconds into a UTC calendar timestamp.
pub fn timestamp_from_unix(secs: u64) -> Timestamp {
    let days = secs / 86_400;
    let rem = secs % 86_400;
    let (year, month, day) = civil_from_days(days as i64);
    Timestamp {
        year: year.clamp(0, i64::from(u16::MAX)) as u16,
        month,
        day,
        hour: (rem / 3600) as u8,
        minute: (rem % 3600 / 60) as u8,
        second: (rem % 60) as u8,
    }
}

/// Days since 1970-01-01 to (year, month, day) in the proleptic Gregorian
/// calendar.  Eras are 400-year blocks starting on March 1st.
fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}
