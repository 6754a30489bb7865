//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AlarmService (domain)
//! ```
//!
//! Driven adapters (input, clock, display, event sinks) implement these
//! traits.  The [`AlarmService`](super::service::AlarmService) consumes them
//! via generics, so the domain core never touches hardware directly.
//!
//! None of these ports return errors.  A peripheral that misbehaves is the
//! adapter's problem: it logs and reports "no input" instead.

use crate::clock::{Tick, Timestamp};
use crate::display::DisplayDirective;
use crate::input::InputPoll;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: IR / RFID / sensors → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: sampled exactly once per cycle.
pub trait InputPort {
    /// Sample every input channel and return one coherent snapshot.
    fn poll(&mut self) -> InputPoll;
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: timer / RTC → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic ticks plus an on-demand calendar reading.
pub trait ClockPort {
    /// Milliseconds since boot, wrapping at `u32::MAX`.
    fn now_ms(&self) -> Tick;

    /// Current wall-clock time from the RTC.
    fn timestamp(&mut self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → panel)
// ───────────────────────────────────────────────────────────────

/// Write-side port: executes one directive.
pub trait DisplayPort {
    fn render(&mut self, directive: &DisplayDirective);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
