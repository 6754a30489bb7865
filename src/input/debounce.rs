//! Time-gated acceptance of remote-control reads.
//!
//! One physical key press makes the IR receiver emit a burst of repeat
//! decodes.  A decode is accepted only when at least `window_ms` have passed
//! since the previously accepted one; everything in between is dropped as if
//! the receiver had reported nothing.
//!
//! ```text
//!  decode:   x  x  x  x           x  x
//!  tick:     0  40 90 140   ...   420 460
//!  accepted: x                    x
//! ```

use crate::clock::{Tick, elapsed};

use super::remote::RemoteCode;

/// Debounce window of the reference receiver.
pub const DEFAULT_WINDOW_MS: u32 = 300;

pub struct RemoteDebouncer {
    window_ms: u32,
    /// Tick of the last accepted read; `None` until the first one.
    last_accepted: Option<Tick>,
}

impl RemoteDebouncer {
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted: None,
        }
    }

    /// Filter this cycle's decode.  Returns the code only if accepted.
    pub fn accept(&mut self, decoded: Option<RemoteCode>, now: Tick) -> Option<RemoteCode> {
        let code = decoded?;
        let open = self
            .last_accepted
            .is_none_or(|last| elapsed(now, last) >= self.window_ms);
        if !open {
            return None;
        }
        self.last_accepted = Some(now);
        Some(code)
    }

    pub fn last_accepted(&self) -> Option<Tick> {
        self.last_accepted
    }
}

impl Default for RemoteDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}
