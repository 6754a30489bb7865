//! Display directive dispatch.
//!
//! Full-screen redraws are expensive on the SPI panel, so the dispatcher
//! tracks what it last rendered and only issues a redraw on the edge into a
//! new state.  The alarm screen additionally flashes on its own cadence:
//!
//! ```text
//!  anchor          +1000 ms           +2000 ms = new anchor
//!    │ normal         │ inverted           │ normal ...
//!    ▼                ▼                    ▼
//!  AlarmEnter     Flash(true)          Flash(false)
//! ```
//!
//! At most one directive is produced per cycle.

use heapless::String;

use crate::clock::{TIMESTAMP_LEN, Tick, Timestamp, elapsed};
use crate::fsm::StateId;

/// Instruction for the display presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayDirective {
    RenderOffline,
    RenderIdle,
    RenderArmed,
    /// Alarm screen with the moment the alarm went off.
    RenderAlarmEnter(String<TIMESTAMP_LEN>),
    /// Toggle panel inversion while the alarm is active.
    RenderAlarmFlash { invert: bool },
}

/// Alarm screen flash timing.
struct FlashCadence {
    invert_ms: u32,
    period_ms: u32,
    anchor: Tick,
    inverted: bool,
}

impl FlashCadence {
    fn restart(&mut self, now: Tick) {
        self.anchor = now;
        self.inverted = false;
    }

    fn poll(&mut self, now: Tick) -> Option<bool> {
        let since = elapsed(now, self.anchor);
        if since >= self.period_ms {
            self.restart(now);
            Some(false)
        } else if since >= self.invert_ms && !self.inverted {
            self.inverted = true;
            Some(true)
        } else {
            None
        }
    }
}

pub struct DisplayDispatcher {
    /// State currently on screen; `None` before the first render.
    rendered: Option<StateId>,
    flash: FlashCadence,
}

impl DisplayDispatcher {
    pub fn new(flash_invert_ms: u32, flash_period_ms: u32) -> Self {
        Self {
            rendered: None,
            flash: FlashCadence {
                invert_ms: flash_invert_ms,
                period_ms: flash_period_ms,
                anchor: 0,
                inverted: false,
            },
        }
    }

    /// Decide what, if anything, to draw for `state` this cycle.
    ///
    /// `timestamp` is only called on the cycle that enters the alarm screen.
    pub fn dispatch(
        &mut self,
        state: StateId,
        now: Tick,
        timestamp: impl FnOnce() -> Timestamp,
    ) -> Option<DisplayDirective> {
        if self.rendered != Some(state) {
            self.rendered = Some(state);
            return Some(match state {
                StateId::Offline => DisplayDirective::RenderOffline,
                StateId::Idle => DisplayDirective::RenderIdle,
                StateId::Armed => DisplayDirective::RenderArmed,
                StateId::Alarm => {
                    self.flash.restart(now);
                    DisplayDirective::RenderAlarmEnter(timestamp().format())
                }
            });
        }

        if state == StateId::Alarm {
            return self
                .flash
                .poll(now)
                .map(|invert| DisplayDirective::RenderAlarmFlash { invert });
        }

        None
    }

    /// The state last rendered, if any.
    pub fn rendered(&self) -> Option<StateId> {
        self.rendered
    }
}
