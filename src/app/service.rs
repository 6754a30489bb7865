//! Application service — the hexagonal core.
//!
//! [`AlarmService`] is the one owned controller instance.  It holds the FSM
//! and its context (state, pending PIN entry, credentials), the remote
//! debounce timer and the display dispatcher (last rendered state, flash
//! timer).  Nothing else mutates any of them.
//!
//! ```text
//!    InputPort ──▶ ┌────────────────────────────┐ ──▶ DisplayPort
//!                  │        AlarmService        │
//!    ClockPort ──▶ │ Debounce · FSM · Dispatch  │ ──▶ EventSink
//!                  └────────────────────────────┘
//! ```

use heapless::Vec;
use log::{debug, info};

use crate::clock::Tick;
use crate::config::AlarmConfig;
use crate::credentials::CredentialStore;
use crate::display::{DisplayDirective, DisplayDispatcher};
use crate::error::Result;
use crate::fsm::context::{AlarmContext, CycleInput, MAX_NOTICES, Notice};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::input::InputPoll;
use crate::input::debounce::RemoteDebouncer;

use super::events::AppEvent;
use super::ports::{ClockPort, DisplayPort, EventSink, InputPort};

// ───────────────────────────────────────────────────────────────
// AlarmService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AlarmService {
    fsm: Fsm,
    ctx: AlarmContext,
    debouncer: RemoteDebouncer,
    display: DisplayDispatcher,
    /// Notices raised by the most recent step.
    notices: Vec<Notice, MAX_NOTICES>,
    cycle_count: u64,
}

impl AlarmService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM. Call [`start`](Self::start) next.
    pub fn new(config: &AlarmConfig) -> Result<Self> {
        config.validate()?;
        let credentials = CredentialStore::from_config(config)?;

        Ok(Self {
            fsm: Fsm::new(build_state_table(), StateId::Offline),
            ctx: AlarmContext::new(credentials, config),
            debouncer: RemoteDebouncer::new(config.debounce_ms),
            display: DisplayDispatcher::new(config.flash_invert_ms, config.flash_period_ms),
            notices: Vec::new(),
            cycle_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Offline).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AlarmService started in {:?}", self.fsm.current_state());
    }

    // ── Per-cycle core ────────────────────────────────────────

    /// Advance the controller by exactly one cycle.
    ///
    /// Debounces the remote, runs the FSM, and asks the dispatcher for at
    /// most one directive.  `clock` is only consulted for the calendar
    /// timestamp on the cycle that enters the alarm screen.
    pub fn step(
        &mut self,
        poll: &InputPoll,
        now: Tick,
        clock: &mut impl ClockPort,
    ) -> (StateId, Option<DisplayDirective>) {
        self.cycle_count += 1;

        let remote = self.debouncer.accept(poll.remote, now);
        if let Some(code) = remote {
            debug!("remote: accepted {:?} at {}", code, now);
        }

        self.ctx.now = now;
        self.ctx.input = CycleInput {
            remote,
            card: poll.card.clone(),
            motion: poll.motion,
            sound_level: poll.sound_level,
        };
        self.fsm.tick(&mut self.ctx);
        self.notices = self.ctx.drain_notices();

        let state = self.fsm.current_state();
        let directive = self.display.dispatch(state, now, || clock.timestamp());
        (state, directive)
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: poll input → read clock → step → render → publish.
    pub fn cycle(
        &mut self,
        input: &mut impl InputPort,
        clock: &mut impl ClockPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> StateId {
        let poll = input.poll();
        let now = clock.now_ms();
        let prev_state = self.fsm.current_state();

        let (state, directive) = self.step(&poll, now, clock);

        if let Some(directive) = &directive {
            display.render(directive);
        }

        for notice in &self.notices {
            sink.emit(&AppEvent::from(*notice));
        }

        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }

        state
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Digits waiting in the PIN entry buffer.
    pub fn pending_digits(&self) -> usize {
        self.ctx.pin_entry.len()
    }

    /// State currently shown on the display, if anything has been drawn.
    pub fn display_state(&self) -> Option<StateId> {
        self.display.rendered()
    }

    /// Notices raised by the most recent step.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}
