//! Shared mutable context threaded through every FSM handler.
//!
//! `AlarmContext` is the single struct that state handlers read from and
//! write to.  It holds this cycle's (already debounced) input, the pending
//! PIN entry, the read-only credential store, and the notices handlers
//! raise for the application layer to publish.

use heapless::Vec;
use log::debug;

use crate::clock::Tick;
use crate::config::AlarmConfig;
use crate::credentials::{CardId, CredentialStore, PinEntry};
use crate::input::remote::RemoteCode;

// ---------------------------------------------------------------------------
// Cycle input (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// The input a state handler sees for one cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleInput {
    /// Remote command that survived debouncing, if any.
    pub remote: Option<RemoteCode>,
    /// Card on the reader, if any.
    pub card: Option<CardId>,
    pub motion: bool,
    pub sound_level: u16,
}

// ---------------------------------------------------------------------------
// Notices (written by state handlers; drained by the service)
// ---------------------------------------------------------------------------

/// What set the alarm off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerCause {
    Motion,
    /// Sound at or above the threshold, with the level that tripped it.
    Sound(u16),
}

/// Which credential disarmed the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisarmMethod {
    Pin,
    Card,
}

/// Something a handler wants reported outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    AlarmTriggered(TriggerCause),
    Disarmed(DisarmMethod),
    PinRejected,
    CardRejected,
}

/// Upper bound of notices one cycle can raise.
pub const MAX_NOTICES: usize = 4;

// ---------------------------------------------------------------------------
// AlarmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct AlarmContext {
    // -- Timing --
    /// Tick of the cycle being processed.
    pub now: Tick,
    /// Cycles elapsed since the current state was entered.
    pub cycles_in_state: u64,

    // -- Input --
    pub input: CycleInput,

    // -- Authentication --
    pub pin_entry: PinEntry,
    pub credentials: CredentialStore,

    // -- Thresholds --
    /// Sound level at or above which an armed system alarms.
    pub sound_threshold: u16,

    // -- Outputs --
    notices: Vec<Notice, MAX_NOTICES>,
}

impl AlarmContext {
    pub fn new(credentials: CredentialStore, config: &AlarmConfig) -> Self {
        Self {
            now: 0,
            cycles_in_state: 0,
            input: CycleInput::default(),
            pin_entry: PinEntry::new(),
            credentials,
            sound_threshold: config.sound_threshold,
            notices: Vec::new(),
        }
    }

    /// Queue a notice for the service to publish after this cycle.
    pub fn notify(&mut self, notice: Notice) {
        if self.notices.push(notice).is_err() {
            debug!("notice queue full, dropped {:?}", notice);
        }
    }

    /// Take every notice raised since the last drain.
    pub fn drain_notices(&mut self) -> Vec<Notice, MAX_NOTICES> {
        core::mem::take(&mut self.notices)
    }

    /// The sensor reading that calls for an alarm this cycle, if any.
    pub fn intrusion(&self) -> Option<TriggerCause> {
        if self.input.motion {
            Some(TriggerCause::Motion)
        } else if self.input.sound_level >= self.sound_threshold {
            Some(TriggerCause::Sound(self.input.sound_level))
        } else {
            None
        }
    }
}
