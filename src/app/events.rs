//! Outbound application events.
//!
//! The [`AlarmService`](super::service::AlarmService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::StateId;
use crate::fsm::context::{DisarmMethod, Notice, TriggerCause};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// An armed system detected an intrusion.
    AlarmTriggered(TriggerCause),

    /// A credential was accepted.
    Disarmed(DisarmMethod),

    /// A complete 4-digit PIN did not match.
    PinRejected,

    /// A card that is not the admin card was presented.
    CardRejected,
}

impl From<Notice> for AppEvent {
    fn from(notice: Notice) -> Self {
        match notice {
            Notice::AlarmTriggered(cause) => Self::AlarmTriggered(cause),
            Notice::Disarmed(method) => Self::Disarmed(method),
            Notice::PinRejected => Self::PinRejected,
            Notice::CardRejected => Self::CardRejected,
        }
    }
}
