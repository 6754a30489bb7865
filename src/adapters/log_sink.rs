//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events through
//! the `log` facade (serial console on the board, stdout in the simulator).
//! A siren or GSM notifier would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::fsm::context::{DisarmMethod, TriggerCause};

/// Adapter that logs every [`AppEvent`] as one pipe-delimited line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::AlarmTriggered(TriggerCause::Motion) => {
                warn!("ALARM | cause=motion");
            }
            AppEvent::AlarmTriggered(TriggerCause::Sound(level)) => {
                warn!("ALARM | cause=sound | level={}", level);
            }
            AppEvent::Disarmed(method) => {
                let method = match method {
                    DisarmMethod::Pin => "pin",
                    DisarmMethod::Card => "card",
                };
                info!("AUTH | disarmed | method={}", method);
            }
            AppEvent::PinRejected => {
                info!("AUTH | pin rejected");
            }
            AppEvent::CardRejected => {
                info!("AUTH | card rejected");
            }
        }
    }
}
