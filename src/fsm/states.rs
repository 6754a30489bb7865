//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!  OFFLINE ──[Power]──▶ IDLE ──[Select]──▶ ARMED ──[motion | sound]──▶ ALARM
//!     ▲                  │ ▲                 │                          │
//!     └─────[Power]──────┘ └──[PIN | card]───┴────────[PIN | card]──────┘
//! ```
//!
//! Offline and Idle look at nothing but the remote.  Armed and Alarm check
//! both credentials every cycle; only Armed looks at the sensors, and there an
//! intrusion outranks a credential presented in the same cycle.

use super::context::{AlarmContext, DisarmMethod, Notice};
use super::{StateDescriptor, StateId};
use crate::input::remote::RemoteCode;
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Offline
        StateDescriptor {
            id: StateId::Offline,
            name: "Offline",
            on_enter: Some(offline_enter),
            on_exit: None,
            on_update: offline_update,
        },
        // Index 1 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 2 — Armed
        StateDescriptor {
            id: StateId::Armed,
            name: "Armed",
            on_enter: Some(armed_enter),
            on_exit: None,
            on_update: armed_update,
        },
        // Index 3 — Alarm
        StateDescriptor {
            id: StateId::Alarm,
            name: "Alarm",
            on_enter: Some(alarm_enter),
            on_exit: Some(alarm_exit),
            on_update: alarm_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFFLINE state — device off, only the power key is observed
// ═══════════════════════════════════════════════════════════════════════════

fn offline_enter(_ctx: &mut AlarmContext) {
    info!("OFFLINE: waiting for power key");
}

fn offline_update(ctx: &mut AlarmContext) -> Option<StateId> {
    match ctx.input.remote {
        Some(RemoteCode::Power) => Some(StateId::Idle),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state — menu shown, sensors ignored
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut AlarmContext) {
    info!(
        "IDLE: system on, sensors ignored ({} digits pending)",
        ctx.pin_entry.len()
    );
}

fn idle_update(ctx: &mut AlarmContext) -> Option<StateId> {
    match ctx.input.remote {
        Some(RemoteCode::Select) => Some(StateId::Armed),
        Some(RemoteCode::Power) => Some(StateId::Offline),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED state — sensors and credentials monitored
// ═══════════════════════════════════════════════════════════════════════════

fn armed_enter(ctx: &mut AlarmContext) {
    info!(
        "ARMED: monitoring motion and sound (threshold {})",
        ctx.sound_threshold
    );
}

fn armed_update(ctx: &mut AlarmContext) -> Option<StateId> {
    // Credentials are always evaluated so a complete PIN is consumed, but
    // an intrusion in the same cycle overrides the disarm.
    let disarm = authenticate(ctx);

    if let Some(cause) = ctx.intrusion() {
        if disarm.is_some() {
            debug!("ARMED: credential accepted but {:?} wins", cause);
        }
        ctx.notify(Notice::AlarmTriggered(cause));
        return Some(StateId::Alarm);
    }

    disarm.map(|method| {
        ctx.notify(Notice::Disarmed(method));
        StateId::Idle
    })
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARM state — triggered, only a credential gets out
// ═══════════════════════════════════════════════════════════════════════════

fn alarm_enter(ctx: &mut AlarmContext) {
    warn!("ALARM: intrusion detected at tick {}", ctx.now);
}

fn alarm_exit(ctx: &mut AlarmContext) {
    info!("ALARM: cleared after {} cycles", ctx.cycles_in_state);
}

fn alarm_update(ctx: &mut AlarmContext) -> Option<StateId> {
    // Sensors are not re-read while alarming; only a credential gets out.
    authenticate(ctx).map(|method| {
        ctx.notify(Notice::Disarmed(method));
        StateId::Idle
    })
}

// ═══════════════════════════════════════════════════════════════════════════
//  Credential checks (Armed / Alarm)
// ═══════════════════════════════════════════════════════════════════════════

/// Run both credential checks and report which one passed, PIN first.
/// Both run every cycle; neither touches the other's state.
fn authenticate(ctx: &mut AlarmContext) -> Option<DisarmMethod> {
    let pin_ok = pin_step(ctx);
    let card_ok = card_step(ctx);

    if pin_ok {
        Some(DisarmMethod::Pin)
    } else if card_ok {
        Some(DisarmMethod::Card)
    } else {
        None
    }
}

/// Advance the 4-then-compare-then-reset PIN protocol by one cycle.
fn pin_step(ctx: &mut AlarmContext) -> bool {
    let digit = ctx.input.remote.and_then(RemoteCode::as_digit);

    match digit {
        Some(d) if !ctx.pin_entry.is_complete() => {
            ctx.pin_entry.push(d);
            debug!("PIN: {} of 4 digits entered", ctx.pin_entry.len());
            false
        }
        _ if ctx.pin_entry.is_complete() => {
            let ok = ctx.credentials.pin_matches(ctx.pin_entry.as_slice());
            ctx.pin_entry.clear();
            if !ok {
                debug!("PIN: rejected, entry cleared");
                ctx.notify(Notice::PinRejected);
            }
            ok
        }
        _ => false,
    }
}

/// Compare the card on the reader, if there is one.
fn card_step(ctx: &mut AlarmContext) -> bool {
    let Some(card) = ctx.input.card.as_ref() else {
        return false;
    };

    if ctx.credentials.card_matches(Some(card)) {
        return true;
    }

    debug!("CARD: {} rejected", card);
    ctx.notify(Notice::CardRejected);
    false
}
