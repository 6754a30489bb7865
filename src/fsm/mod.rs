//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern in Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Offline │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Idle    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Armed   │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Alarm   │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each cycle the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the current
//! pointer.  There is no way to set the state from outside: the table's
//! `on_update` return values are the only transitions.

pub mod context;
pub mod states;


use context::AlarmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// The four alarm states.  The discriminant is the row in the state table
/// built by [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Offline = 0,
    Idle = 1,
    Armed = 2,
    Alarm = 3,
}

impl StateId {
    /// Number of states, and rows in the table.
    pub const COUNT: usize = 4;

    const fn row(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Handler signatures
// ---------------------------------------------------------------------------

/// `on_enter` / `on_exit`: run once per transition.
pub type StateActionFn = fn(&mut AlarmContext);

/// Per-cycle handler.  `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut AlarmContext) -> Option<StateId>;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Table-driven state machine over [`AlarmContext`].
pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(row, d)| d.id.row() == row),
            "state table rows out of order"
        );
        Self {
            table,
            current: initial,
        }
    }

    fn descriptor(&self, id: StateId) -> &StateDescriptor {
        &self.table[id.row()]
    }

    /// Run `on_enter` for the initial state.  Call once, before the first
    /// [`tick`](Self::tick).
    pub fn start(&mut self, ctx: &mut AlarmContext) {
        let state = self.descriptor(self.current);
        info!("FSM starting in state: {}", state.name);
        ctx.cycles_in_state = 0;
        if let Some(enter) = state.on_enter {
            enter(ctx);
        }
    }

    /// Run the current state's `on_update` and follow the transition it
    /// asks for, if any.
    pub fn tick(&mut self, ctx: &mut AlarmContext) {
        ctx.cycles_in_state += 1;

        let next = (self.descriptor(self.current).on_update)(ctx);
        if let Some(next) = next.filter(|&n| n != self.current) {
            self.transition(next, ctx);
        }
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    fn transition(&mut self, next: StateId, ctx: &mut AlarmContext) {
        let from = self.descriptor(self.current);
        let to = self.descriptor(next);
        info!("FSM transition: {} -> {}", from.name, to.name);

        if let Some(exit) = from.on_exit {
            exit(ctx);
        }
        let enter = to.on_enter;

        self.current = next;
        ctx.cycles_in_state = 0;

        if let Some(enter) = enter {
            enter(ctx);
        }
    }
}
