//! Scripted adapters for the simulator and scenario tests.
//!
//! A scenario script is plain text, one cycle per line:
//!
//! ```text
//! # comment
//! @<tick> [ir=<raw>] [card=<hex>:<hex>...] [motion=0|1] [sound=<n>]
//! ```
//!
//! Fields apply to that one cycle only.  Ticks must never decrease.
//! [`replay`] fills the gaps between lines with quiet cycles every
//! `cycle_interval_ms`, so timers (debounce, flash) advance the same way they
//! would on the board.

use core::str::FromStr;

use log::debug;

use crate::adapters::time::timestamp_from_unix;
use crate::app::ports::{ClockPort, DisplayPort, EventSink, InputPort};
use crate::app::service::AlarmService;
use crate::clock::{Tick, Timestamp};
use crate::credentials::{CardId, MAX_CARD_ID_LEN};
use crate::error::{Error, Result, ScriptError};
use crate::fsm::StateId;
use crate::input::InputPoll;
use crate::input::remote::RemoteCode;

/// Highest reading the sound sensor's ADC produces.
pub const MAX_SOUND_LEVEL: u16 = 1023;

// ── Script ────────────────────────────────────────────────────

/// One scripted cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    /// Tick at which the cycle runs.
    pub at: Tick,
    pub poll: InputPoll,
}

/// A parsed scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps: Vec<ScriptStep> = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let Some(step) = parse_line(line, raw)? else {
                continue;
            };
            if steps.last().is_some_and(|prev| step.at < prev.at) {
                return Err(ScriptError {
                    line,
                    reason: "tick goes backwards",
                }
                .into());
            }
            steps.push(step);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for Script {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_line(line: usize, raw: &str) -> core::result::Result<Option<ScriptStep>, ScriptError> {
    let err = |reason| ScriptError { line, reason };

    let body = raw.split('#').next().unwrap_or_default().trim();
    if body.is_empty() {
        return Ok(None);
    }

    let mut fields = body.split_whitespace();
    let at = fields
        .next()
        .and_then(|f| f.strip_prefix('@'))
        .ok_or_else(|| err("expected @<tick>"))?
        .parse::<Tick>()
        .map_err(|_| err("bad tick"))?;

    let mut poll = InputPoll::quiet();
    for field in fields {
        let (key, value) = field.split_once('=').ok_or_else(|| err("expected key=value"))?;
        match key {
            "ir" => {
                let raw = parse_u16(value).ok_or_else(|| err("bad ir code"))?;
                // Unknown codes are noise, same as on the receiver.
                poll.remote = RemoteCode::from_raw(raw);
            }
            "card" => {
                poll.card = Some(parse_card(value).ok_or_else(|| err("bad card id"))?);
            }
            "motion" => {
                poll.motion = match value {
                    "0" => false,
                    "1" => true,
                    _ => return Err(err("motion must be 0 or 1")),
                };
            }
            "sound" => {
                poll.sound_level = value
                    .parse::<u16>()
                    .ok()
                    .filter(|level| *level <= MAX_SOUND_LEVEL)
                    .ok_or_else(|| err("sound must be 0-1023"))?;
            }
            _ => return Err(err("unknown field")),
        }
    }

    Ok(Some(ScriptStep { at, poll }))
}

/// Decimal, or hex with a `0x` prefix.
fn parse_u16(s: &str) -> Option<u16> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Colon-separated hex bytes, e.g. `A1:8E:0F:1D`.
fn parse_card(s: &str) -> Option<CardId> {
    let mut bytes = heapless::Vec::<u8, MAX_CARD_ID_LEN>::new();
    for part in s.split(':') {
        if part.is_empty() || part.len() > 2 {
            return None;
        }
        let byte = u8::from_str_radix(part, 16).ok()?;
        bytes.push(byte).ok()?;
    }
    CardId::from_slice(&bytes).ok()
}

// ── Scripted ports ────────────────────────────────────────────

/// [`InputPort`] that hands out whatever was last fed, once.
#[derive(Debug, Default)]
pub struct ReplayInput {
    next: InputPoll,
}

impl ReplayInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the snapshot returned by the next poll.
    pub fn feed(&mut self, poll: InputPoll) {
        self.next = poll;
    }
}

impl InputPort for ReplayInput {
    fn poll(&mut self) -> InputPoll {
        core::mem::take(&mut self.next)
    }
}

/// [`ClockPort`] whose tick is set by the script.  The calendar reading is
/// `epoch_secs` plus the tick, so alarm timestamps are reproducible.
#[derive(Debug, Clone)]
pub struct ScriptClock {
    now: Tick,
    epoch_secs: u64,
}

impl ScriptClock {
    pub fn new(epoch_secs: u64) -> Self {
        Self { now: 0, epoch_secs }
    }

    pub fn set(&mut self, now: Tick) {
        self.now = now;
    }
}

impl ClockPort for ScriptClock {
    fn now_ms(&self) -> Tick {
        self.now
    }

    fn timestamp(&mut self) -> Timestamp {
        timestamp_from_unix(self.epoch_secs + u64::from(self.now / 1000))
    }
}

// ── Replay ────────────────────────────────────────────────────

/// Run every step of `script` through `svc`, with quiet cycles every
/// `interval_ms` in between.  Returns the state after the last cycle.
pub fn replay(
    script: &Script,
    svc: &mut AlarmService,
    interval_ms: u32,
    clock: &mut ScriptClock,
    display: &mut impl DisplayPort,
    sink: &mut impl EventSink,
) -> StateId {
    let mut input = ReplayInput::new();
    let mut prev: Option<Tick> = None;

    for step in script.steps() {
        if let Some(mut at) = prev {
            while let Some(fill) = at.checked_add(interval_ms).filter(|t| *t < step.at) {
                clock.set(fill);
                svc.cycle(&mut input, clock, display, sink);
                at = fill;
            }
        }

        debug!("script: cycle at {} {:?}", step.at, step.poll);
        clock.set(step.at);
        input.feed(step.poll.clone());
        svc.cycle(&mut input, clock, display, sink);
        prev = Some(step.at);
    }

    svc.state()
}
