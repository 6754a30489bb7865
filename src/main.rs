//! HomeGuard simulator — host entry point.
//!
//! Replays a scenario script through the same controller core the board
//! runs, with scripted input and clock on one side and console adapters on
//! the other.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  ReplayInput      ScriptClock     LogDisplay  LogSink    │
//! │  (InputPort)      (ClockPort)     (Display)   (Events)   │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────────  │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            AlarmService (pure logic)               │  │
//! │  │  Debounce · FSM · Display dispatch                 │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `homeguard [SCRIPT] [CONFIG.json]`.  `RUST_LOG=debug` shows every
//! accepted remote code and scripted cycle.
#![deny(unused_must_use)]

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use log::info;
use tracing_subscriber::EnvFilter;

use homeguard::adapters::log_display::LogDisplay;
use homeguard::adapters::log_sink::LogEventSink;
use homeguard::adapters::script::{Script, ScriptClock, replay};
use homeguard::app::service::AlarmService;
use homeguard::config::AlarmConfig;

/// Power on, arm, trip the motion sensor, disarm with the PIN, re-arm,
/// trip the sound sensor, disarm with the card, power off.
const DEMO_SCRIPT: &str = "\
@0
@100   ir=69              # POWER
@600   ir=64              # SELECT: arm
@1500  motion=1
@4000  ir=22              # 0
@4400  ir=22              # 0
@4800  ir=22              # 0
@5200  ir=22              # 0
@5210                     # PIN compared
@6000  ir=64              # SELECT: arm
@7000  sound=250
@9500  card=A1:8E:0F:1D
@10000 ir=69              # POWER
";

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("HomeGuard simulator v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Arguments ──────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let script_path = args.next();
    let config_path = args.next();

    // ── 3. Config (file or defaults) ──────────────────────────
    let config = match &config_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {path}"))?;
            let config =
                AlarmConfig::from_json(&text).with_context(|| format!("loading config {path}"))?;
            info!("Config loaded from {}", path);
            config
        }
        None => {
            info!("Using default config");
            AlarmConfig::default()
        }
    };

    // ── 4. Scenario ───────────────────────────────────────────
    let script = match &script_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading script {path}"))?;
            Script::parse(&text).with_context(|| format!("parsing script {path}"))?
        }
        None => {
            info!("No script given, running built-in demo");
            Script::parse(DEMO_SCRIPT).context("parsing built-in demo")?
        }
    };
    info!("Scenario: {} scripted cycles", script.len());

    // ── 5. Construct service + adapters ───────────────────────
    let mut svc = AlarmService::new(&config).context("building controller")?;
    let epoch_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let mut clock = ScriptClock::new(epoch_secs);
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();

    svc.start(&mut sink);

    // ── 6. Replay ─────────────────────────────────────────────
    let final_state = replay(
        &script,
        &mut svc,
        config.cycle_interval_ms,
        &mut clock,
        &mut display,
        &mut sink,
    );

    info!(
        "Done: {} cycles, {} redraws, final state {:?}",
        svc.cycle_count(),
        display.redraws(),
        final_state
    );
    Ok(())
}
