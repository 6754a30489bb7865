//! Fuzz target: `AlarmService::step`
//!
//! Decodes the input as a stream of 6-byte cycles (tick delta, raw IR code,
//! sensor byte, sound level) and runs them through the controller, checking
//! the invariants that must hold after every cycle.
//!
//! cargo fuzz run fuzz_controller_step

#![no_main]

use homeguard::app::ports::ClockPort;
use homeguard::app::service::AlarmService;
use homeguard::clock::{Tick, Timestamp};
use homeguard::config::AlarmConfig;
use homeguard::credentials::CardId;
use homeguard::display::DisplayDirective;
use homeguard::fsm::StateId;
use homeguard::input::InputPoll;
use homeguard::input::remote::RemoteCode;
use libfuzzer_sys::fuzz_target;

struct FuzzClock;

impl ClockPort for FuzzClock {
    fn now_ms(&self) -> Tick {
        0
    }

    fn timestamp(&mut self) -> Timestamp {
        Timestamp::default()
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut svc) = AlarmService::new(&AlarmConfig::default()) else {
        return;
    };
    let admin = CardId::from_slice(&[0xA1, 0x8E, 0x0F, 0x1D]).ok();
    let mut now: Tick = 0;

    for chunk in data.chunks_exact(6) {
        now = now.wrapping_add(u32::from(u16::from_le_bytes([chunk[0], chunk[1]])));
        let flags = chunk[3];
        let poll = InputPoll {
            remote: RemoteCode::from_raw(u16::from(chunk[2])),
            // Bit 1: admin card on the reader.
            card: if flags & 0b10 != 0 { admin.clone() } else { None },
            // Bit 0: motion.
            motion: flags & 0b01 != 0,
            sound_level: u16::from_le_bytes([chunk[4], chunk[5]]) % 1024,
        };

        let before = svc.state();
        let (state, directive) = svc.step(&poll, now, &mut FuzzClock);

        assert!(svc.pending_digits() <= 4);
        assert_eq!(svc.display_state(), Some(state));
        if before == StateId::Offline {
            assert!(matches!(state, StateId::Offline | StateId::Idle));
        }
        if matches!(directive, Some(DisplayDirective::RenderAlarmFlash { .. })) {
            assert_eq!(state, StateId::Alarm);
        }
    }
});
