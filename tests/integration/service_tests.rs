//! Integration tests for the AlarmService → FSM → display/event pipeline.
//!
//! Every test drives the service through its ports only, one cycle at a
//! time, the way the board's main loop does.

use crate::mock_ports::{ADMIN_CARD, Rig};

use homeguard::app::events::AppEvent;
use homeguard::config::AlarmConfig;
use homeguard::credentials::CardId;
use homeguard::display::DisplayDirective;
use homeguard::fsm::StateId;
use homeguard::fsm::context::{DisarmMethod, TriggerCause};
use homeguard::input::InputPoll;
use homeguard::input::remote::RemoteCode;

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_offline_and_renders_it_first_cycle() {
    let mut rig = Rig::new();
    assert_eq!(rig.sink.events, vec![AppEvent::Started(StateId::Offline)]);

    assert_eq!(rig.quiet(0), StateId::Offline);
    assert_eq!(rig.display.directives, vec![DisplayDirective::RenderOffline]);
}

// ── Offline / Idle stability ──────────────────────────────────

#[test]
fn offline_ignores_everything_but_power() {
    let mut rig = Rig::new();
    rig.quiet(0);
    assert_eq!(rig.press(400, RemoteCode::Select), StateId::Offline);
    assert_eq!(rig.digit(800, 0), StateId::Offline);
    assert_eq!(rig.motion(900), StateId::Offline);
    assert_eq!(rig.sound(1000, 1023), StateId::Offline);
    assert_eq!(rig.card(1100, &ADMIN_CARD), StateId::Offline);
    assert_eq!(rig.press(1200, RemoteCode::Reset), StateId::Offline);

    assert_eq!(rig.press(1600, RemoteCode::Power), StateId::Idle);
}

#[test]
fn idle_is_stable_and_draws_once() {
    let mut rig = Rig::new();
    rig.quiet(0);
    rig.press(400, RemoteCode::Power);

    for t in (410..5000).step_by(10) {
        assert_eq!(rig.quiet(t), StateId::Idle);
    }
    assert_eq!(
        rig.display.directives,
        vec![DisplayDirective::RenderOffline, DisplayDirective::RenderIdle]
    );
}

#[test]
fn idle_ignores_sensors_and_credentials() {
    let mut rig = Rig::new();
    rig.quiet(0);
    rig.press(400, RemoteCode::Power);

    assert_eq!(rig.motion(500), StateId::Idle);
    assert_eq!(rig.sound(600, 900), StateId::Idle);
    assert_eq!(rig.card(700, &ADMIN_CARD), StateId::Idle);
    assert_eq!(rig.digit(800, 0), StateId::Idle);
    assert_eq!(rig.svc.pending_digits(), 0);
}

#[test]
fn power_in_idle_goes_offline() {
    let mut rig = Rig::new();
    rig.quiet(0);
    rig.press(400, RemoteCode::Power);
    assert_eq!(rig.press(800, RemoteCode::Power), StateId::Offline);
    assert_eq!(rig.last_directive(), Some(&DisplayDirective::RenderOffline));
}

// ── Arming and sensors ────────────────────────────────────────

#[test]
fn select_arms_and_renders_armed() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(rig.last_directive(), Some(&DisplayDirective::RenderArmed));
    assert!(rig.sink.events.contains(&AppEvent::StateChanged {
        from: StateId::Idle,
        to: StateId::Armed,
    }));
}

#[test]
fn motion_triggers_alarm() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(rig.motion(1500), StateId::Alarm);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::AlarmTriggered(TriggerCause::Motion))
    );
}

#[test]
fn sound_threshold_is_inclusive() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(rig.sound(1100, 99), StateId::Armed);
    assert_eq!(rig.sound(1200, 100), StateId::Alarm);
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::AlarmTriggered(TriggerCause::Sound(100)))
    );
}

#[test]
fn custom_sound_threshold() {
    let config = AlarmConfig {
        sound_threshold: 600,
        ..AlarmConfig::default()
    };
    let mut rig = Rig::with_config(&config);
    rig.arm();
    assert_eq!(rig.sound(1100, 599), StateId::Armed);
    assert_eq!(rig.sound(1200, 600), StateId::Alarm);
}

#[test]
fn alarm_latches_and_ignores_sensors() {
    let mut rig = Rig::new();
    rig.trip();
    let triggers_before = count_triggers(&rig);

    for t in (1510..4000).step_by(10) {
        assert_eq!(rig.quiet(t), StateId::Alarm);
    }
    rig.motion(4000);
    rig.sound(4010, 1023);
    assert_eq!(rig.svc.state(), StateId::Alarm);
    assert_eq!(count_triggers(&rig), triggers_before);
}

fn count_triggers(rig: &Rig) -> usize {
    rig.sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::AlarmTriggered(_)))
        .count()
}

// ── PIN ───────────────────────────────────────────────────────

#[test]
fn correct_pin_disarms_on_cycle_after_fourth_digit() {
    let mut rig = Rig::new();
    rig.trip();

    for (i, t) in [2000, 2400, 2800, 3200].into_iter().enumerate() {
        assert_eq!(rig.digit(t, 0), StateId::Alarm);
        assert_eq!(rig.svc.pending_digits(), i + 1);
    }

    assert_eq!(rig.quiet(3210), StateId::Idle);
    assert_eq!(rig.svc.pending_digits(), 0);
    assert_eq!(rig.last_directive(), Some(&DisplayDirective::RenderIdle));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::Disarmed(DisarmMethod::Pin))
    );
}

#[test]
fn wrong_pin_clears_entry_and_stays() {
    let mut rig = Rig::new();
    rig.arm();

    for (value, t) in [(1, 1400), (2, 1800), (3, 2200), (4, 2600)] {
        rig.digit(t, value);
    }
    assert_eq!(rig.quiet(2610), StateId::Armed);
    assert_eq!(rig.svc.pending_digits(), 0);
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::PinRejected));
}

#[test]
fn last_digit_wrong_is_rejected() {
    let mut rig = Rig::new();
    rig.arm();

    for (value, t) in [(0, 1400), (0, 1800), (0, 2200), (7, 2600)] {
        rig.digit(t, value);
    }
    assert_eq!(rig.quiet(2610), StateId::Armed);
    assert!(rig.sink.events.contains(&AppEvent::PinRejected));
}

#[test]
fn fifth_digit_triggers_comparison_and_is_dropped() {
    let mut rig = Rig::new();
    rig.arm();

    for t in [1400, 1800, 2200, 2600] {
        rig.digit(t, 0);
    }
    assert_eq!(rig.svc.pending_digits(), 4);

    assert_eq!(rig.digit(3000, 5), StateId::Idle);
    assert_eq!(rig.svc.pending_digits(), 0);
}

#[test]
fn custom_pin_from_config() {
    let config = AlarmConfig {
        admin_pin: [4, 7, 1, 9],
        ..AlarmConfig::default()
    };
    let mut rig = Rig::with_config(&config);
    rig.arm();

    for (value, t) in [(4, 1400), (7, 1800), (1, 2200), (9, 2600)] {
        rig.digit(t, value);
    }
    assert_eq!(rig.quiet(2610), StateId::Idle);
}

#[test]
fn pending_digits_carry_from_armed_into_alarm() {
    let mut rig = Rig::new();
    rig.arm();
    rig.digit(1400, 0);
    rig.digit(1800, 0);
    assert_eq!(rig.motion(1900), StateId::Alarm);
    assert_eq!(rig.svc.pending_digits(), 2);

    rig.digit(2200, 0);
    rig.digit(2600, 0);
    assert_eq!(rig.quiet(2610), StateId::Idle);
}

#[test]
fn non_digit_keys_do_not_enter_pin() {
    let mut rig = Rig::new();
    rig.arm();
    rig.press(1400, RemoteCode::Reset);
    rig.press(1800, RemoteCode::Next);
    rig.press(2200, RemoteCode::Previous);
    rig.press(2600, RemoteCode::Power);
    assert_eq!(rig.svc.pending_digits(), 0);
    assert_eq!(rig.svc.state(), StateId::Armed);
}

#[test]
fn card_disarm_keeps_partial_pin_for_next_arming() {
    let mut rig = Rig::new();
    rig.arm();
    rig.digit(1400, 0);
    rig.digit(1800, 0);
    assert_eq!(rig.card(1900, &ADMIN_CARD), StateId::Idle);
    assert_eq!(rig.svc.pending_digits(), 2);

    // Two more digits after re-arming complete the entry.
    assert_eq!(rig.press(2200, RemoteCode::Select), StateId::Armed);
    rig.digit(2600, 0);
    rig.digit(3000, 0);
    assert_eq!(rig.quiet(3010), StateId::Idle);
}

// ── Card ──────────────────────────────────────────────────────

#[test]
fn admin_card_disarms_same_cycle() {
    let mut rig = Rig::new();
    rig.trip();
    assert_eq!(rig.card(2000, &ADMIN_CARD), StateId::Idle);
    assert_eq!(rig.last_directive(), Some(&DisplayDirective::RenderIdle));
    assert!(
        rig.sink
            .events
            .contains(&AppEvent::Disarmed(DisarmMethod::Card))
    );
}

#[test]
fn wrong_card_is_rejected() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(rig.card(1100, &[0xDE, 0xAD, 0xBE, 0xEF]), StateId::Armed);
    assert_eq!(rig.sink.events.last(), Some(&AppEvent::CardRejected));
}

#[test]
fn longer_card_with_admin_prefix_does_not_match() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(
        rig.card(1100, &[0xA1, 0x8E, 0x0F, 0x1D, 0x00, 0x11, 0x22]),
        StateId::Armed
    );
}

#[test]
fn sensor_wins_over_card_in_same_cycle() {
    let mut rig = Rig::new();
    rig.arm();
    let mut poll = InputPoll::card(CardId::from_slice(&ADMIN_CARD).unwrap());
    poll.motion = true;
    assert_eq!(rig.run(1100, poll), StateId::Alarm);
    assert!(
        !rig.sink
            .events
            .iter()
            .any(|e| matches!(e, AppEvent::Disarmed(_)))
    );
}

#[test]
fn sensor_wins_over_pin_in_same_cycle() {
    let mut rig = Rig::new();
    rig.arm();
    for t in [1400, 1800, 2200, 2600] {
        rig.digit(t, 0);
    }
    assert_eq!(rig.sound(2610, 100), StateId::Alarm);
    assert_eq!(rig.svc.pending_digits(), 0);
}

// ── Debounce ──────────────────────────────────────────────────

#[test]
fn second_read_within_window_is_ignored() {
    let mut rig = Rig::new();
    assert_eq!(rig.press(0, RemoteCode::Power), StateId::Idle);
    assert_eq!(rig.press(50, RemoteCode::Power), StateId::Idle);
    assert_eq!(rig.press(400, RemoteCode::Power), StateId::Offline);
}

#[test]
fn window_boundary_is_inclusive() {
    let mut rig = Rig::new();
    rig.press(0, RemoteCode::Power);
    assert_eq!(rig.press(299, RemoteCode::Power), StateId::Idle);
    assert_eq!(rig.press(300, RemoteCode::Power), StateId::Offline);
}

#[test]
fn debounce_survives_tick_wrap() {
    let mut rig = Rig::new();
    assert_eq!(rig.press(u32::MAX - 100, RemoteCode::Power), StateId::Idle);
    assert_eq!(rig.press(150, RemoteCode::Power), StateId::Idle);
    assert_eq!(rig.press(199, RemoteCode::Power), StateId::Offline);
}

#[test]
fn rejected_read_does_not_restart_window() {
    let mut rig = Rig::new();
    rig.press(0, RemoteCode::Power);
    rig.press(200, RemoteCode::Power);
    // 300 after the accepted read, 100 after the rejected one.
    assert_eq!(rig.press(300, RemoteCode::Power), StateId::Offline);
}

// ── Alarm screen ──────────────────────────────────────────────

#[test]
fn alarm_screen_shows_timestamp_once() {
    let mut rig = Rig::new();
    rig.trip();
    assert_eq!(
        rig.last_directive(),
        Some(&DisplayDirective::RenderAlarmEnter(
            heapless::String::try_from("06/15/2024 22:30:05").unwrap()
        ))
    );

    for t in (1510..3000).step_by(10) {
        rig.quiet(t);
    }
    assert_eq!(rig.clock.timestamp_reads, 1);
}

#[test]
fn alarm_screen_flashes_on_cadence() {
    let mut rig = Rig::new();
    rig.trip();
    let entered = rig.display.directives.len();

    let mut flashes = Vec::new();
    for t in (1510..=6500).step_by(10) {
        rig.quiet(t);
        if rig.display.directives.len() > entered + flashes.len() {
            flashes.push((t, rig.last_directive().cloned().unwrap()));
        }
    }

    let expect = |invert| DisplayDirective::RenderAlarmFlash { invert };
    assert_eq!(
        flashes,
        vec![
            (2500, expect(true)),
            (3500, expect(false)),
            (4500, expect(true)),
            (5500, expect(false)),
            (6500, expect(true)),
        ]
    );
}

#[test]
fn flash_cadence_restarts_on_reentry() {
    let mut rig = Rig::new();
    rig.trip();
    rig.quiet(2500); // inverted
    rig.card(2600, &ADMIN_CARD);
    rig.press(3000, RemoteCode::Select);
    assert_eq!(rig.motion(3100), StateId::Alarm);
    assert!(matches!(
        rig.last_directive(),
        Some(DisplayDirective::RenderAlarmEnter(_))
    ));

    // 1000 after the new entry, not after the old anchor.
    assert_eq!(rig.quiet(3600), StateId::Alarm);
    assert!(matches!(
        rig.last_directive(),
        Some(DisplayDirective::RenderAlarmEnter(_))
    ));
    rig.quiet(4100);
    assert_eq!(
        rig.last_directive(),
        Some(&DisplayDirective::RenderAlarmFlash { invert: true })
    );
    assert_eq!(rig.clock.timestamp_reads, 2);
}

#[test]
fn at_most_one_directive_per_cycle() {
    let mut rig = Rig::new();
    rig.trip();
    let mut last_len = rig.display.directives.len();
    for t in (1510..8000).step_by(10) {
        rig.quiet(t);
        let len = rig.display.directives.len();
        assert!(len - last_len <= 1);
        last_len = len;
    }
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn full_cycle_event_trail() {
    let mut rig = Rig::new();
    rig.trip();
    rig.card(2000, &ADMIN_CARD);

    assert_eq!(
        rig.sink.events,
        vec![
            AppEvent::Started(StateId::Offline),
            AppEvent::StateChanged {
                from: StateId::Offline,
                to: StateId::Idle
            },
            AppEvent::StateChanged {
                from: StateId::Idle,
                to: StateId::Armed
            },
            AppEvent::AlarmTriggered(TriggerCause::Motion),
            AppEvent::StateChanged {
                from: StateId::Armed,
                to: StateId::Alarm
            },
            AppEvent::Disarmed(DisarmMethod::Card),
            AppEvent::StateChanged {
                from: StateId::Alarm,
                to: StateId::Idle
            },
        ]
    );
    assert_eq!(rig.svc.cycle_count(), 5);
}
