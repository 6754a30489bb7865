//! Fuzz target: `Script::parse`
//!
//! Feeds arbitrary UTF-8 into the scenario parser and asserts that it never
//! panics, and that every script it accepts has non-decreasing ticks.
//!
//! cargo fuzz run fuzz_script_parser

#![no_main]

use homeguard::adapters::script::Script;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    if let Ok(script) = Script::parse(text) {
        assert!(
            script.steps().windows(2).all(|w| w[0].at <= w[1].at),
            "accepted script with decreasing ticks"
        );
        for step in script.steps() {
            assert!(step.poll.sound_level <= 1023, "sound level out of range");
        }
    }
});
