//! Hardware adapter — bridges real peripherals to the [`InputPort`].
//!
//! Owns the IR receiver, the card reader, the motion pin and the sound
//! sensor, and samples all four exactly once per [`poll`](InputPort::poll).
//! Faults never reach the core: a pin read error is logged and reported as
//! "no motion", the same way an empty receiver reports "no code".

use embedded_hal::digital::InputPin;
use log::warn;

use crate::app::ports::InputPort;
use crate::credentials::CardId;
use crate::input::InputPoll;
use crate::input::remote::RemoteCode;

// ── Peripheral traits ─────────────────────────────────────────

/// Infrared receiver that yields one raw NEC command per received frame.
pub trait RemoteReceiver {
    /// The raw command of the last frame, or `None` if nothing arrived.
    fn decode(&mut self) -> Option<u16>;
}

/// Proximity card reader.
pub trait CardReader {
    /// UID of the card currently in the field, if one was read.
    fn read_card(&mut self) -> Option<CardId>;
}

/// Analog microphone front end.
pub trait SoundSensor {
    /// Current level, 0-1023.
    fn read_level(&mut self) -> u16;
}

// ── HardwareInput ─────────────────────────────────────────────

/// Concrete adapter that combines all input peripherals behind [`InputPort`].
pub struct HardwareInput<R, C, M, S> {
    remote: R,
    reader: C,
    motion: M,
    sound: S,
}

impl<R, C, M, S> HardwareInput<R, C, M, S>
where
    R: RemoteReceiver,
    C: CardReader,
    M: InputPin,
    S: SoundSensor,
{
    pub fn new(remote: R, reader: C, motion: M, sound: S) -> Self {
        Self {
            remote,
            reader,
            motion,
            sound,
        }
    }

    fn read_motion(&mut self) -> bool {
        match self.motion.is_high() {
            Ok(level) => level,
            Err(e) => {
                warn!("motion: pin read failed ({:?}), treating as idle", e);
                false
            }
        }
    }
}

impl<R, C, M, S> InputPort for HardwareInput<R, C, M, S>
where
    R: RemoteReceiver,
    C: CardReader,
    M: InputPin,
    S: SoundSensor,
{
    fn poll(&mut self) -> InputPoll {
        InputPoll {
            remote: self.remote.decode().and_then(RemoteCode::from_raw),
            card: self.reader.read_card(),
            motion: self.read_motion(),
            sound_level: self.sound.read_level(),
        }
    }
}
