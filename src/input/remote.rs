//! IR remote command vocabulary.
//!
//! The receiver reports the raw NEC command byte.  The table below is the
//! only place that knows the hardware codes; everything downstream works
//! with [`RemoteCode`].
//!
//! | Key      | Raw | Key | Raw | Key | Raw |
//! |----------|-----|-----|-----|-----|-----|
//! | Power    | 69  | 0   | 22  | 5   | 28  |
//! | Reset    | 71  | 1   | 12  | 6   | 90  |
//! | Previous | 68  | 2   | 24  | 7   | 66  |
//! | Select   | 64  | 3   | 94  | 8   | 82  |
//! | Next     | 67  | 4   | 8   | 9   | 74  |
//!
//! Raw `0` means the receiver has nothing decoded this cycle.

use crate::credentials::Digit;

/// Raw code the receiver reports when nothing was decoded.
pub const RAW_NONE: u16 = 0;

const RAW_POWER: u16 = 69;
const RAW_RESET: u16 = 71;
const RAW_PREVIOUS: u16 = 68;
const RAW_SELECT: u16 = 64;
const RAW_NEXT: u16 = 67;

/// Raw codes for digits 0-9, indexed by digit value.
const RAW_DIGITS: [u16; 10] = [22, 12, 24, 94, 8, 28, 90, 66, 82, 74];

/// A decoded remote-control key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteCode {
    Power,
    Reset,
    Previous,
    Select,
    Next,
    Digit(Digit),
}

impl RemoteCode {
    /// Decode a raw receiver code.  `0` and codes outside the table are
    /// "no input".
    pub fn from_raw(raw: u16) -> Option<Self> {
        match raw {
            RAW_NONE => None,
            RAW_POWER => Some(Self::Power),
            RAW_RESET => Some(Self::Reset),
            RAW_PREVIOUS => Some(Self::Previous),
            RAW_SELECT => Some(Self::Select),
            RAW_NEXT => Some(Self::Next),
            _ => RAW_DIGITS
                .iter()
                .position(|&code| code == raw)
                .and_then(|idx| Digit::new(idx as u8))
                .map(Self::Digit),
        }
    }

    /// The raw receiver code for this key.
    pub fn raw(self) -> u16 {
        match self {
            Self::Power => RAW_POWER,
            Self::Reset => RAW_RESET,
            Self::Previous => RAW_PREVIOUS,
            Self::Select => RAW_SELECT,
            Self::Next => RAW_NEXT,
            Self::Digit(d) => RAW_DIGITS[d.value() as usize],
        }
    }

    /// Convenience constructor for a digit key; `None` unless 0-9.
    pub fn digit(value: u8) -> Option<Self> {
        Digit::new(value).map(Self::Digit)
    }

    pub fn as_digit(self) -> Option<Digit> {
        match self {
            Self::Digit(d) => Some(d),
            _ => None,
        }
    }
}
