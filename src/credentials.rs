//! Admin credentials and the transient PIN entry buffer.
//!
//! Two independent factors, either one sufficient to disarm:
//!
//! | Factor | Shape                          | Compared                    |
//! |--------|--------------------------------|-----------------------------|
//! | PIN    | exactly [`PIN_LEN`] digits     | after 4 digits are pending  |
//! | Card   | 1..=[`MAX_CARD_ID_LEN`] bytes  | every cycle a card is read  |
//!
//! The store is built once from [`AlarmConfig`] and is never mutated: every
//! comparison takes `&self`.

use core::fmt;

use heapless::Vec;

use crate::config::AlarmConfig;
use crate::error::{Error, Result};

/// Number of digits in a PIN.
pub const PIN_LEN: usize = 4;

/// Largest ISO 14443 UID (triple size).  The reference cards are 4 bytes.
pub const MAX_CARD_ID_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Digit
// ---------------------------------------------------------------------------

/// A single decimal digit, 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digit(u8);

impl Digit {
    /// `None` unless `value` is 0-9.
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 { Some(Self(value)) } else { None }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Card identifier
// ---------------------------------------------------------------------------

/// UID bytes read from a proximity card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardId(Vec<u8, MAX_CARD_ID_LEN>);

impl CardId {
    /// Fails if `bytes` is empty or longer than [`MAX_CARD_ID_LEN`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::Config("card id must not be empty"));
        }
        Vec::from_slice(bytes)
            .map(Self)
            .map_err(|()| Error::Config("card id longer than 10 bytes"))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Pending PIN entry
// ---------------------------------------------------------------------------

/// Digits entered on the remote since the last comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PinEntry {
    digits: Vec<Digit, PIN_LEN>,
}

impl PinEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit.  Returns `false` (digit dropped) once full.
    pub fn push(&mut self, digit: Digit) -> bool {
        self.digits.push(digit).is_ok()
    }

    pub fn is_complete(&self) -> bool {
        self.digits.len() == PIN_LEN
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_slice(&self) -> &[Digit] {
        &self.digits
    }
}

// ---------------------------------------------------------------------------
// Credential store
// ---------------------------------------------------------------------------

/// The single admin account: one PIN and one card.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    pin: [Digit; PIN_LEN],
    card: CardId,
}

impl CredentialStore {
    pub fn new(pin: [Digit; PIN_LEN], card: CardId) -> Self {
        Self { pin, card }
    }

    /// Build the store from validated configuration.
    pub fn from_config(config: &AlarmConfig) -> Result<Self> {
        let mut pin = [Digit(0); PIN_LEN];
        for (slot, &raw) in pin.iter_mut().zip(config.admin_pin.iter()) {
            *slot = Digit::new(raw).ok_or(Error::Config("admin_pin digits must be 0-9"))?;
        }
        let card = CardId::from_slice(&config.admin_card)?;
        Ok(Self { pin, card })
    }

    /// Element-wise comparison that stops at the first mismatch.
    /// Anything other than exactly [`PIN_LEN`] digits never matches.
    pub fn pin_matches(&self, entered: &[Digit]) -> bool {
        entered.len() == PIN_LEN && entered.iter().zip(self.pin.iter()).all(|(a, b)| a == b)
    }

    /// Whole-sequence equality.  No card presented never matches.
    pub fn card_matches(&self, presented: Option<&CardId>) -> bool {
        presented.is_some_and(|card| *card == self.card)
    }
}
