//! Normalised per-cycle input.
//!
//! The input adapter samples every channel once per cycle and hands the
//! controller a single [`InputPoll`].  The controller never sees a remote
//! code from one instant mixed with a card read from another.

pub mod debounce;
pub mod remote;

use crate::credentials::CardId;
use remote::RemoteCode;

/// One cycle's sensor snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputPoll {
    /// Decoded remote-control command, before debouncing.
    pub remote: Option<RemoteCode>,
    /// Card currently on the reader, if any.
    pub card: Option<CardId>,
    /// Motion sensor output.
    pub motion: bool,
    /// Analog sound level (0-1023).
    pub sound_level: u16,
}

impl InputPoll {
    /// A cycle with nothing on any channel.
    pub fn quiet() -> Self {
        Self::default()
    }

    /// A cycle carrying only a remote command.
    pub fn remote(code: RemoteCode) -> Self {
        Self {
            remote: Some(code),
            ..Self::default()
        }
    }

    /// A cycle carrying only a card read.
    pub fn card(card: CardId) -> Self {
        Self {
            card: Some(card),
            ..Self::default()
        }
    }
}
