//! System configuration parameters
//!
//! All tunable parameters for the HomeGuard controller.  The admin
//! credentials are part of the configuration and are fixed for the life of
//! the process: there is no enrollment flow.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::credentials::{MAX_CARD_ID_LEN, PIN_LEN};
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmConfig {
    // --- Credentials ---
    /// Admin PIN, one decimal digit (0-9) per element.
    pub admin_pin: [u8; PIN_LEN],
    /// Admin proximity-card UID bytes.
    pub admin_card: Vec<u8, MAX_CARD_ID_LEN>,

    // --- Sensors ---
    /// Analog sound level (0-1023) at or above which an armed system alarms.
    pub sound_threshold: u16,

    // --- Timing ---
    /// Minimum spacing between accepted remote-control reads (milliseconds)
    pub debounce_ms: u32,
    /// Alarm screen inverts this long after the flash anchor (milliseconds)
    pub flash_invert_ms: u32,
    /// Alarm screen restores and re-anchors after this long (milliseconds)
    pub flash_period_ms: u32,
    /// Control loop interval used by the simulator (milliseconds)
    pub cycle_interval_ms: u32,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        Self {
            // Credentials
            admin_pin: [0, 0, 0, 0],
            admin_card: Vec::from_slice(&[0xA1, 0x8E, 0x0F, 0x1D]).unwrap_or_default(),

            // Sensors
            sound_threshold: 100,

            // Timing
            debounce_ms: 300,
            flash_invert_ms: 1000,
            flash_period_ms: 2000,
            cycle_interval_ms: 10, // 100 Hz
        }
    }
}

impl AlarmConfig {
    /// Reject values the controller cannot operate with.
    ///
    /// Out-of-range values are rejected rather than clamped.
    pub fn validate(&self) -> Result<()> {
        if self.admin_pin.iter().any(|&d| d > 9) {
            return Err(Error::Config("admin_pin digits must be 0-9"));
        }
        if self.admin_card.is_empty() {
            return Err(Error::Config("admin_card must not be empty"));
        }
        if self.debounce_ms == 0 {
            return Err(Error::Config("debounce_ms must be non-zero"));
        }
        if self.flash_invert_ms == 0 || self.flash_invert_ms >= self.flash_period_ms {
            return Err(Error::Config(
                "flash_invert_ms must be non-zero and below flash_period_ms",
            ));
        }
        if self.cycle_interval_ms == 0 {
            return Err(Error::Config("cycle_interval_ms must be non-zero"));
        }
        Ok(())
    }

    /// Parse a JSON document and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }
}
