//! Unified error types for the HomeGuard controller.
//!
//! The alarm core itself never fails: bad credentials are silent resets and
//! garbled reads are normalised to "no input" by the adapters.  Errors only
//! exist at the edges (configuration, scenario scripts, adapter bring-up),
//! and they all funnel into this one `Copy` enum.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.  The message names the offending field.
    Config(&'static str),
    /// A scenario script line could not be parsed.
    Script(ScriptError),
    /// A peripheral or adapter failed to initialise.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Script(e) => write!(f, "script: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Script errors
// ---------------------------------------------------------------------------

/// Parse failure in a scenario script, with the 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptError {
    pub line: usize,
    pub reason: &'static str,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl From<ScriptError> for Error {
    fn from(e: ScriptError) -> Self {
        Self::Script(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
