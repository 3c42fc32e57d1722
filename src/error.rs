//! Crate-level error types.
//!
//! Camera faults (bad coordinates, despawned entities, missing geolocation)
//! are recovered inside the engine and only logged. The variants here cover
//! the edges where a caller can act: options files and thread spawning.

use std::fmt;

/// Errors produced by the globecam crate.
#[derive(Debug)]
pub enum GlobeCamError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for GlobeCamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for GlobeCamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            Self::OptionsParse(_) => None,
        }
    }
}

impl From<std::io::Error> for GlobeCamError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
