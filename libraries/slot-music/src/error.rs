//! Error types for music playback

use std::path::PathBuf;
use thiserror::Error;

/// Music errors
///
/// None of these are fatal to the host. A failed operation leaves the
/// affected slot in its prior (or uninitialized) state and may be retried
/// on a later tick.
#[derive(Debug, Error)]
pub enum MusicError {
    /// Decoder provider could not open the track
    #[error("Cannot decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },

    /// Audio backend refused to create a play handle
    #[error("Audio backend error: {0}")]
    Backend(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl MusicError {
    /// Build a decode error for a track path
    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for music operations
pub type Result<T> = std::result::Result<T, MusicError>;
