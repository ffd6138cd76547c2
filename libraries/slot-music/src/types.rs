//! Core types for music playback

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Host tick counter
///
/// Monotonic, wraps on overflow. Fade durations are expressed in the same
/// unit.
pub type Tick = u32;

/// Number of structurally reserved slots (Intro and Level)
pub const RESERVED_SLOTS: usize = 2;

/// Reference to an audio file on disk
///
/// Immutable once built. Whether the file can actually be decoded is decided
/// by the [`DecoderProvider`](crate::DecoderProvider).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackFile {
    path: PathBuf,
}

impl TrackFile {
    /// Create a track reference from a path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path for audio decoding
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check whether the file exists on disk
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}

impl From<PathBuf> for TrackFile {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for TrackFile {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Live playback parameters handed to the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MusicParameters {
    /// Restart the stream when it reaches the end
    pub looping: bool,

    /// Linear volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for MusicParameters {
    fn default() -> Self {
        Self {
            looping: false,
            volume: 1.0,
        }
    }
}

/// Handle addressing one slot of the [`Music`](crate::Music) manager
///
/// Reserved handles ([`SlotId::INTRO`], [`SlotId::LEVEL`]) are always valid.
/// Handles returned by [`Music::load`](crate::Music::load) carry the
/// generation they were issued in and stop resolving once
/// [`Music::pause_all`](crate::Music::pause_all) shrinks the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u32,
}

impl SlotId {
    /// Intro music slot
    pub const INTRO: SlotId = SlotId {
        index: 0,
        generation: 0,
    };

    /// Level music slot, fed by the level playlist
    pub const LEVEL: SlotId = SlotId {
        index: 1,
        generation: 0,
    };

    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Position of the slot in the collection
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this handle addresses one of the reserved slots
    pub fn is_reserved(&self) -> bool {
        self.index < RESERVED_SLOTS
    }

    pub(crate) fn generation(&self) -> u32 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_ids() {
        assert!(SlotId::INTRO.is_reserved());
        assert!(SlotId::LEVEL.is_reserved());
        assert_eq!(SlotId::INTRO.index(), 0);
        assert_eq!(SlotId::LEVEL.index(), 1);
        assert!(!SlotId::new(RESERVED_SLOTS, 0).is_reserved());
    }

    #[test]
    fn default_parameters() {
        let params = MusicParameters::default();
        assert!(!params.looping);
        assert_eq!(params.volume, 1.0);
    }

    #[test]
    fn missing_track_does_not_exist() {
        let track = TrackFile::from("/definitely/not/here.ogg");
        assert!(!track.exists());
        assert_eq!(track.path(), Path::new("/definitely/not/here.ogg"));
    }
}
