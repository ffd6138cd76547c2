//! Platform boundary traits
//!
//! Decoding, audio output and the tick source live outside this crate.
//! Platforms plug them in through these traits (Symphonia plus a mixer on
//! desktop, a fake in tests).

use crate::error::Result;
use crate::types::{MusicParameters, Tick, TrackFile};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Decoded music stream
///
/// Opaque to this crate. A slot holds it while initialized and hands a
/// clone of the handle to the backend each time playback starts.
pub trait MusicStream: Send + Sync {
    /// Track the stream was opened from
    fn track(&self) -> &TrackFile;
}

/// Shared decode handle
pub type DecodeHandle = Arc<dyn MusicStream>;

/// Opens tracks for decoding
pub trait DecoderProvider: Send {
    /// Create a decode handle for `track`
    ///
    /// # Returns
    /// * `Ok(handle)` - Stream ready for playback
    /// * `Err(_)` - Unsupported format or unreadable file
    fn open(&self, track: &TrackFile) -> Result<DecodeHandle>;
}

/// Live playback of one stream
pub trait MusicPlayer: Send {
    /// Check if the player is still producing audio
    fn is_active(&self) -> bool;

    /// Current volume reported by the mixer
    fn volume(&self) -> f32;

    /// Change volume while playing
    fn set_volume(&mut self, volume: f32);

    /// Request a graceful stop (may take effect after a few buffers)
    fn ask_stop(&mut self);
}

/// Audio output subsystem
pub trait AudioBackend: Send {
    /// Check if the subsystem is initialized and active
    ///
    /// While this is false the manager's per-tick update does nothing and
    /// starting a slot fails.
    fn is_active(&self) -> bool;

    /// Start playing a decoded stream
    fn play_music(
        &mut self,
        stream: DecodeHandle,
        parameters: MusicParameters,
    ) -> Result<Box<dyn MusicPlayer>>;
}

/// Tick source
pub trait Clock: Send {
    /// Current tick, monotonic up to wraparound
    fn current_tick(&self) -> Tick;
}

/// Clock advanced explicitly by the host
///
/// Clones share the same counter, so the host can keep one handle and give
/// another to the [`Music`](crate::Music) manager.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    tick: Arc<AtomicU32>,
}

impl ManualClock {
    /// Create a clock starting at `tick`
    pub fn new(tick: Tick) -> Self {
        Self {
            tick: Arc::new(AtomicU32::new(tick)),
        }
    }

    /// Jump to an absolute tick
    pub fn set(&self, tick: Tick) {
        self.tick.store(tick, Ordering::Relaxed);
    }

    /// Advance by `ticks`, wrapping on overflow
    pub fn advance(&self, ticks: Tick) {
        self.tick.fetch_add(ticks, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn current_tick(&self) -> Tick {
        self.tick.load(Ordering::Relaxed)
    }
}
