//! Independent music playback channel
//!
//! A slot owns one decode handle and one live player. States:
//! uninitialized (no decode handle), ready (decode handle), playing
//! (active player), with fading as a substate of playing.

use crate::backend::{AudioBackend, DecodeHandle, DecoderProvider, MusicPlayer};
use crate::error::Result;
use crate::fade::FadeState;
use crate::types::{MusicParameters, Tick, TrackFile};
use std::fmt;
use tracing::{debug, warn};

/// One music channel
#[derive(Default)]
pub struct Slot {
    decoder: Option<DecodeHandle>,
    player: Option<Box<dyn MusicPlayer>>,
    parameters: MusicParameters,
    fade: FadeState,
}

impl Slot {
    /// Create an uninitialized slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Open `track` for playback, or just close the slot for `None`
    ///
    /// Reopening the track the slot already holds is free. A different
    /// track closes the slot first. Returns whether a decode handle is
    /// held afterwards. On failure the slot is left uninitialized.
    pub fn open(
        &mut self,
        track: Option<&TrackFile>,
        decoders: &dyn DecoderProvider,
    ) -> Result<bool> {
        let Some(track) = track else {
            self.close();
            return Ok(false);
        };

        if let Some(decoder) = &self.decoder {
            if decoder.track() == track {
                return Ok(true);
            }
            self.close();
        }

        match decoders.open(track) {
            Ok(decoder) => {
                debug!("Opened music track {:?}", track.path());
                self.decoder = Some(decoder);
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to open music track {:?}: {}", track.path(), e);
                Err(e)
            }
        }
    }

    /// Store loop flag and volume used by the next `play`
    pub fn set_parameters(&mut self, looping: bool, volume: f32) -> bool {
        self.parameters = MusicParameters { looping, volume };
        true
    }

    /// Start playback
    ///
    /// No-op while already playing. Returns whether the slot is playing
    /// afterwards; a refused start keeps the decode handle for a retry.
    pub fn play(&mut self, backend: &mut dyn AudioBackend) -> bool {
        if self.playing() {
            return true;
        }

        let Some(decoder) = &self.decoder else {
            return false;
        };

        match backend.play_music(decoder.clone(), self.parameters) {
            Ok(player) => {
                self.player = Some(player);
                true
            }
            Err(e) => {
                warn!("Audio backend could not start {:?}: {}", decoder.track().path(), e);
                false
            }
        }
    }

    /// Stop playback and cancel any fade
    pub fn pause(&mut self) {
        if let Some(player) = self.player.as_mut().filter(|p| p.is_active()) {
            player.ask_stop();
        }
        self.fade.end();
    }

    /// Stop playback and release both handles
    pub fn close(&mut self) {
        self.pause();
        self.player = None;
        self.decoder = None;
        self.fade = FadeState::default();
    }

    /// Fade the playing stream toward `limit_volume` over `duration` ticks
    ///
    /// No-op unless playing and away from the limit. A zero duration sets
    /// the volume at once. Returns whether the volume will change.
    pub fn fade(
        &mut self,
        limit_volume: f32,
        duration: Tick,
        stop_on_zero_volume: bool,
        now: Tick,
    ) -> bool {
        let Some(current_volume) = self
            .player
            .as_ref()
            .filter(|p| p.is_active())
            .map(|p| p.volume())
        else {
            return false;
        };

        if current_volume == limit_volume {
            return false;
        }

        if duration == 0 {
            self.fade.end();
            self.set_volume(limit_volume);
            if limit_volume <= 0.0 && stop_on_zero_volume {
                self.pause();
            }
            return true;
        }

        self.fade.begin(
            current_volume,
            limit_volume,
            now,
            duration,
            stop_on_zero_volume,
        )
    }

    /// Advance a running fade to tick `now`
    ///
    /// Reaching the limit ends the fade. Reaching silence with the stop
    /// flag set also pauses, in the same tick.
    pub fn advance_fade(&mut self, now: Tick) {
        if !self.fade.is_active() {
            return;
        }

        let limit = self.fade.limit_volume();
        let volume = self.fade.compute(now).clamped(limit);
        self.set_volume(volume);

        if volume == limit {
            self.fade.end();
        }
        if volume <= 0.0 && self.fade.stop_on_zero_volume() {
            self.pause();
        }
    }

    /// Set volume now, on the stored parameters and the live player
    pub fn set_volume(&mut self, volume: f32) {
        self.parameters.volume = volume;
        if let Some(player) = self.player.as_mut() {
            player.set_volume(volume);
        }
    }

    /// Check if a fade is in progress
    pub fn is_fading(&self) -> bool {
        self.fade.is_active()
    }

    /// Check if the player is producing audio
    pub fn playing(&self) -> bool {
        self.player.as_ref().is_some_and(|p| p.is_active())
    }

    /// Check if a decode handle is held
    pub fn is_init(&self) -> bool {
        self.decoder.is_some()
    }

    /// Track currently opened
    pub fn track(&self) -> Option<&TrackFile> {
        self.decoder.as_ref().map(|d| d.track())
    }

    /// Parameters for the next `play`
    pub fn parameters(&self) -> MusicParameters {
        self.parameters
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("track", &self.track())
            .field("playing", &self.playing())
            .field("parameters", &self.parameters)
            .field("fade", &self.fade)
            .finish()
    }
}
