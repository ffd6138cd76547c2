//! Music manager - slot orchestration
//!
//! Owns the slot collection (Intro, Level, then dynamically loaded slots),
//! the level playlist and the platform collaborators. The host calls
//! [`Music::idle`] once per tick.

use crate::{
    backend::{AudioBackend, Clock, DecoderProvider},
    config::MusicConfig,
    error::Result,
    playlist::Playlist,
    slot::Slot,
    types::{SlotId, Tick, TrackFile, RESERVED_SLOTS},
};
use tracing::{debug, info};

/// Background music manager
pub struct Music {
    slots: Vec<Slot>,

    /// Bumped by `pause_all`; dynamic ids from older generations are stale
    generation: u32,

    playlist: Playlist,

    /// Classic numbered track currently selected for the level, if any
    classic_song_index: Option<u16>,

    config: MusicConfig,
    decoders: Box<dyn DecoderProvider>,
    backend: Box<dyn AudioBackend>,
    clock: Box<dyn Clock>,
}

impl Music {
    /// Create a manager with the reserved slots in place
    pub fn new(
        config: MusicConfig,
        decoders: Box<dyn DecoderProvider>,
        backend: Box<dyn AudioBackend>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut playlist = Playlist::new();
        playlist.set_random_order(config.random_order);

        Self {
            slots: (0..RESERVED_SLOTS).map(|_| Slot::new()).collect(),
            generation: 0,
            playlist,
            classic_song_index: None,
            config,
            decoders,
            backend,
            clock,
        }
    }

    // ===== Slot Lookup =====

    fn resolve(&self, id: SlotId) -> Option<usize> {
        let current = id.is_reserved() || id.generation() == self.generation;
        (current && id.index() < self.slots.len()).then_some(id.index())
    }

    /// Borrow a slot, if `id` still addresses one
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.resolve(id).map(|i| &self.slots[i])
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        self.resolve(id).map(|i| &mut self.slots[i])
    }

    /// Number of slots, reserved ones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    // ===== Loading =====

    /// Append a slot and open `track` into it
    ///
    /// On failure the appended slot stays in the collection, uninitialized,
    /// until the next `pause_all`.
    pub fn load(&mut self, track: &TrackFile, looping: bool, volume: f32) -> Result<SlotId> {
        let index = self.slots.len();
        self.slots.push(Slot::new());

        let slot = &mut self.slots[index];
        slot.open(Some(track), self.decoders.as_ref())?;
        slot.set_parameters(looping, volume);
        Ok(SlotId::new(index, self.generation))
    }

    /// Open `track` into the Intro slot without starting it
    pub fn setup_intro_music(&mut self, track: &TrackFile) -> Result<()> {
        self.slots[SlotId::INTRO.index()]
            .open(Some(track), self.decoders.as_ref())
            .map(|_| ())
    }

    /// Replay the intro track once, if it is loaded and silent
    ///
    /// Fails while the audio backend is inactive.
    pub fn restart_intro_music(&mut self) -> bool {
        if !self.backend.is_active() {
            return false;
        }

        let volume = self.config.intro_volume;
        let slot = &mut self.slots[SlotId::INTRO.index()];
        if slot.is_init() && !slot.playing() && slot.set_parameters(false, volume) {
            return slot.play(self.backend.as_mut());
        }
        false
    }

    // ===== Playback Control =====

    /// Start a loaded slot
    ///
    /// Fails while the audio backend is inactive.
    pub fn play(&mut self, id: SlotId) -> bool {
        if !self.backend.is_active() {
            return false;
        }

        match self.resolve(id) {
            Some(i) => self.slots[i].play(self.backend.as_mut()),
            None => false,
        }
    }

    /// Pause one slot
    pub fn pause(&mut self, id: SlotId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.pause();
                true
            }
            None => false,
        }
    }

    /// Pause every slot and drop all dynamically loaded ones
    ///
    /// Ids returned by [`Music::load`] stop resolving afterwards.
    pub fn pause_all(&mut self) {
        for slot in &mut self.slots {
            slot.pause();
        }

        let dropped = self.slots.len() - RESERVED_SLOTS;
        self.slots.truncate(RESERVED_SLOTS);
        self.generation = self.generation.wrapping_add(1);
        info!("Paused all music, dropped {} dynamic slots", dropped);
    }

    /// Close one slot, releasing its decode handle
    pub fn close(&mut self, id: SlotId) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.close();
                true
            }
            None => false,
        }
    }

    /// Close the Level slot
    pub fn stop_level_music(&mut self) {
        self.slots[SlotId::LEVEL.index()].close();
    }

    /// Fade one slot toward `limit_volume`
    pub fn fade(
        &mut self,
        id: SlotId,
        limit_volume: f32,
        duration: Tick,
        stop_on_zero_volume: bool,
    ) -> bool {
        let now = self.clock.current_tick();
        match self.slot_mut(id) {
            Some(slot) => slot.fade(limit_volume, duration, stop_on_zero_volume, now),
            None => false,
        }
    }

    /// Fade every slot toward `limit_volume`
    pub fn fade_all(&mut self, limit_volume: f32, duration: Tick, stop_on_zero_volume: bool) {
        let now = self.clock.current_tick();
        for slot in &mut self.slots {
            slot.fade(limit_volume, duration, stop_on_zero_volume, now);
        }
    }

    /// Set one slot's volume immediately
    pub fn set_volume(&mut self, id: SlotId, volume: f32) -> bool {
        match self.slot_mut(id) {
            Some(slot) => {
                slot.set_volume(volume);
                true
            }
            None => false,
        }
    }

    /// Check if one slot is playing
    pub fn playing(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(Slot::playing)
    }

    /// Check if any slot is playing
    pub fn any_playing(&self) -> bool {
        self.slots.iter().any(Slot::playing)
    }

    // ===== Tick =====

    /// Per-tick update
    ///
    /// Starts the next level track when the Level slot has gone quiet,
    /// then advances every running fade. Does nothing while the audio
    /// backend is inactive.
    pub fn idle(&mut self) {
        if !self.backend.is_active() {
            return;
        }

        if !self.slots[SlotId::LEVEL.index()].playing() && self.load_level_music() {
            self.slots[SlotId::LEVEL.index()].play(self.backend.as_mut());
        }

        let now = self.clock.current_tick();
        for slot in &mut self.slots {
            if slot.is_init() && slot.is_fading() {
                slot.advance_fade(now);
            }
        }
    }

    fn load_level_music(&mut self) -> bool {
        let slot = &mut self.slots[SlotId::LEVEL.index()];
        match slot.open(self.playlist.next(), self.decoders.as_ref()) {
            Ok(true) => {
                debug!("Level music advancing to {:?}", slot.track());
                slot.set_parameters(false, self.config.level_volume)
            }
            _ => false,
        }
    }

    // ===== Level Playlist =====

    /// Restart playlist traversal for a new level
    ///
    /// Resets the cursor and mixes the current tick into the generator.
    pub fn seed_level_music(&mut self) {
        let entropy = self.clock.current_tick();
        self.playlist.reseed(entropy);
    }

    /// Append a track to the level playlist
    pub fn push_back_level_music(&mut self, track: TrackFile) {
        self.playlist.append(track);
    }

    /// Empty the level playlist and forget the classic track selection
    pub fn clear_level_music(&mut self) {
        self.playlist.clear();
        self.classic_song_index = None;
    }

    /// Switch the level playlist between sequential and random order
    pub fn set_random_order(&mut self, random_order: bool) {
        self.playlist.set_random_order(random_order);
    }

    /// Select the classic numbered track `song_index` as the only level song
    ///
    /// Negative indices leave the playlist empty. The file is looked up as
    /// `<music_dir>/<NN>.<ext>` for each configured extension in order; if
    /// none exists the playlist stays empty.
    pub fn set_classic_level_music(&mut self, song_index: i16) {
        self.clear_level_music();
        let Ok(index) = u16::try_from(song_index) else {
            return;
        };

        let found = self
            .config
            .classic_extensions
            .iter()
            .map(|ext| {
                TrackFile::new(
                    self.config
                        .music_dir
                        .join(format!("{:02}.{}", index, ext)),
                )
            })
            .find(TrackFile::exists);

        match found {
            Some(track) => {
                info!("Classic level music {} -> {:?}", index, track.path());
                self.playlist.append(track);
                self.classic_song_index = Some(index);
            }
            None => debug!("No classic level music file for index {}", index),
        }
    }

    /// Classic track selected by the last `set_classic_level_music`
    pub fn classic_level_music(&self) -> Option<u16> {
        self.classic_song_index
    }

    /// Check if a classic track is selected
    pub fn has_classic_level_music(&self) -> bool {
        self.classic_song_index.is_some()
    }

    /// Check if level music is queued or still playing
    pub fn is_level_music_active(&self) -> bool {
        !self.playlist.is_empty() || self.slots[SlotId::LEVEL.index()].playing()
    }

    /// Read-only view of the level playlist
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Active configuration
    pub fn config(&self) -> &MusicConfig {
        &self.config
    }
}
