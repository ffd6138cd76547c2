//! Level music playlist
//!
//! Ordered track list with a cursor. Yields the next track either
//! sequentially with wraparound or uniformly at random.

use crate::randomizer::Randomizer;
use crate::types::{Tick, TrackFile};
use rand::Rng;

/// Playlist selector
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    tracks: Vec<TrackFile>,

    /// Cursor for sequential selection. May hold any value; it is
    /// normalized into range before use.
    song_number: isize,

    random_order: bool,

    randomizer: Randomizer,
}

impl Playlist {
    /// Create an empty sequential playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty playlist drawing from a specific generator
    pub fn with_randomizer(randomizer: Randomizer) -> Self {
        Self {
            randomizer,
            ..Self::default()
        }
    }

    /// Add a track to the end of the playlist
    pub fn append(&mut self, track: TrackFile) {
        self.tracks.push(track);
    }

    /// Remove all tracks and reset the cursor
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.song_number = 0;
    }

    /// Reset the cursor and mix `entropy` into the generator
    pub fn reseed(&mut self, entropy: Tick) {
        self.song_number = 0;
        self.randomizer.reseed(entropy);
    }

    /// Select the next track
    ///
    /// A single-track playlist always yields that track and leaves the
    /// cursor alone. Otherwise the cursor (or a random index in random
    /// order) is normalized into range, used, and advanced by one.
    pub fn next(&mut self) -> Option<&TrackFile> {
        let count = self.tracks.len();
        match count {
            0 => None,
            1 => self.tracks.first(),
            _ => {
                if self.random_order {
                    self.song_number = self.randomizer.gen_range(0..count) as isize;
                }

                if self.song_number < 0 || self.song_number as usize >= count {
                    self.song_number = 0;
                }

                let index = self.song_number as usize;
                self.song_number += 1;
                self.tracks.get(index)
            }
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// All tracks in playlist order
    pub fn tracks(&self) -> &[TrackFile] {
        &self.tracks
    }

    /// Current cursor value (not normalized)
    pub fn song_number(&self) -> isize {
        self.song_number
    }

    /// Move the cursor; out-of-range values normalize to 0 on the next pick
    pub fn set_song_number(&mut self, song_number: isize) {
        self.song_number = song_number;
    }

    /// Whether selection draws random indices
    pub fn random_order(&self) -> bool {
        self.random_order
    }

    /// Switch between sequential and random selection
    pub fn set_random_order(&mut self, random_order: bool) {
        self.random_order = random_order;
    }
}
