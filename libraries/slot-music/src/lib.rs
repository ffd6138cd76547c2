//! Slot Music - Background Music Management
//!
//! Tick-driven background music for games and other real-time hosts.
//!
//! This crate provides:
//! - Independent music slots (Intro, Level, plus dynamically loaded ones)
//! - Level playlist with sequential or random order
//! - Linear volume fades advanced once per tick
//! - Classic numbered level tracks (`Music/NN.ogg`, `Music/NN.mp3`)
//!
//! # Architecture
//!
//! `slot-music` does no decoding or mixing itself. The platform supplies a
//! [`DecoderProvider`], an [`AudioBackend`] and a [`Clock`]; the host calls
//! [`Music::idle`] once per tick from the same thread that issues every
//! other call.
//!
//! # Example
//!
//! ```rust,no_run
//! use slot_music::{
//!     AudioBackend, DecodeHandle, DecoderProvider, ManualClock, Music, MusicConfig,
//!     MusicParameters, MusicPlayer, Result, SlotId, TrackFile,
//! };
//!
//! struct Decoders;
//!
//! impl DecoderProvider for Decoders {
//!     fn open(&self, track: &TrackFile) -> Result<DecodeHandle> {
//!         // Open the file with the platform decoder
//!         # unimplemented!()
//!     }
//! }
//!
//! struct Mixer;
//!
//! impl AudioBackend for Mixer {
//!     fn is_active(&self) -> bool {
//!         true
//!     }
//!
//!     fn play_music(
//!         &mut self,
//!         stream: DecodeHandle,
//!         parameters: MusicParameters,
//!     ) -> Result<Box<dyn MusicPlayer>> {
//!         // Hand the stream to the platform mixer
//!         # unimplemented!()
//!     }
//! }
//!
//! let clock = ManualClock::new(0);
//! let mut music = Music::new(
//!     MusicConfig::default(),
//!     Box::new(Decoders),
//!     Box::new(Mixer),
//!     Box::new(clock.clone()),
//! );
//!
//! music.set_classic_level_music(3);
//! music.seed_level_music();
//!
//! // Once per frame
//! music.idle();
//! clock.advance(1);
//!
//! // Fade the level music out over 60 ticks and stop it
//! music.fade(SlotId::LEVEL, 0.0, 60, true);
//! ```

mod backend;
mod config;
mod error;
mod fade;
mod music;
mod playlist;
mod randomizer;
mod slot;
mod types;

// Public exports
pub use backend::{
    AudioBackend, Clock, DecodeHandle, DecoderProvider, ManualClock, MusicPlayer, MusicStream,
};
pub use config::MusicConfig;
pub use error::{MusicError, Result};
pub use fade::{FadeState, FadeStep};
pub use music::Music;
pub use playlist::Playlist;
pub use randomizer::Randomizer;
pub use slot::Slot;
pub use types::{MusicParameters, SlotId, Tick, TrackFile, RESERVED_SLOTS};
