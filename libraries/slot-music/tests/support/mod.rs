//! Shared fakes for integration tests
//!
//! Every fake keeps its state behind an `Arc<Mutex<_>>` so the test can
//! inspect it after handing the fake to the manager.

#![allow(dead_code)]

use slot_music::{
    AudioBackend, DecodeHandle, DecoderProvider, ManualClock, Music, MusicConfig, MusicError,
    MusicParameters, MusicPlayer, MusicStream, Result, TrackFile,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

// ============================================================================
// DECODER
// ============================================================================

struct FakeStream {
    track: TrackFile,
}

impl MusicStream for FakeStream {
    fn track(&self) -> &TrackFile {
        &self.track
    }
}

#[derive(Debug, Default)]
pub struct DecoderLog {
    /// Tracks that fail to decode
    pub missing: HashSet<TrackFile>,
    /// Every successful open, in order
    pub opened: Vec<TrackFile>,
}

#[derive(Clone, Default)]
pub struct FakeDecoders {
    pub log: Arc<Mutex<DecoderLog>>,
}

impl FakeDecoders {
    pub fn mark_missing(&self, track: &TrackFile) {
        self.log.lock().unwrap().missing.insert(track.clone());
    }

    pub fn open_count(&self) -> usize {
        self.log.lock().unwrap().opened.len()
    }
}

impl DecoderProvider for FakeDecoders {
    fn open(&self, track: &TrackFile) -> Result<DecodeHandle> {
        let mut log = self.log.lock().unwrap();
        if log.missing.contains(track) {
            return Err(MusicError::decode(track.path(), "file not found"));
        }
        log.opened.push(track.clone());
        Ok(Arc::new(FakeStream {
            track: track.clone(),
        }))
    }
}

// ============================================================================
// BACKEND
// ============================================================================

#[derive(Debug)]
pub struct PlayerState {
    pub track: TrackFile,
    pub parameters: MusicParameters,
    pub active: bool,
    pub volume: f32,
    pub volume_writes: Vec<f32>,
    pub stop_requests: usize,
}

struct FakePlayer {
    state: Arc<Mutex<PlayerState>>,
}

impl MusicPlayer for FakePlayer {
    fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    fn volume(&self) -> f32 {
        self.state.lock().unwrap().volume
    }

    fn set_volume(&mut self, volume: f32) {
        let mut state = self.state.lock().unwrap();
        state.volume = volume;
        state.volume_writes.push(volume);
    }

    fn ask_stop(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.active = false;
        state.stop_requests += 1;
    }
}

#[derive(Debug)]
pub struct BackendState {
    pub active: bool,
    pub refuse: bool,
    pub players: Vec<Arc<Mutex<PlayerState>>>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            active: true,
            refuse: false,
            players: Vec::new(),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeBackend {
    pub state: Arc<Mutex<BackendState>>,
}

impl FakeBackend {
    pub fn set_active(&self, active: bool) {
        self.state.lock().unwrap().active = active;
    }

    pub fn set_refuse(&self, refuse: bool) {
        self.state.lock().unwrap().refuse = refuse;
    }

    pub fn player_count(&self) -> usize {
        self.state.lock().unwrap().players.len()
    }

    /// Player created by the `n`th successful `play_music` call
    pub fn player(&self, n: usize) -> Arc<Mutex<PlayerState>> {
        self.state.lock().unwrap().players[n].clone()
    }

    pub fn last_player(&self) -> Arc<Mutex<PlayerState>> {
        let state = self.state.lock().unwrap();
        state.players.last().unwrap().clone()
    }

    /// Simulate the mixer reaching the end of a non-looping track
    pub fn finish(&self, n: usize) {
        self.player(n).lock().unwrap().active = false;
    }
}

impl AudioBackend for FakeBackend {
    fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    fn play_music(
        &mut self,
        stream: DecodeHandle,
        parameters: MusicParameters,
    ) -> Result<Box<dyn MusicPlayer>> {
        let mut state = self.state.lock().unwrap();
        if state.refuse {
            return Err(MusicError::Backend("no free music source".to_string()));
        }

        let player = Arc::new(Mutex::new(PlayerState {
            track: stream.track().clone(),
            parameters,
            active: true,
            volume: parameters.volume,
            volume_writes: Vec::new(),
            stop_requests: 0,
        }));
        state.players.push(player.clone());
        Ok(Box::new(FakePlayer { state: player }))
    }
}

// ============================================================================
// FIXTURE
// ============================================================================

pub struct Fixture {
    pub music: Music,
    pub decoders: FakeDecoders,
    pub backend: FakeBackend,
    pub clock: ManualClock,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(MusicConfig::default())
    }

    pub fn with_config(config: MusicConfig) -> Self {
        let decoders = FakeDecoders::default();
        let backend = FakeBackend::default();
        let clock = ManualClock::new(1000);
        let music = Music::new(
            config,
            Box::new(decoders.clone()),
            Box::new(backend.clone()),
            Box::new(clock.clone()),
        );

        Self {
            music,
            decoders,
            backend,
            clock,
        }
    }

    /// Advance the clock by one tick and run the manager update
    pub fn tick(&mut self) {
        self.clock.advance(1);
        self.music.idle();
    }

    pub fn ticks(&mut self, count: u32) {
        for _ in 0..count {
            self.tick();
        }
    }
}

pub fn track(name: &str) -> TrackFile {
    TrackFile::new(format!("Music/{}", name))
}
