//! Deterministic pseudo-random generator for playlist selection
//!
//! Marsaglia's KISS generator: a multiply-with-carry pair, a 3-shift
//! register and a linear congruential generator combined per draw. The
//! 256-entry table is refilled from the KISS stream on every reseed, which
//! also advances the combined state.

use rand::{Error, RngCore, SeedableRng};

const TABLE_SIZE: usize = 256;

const DEFAULT_Z: u32 = 362_436_069;
const DEFAULT_W: u32 = 521_288_629;
const DEFAULT_JSR: u32 = 123_456_789;
const DEFAULT_JCONG: u32 = 380_116_160;

/// KISS pseudo-random generator
#[derive(Debug, Clone)]
pub struct Randomizer {
    z: u32,
    w: u32,
    jsr: u32,
    jcong: u32,
    table: [u32; TABLE_SIZE],
}

impl Randomizer {
    /// Create a generator with the canonical KISS start state
    pub fn new() -> Self {
        Self::from_state(DEFAULT_Z, DEFAULT_W, DEFAULT_JSR, DEFAULT_JCONG)
    }

    fn from_state(z: u32, w: u32, jsr: u32, jcong: u32) -> Self {
        let mut randomizer = Self {
            z,
            w,
            jsr,
            jcong,
            table: [0; TABLE_SIZE],
        };
        randomizer.set_table();
        randomizer
    }

    /// Mix external entropy (e.g. the current tick) into the state
    ///
    /// Deterministic for a fixed entropy value and prior state.
    pub fn reseed(&mut self, entropy: u32) {
        self.z ^= entropy;
        self.set_table();
    }

    /// Refill the table from the KISS stream
    pub fn set_table(&mut self) {
        let mut table = [0; TABLE_SIZE];
        for entry in &mut table {
            *entry = self.kiss();
        }
        self.table = table;
    }

    /// Next raw KISS value
    pub fn kiss(&mut self) -> u32 {
        (self.mwc() ^ self.cong()).wrapping_add(self.shr3())
    }

    /// Table entry generated by the last reseed
    pub fn table_entry(&self, index: u8) -> u32 {
        self.table[index as usize]
    }

    fn mwc(&mut self) -> u32 {
        self.z = 36969u32
            .wrapping_mul(self.z & 0xffff)
            .wrapping_add(self.z >> 16);
        self.w = 18000u32
            .wrapping_mul(self.w & 0xffff)
            .wrapping_add(self.w >> 16);
        (self.z << 16).wrapping_add(self.w)
    }

    fn shr3(&mut self) -> u32 {
        self.jsr ^= self.jsr << 17;
        self.jsr ^= self.jsr >> 13;
        self.jsr ^= self.jsr << 5;
        self.jsr
    }

    fn cong(&mut self) -> u32 {
        self.jcong = 69069u32.wrapping_mul(self.jcong).wrapping_add(1_234_567);
        self.jcong
    }
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RngCore for Randomizer {
    fn next_u32(&mut self) -> u32 {
        self.kiss()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.kiss());
        let high = u64::from(self.kiss());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.kiss().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Randomizer {
    type Seed = [u8; 16];

    /// Seed bytes are read as four little-endian words (z, w, jsr, jcong).
    ///
    /// A zero shift register never leaves zero, so it falls back to the
    /// canonical value.
    fn from_seed(seed: Self::Seed) -> Self {
        let word = |i: usize| {
            u32::from_le_bytes([seed[i * 4], seed[i * 4 + 1], seed[i * 4 + 2], seed[i * 4 + 3]])
        };
        let jsr = match word(2) {
            0 => DEFAULT_JSR,
            jsr => jsr,
        };
        Self::from_state(word(0), word(1), jsr, word(3))
    }
}
