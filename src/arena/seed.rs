//! Reproducible seed streams for batch runs.
//!
//! Every batch run draws its per-trial seeds from a [`SeedSource`] built
//! from one master seed. The generator underneath is [`Lcg48Rng`], the
//! classic 48-bit linear congruential generator (multiplier `0x5DEECE66D`,
//! increment `0xB`). It is tiny and fully specified, so the seed stream for
//! a master seed is the same on every platform and every build, and it
//! matches the stream produced by the JVM harnesses this tool replaces.
use rand::{RngCore, SeedableRng};

/// Master seed used by batch runs when none is configured.
pub const DEFAULT_MASTER_SEED: i64 = 12345;

const MULTIPLIER: u64 = 0x5_DEEC_E66D;
const INCREMENT: u64 = 0xB;
const MASK: u64 = (1 << 48) - 1;

/// 48-bit linear congruential generator.
///
/// 64-bit outputs are composed from two 32-bit draws as
/// `(high << 32) + low`, both sign extended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg48Rng {
    state: u64,
}

impl Lcg48Rng {
    pub fn new(seed: i64) -> Self {
        Self {
            state: (seed as u64 ^ MULTIPLIER) & MASK,
        }
    }

    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT)
            & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Draw the next signed 64-bit value.
    pub fn next_i64(&mut self) -> i64 {
        let high = self.next_bits(32) as i64;
        let low = self.next_bits(32) as i64;
        (high << 32).wrapping_add(low)
    }
}

impl RngCore for Lcg48Rng {
    fn next_u32(&mut self) -> u32 {
        self.next_bits(32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next_i64() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Lcg48Rng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}

/// An unbounded, restartable stream of per-trial seeds.
///
/// The stream only depends on the master seed; nothing about match results
/// feeds back into it.
#[derive(Debug, Clone)]
pub struct SeedSource {
    master_seed: i64,
    rng: Lcg48Rng,
    drawn: usize,
}

impl SeedSource {
    pub fn new(master_seed: i64) -> Self {
        Self {
            master_seed,
            rng: Lcg48Rng::new(master_seed),
            drawn: 0,
        }
    }

    pub fn master_seed(&self) -> i64 {
        self.master_seed
    }

    /// How many seeds have been handed out since construction or the last
    /// [`SeedSource::restart`].
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    pub fn next_seed(&mut self) -> i64 {
        self.drawn += 1;
        self.rng.next_i64()
    }

    /// Rewind to the first seed of the stream.
    pub fn restart(&mut self) {
        self.rng = Lcg48Rng::new(self.master_seed);
        self.drawn = 0;
    }
}

impl Default for SeedSource {
    fn default() -> Self {
        Self::new(DEFAULT_MASTER_SEED)
    }
}

impl Iterator for SeedSource {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.next_seed())
    }
}
