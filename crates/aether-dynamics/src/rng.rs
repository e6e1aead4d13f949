// ─────────────────────────────────────────────────────────────────────
// Aether — Xorshift RNG
// ─────────────────────────────────────────────────────────────────────
//! Minimal xorshift64 generator for initial conditions (no external dep).
//!
//! Only used to place initial states; the chaotic maps themselves are
//! fully deterministic.

const ZERO_SEED_REPLACEMENT: u64 = 0xDEAD_BEEF_CAFE_BABE;
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed },
        }
    }

    /// Fold several seed words into one generator state.
    pub fn from_words(words: &[u64]) -> Self {
        let folded = words.iter().fold(GOLDEN_GAMMA, |acc, &w| {
            (acc.rotate_left(5) ^ w).wrapping_mul(GOLDEN_GAMMA)
        });
        Self::new(folded)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [-amplitude, amplitude).
    pub fn next_symmetric(&mut self, amplitude: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * amplitude
    }
}
