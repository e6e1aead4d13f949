// ─────────────────────────────────────────────────────────────────────
// Aether — Seed Sources
// ─────────────────────────────────────────────────────────────────────
//! Deterministic initialisation inputs.
//!
//! Engines never fetch entropy themselves. A `SeedSource` produces raw
//! bytes (from a fixed buffer, the clock, or any external collaborator)
//! and `EngineSeed` turns them into integer words.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use aether_types::{ChaosError, ChaosResult};

use crate::rng::SimpleRng;

/// Seed material accepted by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineSeed {
    Integers(Vec<u64>),
    /// Initial coordinates, used verbatim.
    Floats(Vec<f64>),
}

impl EngineSeed {
    /// Pack bytes into little-endian 8-byte words (last word zero-padded).
    pub fn from_bytes(bytes: &[u8]) -> ChaosResult<Self> {
        if bytes.is_empty() {
            return Err(ChaosError::SeedSource("seed source produced no bytes".into()));
        }
        let words = bytes
            .chunks(8)
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf[..chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(buf)
            })
            .collect();
        Ok(EngineSeed::Integers(words))
    }

    pub fn from_source(source: &mut dyn SeedSource) -> ChaosResult<Self> {
        let bytes = source.produce_seed()?;
        Self::from_bytes(&bytes)
    }

    /// Wall-clock seed, used when the caller supplies none.
    pub fn from_clock() -> Self {
        match Self::from_source(&mut ClockSeed) {
            Ok(seed) => seed,
            // ClockSeed always yields 8 bytes.
            Err(_) => EngineSeed::Integers(vec![0]),
        }
    }

    /// Integer view of the seed (float seeds contribute their bit patterns).
    fn raw_words(&self) -> Vec<u64> {
        match self {
            EngineSeed::Integers(w) => w.clone(),
            EngineSeed::Floats(f) => f.iter().map(|v| v.to_bits()).collect(),
        }
    }

    /// Exactly `n` words: the given ones first, the rest derived from an
    /// xorshift stream seeded with all given words.
    pub fn words(&self, n: usize) -> Vec<u64> {
        let mut words = self.raw_words();
        if words.len() < n {
            let mut rng = SimpleRng::from_words(&words);
            while words.len() < n {
                words.push(rng.next_u64());
            }
        }
        words.truncate(n);
        words
    }

    /// Generator seeded with every word of this seed.
    pub fn rng(&self) -> SimpleRng {
        SimpleRng::from_words(&self.raw_words())
    }
}

impl From<u64> for EngineSeed {
    fn from(seed: u64) -> Self {
        EngineSeed::Integers(vec![seed])
    }
}

/// Narrow interface for injectable seed material.
pub trait SeedSource {
    fn produce_seed(&mut self) -> ChaosResult<Vec<u8>>;
}

/// Returns the same bytes on every call.
#[derive(Debug, Clone)]
pub struct FixedSeed(pub Vec<u8>);

impl SeedSource for FixedSeed {
    fn produce_seed(&mut self) -> ChaosResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

static CLOCK_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Wall-clock nanoseconds mixed with a process-wide counter so that two
/// engines created within the same clock tick still differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockSeed;

impl SeedSource for ClockSeed {
    fn produce_seed(&mut self) -> ChaosResult<Vec<u8>> {
        let nanos = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        let count = CLOCK_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mixed = nanos ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Ok(mixed.to_le_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenSource;

    impl SeedSource for BrokenSource {
        fn produce_seed(&mut self) -> ChaosResult<Vec<u8>> {
            Err(ChaosError::SeedSource("offline".into()))
        }
    }

    #[test]
    fn test_from_bytes_little_endian() {
        let seed = EngineSeed::from_bytes(&[1, 0, 0, 0, 0, 0, 0, 0, 2]).unwrap();
        assert_eq!(seed, EngineSeed::Integers(vec![1, 2]));
    }

    #[test]
    fn test_empty_bytes_rejected() {
        assert!(matches!(
            EngineSeed::from_bytes(&[]),
            Err(ChaosError::SeedSource(_))
        ));
    }

    #[test]
    fn test_fixed_source() {
        let mut src = FixedSeed(vec![7; 16]);
        let a = EngineSeed::from_source(&mut src).unwrap();
        let b = EngineSeed::from_source(&mut src).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.words(2).len(), 2);
    }

    #[test]
    fn test_source_error_propagates() {
        assert!(EngineSeed::from_source(&mut BrokenSource).is_err());
    }

    #[test]
    fn test_words_keeps_prefix_and_extends() {
        let seed = EngineSeed::Integers(vec![11, 22]);
        let w = seed.words(5);
        assert_eq!(&w[..2], &[11, 22]);
        assert_eq!(w.len(), 5);
        assert_eq!(w, seed.words(5));
        assert_eq!(seed.words(1), vec![11]);
    }

    #[test]
    fn test_clock_seeds_differ() {
        let a = EngineSeed::from_clock();
        let b = EngineSeed::from_clock();
        assert_ne!(a, b);
    }
}
