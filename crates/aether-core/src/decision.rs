// ─────────────────────────────────────────────────────────────────────
// Aether — Decision Extraction
// ─────────────────────────────────────────────────────────────────────
//! Reduction of live coordinates to a small-range integer.

use aether_types::DecisionParams;

/// Maps post-step live coordinates to a decision.
///
/// Implementations should return values in `[0, modulus)`; the engine
/// reduces the result modulo its configured `K` regardless.
pub trait DecisionExtractor: Send + Sync {
    fn extract(&self, live: &[f64]) -> u32;
}

/// `⌊scale · Σ|live_i|⌋ mod K`.
#[derive(Debug, Clone, PartialEq)]
pub struct ModularMagnitude {
    scale: f64,
    modulus: u32,
}

impl ModularMagnitude {
    pub fn new(params: &DecisionParams) -> Self {
        Self {
            scale: params.scale,
            modulus: params.modulus.max(1),
        }
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }
}

impl DecisionExtractor for ModularMagnitude {
    #[inline]
    fn extract(&self, live: &[f64]) -> u32 {
        let magnitude: f64 = live.iter().map(|v| v.abs()).sum();
        // Float-to-int `as` saturates; NaN maps to 0.
        let scaled = (magnitude * self.scale) as u64;
        (scaled % u64::from(self.modulus)) as u32
    }
}

type ExtractFn = Box<dyn Fn(&[f64]) -> u32 + Send + Sync>;

/// Extractor backed by a caller-supplied closure.
pub struct ExternalExtractor {
    extract_fn: ExtractFn,
}

impl ExternalExtractor {
    pub fn new(extract_fn: impl Fn(&[f64]) -> u32 + Send + Sync + 'static) -> Self {
        Self {
            extract_fn: Box::new(extract_fn),
        }
    }
}

impl DecisionExtractor for ExternalExtractor {
    fn extract(&self, live: &[f64]) -> u32 {
        (self.extract_fn)(live)
    }
}
