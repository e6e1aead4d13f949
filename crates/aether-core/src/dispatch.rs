// ─────────────────────────────────────────────────────────────────────
// Aether — Layer Dispatcher
// ─────────────────────────────────────────────────────────────────────
//! Maps decisions to named downstream layers.
//!
//! The layers themselves (key exchange, signatures) live outside this
//! crate; the dispatcher only selects a name.

use aether_types::{ChaosError, ChaosResult};

/// Default layer table, indexed by decision.
pub const LAYER_NAMES: [&str; 4] = ["MDI-QKD", "BB84 (decoy-state)", "Kyber-768", "Dilithium-3"];

#[derive(Debug, Clone)]
pub struct LayerDispatcher {
    layers: Vec<String>,
    rotate: bool,
    tick: u64,
}

impl LayerDispatcher {
    pub fn new(layers: Vec<String>, rotate: bool) -> ChaosResult<Self> {
        if layers.is_empty() {
            return Err(ChaosError::Configuration(
                "dispatcher needs at least one layer".to_string(),
            ));
        }
        Ok(Self {
            layers,
            rotate,
            tick: 0,
        })
    }

    /// The four standard layers, no rotation.
    pub fn standard() -> Self {
        Self {
            layers: LAYER_NAMES.iter().map(|s| s.to_string()).collect(),
            rotate: false,
            tick: 0,
        }
    }

    /// The four standard layers, selecting `(decision + tick) mod K`.
    pub fn rotating() -> Self {
        Self {
            rotate: true,
            ..Self::standard()
        }
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Dispatches performed so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Select the layer for `decision`. Every call advances the tick.
    ///
    /// A decision outside the table is a `Validation` error; the tick
    /// does not advance in that case.
    pub fn dispatch(&mut self, decision: u32) -> ChaosResult<&str> {
        let k = self.layers.len();
        let decision = decision as usize;
        if decision >= k {
            return Err(ChaosError::Validation(format!(
                "decision {decision} outside layer table of size {k}"
            )));
        }
        let index = if self.rotate {
            (decision + (self.tick % k as u64) as usize) % k
        } else {
            decision
        };
        self.tick += 1;
        Ok(&self.layers[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mapping() {
        let mut d = LayerDispatcher::standard();
        assert_eq!(d.dispatch(0).unwrap(), "MDI-QKD");
        assert_eq!(d.dispatch(2).unwrap(), "Kyber-768");
        assert_eq!(d.dispatch(3).unwrap(), "Dilithium-3");
        assert_eq!(d.tick(), 3);
    }

    #[test]
    fn test_rotation_shifts_by_tick() {
        let mut d = LayerDispatcher::rotating();
        let picked: Vec<String> = (0..5).map(|_| d.dispatch(0).unwrap().to_string()).collect();
        assert_eq!(
            picked,
            ["MDI-QKD", "BB84 (decoy-state)", "Kyber-768", "Dilithium-3", "MDI-QKD"]
        );
    }

    #[test]
    fn test_out_of_range_decision() {
        let mut d = LayerDispatcher::standard();
        assert!(matches!(d.dispatch(4), Err(ChaosError::Validation(_))));
        assert_eq!(d.tick(), 0);
    }

    #[test]
    fn test_custom_layers() {
        let mut d = LayerDispatcher::new(vec!["a".into(), "b".into()], true).unwrap();
        assert_eq!(d.dispatch(1).unwrap(), "b");
        assert_eq!(d.dispatch(1).unwrap(), "a");
        assert!(LayerDispatcher::new(Vec::new(), false).is_err());
    }
}
