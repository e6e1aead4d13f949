// ─────────────────────────────────────────────────────────────────────
// Aether — State Vector
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{ChaosError, ChaosResult};

/// Clip a coordinate into `[-bound, bound]`.
///
/// Boundedness policy of the clamped family; not an error condition.
#[inline]
pub fn clip_coordinate(value: f64, bound: f64) -> f64 {
    value.clamp(-bound, bound)
}

/// Ordered floating-point coordinates of one engine state.
///
/// For the smooth delay-coupled family coordinate 0 is the live value and
/// coordinates `1..` are the shifted history (`coords[i] = x_{t-i}`).
/// For the clamped family the vector holds the live `(x, y, z)` triple;
/// its delay history is a ring buffer owned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVector {
    pub coords: Vec<f64>,
    /// Number of steps taken to reach this state.
    pub step: u64,
}

impl StateVector {
    pub fn new(coords: Vec<f64>) -> Self {
        Self { coords, step: 0 }
    }

    pub fn zeros(dimension: usize) -> Self {
        Self::new(vec![0.0; dimension])
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Live coordinate `x_t`.
    pub fn live(&self) -> f64 {
        self.coords.first().copied().unwrap_or(0.0)
    }

    /// History coordinates `x_{t-1} .. x_{t-k}`.
    pub fn history(&self) -> &[f64] {
        self.coords.get(1..).unwrap_or(&[])
    }

    /// Index and value of the first non-finite coordinate.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.coords
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    /// `Ok(())` if every coordinate is finite, else `NumericalDivergence`.
    pub fn ensure_finite(&self) -> ChaosResult<()> {
        match self.first_non_finite() {
            None => Ok(()),
            Some((coordinate, value)) => {
                log::warn!(
                    "state diverged at step {}: coordinate {coordinate} = {value}",
                    self.step
                );
                Err(ChaosError::NumericalDivergence {
                    step: self.step,
                    coordinate,
                    value,
                })
            }
        }
    }

    /// Largest absolute coordinate.
    pub fn max_abs(&self) -> f64 {
        self.coords.iter().fold(0.0f64, |m, v| m.max(v.abs()))
    }
}
