// ─────────────────────────────────────────────────────────────────────
// Aether — Map Capability Traits
// ─────────────────────────────────────────────────────────────────────

use aether_types::{ChaosResult, StateVector};

use crate::seed::EngineSeed;

/// A stateful chaotic stepper owning one evolution stream.
///
/// Steps on one instance are strictly sequential; independent instances
/// share nothing mutable and may run on separate threads.
pub trait ChaoticMap: Send {
    /// Short family name (`"clamped"`, `"spectral"`).
    fn family(&self) -> &'static str;

    /// Number of coordinates in `snapshot()`.
    fn dimension(&self) -> usize;

    /// Advance one tick and return the post-step live coordinates.
    fn advance(&mut self) -> ChaosResult<&[f64]>;

    /// Live coordinates of the current state.
    fn live(&self) -> &[f64];

    fn snapshot(&self) -> StateVector;

    fn steps_taken(&self) -> u64;
}

/// A pure map with an analytic Jacobian, usable for tangent-space
/// propagation. Matrices are `dimension × dimension`, row-major.
pub trait TangentMap: Sync {
    fn dimension(&self) -> usize;

    /// Write `f(state)` into `next`. Both slices have `dimension()` entries.
    fn step_into(&self, state: &[f64], next: &mut [f64]);

    /// Write `∂f/∂state` evaluated at `state` into `jac`.
    fn jacobian_into(&self, state: &[f64], jac: &mut [f64]);

    /// Pseudo-random initial state derived from `seed`.
    fn initial_state(&self, seed: &EngineSeed) -> ChaosResult<StateVector>;
}
