// ─────────────────────────────────────────────────────────────────────
// Aether — Smooth Delay-Coupled Map
// ─────────────────────────────────────────────────────────────────────
//! Unclipped delay-coupled map used for spectral analysis:
//!
//!   x' = a·sin(b·x) + c·tanh(d·x_{t-k}) + 0.27·x·x_{t-4} − 0.11·|x_{t-6}|
//!
//! followed by a shift: the state vector holds `x_t, x_{t-1}, …, x_{t-k}`
//! and coordinate `i` of the next state is coordinate `i-1` of this one.
//!
//! No clipping: a clip would put non-differentiable walls into the
//! tangent dynamics. A non-finite coordinate is reported as
//! `NumericalDivergence` instead.
//!
//! Analytic Jacobian (row 0; rows `i >= 1` carry a single 1 at `i-1`):
//!
//!   ∂x'/∂x       = a·b·cos(b·x) + 0.27·x_{t-4}
//!   ∂x'/∂x_{t-k} = c·d·(1 − tanh²(d·x_{t-k}))
//!   ∂x'/∂x_{t-4} = 0.27·x
//!   ∂x'/∂x_{t-6} = −0.11·sign(x_{t-6})     (sign(0) = 0)

use aether_types::config::{ABS_GAIN, ABS_TAP, PRODUCT_GAIN, PRODUCT_TAP};
use aether_types::{ChaosError, ChaosResult, SpectralParams, StateVector};

use crate::map::{ChaoticMap, TangentMap};
use crate::seed::EngineSeed;

/// Sign with `sign(0) = 0` (unlike `f64::signum`).
#[inline]
fn sign_or_zero(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Pure smooth delay-coupled map. Holds parameters only.
#[derive(Debug, Clone)]
pub struct SpectralDelayMap {
    params: SpectralParams,
}

impl SpectralDelayMap {
    pub fn new(params: SpectralParams) -> ChaosResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SpectralParams {
        &self.params
    }

    /// Delay depth `k`.
    pub fn delay_depth(&self) -> usize {
        self.params.delay_depth
    }

    /// New live value from the current coordinates.
    #[inline]
    fn next_live(&self, s: &[f64]) -> f64 {
        let p = &self.params;
        let x = s[0];
        p.a * (p.b * x).sin()
            + p.c * (p.d * s[p.delay_depth]).tanh()
            + PRODUCT_GAIN * x * s[PRODUCT_TAP]
            + ABS_GAIN * s[ABS_TAP].abs()
    }

    fn check_dimension(&self, len: usize) -> ChaosResult<()> {
        let dim = self.params.dimension();
        if len != dim {
            return Err(ChaosError::Validation(format!(
                "state has {len} coordinates, map expects {dim}"
            )));
        }
        Ok(())
    }

    /// One pure step. Fails on a dimension mismatch or a non-finite result.
    pub fn step(&self, state: &StateVector) -> ChaosResult<StateVector> {
        self.check_dimension(state.dimension())?;
        let mut next = StateVector {
            coords: vec![0.0; state.dimension()],
            step: state.step + 1,
        };
        self.step_into(&state.coords, &mut next.coords);
        next.ensure_finite()?;
        Ok(next)
    }

    /// Row-major Jacobian at the pre-step `state`.
    pub fn jacobian(&self, state: &[f64]) -> ChaosResult<Vec<f64>> {
        self.check_dimension(state.len())?;
        let n = state.len();
        let mut jac = vec![0.0; n * n];
        self.jacobian_into(state, &mut jac);
        Ok(jac)
    }
}

impl TangentMap for SpectralDelayMap {
    fn dimension(&self) -> usize {
        self.params.dimension()
    }

    fn step_into(&self, state: &[f64], next: &mut [f64]) {
        let k = self.params.delay_depth;
        next[0] = self.next_live(state);
        next[1..=k].copy_from_slice(&state[..k]);
    }

    fn jacobian_into(&self, state: &[f64], jac: &mut [f64]) {
        let p = &self.params;
        let n = p.dimension();
        let k = p.delay_depth;
        let x = state[0];

        jac.iter_mut().for_each(|v| *v = 0.0);

        // Row 0: the recurrence. Taps may share a column, so accumulate.
        let th = (p.d * state[k]).tanh();
        jac[0] += p.a * p.b * (p.b * x).cos() + PRODUCT_GAIN * state[PRODUCT_TAP];
        jac[k] += p.c * p.d * (1.0 - th * th);
        jac[PRODUCT_TAP] += PRODUCT_GAIN * x;
        jac[ABS_TAP] += ABS_GAIN * sign_or_zero(state[ABS_TAP]);

        // Shift rows.
        for i in 1..n {
            jac[i * n + (i - 1)] = 1.0;
        }
    }

    fn initial_state(&self, seed: &EngineSeed) -> ChaosResult<StateVector> {
        let dim = self.params.dimension();
        let coords = match seed {
            EngineSeed::Integers(_) => {
                let mut rng = seed.rng();
                (0..dim)
                    .map(|_| rng.next_symmetric(self.params.init_amplitude))
                    .collect()
            }
            EngineSeed::Floats(values) => {
                if values.len() > dim {
                    return Err(ChaosError::Configuration(format!(
                        "spectral map takes at most {dim} seed coordinates, got {}",
                        values.len()
                    )));
                }
                let mut coords = vec![0.0; dim];
                coords[..values.len()].copy_from_slice(values);
                coords
            }
        };
        let state = StateVector::new(coords);
        state
            .ensure_finite()
            .map_err(|_| ChaosError::Configuration("seed coordinates must be finite".into()))?;
        Ok(state)
    }
}

/// Stateful wrapper: one owned state vector advanced in place.
#[derive(Debug, Clone)]
pub struct SpectralDelayEngine {
    map: SpectralDelayMap,
    state: StateVector,
    scratch: Vec<f64>,
}

impl SpectralDelayEngine {
    pub fn new(params: SpectralParams, seed: &EngineSeed) -> ChaosResult<Self> {
        let map = SpectralDelayMap::new(params)?;
        let state = map.initial_state(seed)?;
        log::debug!(
            "spectral engine: k={} dim={}",
            map.delay_depth(),
            state.dimension()
        );
        Ok(Self {
            scratch: vec![0.0; state.dimension()],
            map,
            state,
        })
    }

    pub fn map(&self) -> &SpectralDelayMap {
        &self.map
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Advance one tick. A non-finite result is not committed.
    pub fn step(&mut self) -> ChaosResult<&StateVector> {
        self.map.step_into(&self.state.coords, &mut self.scratch);
        if let Some((coordinate, value)) = self
            .scratch
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
        {
            let step = self.state.step + 1;
            log::warn!(
                "spectral engine diverged at step {step}: coordinate {coordinate} = {value}"
            );
            return Err(ChaosError::NumericalDivergence {
                step,
                coordinate,
                value,
            });
        }
        std::mem::swap(&mut self.state.coords, &mut self.scratch);
        self.state.step += 1;
        Ok(&self.state)
    }

    pub fn trajectory(&mut self, steps: usize) -> ChaosResult<Vec<StateVector>> {
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            out.push(self.step()?.clone());
        }
        Ok(out)
    }
}

impl ChaoticMap for SpectralDelayEngine {
    fn family(&self) -> &'static str {
        "spectral"
    }

    fn dimension(&self) -> usize {
        self.state.dimension()
    }

    fn advance(&mut self) -> ChaosResult<&[f64]> {
        self.step()?;
        Ok(&self.state.coords[..1])
    }

    fn live(&self) -> &[f64] {
        &self.state.coords[..1]
    }

    fn snapshot(&self) -> StateVector {
        self.state.clone()
    }

    fn steps_taken(&self) -> u64 {
        self.state.step
    }
}
