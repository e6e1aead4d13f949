// ─────────────────────────────────────────────────────────────────────
// Aether — Lyapunov Spectrum Estimator
// ─────────────────────────────────────────────────────────────────────
//! Full Lyapunov spectrum by iterated QR of the propagated tangent basis.
//!
//! Per main iteration:
//!   1. J ← Jacobian at the pre-step state
//!   2. P ← J · Q
//!   3. P = Q' R (modified Gram–Schmidt)
//!   4. S_i += log(|R_ii| + ε)
//!   5. Q ← Q'
//!   6. state ← f(state)
//! Every `reorthonormalize_every` iterations Q gets an extra QR pass to
//! shed accumulated round-off; that pass does not touch S.
//!
//! Exponents are `S_i / total_steps`, sorted descending.
//! All scratch is allocated once per estimator; the loop does not allocate.

use serde::{Deserialize, Serialize};

use aether_dynamics::{EngineSeed, TangentMap};
use aether_types::{ChaosError, ChaosResult, SpectrumParams};

use crate::cancel::CancelToken;
use crate::kaplan_yorke::kaplan_yorke_dimension;
use crate::linalg::{identity_into, matmul_into, qr_in_place};

/// Result of one estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumEstimate {
    /// Lyapunov exponents, non-increasing. Length = state dimension.
    pub exponents: Vec<f64>,
    /// Kaplan–Yorke dimension of `exponents`.
    pub kaplan_yorke_dimension: f64,
    /// Main iterations accumulated.
    pub steps: u64,
}

impl SpectrumEstimate {
    pub fn largest(&self) -> f64 {
        self.exponents.first().copied().unwrap_or(f64::NEG_INFINITY)
    }

    pub fn sum(&self) -> f64 {
        self.exponents.iter().sum()
    }

    pub fn is_chaotic(&self) -> bool {
        self.largest() > 0.0
    }
}

/// Running log-growth sums, one per tangent direction.
#[derive(Debug, Clone)]
pub struct ExponentAccumulator {
    sums: Vec<f64>,
    steps: u64,
    floor: f64,
}

impl ExponentAccumulator {
    pub fn new(dimension: usize, floor: f64) -> Self {
        Self {
            sums: vec![0.0; dimension],
            steps: 0,
            floor,
        }
    }

    pub fn accumulate(&mut self, r_diag: &[f64]) {
        for (s, r) in self.sums.iter_mut().zip(r_diag) {
            *s += (r.abs() + self.floor).ln();
        }
        self.steps += 1;
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn sums(&self) -> &[f64] {
        &self.sums
    }

    /// Averages sorted descending. Empty accumulator → `Validation`.
    pub fn finalize(&self) -> ChaosResult<Vec<f64>> {
        if self.steps == 0 {
            return Err(ChaosError::Validation(
                "no steps accumulated".to_string(),
            ));
        }
        let steps = self.steps as f64;
        let mut exponents: Vec<f64> = self.sums.iter().map(|s| s / steps).collect();
        exponents.sort_by(|a, b| b.total_cmp(a));
        Ok(exponents)
    }
}

fn first_non_finite(v: &[f64]) -> Option<(usize, f64)> {
    v.iter().copied().enumerate().find(|(_, x)| !x.is_finite())
}

/// Lyapunov spectrum estimator bound to one map.
///
/// Holds its own state and tangent basis, so one estimator serves one
/// run at a time; use separate estimators for concurrent runs.
pub struct LyapunovEstimator<'m, M: TangentMap> {
    map: &'m M,
    params: SpectrumParams,
    n: usize,
    // Pre-allocated scratch
    state: Vec<f64>,
    next: Vec<f64>,
    jac: Vec<f64>,
    basis: Vec<f64>,
    product: Vec<f64>,
    r_diag: Vec<f64>,
    r_reorth: Vec<f64>,
}

impl<'m, M: TangentMap> LyapunovEstimator<'m, M> {
    pub fn new(map: &'m M, params: SpectrumParams) -> ChaosResult<Self> {
        params.validate()?;
        let n = map.dimension();
        if n == 0 {
            return Err(ChaosError::Configuration(
                "map dimension must be > 0".to_string(),
            ));
        }
        Ok(Self {
            map,
            params,
            n,
            state: vec![0.0; n],
            next: vec![0.0; n],
            jac: vec![0.0; n * n],
            basis: vec![0.0; n * n],
            product: vec![0.0; n * n],
            r_diag: vec![0.0; n],
            r_reorth: vec![0.0; n],
        })
    }

    pub fn params(&self) -> &SpectrumParams {
        &self.params
    }

    pub fn dimension(&self) -> usize {
        self.n
    }

    /// Advance `self.state` one tick; `step` is the 1-based global index.
    fn advance(&mut self, step: u64) -> ChaosResult<()> {
        self.map.step_into(&self.state, &mut self.next);
        if let Some((coordinate, value)) = first_non_finite(&self.next) {
            log::warn!(
                "lyapunov run diverged at step {step}: coordinate {coordinate} = {value}"
            );
            return Err(ChaosError::NumericalDivergence {
                step,
                coordinate,
                value,
            });
        }
        std::mem::swap(&mut self.state, &mut self.next);
        Ok(())
    }

    fn check_cancel(cancel: Option<&CancelToken>, completed_steps: u64) -> ChaosResult<()> {
        match cancel {
            Some(token) if token.is_cancelled() => {
                log::warn!("lyapunov run cancelled after {completed_steps} steps");
                Err(ChaosError::Cancelled { completed_steps })
            }
            _ => Ok(()),
        }
    }

    /// Run the estimation and return only the sorted exponents.
    pub fn estimate_exponents(
        &mut self,
        seed: &EngineSeed,
        cancel: Option<&CancelToken>,
    ) -> ChaosResult<Vec<f64>> {
        let n = self.n;
        let initial = self.map.initial_state(seed)?;
        if initial.dimension() != n {
            return Err(ChaosError::Validation(format!(
                "initial state has {} coordinates, map expects {n}",
                initial.dimension()
            )));
        }
        self.state.copy_from_slice(&initial.coords);

        // Leave the transient.
        let transient = self.params.transient_steps;
        for t in 0..transient {
            Self::check_cancel(cancel, t)?;
            self.advance(t + 1)?;
        }

        identity_into(&mut self.basis, n);
        let mut acc = ExponentAccumulator::new(n, self.params.log_floor);
        let reorth = self.params.reorthonormalize_every;

        for t in 0..self.params.total_steps {
            Self::check_cancel(cancel, transient + t)?;

            self.map.jacobian_into(&self.state, &mut self.jac);
            matmul_into(&self.jac, &self.basis, &mut self.product, n);
            qr_in_place(&mut self.product, n, &mut self.r_diag);
            acc.accumulate(&self.r_diag);
            std::mem::swap(&mut self.basis, &mut self.product);

            if (t + 1) % reorth == 0 {
                qr_in_place(&mut self.basis, n, &mut self.r_reorth);
            }

            self.advance(transient + t + 1)?;
        }

        acc.finalize()
    }

    /// Run the estimation: sorted exponents plus Kaplan–Yorke dimension.
    ///
    /// A dissipation failure in the dimension step is returned as
    /// `DegenerateSpectrum`; use `estimate_exponents` to get the spectrum
    /// regardless.
    pub fn estimate(
        &mut self,
        seed: &EngineSeed,
        cancel: Option<&CancelToken>,
    ) -> ChaosResult<SpectrumEstimate> {
        let exponents = self.estimate_exponents(seed, cancel)?;
        let kaplan_yorke_dimension = kaplan_yorke_dimension(&exponents)?;
        log::info!(
            "lyapunov spectrum: dim={} steps={} lambda_max={:.6} D_KY={:.4}",
            self.n,
            self.params.total_steps,
            exponents[0],
            kaplan_yorke_dimension
        );
        Ok(SpectrumEstimate {
            exponents,
            kaplan_yorke_dimension,
            steps: self.params.total_steps,
        })
    }
}
