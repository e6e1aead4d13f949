// ─────────────────────────────────────────────────────────────────────
// Aether — Ensemble Spectrum Runs
// ─────────────────────────────────────────────────────────────────────
//! Independent estimations over several seeds, run in parallel.
//!
//! Each run owns its estimator and scratch; the map is shared read-only.
//! Results are collected in seed order, so the summary does not depend
//! on thread scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use aether_dynamics::{EngineSeed, TangentMap};
use aether_types::{ChaosError, ChaosResult, SpectrumParams};

use crate::cancel::CancelToken;
use crate::lyapunov::{LyapunovEstimator, SpectrumEstimate};

/// Per-exponent statistics over an ensemble of runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleSummary {
    pub runs: Vec<SpectrumEstimate>,
    pub mean_exponents: Vec<f64>,
    /// Population standard deviation, per exponent index.
    pub std_exponents: Vec<f64>,
    pub mean_dimension: f64,
}

impl EnsembleSummary {
    fn from_runs(runs: Vec<SpectrumEstimate>) -> Self {
        let count = runs.len() as f64;
        let dim = runs[0].exponents.len();

        let mut mean_exponents = vec![0.0; dim];
        for run in &runs {
            for (m, e) in mean_exponents.iter_mut().zip(&run.exponents) {
                *m += e / count;
            }
        }

        let mut std_exponents = vec![0.0; dim];
        for run in &runs {
            for ((s, e), m) in std_exponents.iter_mut().zip(&run.exponents).zip(&mean_exponents) {
                *s += (e - m).powi(2) / count;
            }
        }
        std_exponents.iter_mut().for_each(|s| *s = s.sqrt());

        let mean_dimension = runs.iter().map(|r| r.kaplan_yorke_dimension).sum::<f64>() / count;

        Self {
            runs,
            mean_exponents,
            std_exponents,
            mean_dimension,
        }
    }

    /// Largest per-exponent standard deviation.
    pub fn max_spread(&self) -> f64 {
        self.std_exponents.iter().cloned().fold(0.0, f64::max)
    }
}

/// Estimate the spectrum once per seed, in parallel.
///
/// Any failing run fails the whole ensemble with that run's error.
pub fn estimate_ensemble<M: TangentMap>(
    map: &M,
    params: &SpectrumParams,
    seeds: &[EngineSeed],
    cancel: Option<&CancelToken>,
) -> ChaosResult<EnsembleSummary> {
    if seeds.is_empty() {
        return Err(ChaosError::Validation(
            "ensemble needs at least one seed".to_string(),
        ));
    }
    params.validate()?;

    let runs: Vec<SpectrumEstimate> = seeds
        .par_iter()
        .map(|seed| {
            let mut estimator = LyapunovEstimator::new(map, params.clone())?;
            estimator.estimate(seed, cancel)
        })
        .collect::<ChaosResult<Vec<_>>>()?;

    let summary = EnsembleSummary::from_runs(runs);
    log::info!(
        "ensemble: runs={} lambda_max={:.6}±{:.6} D_KY={:.4}",
        summary.runs.len(),
        summary.mean_exponents[0],
        summary.std_exponents[0],
        summary.mean_dimension
    );
    Ok(summary)
}
