// ─────────────────────────────────────────────────────────────────────
// Aether — Decision Uniformity Statistics
// ─────────────────────────────────────────────────────────────────────
//! Goodness-of-fit checks on a decision stream.
//!
//! `chi_square_*` tests the `K`-way histogram against the uniform
//! distribution. `monobit_balance` looks at the low bit only and is a
//! diagnostic; neither makes a claim about cryptographic randomness.
//!
//! Critical values use the Wilson–Hilferty cube-root approximation,
//! accurate to a few tenths for small degrees of freedom and better as
//! they grow.

use serde::{Deserialize, Serialize};

use aether_types::{ChaosError, ChaosResult};

/// Pearson statistic of `observed` against equal expected counts.
pub fn chi_square_statistic(observed: &[u64]) -> ChaosResult<f64> {
    if observed.is_empty() {
        return Err(ChaosError::Validation("empty histogram".to_string()));
    }
    let total: u64 = observed.iter().sum();
    if total == 0 {
        return Err(ChaosError::Validation("histogram has no samples".to_string()));
    }
    let expected = total as f64 / observed.len() as f64;
    Ok(observed
        .iter()
        .map(|&o| {
            let diff = o as f64 - expected;
            diff * diff / expected
        })
        .sum())
}

/// Upper standard-normal quantile `z` with `P(Z > z) = p`
/// (Abramowitz–Stegun 26.2.23, |error| < 4.5e-4).
fn normal_upper_quantile(p: f64) -> f64 {
    if p > 0.5 {
        return -normal_upper_quantile(1.0 - p);
    }
    let t = (-2.0 * p.ln()).sqrt();
    let num = 2.515_517 + 0.802_853 * t + 0.010_328 * t * t;
    let den = 1.0 + 1.432_788 * t + 0.189_269 * t * t + 0.001_308 * t * t * t;
    t - num / den
}

/// Critical value `χ²_{1-α}(dof)` by Wilson–Hilferty.
pub fn chi_square_critical(dof: usize, alpha: f64) -> ChaosResult<f64> {
    if dof == 0 {
        return Err(ChaosError::Validation(
            "chi-square needs at least one degree of freedom".to_string(),
        ));
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(ChaosError::Validation(format!(
            "significance level must be in (0, 1), got {alpha}"
        )));
    }
    let k = dof as f64;
    let z = normal_upper_quantile(alpha);
    let h = 2.0 / (9.0 * k);
    Ok(k * (1.0 - h + z * h.sqrt()).powi(3))
}

/// Outcome of a chi-square uniformity test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformityReport {
    pub counts: Vec<u64>,
    pub total: u64,
    pub chi_square: f64,
    pub dof: usize,
    pub alpha: f64,
    pub critical: f64,
    /// `chi_square <= critical`.
    pub uniform: bool,
}

/// Per-value counts of a decision stream with `K` outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionHistogram {
    counts: Vec<u64>,
}

impl DecisionHistogram {
    pub fn new(modulus: u32) -> ChaosResult<Self> {
        if modulus == 0 {
            return Err(ChaosError::Configuration(
                "histogram modulus must be > 0".to_string(),
            ));
        }
        Ok(Self {
            counts: vec![0; modulus as usize],
        })
    }

    pub fn record(&mut self, decision: u32) -> ChaosResult<()> {
        let k = self.counts.len();
        match self.counts.get_mut(decision as usize) {
            Some(c) => {
                *c += 1;
                Ok(())
            }
            None => Err(ChaosError::Validation(format!(
                "decision {decision} outside [0, {k})"
            ))),
        }
    }

    pub fn record_all(&mut self, decisions: &[u32]) -> ChaosResult<()> {
        decisions.iter().try_for_each(|&d| self.record(d))
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total().max(1) as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }

    pub fn chi_square(&self) -> ChaosResult<f64> {
        chi_square_statistic(&self.counts)
    }

    /// Chi-square test at significance `alpha` with `K − 1` degrees of freedom.
    pub fn evaluate(&self, alpha: f64) -> ChaosResult<UniformityReport> {
        let chi_square = self.chi_square()?;
        let dof = self.counts.len() - 1;
        let critical = chi_square_critical(dof, alpha)?;
        let uniform = chi_square <= critical;
        if !uniform {
            log::warn!(
                "histogram fails uniformity: chi2={chi_square:.3} > {critical:.3} (alpha={alpha})"
            );
        }
        Ok(UniformityReport {
            counts: self.counts.clone(),
            total: self.total(),
            chi_square,
            dof,
            alpha,
            critical,
            uniform,
        })
    }
}

/// Complementary error function (Abramowitz–Stegun 7.1.26, |error| < 1.5e-7).
fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let inner = -1.453_152_027 + t * 1.061_405_429;
    let poly = t * (0.254_829_592 + t * (-0.284_496_736 + t * (1.421_413_741 + t * inner)));
    poly * (-x * x).exp()
}

/// Low-bit balance of a decision stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonobitReport {
    pub ones: u64,
    pub zeros: u64,
    /// `|ones − zeros| / √n`.
    pub statistic: f64,
    pub p_value: f64,
    /// `p_value >= 0.01`.
    pub balanced: bool,
}

pub fn monobit_balance(decisions: &[u32]) -> ChaosResult<MonobitReport> {
    if decisions.is_empty() {
        return Err(ChaosError::Validation("no decisions to test".to_string()));
    }
    let ones = decisions.iter().filter(|&&d| d & 1 == 1).count() as u64;
    let zeros = decisions.len() as u64 - ones;
    let statistic = (ones as f64 - zeros as f64).abs() / (decisions.len() as f64).sqrt();
    let p_value = erfc(statistic / std::f64::consts::SQRT_2);
    Ok(MonobitReport {
        ones,
        zeros,
        statistic,
        p_value,
        balanced: p_value >= 0.01,
    })
}
