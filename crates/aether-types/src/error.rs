// ─────────────────────────────────────────────────────────────────────
// Aether — Chaos Engine Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all chaos engine failures.
///
/// None of these are retried internally. Callers decide whether to
/// reseed and rerun a whole estimation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChaosError {
    /// A coordinate became NaN/Inf in the unclamped recurrence.
    #[error("numerical divergence at step {step}: coordinate {coordinate} = {value}")]
    NumericalDivergence {
        step: u64,
        coordinate: usize,
        value: f64,
    },

    /// Kaplan–Yorke interpolation is undefined for this spectrum.
    #[error("degenerate spectrum: {reason}")]
    DegenerateSpectrum { reason: String },

    /// Rejected at construction, before any step is taken.
    #[error("config error: {0}")]
    Configuration(String),

    /// Malformed caller input (wrong dimension, unsorted exponents, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Estimation stopped by a cancellation signal between iterations.
    #[error("cancelled after {completed_steps} steps")]
    Cancelled { completed_steps: u64 },

    /// The injected seed source could not produce a seed.
    #[error("seed source error: {0}")]
    SeedSource(String),
}

pub type ChaosResult<T> = Result<T, ChaosError>;
