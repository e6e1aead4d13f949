// ─────────────────────────────────────────────────────────────────────
// Aether — Lyapunov Spectrum Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Chaoticity certification for delay-coupled maps.
//!
//! Architecture:
//!   - linalg: row-major products and modified Gram–Schmidt QR
//!   - LyapunovEstimator: tangent basis propagated by the analytic
//!     Jacobian, factored by QR every step, log|R_ii| accumulated
//!   - kaplan_yorke: fractal dimension from a descending spectrum
//!   - CancelToken: cooperative cancellation between iterations
//!   - ensemble: independent runs in parallel (rayon), aggregated after

pub mod cancel;
pub mod ensemble;
pub mod kaplan_yorke;
pub mod linalg;
pub mod lyapunov;

pub use cancel::CancelToken;
pub use ensemble::{estimate_ensemble, EnsembleSummary};
pub use kaplan_yorke::kaplan_yorke_dimension;
pub use lyapunov::{ExponentAccumulator, LyapunovEstimator, SpectrumEstimate};
