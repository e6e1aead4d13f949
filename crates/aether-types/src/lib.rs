// ─────────────────────────────────────────────────────────────────────
// Aether — Chaos Engine Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy shared by the
//! Aether chaotic-state evolution engine.

pub mod config;
pub mod error;
pub mod state;

pub use config::{
    ClampedParams, DecisionEngineConfig, DecisionParams, MapFamily, SpectralParams,
    SpectrumParams,
};
pub use error::{ChaosError, ChaosResult};
pub use state::{clip_coordinate, StateVector};
