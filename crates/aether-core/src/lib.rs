// ─────────────────────────────────────────────────────────────────────
// Aether — Hyperchaotic Decision Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration-driven decision engine on top of the chaotic maps.
//!
//! A `DecisionEngine` owns one evolution stream. Each `decide()` advances
//! it by one tick and reduces the post-step live coordinates to an integer
//! in `[0, K)`. Downstream, a `LayerDispatcher` turns that integer into a
//! named layer, and `uniformity` checks how evenly decisions spread.
//!
//! # Invariants
//!
//! 1. **Decisions are always in range**: the extractor output is reduced
//!    modulo `K` by the engine, whatever extractor is plugged in.
//!
//! 2. **Same seed, same stream**: two engines built from equal configs
//!    and equal seeds produce bit-identical trajectories and decisions.
//!
//! 3. **Configuration is validated before the first step**: an invalid
//!    config never yields a half-built engine.

pub mod decision;
pub mod dispatch;
pub mod engine;
pub mod uniformity;

pub use decision::{DecisionExtractor, ExternalExtractor, ModularMagnitude};
pub use dispatch::{LayerDispatcher, LAYER_NAMES};
pub use engine::DecisionEngine;
pub use uniformity::{
    chi_square_critical, chi_square_statistic, monobit_balance, DecisionHistogram,
    MonobitReport, UniformityReport,
};
