// ─────────────────────────────────────────────────────────────────────
// Aether — Chaotic Dynamics
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Delay-coupled chaotic maps for the Aether engine.
//!
//! Two independently named recurrence families:
//!   - `ClampedDelayEngine`: piecewise-linear 3-coordinate map with a
//!     ring-buffered delay and hard clip. Never diverges.
//!   - `SpectralDelayMap` / `SpectralDelayEngine`: smooth delay-coupled
//!     map with an analytic Jacobian. Unclipped; divergence is fatal.
//!
//! Both implement `ChaoticMap`; only the smooth family implements
//! `TangentMap`, which the spectrum estimator requires.

pub mod clamped;
pub mod map;
pub mod rng;
pub mod seed;
pub mod smooth;

pub use clamped::ClampedDelayEngine;
pub use map::{ChaoticMap, TangentMap};
pub use rng::SimpleRng;
pub use seed::{ClockSeed, EngineSeed, FixedSeed, SeedSource};
pub use smooth::{SpectralDelayEngine, SpectralDelayMap};
