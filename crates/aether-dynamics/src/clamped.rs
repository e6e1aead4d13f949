// ─────────────────────────────────────────────────────────────────────
// Aether — Clamped Delay Engine
// ─────────────────────────────────────────────────────────────────────
//! Delay-buffered piecewise-linear 3-coordinate map:
//!
//!   x' = 1 − α|x| + β·y + γ·z_d
//!   y' = 1 − α|y| + β·z + γ·x_d
//!   z' = 1 − α|z| + β·x + γ·y_d
//!
//! `(x_d, y_d, z_d)` is the triple at the ring read index (initially zero).
//! Every new coordinate is clipped to `[-clip, clip]`, so the state space
//! is a compact cube and this engine never reports divergence.
//!
//! The ring buffer is allocated once at construction; stepping performs
//! no allocation.

use aether_types::{clip_coordinate, ChaosError, ChaosResult, ClampedParams, StateVector};

use crate::map::ChaoticMap;
use crate::seed::EngineSeed;

pub const LIVE_WIDTH: usize = 3;

/// Stateful clamped delay engine (one evolution stream).
#[derive(Debug, Clone)]
pub struct ClampedDelayEngine {
    params: ClampedParams,
    live: [f64; LIVE_WIDTH],
    ring: Vec<[f64; LIVE_WIDTH]>,
    cursor: usize,
    steps: u64,
}

impl ClampedDelayEngine {
    /// Build from validated parameters and a seed.
    ///
    /// Integer seeds map word `i` to `(w mod 10000) / 5000 − 1`; float seeds
    /// are taken verbatim (missing coordinates are zero).
    pub fn new(params: ClampedParams, seed: &EngineSeed) -> ChaosResult<Self> {
        params.validate()?;
        let live = match seed {
            EngineSeed::Integers(_) => {
                let words = seed.words(LIVE_WIDTH);
                let mut live = [0.0; LIVE_WIDTH];
                for (slot, w) in live.iter_mut().zip(words) {
                    *slot = (w % 10_000) as f64 / 5000.0 - 1.0;
                }
                live
            }
            EngineSeed::Floats(values) => {
                if values.len() > LIVE_WIDTH {
                    return Err(ChaosError::Configuration(format!(
                        "clamped engine takes at most {LIVE_WIDTH} seed coordinates, got {}",
                        values.len()
                    )));
                }
                let mut live = [0.0; LIVE_WIDTH];
                for (i, &v) in values.iter().enumerate() {
                    if !v.is_finite() || v.abs() > params.clip_bound {
                        return Err(ChaosError::Configuration(format!(
                            "seed coordinate {i} = {v} outside [-{0}, {0}]",
                            params.clip_bound
                        )));
                    }
                    live[i] = v;
                }
                live
            }
        };
        log::debug!(
            "clamped engine: depth={} clip={} initial={live:?}",
            params.delay_depth,
            params.clip_bound
        );
        Ok(Self {
            ring: vec![[0.0; LIVE_WIDTH]; params.delay_depth],
            params,
            live,
            cursor: 0,
            steps: 0,
        })
    }

    pub fn params(&self) -> &ClampedParams {
        &self.params
    }

    /// Current live triple.
    pub fn current(&self) -> [f64; LIVE_WIDTH] {
        self.live
    }

    /// Triple the next step will read as its delayed input.
    pub fn delayed(&self) -> [f64; LIVE_WIDTH] {
        self.ring[self.cursor]
    }

    /// Ring read index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Advance one tick and return the new triple.
    pub fn step(&mut self) -> [f64; LIVE_WIDTH] {
        let p = &self.params;
        let [x, y, z] = self.live;
        let [x_d, y_d, z_d] = self.ring[self.cursor];

        let next = [
            clip_coordinate(
                p.offset - p.alpha * x.abs() + p.beta * y + p.gamma * z_d,
                p.clip_bound,
            ),
            clip_coordinate(
                p.offset - p.alpha * y.abs() + p.beta * z + p.gamma * x_d,
                p.clip_bound,
            ),
            clip_coordinate(
                p.offset - p.alpha * z.abs() + p.beta * x + p.gamma * y_d,
                p.clip_bound,
            ),
        ];

        // Pre-step triple enters the history.
        self.ring[self.cursor] = self.live;
        self.cursor = (self.cursor + 1) % self.ring.len();

        self.live = next;
        self.steps += 1;
        next
    }

    /// Run `steps` ticks, collecting each post-step state.
    pub fn trajectory(&mut self, steps: usize) -> Vec<StateVector> {
        (0..steps)
            .map(|_| {
                let coords = self.step();
                StateVector {
                    coords: coords.to_vec(),
                    step: self.steps,
                }
            })
            .collect()
    }
}

impl ChaoticMap for ClampedDelayEngine {
    fn family(&self) -> &'static str {
        "clamped"
    }

    fn dimension(&self) -> usize {
        LIVE_WIDTH
    }

    fn advance(&mut self) -> ChaosResult<&[f64]> {
        self.step();
        Ok(&self.live[..])
    }

    fn live(&self) -> &[f64] {
        &self.live
    }

    fn snapshot(&self) -> StateVector {
        StateVector {
            coords: self.live.to_vec(),
            step: self.steps,
        }
    }

    fn steps_taken(&self) -> u64 {
        self.steps
    }
}
