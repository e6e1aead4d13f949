// ─────────────────────────────────────────────────────────────────────
// Aether — Engine Configuration
// ─────────────────────────────────────────────────────────────────────
//! Immutable parameters selected at construction.
//!
//! Two recurrence families are supported and are not convertible into
//! one another:
//!   - `clamped`: 3-coordinate piecewise-linear map with a ring-buffered
//!     delay and a hard clip (drives decisions).
//!   - `spectral`: smooth delay-coupled scalar map whose history lives in
//!     the state vector itself (drives Lyapunov analysis).
//!
//! All structs validate eagerly; nothing is stepped until `validate()`
//! has passed.

use serde::{Deserialize, Serialize};

use crate::error::{ChaosError, ChaosResult};

/// Delay tap feeding the product term `0.27·x·x_{t-4}`.
pub const PRODUCT_TAP: usize = 4;
/// Gain of the product term.
pub const PRODUCT_GAIN: f64 = 0.27;
/// Delay tap feeding the absolute-value term `−0.11·|x_{t-6}|`.
pub const ABS_TAP: usize = 6;
/// Gain of the absolute-value term.
pub const ABS_GAIN: f64 = -0.11;

/// Coefficients of the delay-buffered piecewise-linear map.
///
/// ```text
/// x' = offset − alpha·|x| + beta·y + gamma·z_delayed
/// ```
/// (and cyclically for y, z), clipped to `[-clip_bound, clip_bound]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClampedParams {
    pub offset: f64,
    /// Self gain on the absolute value of the own coordinate.
    pub alpha: f64,
    /// Cross gain from the cyclically next coordinate.
    pub beta: f64,
    /// Gain on the delayed coordinate read from the ring buffer.
    pub gamma: f64,
    /// Ring buffer length.
    pub delay_depth: usize,
    pub clip_bound: f64,
}

/// Self gain `alpha = 1.4`, not the nominal `1.7`: with `1.7` every
/// trajectory collapses onto the clip corner `(-10, -10, -10)` within a
/// few steps and decisions stop varying. Use [`ClampedParams::nominal`]
/// for the `1.7` set.
impl Default for ClampedParams {
    fn default() -> Self {
        Self {
            offset: 1.0,
            alpha: 1.4,
            beta: 0.32,
            gamma: 0.08,
            delay_depth: 10,
            clip_bound: 10.0,
        }
    }
}

impl ClampedParams {
    /// The nominal `alpha = 1.7` coefficient set.
    ///
    /// Trajectories leave the folded region within a handful of steps and
    /// settle on the clip corner `(-clip, -clip, -clip)`. Still bounded.
    pub fn nominal() -> Self {
        Self {
            alpha: 1.7,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChaosResult<()> {
        for (name, v) in [
            ("offset", self.offset),
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !v.is_finite() {
                return Err(ChaosError::Configuration(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        if self.delay_depth < 1 {
            return Err(ChaosError::Configuration(format!(
                "delay_depth must be >= 1, got {}",
                self.delay_depth
            )));
        }
        if !(self.clip_bound.is_finite() && self.clip_bound > 0.0) {
            return Err(ChaosError::Configuration(format!(
                "clip_bound must be finite and > 0, got {}",
                self.clip_bound
            )));
        }
        Ok(())
    }
}

/// Coefficients of the smooth delay-coupled map.
///
/// ```text
/// x' = a·sin(b·x) + c·tanh(d·x_{t-k}) + 0.27·x·x_{t-4} − 0.11·|x_{t-6}|
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    /// `k`: the state vector has `1 + k` coordinates.
    pub delay_depth: usize,
    /// Half-width of the uniform box used for pseudo-random initial states.
    pub init_amplitude: f64,
}

impl Default for SpectralParams {
    fn default() -> Self {
        Self {
            a: 0.45,
            b: 6.0,
            c: 0.22,
            d: 1.2,
            delay_depth: 12,
            init_amplitude: 0.5,
        }
    }
}

impl SpectralParams {
    /// State dimension `1 + k`.
    pub fn dimension(&self) -> usize {
        1 + self.delay_depth
    }

    pub fn validate(&self) -> ChaosResult<()> {
        for (name, v) in [("a", self.a), ("b", self.b), ("c", self.c), ("d", self.d)] {
            if !v.is_finite() {
                return Err(ChaosError::Configuration(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        if self.delay_depth < 1 {
            return Err(ChaosError::Configuration(format!(
                "delay_depth must be >= 1, got {}",
                self.delay_depth
            )));
        }
        if self.delay_depth < ABS_TAP {
            return Err(ChaosError::Configuration(format!(
                "delay_depth must be >= {ABS_TAP} to hold the x_(t-{ABS_TAP}) tap, got {}",
                self.delay_depth
            )));
        }
        if !(self.init_amplitude.is_finite() && self.init_amplitude > 0.0) {
            return Err(ChaosError::Configuration(format!(
                "init_amplitude must be finite and > 0, got {}",
                self.init_amplitude
            )));
        }
        Ok(())
    }
}

/// Recurrence family selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum MapFamily {
    Clamped(ClampedParams),
    Spectral(SpectralParams),
}

impl Default for MapFamily {
    fn default() -> Self {
        MapFamily::Clamped(ClampedParams::default())
    }
}

impl MapFamily {
    pub fn validate(&self) -> ChaosResult<()> {
        match self {
            MapFamily::Clamped(p) => p.validate(),
            MapFamily::Spectral(p) => p.validate(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MapFamily::Clamped(_) => "clamped",
            MapFamily::Spectral(_) => "spectral",
        }
    }
}

/// Mapping from state magnitude to a decision integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionParams {
    /// Multiplier applied to the summed magnitude before truncation.
    pub scale: f64,
    /// `K`: decisions fall in `[0, K)`.
    pub modulus: u32,
}

impl Default for DecisionParams {
    fn default() -> Self {
        Self {
            scale: 1000.0,
            modulus: 4,
        }
    }
}

impl DecisionParams {
    pub fn validate(&self) -> ChaosResult<()> {
        if self.modulus == 0 {
            return Err(ChaosError::Configuration(
                "decision modulus must be > 0".to_string(),
            ));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ChaosError::Configuration(format!(
                "decision scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        Ok(())
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionEngineConfig {
    pub family: MapFamily,
    pub decision: DecisionParams,
}

impl DecisionEngineConfig {
    pub fn clamped(params: ClampedParams) -> Self {
        Self {
            family: MapFamily::Clamped(params),
            decision: DecisionParams::default(),
        }
    }

    pub fn spectral(params: SpectralParams) -> Self {
        Self {
            family: MapFamily::Spectral(params),
            decision: DecisionParams::default(),
        }
    }

    pub fn validate(&self) -> ChaosResult<()> {
        self.family.validate()?;
        self.decision.validate()
    }

    /// Load from JSON string and validate.
    pub fn from_json(json: &str) -> ChaosResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ChaosError::Configuration(format!("JSON parse error: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Parameters of one Lyapunov spectrum estimation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumParams {
    /// Main iterations accumulated into the exponents.
    pub total_steps: u64,
    /// Iterations discarded before the tangent basis is initialised.
    pub transient_steps: u64,
    /// Extra QR pass on the tangent basis every this many steps.
    pub reorthonormalize_every: u64,
    /// Floor `ε` in `log(|R_ii| + ε)`.
    pub log_floor: f64,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            total_steps: 10_000,
            transient_steps: 1_000,
            reorthonormalize_every: 25,
            log_floor: 1e-12,
        }
    }
}

impl SpectrumParams {
    pub fn new(total_steps: u64, transient_steps: u64) -> Self {
        Self {
            total_steps,
            transient_steps,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ChaosResult<()> {
        if self.total_steps == 0 {
            return Err(ChaosError::Configuration(
                "total_steps must be > 0".to_string(),
            ));
        }
        if self.reorthonormalize_every == 0 {
            return Err(ChaosError::Configuration(
                "reorthonormalize_every must be > 0".to_string(),
            ));
        }
        if !(self.log_floor.is_finite() && self.log_floor > 0.0) {
            return Err(ChaosError::Configuration(format!(
                "log_floor must be finite and > 0, got {}",
                self.log_floor
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> ChaosResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| ChaosError::Configuration(format!("JSON parse error: {e}")))?;
        params.validate()?;
        Ok(params)
    }
}
