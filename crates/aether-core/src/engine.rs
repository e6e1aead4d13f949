// ─────────────────────────────────────────────────────────────────────
// Aether — Decision Engine Facade
// ─────────────────────────────────────────────────────────────────────
//! One evolution stream selected by configuration.
//!
//! The facade owns a boxed `ChaoticMap` for stepping and a boxed
//! `DecisionExtractor` for reduction. Spectrum estimation builds its own
//! `SpectralDelayMap` from the same parameters and seed, so certifying a
//! configuration never disturbs the live decision stream.

use aether_dynamics::{
    ChaoticMap, ClampedDelayEngine, EngineSeed, SpectralDelayEngine, SpectralDelayMap,
};
use aether_spectrum::{
    estimate_ensemble, CancelToken, EnsembleSummary, LyapunovEstimator, SpectrumEstimate,
};
use aether_types::{
    ChaosError, ChaosResult, DecisionEngineConfig, MapFamily, SpectrumParams, StateVector,
};

use crate::decision::{DecisionExtractor, ModularMagnitude};

pub struct DecisionEngine {
    config: DecisionEngineConfig,
    seed: EngineSeed,
    map: Box<dyn ChaoticMap>,
    extractor: Box<dyn DecisionExtractor>,
}

impl DecisionEngine {
    /// Validate `config` and build the engine. Without a seed the wall
    /// clock is used, so the stream differs run to run.
    pub fn from_config(
        config: DecisionEngineConfig,
        seed: Option<EngineSeed>,
    ) -> ChaosResult<Self> {
        config.validate()?;
        let seed = seed.unwrap_or_else(EngineSeed::from_clock);

        let map: Box<dyn ChaoticMap> = match &config.family {
            MapFamily::Clamped(p) => Box::new(ClampedDelayEngine::new(p.clone(), &seed)?),
            MapFamily::Spectral(p) => Box::new(SpectralDelayEngine::new(p.clone(), &seed)?),
        };
        let extractor = Box::new(ModularMagnitude::new(&config.decision));

        log::debug!(
            "decision engine: family={} modulus={} seed={seed:?}",
            config.family.name(),
            config.decision.modulus
        );
        Ok(Self {
            config,
            seed,
            map,
            extractor,
        })
    }

    /// Replace the default magnitude extractor.
    pub fn with_extractor(mut self, extractor: Box<dyn DecisionExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn config(&self) -> &DecisionEngineConfig {
        &self.config
    }

    pub fn seed(&self) -> &EngineSeed {
        &self.seed
    }

    pub fn family(&self) -> &'static str {
        self.map.family()
    }

    pub fn modulus(&self) -> u32 {
        self.config.decision.modulus
    }

    pub fn steps_taken(&self) -> u64 {
        self.map.steps_taken()
    }

    pub fn snapshot(&self) -> StateVector {
        self.map.snapshot()
    }

    /// Advance one tick and return a decision in `[0, K)`.
    ///
    /// The clamped family never fails here; the spectral family reports
    /// `NumericalDivergence` if its state leaves the finite range.
    pub fn decide(&mut self) -> ChaosResult<u32> {
        let live = self.map.advance()?;
        Ok(self.extractor.extract(live) % self.config.decision.modulus)
    }

    /// Advance `steps` ticks, returning every post-step state in order.
    pub fn trajectory(&mut self, steps: usize) -> ChaosResult<Vec<StateVector>> {
        let mut out = Vec::with_capacity(steps);
        for _ in 0..steps {
            self.map.advance()?;
            out.push(self.map.snapshot());
        }
        Ok(out)
    }

    fn spectral_map(&self) -> ChaosResult<SpectralDelayMap> {
        match &self.config.family {
            MapFamily::Spectral(p) => SpectralDelayMap::new(p.clone()),
            MapFamily::Clamped(_) => Err(ChaosError::Configuration(
                "spectrum estimation requires the spectral family; the clamped map has no Jacobian"
                    .to_string(),
            )),
        }
    }

    /// Lyapunov spectrum and Kaplan–Yorke dimension of the configured map,
    /// started from this engine's seed.
    pub fn estimate_spectrum(
        &self,
        params: &SpectrumParams,
        cancel: Option<&CancelToken>,
    ) -> ChaosResult<SpectrumEstimate> {
        let map = self.spectral_map()?;
        let mut estimator = LyapunovEstimator::new(&map, params.clone())?;
        estimator.estimate(&self.seed, cancel)
    }

    /// Independent spectrum estimates from several seeds, in parallel.
    pub fn estimate_spectrum_ensemble(
        &self,
        params: &SpectrumParams,
        seeds: &[EngineSeed],
        cancel: Option<&CancelToken>,
    ) -> ChaosResult<EnsembleSummary> {
        let map = self.spectral_map()?;
        estimate_ensemble(&map, params, seeds, cancel)
    }
}

impl std::fmt::Debug for DecisionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionEngine")
            .field("family", &self.map.family())
            .field("steps", &self.map.steps_taken())
            .field("modulus", &self.config.decision.modulus)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::ExternalExtractor;
    use crate::uniformity::{monobit_balance, DecisionHistogram};
    use aether_types::{ClampedParams, DecisionParams, SpectralParams};

    fn clamped(seed: &[u64]) -> DecisionEngine {
        DecisionEngine::from_config(
            DecisionEngineConfig::default(),
            Some(EngineSeed::Integers(seed.to_vec())),
        )
        .unwrap()
    }

    #[test]
    fn test_decisions_in_range() {
        let mut e = clamped(&[1, 2, 3]);
        for _ in 0..10_000 {
            let d = e.decide().unwrap();
            assert!(d < 4, "decision {d} out of range");
        }
        assert_eq!(e.steps_taken(), 10_000);
    }

    #[test]
    fn test_decisions_in_range_other_modulus() {
        let mut cfg = DecisionEngineConfig::default();
        cfg.decision.modulus = 7;
        let mut e = DecisionEngine::from_config(cfg, Some(EngineSeed::from(99))).unwrap();
        for _ in 0..10_000 {
            assert!(e.decide().unwrap() < 7);
        }
    }

    #[test]
    fn test_first_decision() {
        // First step from [1, 2, 3]: |x|+|y|+|z| = 2.157936 → 2157 mod 4 = 1
        let mut e = clamped(&[1, 2, 3]);
        assert_eq!(e.decide().unwrap(), 1);
    }

    #[test]
    fn test_million_decisions_near_uniform() {
        let mut e = clamped(&[1, 2, 3]);
        let decisions: Vec<u32> = (0..1_000_000).map(|_| e.decide().unwrap()).collect();
        let mut hist = DecisionHistogram::new(4).unwrap();
        hist.record_all(&decisions).unwrap();
        let report = hist.evaluate(0.001).unwrap();
        assert!(report.uniform, "chi2={} critical={}", report.chi_square, report.critical);
        for f in hist.frequencies() {
            assert!((f - 0.25).abs() < 0.005, "frequency {f}");
        }
        assert!(monobit_balance(&decisions).unwrap().balanced);
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = clamped(&[9, 8, 7]);
        let mut b = clamped(&[9, 8, 7]);
        let ta = a.trajectory(2000).unwrap();
        let tb = b.trajectory(2000).unwrap();
        assert_eq!(ta, tb);
        for _ in 0..1000 {
            assert_eq!(a.decide().unwrap(), b.decide().unwrap());
        }
    }

    #[test]
    fn test_trajectory_bounded_and_ordered() {
        let mut e = clamped(&[12345, 67890, 13579]);
        let traj = e.trajectory(20_000).unwrap();
        assert_eq!(traj.len(), 20_000);
        for (i, s) in traj.iter().enumerate() {
            assert_eq!(s.step, i as u64 + 1);
            assert!(s.max_abs() <= 10.0);
        }
    }

    #[test]
    fn test_spectral_family_decides() {
        let mut e = DecisionEngine::from_config(
            DecisionEngineConfig::spectral(SpectralParams::default()),
            Some(EngineSeed::from(42)),
        )
        .unwrap();
        assert_eq!(e.family(), "spectral");
        for _ in 0..5000 {
            assert!(e.decide().unwrap() < 4);
        }
        assert_eq!(e.snapshot().dimension(), 13);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = DecisionEngineConfig {
            decision: DecisionParams {
                modulus: 0,
                ..DecisionParams::default()
            },
            ..DecisionEngineConfig::default()
        };
        assert!(matches!(
            DecisionEngine::from_config(cfg, Some(EngineSeed::from(1))),
            Err(ChaosError::Configuration(_))
        ));

        let cfg = DecisionEngineConfig::clamped(ClampedParams {
            clip_bound: 0.0,
            ..ClampedParams::default()
        });
        assert!(DecisionEngine::from_config(cfg, Some(EngineSeed::from(1))).is_err());
    }

    #[test]
    fn test_from_json_config() {
        let cfg = DecisionEngineConfig::from_json(
            r#"{"family": {"family": "spectral", "delay_depth": 8}, "decision": {"modulus": 2}}"#,
        )
        .unwrap();
        let mut e = DecisionEngine::from_config(cfg, Some(EngineSeed::from(3))).unwrap();
        assert_eq!(e.snapshot().dimension(), 9);
        assert_eq!(e.modulus(), 2);
        assert!(e.decide().unwrap() < 2);
    }

    #[test]
    fn test_clock_seeded_engines_work() {
        let mut e = DecisionEngine::from_config(DecisionEngineConfig::default(), None).unwrap();
        assert!(e.decide().unwrap() < 4);
    }

    #[test]
    fn test_custom_extractor_reduced_modulo_k() {
        let mut e = clamped(&[1, 2, 3]).with_extractor(Box::new(ExternalExtractor::new(|_| 13)));
        assert_eq!(e.decide().unwrap(), 1);
    }

    #[test]
    fn test_estimate_spectrum_requires_spectral_family() {
        let e = clamped(&[1, 2, 3]);
        let r = e.estimate_spectrum(&SpectrumParams::new(100, 10), None);
        assert!(matches!(r, Err(ChaosError::Configuration(_))));
    }

    #[test]
    fn test_estimate_spectrum_spectral() {
        let mut e = DecisionEngine::from_config(
            DecisionEngineConfig::spectral(SpectralParams::default()),
            Some(EngineSeed::from(42)),
        )
        .unwrap();
        e.decide().unwrap();
        let est = e.estimate_spectrum(&SpectrumParams::new(2000, 500), None).unwrap();
        assert_eq!(est.exponents.len(), 13);
        assert!(est.exponents.windows(2).all(|w| w[0] >= w[1]));
        assert!(est.is_chaotic());
        // Estimation does not advance the live stream.
        assert_eq!(e.steps_taken(), 1);
    }

    #[test]
    fn test_cancelled_estimation() {
        let e = DecisionEngine::from_config(
            DecisionEngineConfig::spectral(SpectralParams::default()),
            Some(EngineSeed::from(1)),
        )
        .unwrap();
        let token = CancelToken::new();
        token.cancel();
        let r = e.estimate_spectrum(&SpectrumParams::default(), Some(&token));
        assert!(matches!(r, Err(ChaosError::Cancelled { .. })));
    }
}
