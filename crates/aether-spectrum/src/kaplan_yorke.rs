// ─────────────────────────────────────────────────────────────────────
// Aether — Kaplan–Yorke Dimension
// ─────────────────────────────────────────────────────────────────────

use aether_types::{ChaosError, ChaosResult};

/// Kaplan–Yorke (Lyapunov) dimension of a descending spectrum.
///
/// `j` is the first index at which the cumulative sum turns negative;
/// the result is `j + S_{j-1} / |λ_j|` with `S_{j-1} = λ_0 + … + λ_{j-1}`.
/// A spectrum whose first exponent is already negative has dimension 0.
///
/// Errors:
/// - `Validation` for an empty, unsorted, or non-finite spectrum.
/// - `DegenerateSpectrum` when the cumulative sum never turns negative
///   (no dissipation, dimension undefined).
pub fn kaplan_yorke_dimension(exponents: &[f64]) -> ChaosResult<f64> {
    if exponents.is_empty() {
        return Err(ChaosError::Validation("empty spectrum".to_string()));
    }
    if let Some(i) = exponents.iter().position(|v| !v.is_finite()) {
        return Err(ChaosError::Validation(format!(
            "exponent {i} is not finite: {}",
            exponents[i]
        )));
    }
    if exponents.windows(2).any(|w| w[0] < w[1]) {
        return Err(ChaosError::Validation(
            "spectrum must be sorted in non-increasing order".to_string(),
        ));
    }

    let mut cumulative = 0.0;
    for (j, &lambda) in exponents.iter().enumerate() {
        if cumulative + lambda < 0.0 {
            return Ok(j as f64 + cumulative / lambda.abs());
        }
        cumulative += lambda;
    }

    Err(ChaosError::DegenerateSpectrum {
        reason: format!(
            "cumulative exponent sum stays non-negative ({cumulative:.6}) over all {} exponents",
            exponents.len()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_exponents() {
        let d = kaplan_yorke_dimension(&[0.5, -0.3, -0.9]).unwrap();
        assert!((d - (2.0 + 0.2 / 0.9)).abs() < 1e-12, "d={d}");
    }

    #[test]
    fn test_henon_like() {
        // λ = (0.42, −1.62): D = 1 + 0.42 / 1.62
        let d = kaplan_yorke_dimension(&[0.42, -1.62]).unwrap();
        assert!((d - 1.259_259_259).abs() < 1e-6);
    }

    #[test]
    fn test_all_negative_is_zero() {
        assert_eq!(kaplan_yorke_dimension(&[-0.1, -0.5]).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_exponent_counts_as_full_direction() {
        // Cumulative 0.0 is not negative, so the flow direction is counted.
        let d = kaplan_yorke_dimension(&[0.0, -1.0]).unwrap();
        assert_eq!(d, 1.0);
    }

    #[test]
    fn test_no_dissipation_is_degenerate() {
        let r = kaplan_yorke_dimension(&[0.3, 0.1, -0.2]);
        assert!(matches!(r, Err(ChaosError::DegenerateSpectrum { .. })), "{r:?}");
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            kaplan_yorke_dimension(&[]),
            Err(ChaosError::Validation(_))
        ));
        assert!(matches!(
            kaplan_yorke_dimension(&[-0.5, 0.1]),
            Err(ChaosError::Validation(_))
        ));
        assert!(matches!(
            kaplan_yorke_dimension(&[0.1, f64::NAN]),
            Err(ChaosError::Validation(_))
        ));
    }
}
