// ─────────────────────────────────────────────────────────────────────
// Aether — Tangent-Space Linear Algebra
// ─────────────────────────────────────────────────────────────────────
//! Dense n×n helpers on row-major slices. No allocation: every routine
//! writes into caller-provided scratch.

/// Write the identity into `m`.
pub fn identity_into(m: &mut [f64], n: usize) {
    for i in 0..n {
        for j in 0..n {
            m[i * n + j] = if i == j { 1.0 } else { 0.0 };
        }
    }
}

/// `out = a · b`.
pub fn matmul_into(a: &[f64], b: &[f64], out: &mut [f64], n: usize) {
    out[..n * n].iter_mut().for_each(|v| *v = 0.0);
    for i in 0..n {
        for k in 0..n {
            let aik = a[i * n + k];
            if aik == 0.0 {
                continue;
            }
            for j in 0..n {
                out[i * n + j] += aik * b[k * n + j];
            }
        }
    }
}

/// Modified Gram–Schmidt QR, in place.
///
/// On return `a` holds `Q` (orthonormal columns) and `r_diag[j] = R[j][j]`
/// (non-negative). A column whose residual norm is zero is left zero and
/// reports `R[j][j] = 0`.
pub fn qr_in_place(a: &mut [f64], n: usize, r_diag: &mut [f64]) {
    for j in 0..n {
        let mut norm_sq = 0.0;
        for i in 0..n {
            norm_sq += a[i * n + j] * a[i * n + j];
        }
        let norm = norm_sq.sqrt();
        r_diag[j] = norm;
        if norm > 0.0 {
            let inv = 1.0 / norm;
            for i in 0..n {
                a[i * n + j] *= inv;
            }
        }

        // Remove the new direction from the remaining columns.
        for col in (j + 1)..n {
            let mut dot = 0.0;
            for i in 0..n {
                dot += a[i * n + j] * a[i * n + col];
            }
            for i in 0..n {
                a[i * n + col] -= dot * a[i * n + j];
            }
        }
    }
}

/// Largest `|QᵀQ − I|` entry.
pub fn orthonormality_error(q: &[f64], n: usize) -> f64 {
    let mut worst = 0.0f64;
    for p in 0..n {
        for r in 0..n {
            let mut dot = 0.0;
            for i in 0..n {
                dot += q[i * n + p] * q[i * n + r];
            }
            let target = if p == r { 1.0 } else { 0.0 };
            worst = worst.max((dot - target).abs());
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: usize) -> Vec<f64> {
        (0..n * n)
            .map(|i| ((i as f64) * 0.37 + 0.1).sin() + if i % (n + 1) == 0 { 2.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_identity() {
        let mut m = vec![5.0; 9];
        identity_into(&mut m, 3);
        assert_eq!(m, vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_matmul_small() {
        let a = [1.0, 2.0, 3.0, 4.0];
        let b = [5.0, 6.0, 7.0, 8.0];
        let mut out = [0.0; 4];
        matmul_into(&a, &b, &mut out, 2);
        assert_eq!(out, [19.0, 22.0, 43.0, 50.0]);
    }

    #[test]
    fn test_qr_orthonormal() {
        let n = 6;
        let mut a = sample(n);
        let mut r = vec![0.0; n];
        qr_in_place(&mut a, n, &mut r);
        assert!(orthonormality_error(&a, n) < 1e-12);
        assert!(r.iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_qr_diagonal_product_is_abs_determinant() {
        // Upper-triangular input: |det| = product of |diagonal|.
        let n = 3;
        let mut a = vec![2.0, 1.0, 4.0, 0.0, -3.0, 5.0, 0.0, 0.0, 0.5];
        let mut r = vec![0.0; n];
        qr_in_place(&mut a, n, &mut r);
        let prod: f64 = r.iter().product();
        assert!((prod - 3.0).abs() < 1e-12, "prod={prod}");
    }

    #[test]
    fn test_qr_reconstructs_first_column() {
        let n = 4;
        let orig = sample(n);
        let mut q = orig.clone();
        let mut r = vec![0.0; n];
        qr_in_place(&mut q, n, &mut r);
        // Column 0 of A equals R[0][0] · q_0.
        for i in 0..n {
            assert!((orig[i * n] - r[0] * q[i * n]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_qr_zero_column() {
        let n = 2;
        let mut a = vec![1.0, 0.0, 0.0, 0.0];
        let mut r = vec![0.0; n];
        qr_in_place(&mut a, n, &mut r);
        assert_eq!(r, vec![1.0, 0.0]);
        assert!(a.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_qr_of_orthonormal_is_stable() {
        let n = 5;
        let mut q = sample(n);
        let mut r = vec![0.0; n];
        qr_in_place(&mut q, n, &mut r);
        let before = q.clone();
        qr_in_place(&mut q, n, &mut r);
        for (a, b) in q.iter().zip(&before) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(r.iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}
