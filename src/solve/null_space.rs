//! Orthogonal basis adapted to a set of homogeneous equality constraints.
//!
//! For a `k x n` constraint matrix `C` (one constraint `row · x = 0` per row)
//! we factor `Cᵗ = Q R` and return the full `n x n` factor `Q`:
//!
//! - columns `0..k` span the constraint normals (row space of `C`)
//! - columns `k..n` span the null space of `C`
//!
//! `Q` is rebuilt from the Householder representation by explicit
//! accumulation of the elementary reflectors, `H_j = I - tau_j v_j v_jᵗ`.

use log::debug;
use nalgebra::DMatrix;

use crate::error::AppError;
use crate::math::qr_factor;

/// Build the `n x n` orthogonal basis for constraint matrix `c` (`k x n`).
///
/// An empty constraint matrix (`k = 0`) yields the identity. The constraint
/// rows are assumed linearly independent.
pub fn build_null_space_basis(c: &DMatrix<f64>) -> Result<DMatrix<f64>, AppError> {
    let (k, n) = c.shape();
    if k > n {
        return Err(AppError::dimension(format!(
            "{k} constraints exceed the {n} unknowns they constrain"
        )));
    }
    debug!("build_null_space_basis: {k} constraints over {n} unknowns");

    // Each constraint becomes a column; R is not needed, only the reflectors.
    let qr = qr_factor(c.transpose());

    let identity = DMatrix::<f64>::identity(n, n);
    let mut q = identity.clone();
    for j in (0..qr.reflector_count()).rev() {
        let v = qr.reflector(j);
        let h = &identity - (&v * v.transpose()) * qr.tau()[j];
        q = &q * &h;
    }

    // The loop composed H_k ... H_1, i.e. the transpose of Q in Cᵗ = Q R.
    Ok(q.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::solve::test_support::{max_abs, random_matrix};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn basis_is_orthogonal() {
        let mut rng = StdRng::seed_from_u64(3);
        for &(k, n) in &[(1, 2), (1, 4), (2, 6), (3, 8), (5, 10), (4, 4)] {
            let c = random_matrix(&mut rng, k, n);
            let q = build_null_space_basis(&c).unwrap();
            assert_eq!(q.shape(), (n, n));
            let err = max_abs(&(q.transpose() * &q - DMatrix::identity(n, n)));
            assert!(err < 1e-12, "k={k} n={n}: |QᵗQ - I| = {err:e}");
        }
    }

    #[test]
    fn trailing_columns_span_the_null_space() {
        let mut rng = StdRng::seed_from_u64(5);
        let (k, n) = (3, 7);
        let c = random_matrix(&mut rng, k, n);
        let q = build_null_space_basis(&c).unwrap();

        let free = q.columns(k, n - k);
        assert!(max_abs(&(&c * free)) < 1e-12);

        // The leading block carries every constraint normal.
        let lead = q.columns(0, k);
        let projected = &lead * (lead.transpose() * c.transpose());
        assert!(max_abs(&(projected - c.transpose())) < 1e-12);
    }

    #[test]
    fn explicit_accumulation_matches_reflector_assembly() {
        let mut rng = StdRng::seed_from_u64(9);
        let c = random_matrix(&mut rng, 2, 6);
        let q = build_null_space_basis(&c).unwrap();
        let assembled = qr_factor(c.transpose()).unpack_q();
        assert!(max_abs(&(q - assembled)) < 1e-13);
    }

    #[test]
    fn paired_constraint_ties_first_and_third_unknown() {
        let c = DMatrix::from_row_slice(1, 4, &[1.0, 0.0, -1.0, 0.0]);
        let q = build_null_space_basis(&c).unwrap();

        // First basis vector is the normalised constraint normal (up to sign).
        let s = 1.0 / 2.0_f64.sqrt();
        assert!((q[(0, 0)].abs() - s).abs() < 1e-14);
        assert!(q[(1, 0)].abs() < 1e-14);
        assert!((q[(2, 0)] + q[(0, 0)]).abs() < 1e-14);
        assert!(q[(3, 0)].abs() < 1e-14);

        for j in 1..4 {
            assert!((q[(0, j)] - q[(2, j)]).abs() < 1e-14, "column {j}");
        }
    }

    #[test]
    fn empty_constraints_give_identity() {
        let c = DMatrix::<f64>::zeros(0, 5);
        let q = build_null_space_basis(&c).unwrap();
        assert_eq!(q, DMatrix::identity(5, 5));
    }

    #[test]
    fn too_many_constraints_are_rejected() {
        let c = DMatrix::<f64>::identity(3, 2);
        let err = build_null_space_basis(&c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DimensionMismatch);
    }

    #[test]
    fn constraint_rows_at_extreme_scale_give_a_true_basis() {
        let mut rng = StdRng::seed_from_u64(13);
        let (k, n) = (2, 6);
        let unit = random_matrix(&mut rng, k, n);

        for scale in [1e-170, 1e160] {
            let c = &unit * scale;
            let q = build_null_space_basis(&c).unwrap();
            let err = max_abs(&(q.transpose() * &q - DMatrix::identity(n, n)));
            assert!(err < 1e-12, "scale {scale:e}: |QᵗQ - I| = {err:e}");

            let free = q.columns(k, n - k);
            let leak = max_abs(&(&c * free)) / max_abs(&c);
            assert!(leak < 1e-12, "scale {scale:e}: |C Q_free| / |C| = {leak:e}");
        }
    }

    #[test]
    fn tiny_paired_constraint_still_ties_unknowns() {
        let c = DMatrix::from_row_slice(1, 4, &[1e-170, 0.0, -1e-170, 0.0]);
        let q = build_null_space_basis(&c).unwrap();

        let s = 1.0 / 2.0_f64.sqrt();
        assert!((q[(0, 0)].abs() - s).abs() < 1e-14);
        for j in 1..4 {
            assert!((q[(0, j)] - q[(2, j)]).abs() < 1e-14, "column {j}");
        }
    }
}
