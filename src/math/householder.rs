//! Householder QR factorization with explicit reflectors.
//!
//! Storage follows the compact LAPACK/GSL layout:
//!
//! - `R` lives in the upper triangle of the factored matrix
//! - the tail of reflector `j` (entries below the diagonal) lives in column `j`
//! - `tau[j]` scales the reflector, `H_j = I - tau_j * v_j * v_jᵗ` with `v_j[j] = 1`
//!
//! The conventional orthogonal factor is `Q = H_0 * H_1 * ... * H_{k-1}`.
//!
//! nalgebra's `QR` normalizes its reflectors and keeps them private, so the
//! null-space builder, which needs each `v_j` and `tau_j` to accumulate the full
//! square `Q`, factors through this module. Least-squares solves go through
//! nalgebra instead (see `lstsq`).

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

/// A matrix factored in place into Householder reflectors and `R`.
#[derive(Debug, Clone)]
pub struct HouseholderQr {
    qr: DMatrix<f64>,
    tau: DVector<f64>,
}

/// Factor `m` into `Q * R` with Householder reflectors.
///
/// Produces `min(rows, cols)` reflectors. A reflector whose column tail is
/// already zero gets `tau = 0` (it is the identity).
pub fn qr_factor(mut m: DMatrix<f64>) -> HouseholderQr {
    let (rows, cols) = m.shape();
    let k = rows.min(cols);
    let mut tau = DVector::<f64>::zeros(k);

    for j in 0..k {
        let t = householder_transform(&mut m, j);
        tau[j] = t;
        if t == 0.0 {
            if m[(j, j)] == 0.0 {
                warn!("qr_factor: column {j} is zero below the previous pivots (rank-deficient input)");
            } else {
                debug!("qr_factor: reflector {j} is the identity (column tail already zero)");
            }
            continue;
        }
        for col in (j + 1)..cols {
            apply_reflector_to_column(&mut m, j, t, col);
        }
    }

    HouseholderQr { qr: m, tau }
}

impl HouseholderQr {
    pub fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    pub fn reflector_count(&self) -> usize {
        self.tau.len()
    }

    /// Compact factored storage (`R` on and above the diagonal, reflector tails below).
    pub fn factored(&self) -> &DMatrix<f64> {
        &self.qr
    }

    pub fn tau(&self) -> &DVector<f64> {
        &self.tau
    }

    /// Full-length reflector vector `v_j` (zeros before `j`, `1` at `j`).
    pub fn reflector(&self, j: usize) -> DVector<f64> {
        let rows = self.nrows();
        let mut v = DVector::<f64>::zeros(rows);
        v[j] = 1.0;
        for i in (j + 1)..rows {
            v[i] = self.qr[(i, j)];
        }
        v
    }

    /// `v <- Q v`.
    pub fn apply_q(&self, v: &mut DVector<f64>) {
        for j in (0..self.reflector_count()).rev() {
            self.apply_reflector(j, v);
        }
    }

    /// Assemble the full `rows x rows` orthogonal factor by applying the
    /// reflectors to the identity.
    pub fn unpack_q(&self) -> DMatrix<f64> {
        let rows = self.nrows();
        let mut q = DMatrix::<f64>::identity(rows, rows);
        for col in 0..rows {
            let mut e = q.column(col).into_owned();
            self.apply_q(&mut e);
            q.set_column(col, &e);
        }
        q
    }

    fn apply_reflector(&self, j: usize, v: &mut DVector<f64>) {
        let t = self.tau[j];
        if t == 0.0 {
            return;
        }
        let rows = self.nrows();
        let mut w = v[j];
        for i in (j + 1)..rows {
            w += self.qr[(i, j)] * v[i];
        }
        w *= t;
        v[j] -= w;
        for i in (j + 1)..rows {
            v[i] -= w * self.qr[(i, j)];
        }
    }
}

/// Turn column `j` (rows `j..`) into a reflector; returns its `tau`.
///
/// On return `m[(j, j)] = beta` and the tail holds `v` scaled so that `v[j] = 1`.
fn householder_transform(m: &mut DMatrix<f64>, j: usize) -> f64 {
    let rows = m.nrows();
    let alpha = m[(j, j)];

    // Tail norm with the largest magnitude factored out, so entries near the
    // ends of the f64 range neither underflow nor overflow when squared.
    let scale = ((j + 1)..rows).map(|i| m[(i, j)].abs()).fold(0.0_f64, f64::max);
    if scale == 0.0 {
        return 0.0;
    }
    let mut ssq = 0.0;
    for i in (j + 1)..rows {
        let t = m[(i, j)] / scale;
        ssq += t * t;
    }
    let xnorm = scale * ssq.sqrt();

    let beta = -alpha.signum() * alpha.hypot(xnorm);
    let tau = (beta - alpha) / beta;
    let s = alpha - beta;
    for i in (j + 1)..rows {
        m[(i, j)] /= s;
    }
    m[(j, j)] = beta;
    tau
}

/// Apply reflector `j` (stored in column `j`) to column `col`, rows `j..`.
fn apply_reflector_to_column(m: &mut DMatrix<f64>, j: usize, tau: f64, col: usize) {
    let rows = m.nrows();
    let mut w = m[(j, col)];
    for i in (j + 1)..rows {
        w += m[(i, j)] * m[(i, col)];
    }
    w *= tau;
    m[(j, col)] -= w;
    for i in (j + 1)..rows {
        let vij = m[(i, j)];
        m[(i, col)] -= w * vij;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        (a - b).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
    }

    fn sample_matrix() -> DMatrix<f64> {
        DMatrix::from_row_slice(
            5,
            3,
            &[
                2.0, -1.0, 0.5, //
                1.0, 3.0, -2.0, //
                0.0, 1.0, 4.0, //
                -3.0, 0.5, 1.0, //
                1.5, -2.0, 0.0,
            ],
        )
    }

    /// `R` padded to the shape of the input, read off the compact storage.
    fn upper(qr: &HouseholderQr) -> DMatrix<f64> {
        let f = qr.factored();
        DMatrix::from_fn(f.nrows(), f.ncols(), |i, j| if i <= j { f[(i, j)] } else { 0.0 })
    }

    #[test]
    fn q_times_r_reconstructs_input() {
        let a = sample_matrix();
        let qr = qr_factor(a.clone());
        let q = qr.unpack_q();
        assert!(max_abs_diff(&(&q * upper(&qr)), &a) < 1e-12);
    }

    #[test]
    fn unpacked_q_is_orthogonal() {
        let qr = qr_factor(sample_matrix());
        let q = qr.unpack_q();
        let qtq = q.transpose() * &q;
        assert!(max_abs_diff(&qtq, &DMatrix::identity(5, 5)) < 1e-12);
    }

    #[test]
    fn reflector_has_unit_pivot_and_leading_zeros() {
        let qr = qr_factor(sample_matrix());
        let v = qr.reflector(1);
        assert_eq!(v.len(), 5);
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 1.0);
        assert_eq!(v[2], qr.factored()[(2, 1)]);
    }

    #[test]
    fn zero_column_gets_identity_reflector() {
        let a = DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
        let qr = qr_factor(a);
        assert_eq!(qr.tau()[0], 0.0);
        assert_eq!(qr.factored()[(0, 0)], 0.0);
        assert!(qr.tau()[1] != 0.0);
    }

    fn assert_scaled_column_factors(scale: f64) {
        // [1, 2, 2] has norm 3, so |R00| = 3 * scale.
        let a = DMatrix::from_row_slice(3, 1, &[scale, 2.0 * scale, 2.0 * scale]);
        let qr = qr_factor(a.clone());

        assert!(qr.tau()[0] > 0.0, "tau = {}", qr.tau()[0]);
        let r00 = qr.factored()[(0, 0)];
        assert!(r00.is_finite());
        assert!((r00.abs() / (3.0 * scale) - 1.0).abs() < 1e-14, "r00 = {r00:e}");

        let q = qr.unpack_q();
        assert!(max_abs_diff(&(q.transpose() * &q), &DMatrix::identity(3, 3)) < 1e-14);
        let rebuilt = &q * upper(&qr);
        assert!(max_abs_diff(&rebuilt, &a) / scale < 1e-14);
    }

    #[test]
    fn tiny_column_does_not_underflow() {
        assert_scaled_column_factors(1e-170);
    }

    #[test]
    fn huge_column_does_not_overflow() {
        assert_scaled_column_factors(1e160);
    }
}
