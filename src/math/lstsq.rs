//! Least-squares solve on top of nalgebra's Householder `QR`.
//!
//! Columns of `A` and the right-hand side are equilibrated by their largest
//! magnitude before factoring, and the scales are folded back into `x` and the
//! residual afterwards. nalgebra forms Householder norms from plain sums of
//! squares, so without this step entries far from unit magnitude (around
//! `1e-154` and below, `1e154` and above) under- or overflow inside the
//! factorization.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Solve `min ||A x - b||` by QR. Returns `(x, residual)`, `residual = b - A x`.
///
/// The residual is taken from the factorization (`b - Q₁ Q₁ᵗ b`, the part of
/// `b` outside the column space), not from forming `A x`. `a` needs at least as
/// many rows as columns; a numerically zero pivot in `R` is a
/// `NumericalFailure`.
pub fn qr_lssolve(a: DMatrix<f64>, b: &DVector<f64>) -> Result<(DVector<f64>, DVector<f64>), AppError> {
    let (rows, cols) = a.shape();
    if b.len() != rows {
        return Err(AppError::dimension(format!(
            "right-hand side has length {} but the matrix has {rows} rows",
            b.len()
        )));
    }
    if rows < cols {
        return Err(AppError::numerical(format!(
            "least-squares solve needs at least as many rows as columns (got {rows}x{cols})"
        )));
    }
    if cols == 0 {
        return Ok((DVector::zeros(0), b.clone()));
    }

    let col_scale: Vec<f64> = a.column_iter().map(|c| unit_or(c.amax())).collect();
    let b_scale = unit_or(b.amax());

    let mut a_s = a;
    for (j, s) in col_scale.iter().enumerate() {
        a_s.column_mut(j).unscale_mut(*s);
    }
    let b_s = b.unscale(b_scale);

    let qr = a_s.qr();
    let mut qtb = b_s.clone();
    qr.q_tr_mul(&mut qtb);

    let r = qr.r();
    let pivot_max = r.diagonal().amax();
    let tol = f64::EPSILON * rows as f64 * pivot_max;
    for (i, d) in r.diagonal().iter().enumerate() {
        if !d.is_finite() || d.abs() <= tol {
            return Err(AppError::numerical(format!(
                "R factor is singular at diagonal entry {i} (|r_ii| = {:e})",
                d.abs()
            )));
        }
    }

    let c1 = qtb.rows(0, cols).into_owned();
    let y = r
        .solve_upper_triangular(&c1)
        .ok_or_else(|| AppError::numerical("triangular solve with R failed"))?;

    let x = DVector::from_fn(cols, |j, _| y[j] * b_scale / col_scale[j]);
    if x.iter().any(|v| !v.is_finite()) {
        return Err(AppError::numerical("least-squares solution is not finite"));
    }

    let residual = (b_s - qr.q() * c1) * b_scale;
    Ok((x, residual))
}

fn unit_or(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}
